use std::io;

use thiserror::Error;

use crate::types::{PedidoId, SourceName};

/// Error type for validation, configuration, and collaborator failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Submitted text held no pedido.
    #[error("no valid pedido found in the submitted text")]
    NoPedidos,
    /// Search attempted with the placeholder criterion.
    #[error("no search criterion selected")]
    CriterionNotSelected,
    /// Action label outside the known workflow actions.
    #[error("unknown order action '{0}'")]
    UnknownAction(String),
    /// Registration left required fields blank.
    #[error("required fields are missing: {fields:?}")]
    MissingFields {
        /// Column names of the blank fields.
        fields: Vec<String>,
    },
    /// Registration value outside the allowed list for its field.
    #[error("'{value}' is not an allowed value for {field}")]
    InvalidChoice {
        /// Column name.
        field: String,
        /// Rejected value.
        value: String,
    },
    /// Registration of a pedido the tab already holds.
    #[error("pedido '{pedido}' is already registered")]
    DuplicatePedido {
        /// Pedido as submitted.
        pedido: PedidoId,
    },
    /// Provider has no tab with this name.
    #[error("tab '{tab}' was not found")]
    MissingTab {
        /// Requested tab.
        tab: SourceName,
    },
    /// Tab header row lacks required columns.
    #[error("tab '{tab}' is missing required columns: {missing:?}")]
    MissingColumns {
        /// Offending tab.
        tab: SourceName,
        /// Required columns not found in the header row.
        missing: Vec<String>,
    },
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// True for failures caused by user input rather than data or environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoPedidos
                | Self::CriterionNotSelected
                | Self::MissingFields { .. }
                | Self::InvalidChoice { .. }
                | Self::DuplicatePedido { .. }
        )
    }
}
