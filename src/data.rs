use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::format::SHEET_DATE_FORMAT;
use crate::constants::history::STATUS_NOT_FOUND;
use crate::types::{Criterion, PedidoId, SourceName};

/// One normalized order row as loaded from a tab. Read-only for the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Pedido identifier as written in the sheet (trimmed).
    pub identifier: PedidoId,
    /// Payment forecast date; rows without a parsable date are dropped at load time.
    pub date: Option<NaiveDate>,
    /// Free-form status text.
    pub status: String,
    /// Amount in BRL.
    pub value: f64,
    /// Requesting unit.
    #[serde(default)]
    pub unit: String,
    /// Vehicle / usage text.
    #[serde(default)]
    pub vehicle: String,
    /// Supplier name.
    #[serde(default)]
    pub supplier: String,
}

impl OrderRecord {
    /// Minimal record with only the lookup-relevant fields filled.
    pub fn new(
        identifier: impl Into<PedidoId>,
        date: Option<NaiveDate>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            date,
            status: status.into(),
            value: 0.0,
            unit: String::new(),
            vehicle: String::new(),
            supplier: String::new(),
        }
    }

    /// Set the amount.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the requesting unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the vehicle / usage text.
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = vehicle.into();
        self
    }

    /// Set the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }
}

/// One per-pedido row of a filed search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Pedido as queried.
    pub identifier: PedidoId,
    /// Tab the pedido was found in; empty when not found.
    pub source: SourceName,
    /// Date of the matching record; `None` when not found.
    pub date: Option<NaiveDate>,
    /// Vehicle text from the sheet; empty when not found.
    pub vehicle: String,
    /// Sheet status, or [`STATUS_NOT_FOUND`].
    pub status: String,
}

impl ResultRow {
    /// Row for a pedido that no tab contains.
    pub fn not_found(identifier: impl Into<PedidoId>) -> Self {
        Self {
            identifier: identifier.into(),
            source: String::new(),
            date: None,
            vehicle: String::new(),
            status: STATUS_NOT_FOUND.to_string(),
        }
    }

    /// Row for a pedido found in `source`.
    pub fn found(identifier: impl Into<PedidoId>, record: &OrderRecord, source: &str) -> Self {
        Self {
            identifier: identifier.into(),
            source: source.to_string(),
            date: record.date,
            vehicle: record.vehicle.clone(),
            status: record.status.clone(),
        }
    }

    /// True unless the row carries the not-found sentinel.
    pub fn is_found(&self) -> bool {
        self.status != STATUS_NOT_FOUND
    }

    /// Date as shown in tables (`DD/MM/YYYY`), blank when missing.
    pub fn date_display(&self) -> String {
        self.date
            .map(|date| date.format(SHEET_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// A batch search filed under one criterion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Criterion the table is filed under.
    pub criterion: Criterion,
    /// One row per queried pedido, in query order.
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Number of rows whose pedido was found.
    pub fn found_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_found()).count()
    }

    /// Copy with found rows first, preserving relative order within each group.
    pub fn sorted_for_display(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|row| !row.is_found());
        Self {
            criterion: self.criterion.clone(),
            rows,
        }
    }
}
