//! New-order registration.
//!
//! Validates a filled-in form, rejects pedidos the target tab already holds
//! and lays the entry out as a row matching the tab's header. Writing the row
//! back is left to the sheet collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::columns;
use crate::constants::format::SHEET_DATE_FORMAT;
use crate::constants::register::{AVALIACAO_OPTIONS, STATUS_OPTIONS, UNIDADES};
use crate::errors::TrackerError;
use crate::normalize::format_amount;
use crate::source::{SheetProvider, normalize_headers, normalize_key};
use crate::types::{Cell, PedidoId};

/// A filled-in registration form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Pedido or request number.
    pub pedido: PedidoId,
    /// Payment forecast date.
    pub date: Option<NaiveDate>,
    /// Requesting unit, one of [`UNIDADES`].
    pub unit: String,
    /// Amount in BRL.
    pub value: f64,
    /// Vehicle / usage text.
    pub vehicle: String,
    /// Supplier name.
    pub supplier: String,
    /// Request status, one of [`STATUS_OPTIONS`].
    pub status: String,
    /// Evaluating area, one of [`AVALIACAO_OPTIONS`] when set.
    pub evaluation: Option<String>,
    /// Free-form notes.
    pub notes: String,
}

impl Registration {
    /// Form with the required fields filled.
    pub fn new(
        pedido: impl Into<PedidoId>,
        date: Option<NaiveDate>,
        unit: impl Into<String>,
        vehicle: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            pedido: pedido.into(),
            date,
            unit: unit.into(),
            vehicle: vehicle.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Set the amount.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    /// Set the evaluating area.
    pub fn with_evaluation(mut self, evaluation: impl Into<String>) -> Self {
        self.evaluation = Some(evaluation.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check required fields and allowed values.
    ///
    /// Blank required fields are reported together; choice fields compare
    /// after trimming and upper-casing.
    pub fn validate(&self) -> Result<(), TrackerError> {
        self.checked().map(|_| ())
    }

    /// Validate and lay the entry out against the header of `grid`.
    ///
    /// Row `header_row` holds the column names; when it is absent the
    /// default registration layout is used. Columns the form does not fill
    /// are left blank. Fails with [`TrackerError::DuplicatePedido`] when a
    /// data row already carries the same pedido.
    pub fn prepare_row(
        &self,
        grid: &[Vec<Cell>],
        header_row: usize,
    ) -> Result<Vec<Cell>, TrackerError> {
        let checked = self.checked()?;
        let headers = match grid.get(header_row) {
            Some(raw) if raw.iter().any(|cell| !cell.trim().is_empty()) => normalize_headers(raw),
            _ => columns::REGISTER_LAYOUT.iter().map(|name| name.to_string()).collect(),
        };
        if is_registered(&checked.pedido, grid, &headers, header_row) {
            return Err(TrackerError::DuplicatePedido {
                pedido: checked.pedido,
            });
        }
        let row = headers
            .iter()
            .map(|header| checked.cell(header))
            .collect::<Vec<Cell>>();
        debug!(
            pedido = checked.pedido.as_str(),
            columns = row.len(),
            "prepared registration row"
        );
        Ok(row)
    }

    /// Load `tab` from `provider` and prepare the row for it.
    pub fn prepare_for_tab(
        &self,
        provider: &dyn SheetProvider,
        tab: &str,
        header_row: usize,
    ) -> Result<Vec<Cell>, TrackerError> {
        let grid = provider
            .load_tab(tab)?
            .ok_or_else(|| TrackerError::MissingTab { tab: tab.to_string() })?;
        let row = self.prepare_row(&grid, header_row)?;
        info!(tab, pedido = self.pedido.trim(), "registration accepted");
        Ok(row)
    }

    fn checked(&self) -> Result<Checked, TrackerError> {
        let required = [
            (columns::PEDIDO, self.pedido.trim().is_empty()),
            (columns::DATA, self.date.is_none()),
            (columns::UNIDADE, self.unit.trim().is_empty()),
            (columns::CARRO, self.vehicle.trim().is_empty()),
            (columns::STATUS, self.status.trim().is_empty()),
        ];
        let fields: Vec<String> = required
            .into_iter()
            .filter(|(_, blank)| *blank)
            .map(|(name, _)| name.to_string())
            .collect();
        let Some(date) = self.date.filter(|_| fields.is_empty()) else {
            return Err(TrackerError::MissingFields { fields });
        };

        let evaluation = match self.evaluation.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                choice(columns::AVALIACAO, value, &AVALIACAO_OPTIONS)?
            }
            _ => "",
        };
        Ok(Checked {
            pedido: self.pedido.trim().to_string(),
            date,
            unit: choice(columns::UNIDADE, &self.unit, &UNIDADES)?,
            value: self.value,
            vehicle: self.vehicle.trim().to_string(),
            supplier: self.supplier.trim().to_string(),
            status: choice(columns::STATUS, &self.status, &STATUS_OPTIONS)?,
            evaluation,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// True when a data row of `grid` carries `pedido` in its `PEDIDO` column.
///
/// Identifiers compare after trimming and upper-casing.
fn is_registered(
    pedido: &str,
    grid: &[Vec<Cell>],
    headers: &[String],
    header_row: usize,
) -> bool {
    let Some(column) = headers.iter().position(|header| header == columns::PEDIDO) else {
        return false;
    };
    let wanted = normalize_key(pedido);
    grid.iter()
        .skip(header_row + 1)
        .filter_map(|row| row.get(column))
        .any(|cell| normalize_key(cell) == wanted)
}

fn choice(
    field: &str,
    value: &str,
    allowed: &[&'static str],
) -> Result<&'static str, TrackerError> {
    let wanted = value.trim().to_uppercase();
    allowed
        .iter()
        .copied()
        .find(|option| *option == wanted)
        .ok_or_else(|| TrackerError::InvalidChoice {
            field: field.to_string(),
            value: value.trim().to_string(),
        })
}

/// Registration with every field validated and canonicalized.
struct Checked {
    pedido: PedidoId,
    date: NaiveDate,
    unit: &'static str,
    value: f64,
    vehicle: String,
    supplier: String,
    status: &'static str,
    evaluation: &'static str,
    notes: String,
}

impl Checked {
    fn cell(&self, header: &str) -> Cell {
        match header {
            columns::DATA => self.date.format(SHEET_DATE_FORMAT).to_string(),
            columns::UNIDADE => self.unit.to_string(),
            columns::CARRO => self.vehicle.clone(),
            columns::PEDIDO => self.pedido.clone(),
            columns::VALOR => format_amount(Some(self.value)),
            columns::FORNECEDOR => self.supplier.clone(),
            columns::STATUS => self.status.to_string(),
            columns::AVALIACAO => self.evaluation.to_string(),
            columns::OBSERVACOES => self.notes.clone(),
            _ => String::new(),
        }
    }
}
