//! Toolkit-independent styling for result tables.

use serde::Serialize;

use crate::data::ResultRow;

/// Columns of a displayed result table, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Column {
    /// Queried pedido.
    Pedido,
    /// Tab the pedido was found in.
    Origem,
    /// Record date.
    Data,
    /// Vehicle text from the sheet.
    CarroPlanilha,
    /// Sheet status or the not-found sentinel.
    Status,
}

impl Column {
    /// Display order.
    pub const ALL: [Column; 5] = [
        Column::Pedido,
        Column::Origem,
        Column::Data,
        Column::CarroPlanilha,
        Column::Status,
    ];

    /// Header text.
    pub const fn header(self) -> &'static str {
        match self {
            Column::Pedido => "Pedido",
            Column::Origem => "Origem",
            Column::Data => "Data",
            Column::CarroPlanilha => "Carro Planilha",
            Column::Status => "Status",
        }
    }

    /// Cell text for `row`.
    pub fn cell(self, row: &ResultRow) -> String {
        match self {
            Column::Pedido => row.identifier.clone(),
            Column::Origem => row.source.clone(),
            Column::Data => row.date_display(),
            Column::CarroPlanilha => row.vehicle.clone(),
            Column::Status => row.status.clone(),
        }
    }

    fn is_key(self) -> bool {
        matches!(self, Column::Pedido | Column::Status)
    }
}

/// Row-level tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RowStyle {
    /// Pedido found in some tab.
    Found,
    /// Pedido absent from every tab.
    NotFound,
}

/// Cell-level tag derived from the row tag and the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellStyle {
    /// Key column of a found row (green, bold).
    Success,
    /// Key column of a missing row (red, bold).
    Error,
    /// Secondary column of a missing row (grey).
    Muted,
    /// No styling.
    Plain,
}

/// Tag a row by whether its pedido was found.
pub fn row_style(row: &ResultRow) -> RowStyle {
    if row.is_found() {
        RowStyle::Found
    } else {
        RowStyle::NotFound
    }
}

/// Tag one cell.
pub fn cell_style(row: &ResultRow, column: Column) -> CellStyle {
    match (row_style(row), column.is_key()) {
        (RowStyle::Found, true) => CellStyle::Success,
        (RowStyle::Found, false) => CellStyle::Plain,
        (RowStyle::NotFound, true) => CellStyle::Error,
        (RowStyle::NotFound, false) => CellStyle::Muted,
    }
}
