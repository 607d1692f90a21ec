//! Raw tab grids to normalized [`OrderRecord`]s.

use std::collections::HashMap;

use tracing::debug;

use crate::constants::columns;
use crate::data::OrderRecord;
use crate::errors::TrackerError;
use crate::normalize::{parse_amount, parse_date};
use crate::types::Cell;

/// Trim, upper-case and de-duplicate header cells.
///
/// A repeated header gets a numeric suffix (`VALOR`, `VALOR_1`, `VALOR_2`).
pub fn normalize_headers<T: AsRef<str>>(raw: &[T]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.iter()
        .map(|header| {
            let clean = header.as_ref().trim().to_uppercase();
            match seen.get_mut(&clean) {
                Some(count) => {
                    *count += 1;
                    format!("{clean}_{count}")
                }
                None => {
                    seen.insert(clean.clone(), 0);
                    clean
                }
            }
        })
        .collect()
}

/// Convert a tab grid into records.
///
/// Row `header_row` holds the column names and data starts right after it.
/// Blank rows and rows whose `DATA` cell does not parse are dropped; amounts
/// that do not parse become `0.0`. A grid too short to hold a header yields
/// no records.
pub fn records_from_grid(
    tab: &str,
    grid: &[Vec<Cell>],
    header_row: usize,
) -> Result<Vec<OrderRecord>, TrackerError> {
    let Some(raw_headers) = grid.get(header_row) else {
        debug!(tab, rows = grid.len(), "tab has no header row");
        return Ok(Vec::new());
    };
    let headers = normalize_headers(raw_headers);
    let position = |name: &str| headers.iter().position(|header| header == name);

    let missing: Vec<String> = columns::REQUIRED
        .into_iter()
        .filter(|name| position(*name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TrackerError::MissingColumns {
            tab: tab.to_string(),
            missing,
        });
    }

    let pedido = position(columns::PEDIDO);
    let data = position(columns::DATA);
    let status = position(columns::STATUS);
    let valor = position(columns::VALOR);
    let unidade = position(columns::UNIDADE);
    let carro = position(columns::CARRO);
    let fornecedor = position(columns::FORNECEDOR);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in grid.iter().skip(header_row + 1) {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let cell = |idx: Option<usize>| cell_at(row, idx);
        let Some(date) = parse_date(cell(data)) else {
            dropped += 1;
            continue;
        };
        records.push(OrderRecord {
            identifier: cell(pedido).to_string(),
            date: Some(date),
            status: cell(status).to_string(),
            value: parse_amount(cell(valor)),
            unit: cell(unidade).to_string(),
            vehicle: cell(carro).to_string(),
            supplier: cell(fornecedor).to_string(),
        });
    }
    if dropped > 0 {
        debug!(tab, dropped, "dropped rows without a parsable date");
    }
    Ok(records)
}

fn cell_at(row: &[Cell], idx: Option<usize>) -> &str {
    idx.and_then(|idx| row.get(idx))
        .map(|value| value.trim())
        .unwrap_or("")
}
