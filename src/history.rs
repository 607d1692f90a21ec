//! Search results filed per criterion.
//!
//! Each batch search is filed under a criterion (a vehicle code, `BACKLOG`,
//! a backup tab name). Searching again under the same criterion replaces
//! that table where it stands; a new criterion appends.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::history::CRITERION_PLACEHOLDER;
use crate::data::{ResultRow, ResultTable};
use crate::errors::TrackerError;
use crate::resolver::{Lookup, find};
use crate::source::DataSource;
use crate::types::PedidoId;

/// How a search was filed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// New criterion, table appended at the end.
    Added {
        /// Rows in the table.
        rows: usize,
    },
    /// Existing criterion, table replaced in place.
    Replaced {
        /// Rows in the table.
        rows: usize,
    },
}

impl FileOutcome {
    /// Rows in the filed table.
    pub fn rows(&self) -> usize {
        match self {
            FileOutcome::Added { rows } | FileOutcome::Replaced { rows } => *rows,
        }
    }
}

/// True when `criterion` is blank or the selection placeholder.
pub fn is_unselected(criterion: &str) -> bool {
    let criterion = criterion.trim();
    criterion.is_empty() || criterion == CRITERION_PLACEHOLDER
}

/// Ordered search history, at most one table per criterion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionSearchHistory {
    tables: Vec<ResultTable>,
}

impl CriterionSearchHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up every pedido and file the result table under `criterion`.
    ///
    /// Fails without touching the history when no criterion is selected or
    /// `pedidos` is empty.
    pub fn search_and_file(
        &mut self,
        pedidos: &[PedidoId],
        criterion: &str,
        sources: &[&dyn DataSource],
    ) -> Result<FileOutcome, TrackerError> {
        if is_unselected(criterion) {
            return Err(TrackerError::CriterionNotSelected);
        }
        if pedidos.is_empty() {
            return Err(TrackerError::NoPedidos);
        }

        let rows: Vec<ResultRow> = pedidos
            .iter()
            .map(|pedido| match find(pedido, sources) {
                Lookup::Found { record, source } => {
                    ResultRow::found(pedido.clone(), &record, &source)
                }
                Lookup::NotFound { identifier } => ResultRow::not_found(identifier),
            })
            .collect();
        let table = ResultTable {
            criterion: criterion.to_string(),
            rows,
        };
        let found = table.found_count();
        let count = table.rows.len();

        let outcome = match self
            .tables
            .iter_mut()
            .find(|existing| existing.criterion == table.criterion)
        {
            Some(existing) => {
                *existing = table;
                FileOutcome::Replaced { rows: count }
            }
            None => {
                self.tables.push(table);
                FileOutcome::Added { rows: count }
            }
        };
        info!(criterion, rows = count, found, ?outcome, "filed search");
        Ok(outcome)
    }

    /// Pop the last table by position. `None` when the history is already empty.
    ///
    /// A re-filed criterion keeps its position, so it is only popped once it is last.
    pub fn remove_last(&mut self) -> Option<ResultTable> {
        let removed = self.tables.pop();
        if removed.is_none() {
            debug!("remove_last on empty search history");
        }
        removed
    }

    /// Drop every table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Tables in filing order, each with found rows first.
    pub fn render_all(&self) -> Vec<ResultTable> {
        self.tables.iter().map(ResultTable::sorted_for_display).collect()
    }

    /// Table filed under `criterion`, as stored.
    pub fn get(&self, criterion: &str) -> Option<&ResultTable> {
        self.tables.iter().find(|table| table.criterion == criterion)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when nothing has been filed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OrderRecord;
    use crate::source::InMemorySource;

    fn alta() -> InMemorySource {
        InMemorySource::new(
            "ALTA",
            0,
            vec![
                OrderRecord::new("1", None, "PAGO").with_vehicle("24600"),
                OrderRecord::new("3", None, "PROG. PGTO"),
            ],
        )
    }

    fn ids(values: &[&str]) -> Vec<PedidoId> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn rejects_unselected_criterion_without_mutation() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        let err = history
            .search_and_file(&ids(&["1"]), CRITERION_PLACEHOLDER, &[&source])
            .unwrap_err();
        assert!(matches!(err, TrackerError::CriterionNotSelected));
        assert!(matches!(
            history.search_and_file(&ids(&["1"]), "  ", &[&source]),
            Err(TrackerError::CriterionNotSelected)
        ));
        assert!(history.is_empty());
    }

    #[test]
    fn rejects_empty_pedidos_without_mutation() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        let err = history.search_and_file(&[], "BACKLOG", &[&source]).unwrap_err();
        assert!(matches!(err, TrackerError::NoPedidos));
        assert!(err.is_validation());
        assert!(history.is_empty());
    }

    #[test]
    fn rows_carry_provenance_or_sentinel() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        let outcome = history
            .search_and_file(&ids(&["1", "2"]), "24600", &[&source])
            .unwrap();
        assert_eq!(outcome, FileOutcome::Added { rows: 2 });
        let table = history.get("24600").unwrap();
        assert_eq!(table.rows[0].source, "ALTA");
        assert_eq!(table.rows[0].vehicle, "24600");
        assert_eq!(table.rows[0].status, "PAGO");
        assert_eq!(table.rows[1], ResultRow::not_found("2"));
    }

    #[test]
    fn same_criterion_replaces_in_place() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        history.search_and_file(&ids(&["1"]), "A", &[&source]).unwrap();
        history.search_and_file(&ids(&["2"]), "B", &[&source]).unwrap();
        let outcome = history
            .search_and_file(&ids(&["3", "4"]), "A", &[&source])
            .unwrap();
        assert_eq!(outcome, FileOutcome::Replaced { rows: 2 });
        assert_eq!(outcome.rows(), 2);

        let tables = history.render_all();
        let criteria: Vec<&str> = tables.iter().map(|t| t.criterion.as_str()).collect();
        assert_eq!(criteria, vec!["A", "B"]);
        let first: Vec<&str> = tables[0].rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(first, vec!["3", "4"]);
    }

    #[test]
    fn remove_last_pops_until_empty() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        history.search_and_file(&ids(&["1"]), "A", &[&source]).unwrap();
        history.search_and_file(&ids(&["1"]), "B", &[&source]).unwrap();
        assert_eq!(history.remove_last().unwrap().criterion, "B");
        assert_eq!(history.remove_last().unwrap().criterion, "A");
        assert!(history.remove_last().is_none());
    }

    #[test]
    fn remove_last_after_in_place_replace_pops_by_position() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        history.search_and_file(&ids(&["1"]), "A", &[&source]).unwrap();
        history.search_and_file(&ids(&["2"]), "B", &[&source]).unwrap();
        history
            .search_and_file(&ids(&["3", "4"]), "A", &[&source])
            .unwrap();

        assert_eq!(history.remove_last().unwrap().criterion, "B");
        assert_eq!(history.len(), 1);
        let remaining = &history.render_all()[0];
        assert_eq!(remaining.criterion, "A");
        let ids: Vec<&str> = remaining.rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn render_all_puts_found_rows_first() {
        let source = alta();
        let mut history = CriterionSearchHistory::new();
        history
            .search_and_file(&ids(&["0", "1", "2", "3"]), "BACKLOG", &[&source])
            .unwrap();
        let rendered = history.render_all();
        let order: Vec<&str> = rendered[0]
            .rows
            .iter()
            .map(|r| r.identifier.as_str())
            .collect();
        assert_eq!(order, vec!["1", "3", "0", "2"]);

        history.clear();
        assert!(history.render_all().is_empty());
    }
}
