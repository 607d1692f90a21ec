//! Pedido lookup across an ordered list of tabs.

use crate::data::OrderRecord;
use crate::source::DataSource;
use crate::types::{PedidoId, SourceName};

/// Outcome of a single-pedido lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    /// First tab containing the pedido, with the matching row.
    Found {
        /// Matching row.
        record: OrderRecord,
        /// Tab it came from.
        source: SourceName,
    },
    /// No tab contains the pedido; carries the query for display.
    NotFound {
        /// Pedido as queried.
        identifier: PedidoId,
    },
}

impl Lookup {
    /// True for [`Lookup::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }

    /// Name of the tab that matched, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            Lookup::Found { source, .. } => Some(source),
            Lookup::NotFound { .. } => None,
        }
    }
}

/// Look `identifier` up in `sources`, in the order given.
///
/// The first tab with a match wins and later tabs are not consulted.
/// Identifiers compare after trimming and upper-casing.
pub fn find(identifier: &str, sources: &[&dyn DataSource]) -> Lookup {
    sources
        .iter()
        .find_map(|source| {
            source.lookup(identifier).map(|record| Lookup::Found {
                record: record.clone(),
                source: source.name().to_string(),
            })
        })
        .unwrap_or_else(|| Lookup::NotFound {
            identifier: identifier.to_string(),
        })
}

/// Every tab containing `identifier`, in the order given, with its first matching row.
pub fn find_all(
    identifier: &str,
    sources: &[&dyn DataSource],
) -> Vec<(OrderRecord, SourceName)> {
    sources
        .iter()
        .filter_map(|source| {
            source
                .lookup(identifier)
                .map(|record| (record.clone(), source.name().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;

    fn source(name: &str, rank: usize, pedidos: &[(&str, &str)]) -> InMemorySource {
        InMemorySource::new(
            name,
            rank,
            pedidos
                .iter()
                .map(|(id, status)| OrderRecord::new(*id, None, *status))
                .collect(),
        )
    }

    #[test]
    fn first_source_wins() {
        let alta = source("ALTA", 0, &[("7", "PAGO")]);
        let emerg = source("EMERGENCIAL", 1, &[("7", "PENDENTE")]);

        match find("7", &[&alta, &emerg]) {
            Lookup::Found { record, source } => {
                assert_eq!(source, "ALTA");
                assert_eq!(record.status, "PAGO");
            }
            other => panic!("expected a hit, got {other:?}"),
        }
        assert_eq!(find("7", &[&emerg, &alta]).source(), Some("EMERGENCIAL"));
    }

    #[test]
    fn falls_through_to_later_sources() {
        let alta = source("ALTA", 0, &[("1", "PAGO")]);
        let backup = source("06.10 a 10.10", 2, &[("2", "ENTREGUE")]);
        assert_eq!(find("2", &[&alta, &backup]).source(), Some("06.10 a 10.10"));
    }

    #[test]
    fn not_found_carries_the_query() {
        let alta = source("ALTA", 0, &[("1", "PAGO")]);
        let lookup = find(" 99 ", &[&alta]);
        assert!(!lookup.is_found());
        assert_eq!(
            lookup,
            Lookup::NotFound {
                identifier: " 99 ".to_string()
            }
        );
        assert!(!find("1", &[]).is_found());
    }

    #[test]
    fn find_all_reports_every_tab() {
        let alta = source("ALTA", 0, &[("7", "PAGO")]);
        let emerg = source("EMERGENCIAL", 1, &[("8", "PAGO")]);
        let backup = source("06.10 a 10.10", 2, &[("7", "ENTREGUE")]);
        let hits = find_all("7", &[&alta, &emerg, &backup]);
        let names: Vec<&str> = hits.iter().map(|(_, name)| name.as_str()).collect();
        assert_eq!(names, vec!["ALTA", "06.10 a 10.10"]);
    }
}
