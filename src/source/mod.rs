//! Data source interfaces and snapshot loading.
//!
//! Ownership model:
//! - `SheetProvider` is the collaborator seam that hands over raw tab grids.
//! - `DataSource` is the read-only, name-plus-rank view the resolver walks.
//! - `SourceSnapshot` owns one loaded set of tabs (primary tabs, then backup).

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::data::OrderRecord;
use crate::errors::TrackerError;
use crate::types::{Grid, SourceName};
use crate::window::{BackupWindow, resolve_window};

/// Raw grid to record conversion.
pub mod sheet;
/// Source provider implementations.
pub mod sources;

pub use sheet::{normalize_headers, records_from_grid};

/// Canonical form used to compare pedido identifiers across tabs.
pub fn normalize_key(identifier: &str) -> String {
    identifier.trim().to_uppercase()
}

/// Read-only, named collection of order records.
///
/// `rank` orders sources when a caller asks a snapshot for its default
/// precedence; lower ranks are consulted first.
pub trait DataSource {
    /// Tab name reported as provenance.
    fn name(&self) -> &str;
    /// Default precedence (lower first).
    fn rank(&self) -> usize;
    /// All records, in sheet order.
    fn records(&self) -> &[OrderRecord];

    /// First record whose identifier matches `identifier` after trimming and
    /// upper-casing both sides.
    fn lookup(&self, identifier: &str) -> Option<&OrderRecord> {
        let wanted = normalize_key(identifier);
        self.records()
            .iter()
            .find(|record| normalize_key(&record.identifier) == wanted)
    }
}

/// In-memory data source for loaded tabs and tests.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    name: SourceName,
    rank: usize,
    records: Arc<Vec<OrderRecord>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(name: impl Into<SourceName>, rank: usize, records: Vec<OrderRecord>) -> Self {
        Self {
            name: name.into(),
            rank,
            records: Arc::new(records),
        }
    }

    /// Stand-in for a tab that could not be loaded.
    pub fn empty(name: impl Into<SourceName>, rank: usize) -> Self {
        Self::new(name, rank, Vec::new())
    }

    /// True when the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn records(&self) -> &[OrderRecord] {
        &self.records
    }
}

/// Collaborator that fetches raw tab contents.
///
/// Returns `Ok(None)` when the tab does not exist; `Err` only for transport or
/// decoding failures.
pub trait SheetProvider {
    /// Fetch the grid for tab `name`.
    fn load_tab(&self, name: &str) -> Result<Option<Grid>, TrackerError>;
}

/// One loaded set of tabs.
#[derive(Clone, Debug)]
pub struct SourceSnapshot {
    sources: Vec<InMemorySource>,
    /// Backup window the snapshot was resolved for.
    pub backup_window: BackupWindow,
    /// False when the backup tab was absent or unusable and replaced by an empty source.
    pub backup_loaded: bool,
}

impl SourceSnapshot {
    /// Build a snapshot from already loaded sources.
    pub fn new(
        mut sources: Vec<InMemorySource>,
        backup_window: BackupWindow,
        backup_loaded: bool,
    ) -> Self {
        sources.sort_by_key(|source| source.rank());
        Self {
            sources,
            backup_window,
            backup_loaded,
        }
    }

    /// Sources in rank order, ready for [`crate::resolver::find`].
    pub fn ordered(&self) -> Vec<&dyn DataSource> {
        self.sources
            .iter()
            .map(|source| source as &dyn DataSource)
            .collect()
    }

    /// Source named `name`, if loaded.
    pub fn get(&self, name: &str) -> Option<&InMemorySource> {
        self.sources.iter().find(|source| source.name() == name)
    }

    /// Label of the backup tab.
    pub fn backup_label(&self) -> String {
        self.backup_window.label()
    }
}

/// Load the primary tabs and the backup tab resolved for `today`.
///
/// A missing or malformed primary tab aborts the load. A missing or malformed
/// backup tab is replaced by an empty source so lookups proceed with reduced
/// coverage.
pub fn load_snapshot(
    provider: &dyn SheetProvider,
    config: &TrackerConfig,
    today: NaiveDate,
) -> Result<SourceSnapshot, TrackerError> {
    config.validate()?;
    let mut sources = Vec::with_capacity(config.primary_tabs.len() + 1);
    for (rank, tab) in config.primary_tabs.iter().enumerate() {
        let grid = provider
            .load_tab(tab)?
            .ok_or_else(|| TrackerError::MissingTab { tab: tab.clone() })?;
        let records = records_from_grid(tab, &grid, config.header_row)?;
        info!(tab = tab.as_str(), records = records.len(), "loaded primary tab");
        sources.push(InMemorySource::new(tab.clone(), rank, records));
    }

    let backup_window = resolve_window(today, config.window_policy);
    let backup_label = backup_window.label();
    let backup_rank = sources.len();
    let backup = match provider.load_tab(&backup_label)? {
        Some(grid) => match records_from_grid(&backup_label, &grid, config.header_row) {
            Ok(records) => {
                info!(
                    tab = backup_label.as_str(),
                    records = records.len(),
                    "loaded backup tab"
                );
                Some(InMemorySource::new(backup_label.clone(), backup_rank, records))
            }
            Err(TrackerError::MissingColumns { missing, .. }) => {
                warn!(
                    tab = backup_label.as_str(),
                    ?missing,
                    "backup tab lacks required columns; ignoring it"
                );
                None
            }
            Err(err) => return Err(err),
        },
        None => {
            warn!(tab = backup_label.as_str(), "backup tab not found; ignoring it");
            None
        }
    };
    let backup_loaded = backup.is_some();
    sources.push(backup.unwrap_or_else(|| InMemorySource::empty(backup_label, backup_rank)));
    Ok(SourceSnapshot::new(sources, backup_window, backup_loaded))
}
