use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::TrackerError;
use crate::source::SheetProvider;
use crate::types::{Grid, SourceName};

/// Workbook exported as JSON: `{ "<tab>": [[cell, ...], ...], ... }`.
///
/// Tab order is preserved as written. Used by the CLI and by integration
/// tests as a stand-in for the live spreadsheet.
#[derive(Clone, Debug, Default)]
pub struct JsonWorkbook {
    origin: Option<PathBuf>,
    tabs: IndexMap<SourceName, Grid>,
}

impl JsonWorkbook {
    /// Parse a workbook from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, TrackerError> {
        Ok(Self {
            origin: None,
            tabs: serde_json::from_str(json)?,
        })
    }

    /// Read and parse a workbook file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let mut workbook = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), tabs = workbook.tabs.len(), "opened workbook");
        workbook.origin = Some(path.to_path_buf());
        Ok(workbook)
    }

    /// Add or replace a tab.
    pub fn insert_tab(&mut self, name: impl Into<SourceName>, grid: Grid) {
        self.tabs.insert(name.into(), grid);
    }

    /// Tab names in file order.
    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }

    /// File the workbook was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

impl SheetProvider for JsonWorkbook {
    fn load_tab(&self, name: &str) -> Result<Option<Grid>, TrackerError> {
        Ok(self.tabs.get(name).cloned())
    }
}
