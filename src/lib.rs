#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner shared by the `pedidos` binary.
pub mod apps;
/// Action buckets for annotating pedidos with workflow progress.
pub mod buckets;
/// Tracker configuration types.
pub mod config;
/// Centralized constants for columns, tabs, criteria, and formatting.
pub mod constants;
/// Order record and search result types.
pub mod data;
/// Search history filed per criterion.
pub mod history;
/// Money and date normalization for spreadsheet cells.
pub mod normalize;
/// Pedido extraction from free text.
pub mod pedidos;
/// New-order registration checks and row layout.
pub mod register;
/// Spend aggregation helpers.
pub mod report;
/// Multi-tab pedido lookup.
pub mod resolver;
/// Per-user session state and transitions.
pub mod session;
/// Data source traits, sheet loading, and built-in providers.
pub mod source;
/// Presentation tags for result tables.
pub mod style;
/// Shared type aliases.
pub mod types;
/// Backup-week resolution.
pub mod window;

mod errors;

pub use buckets::{BucketKey, OrderAction, OrderBucketStore, UpsertOutcome};
pub use config::TrackerConfig;
pub use data::{OrderRecord, ResultRow, ResultTable};
pub use errors::TrackerError;
pub use history::{CriterionSearchHistory, FileOutcome};
pub use pedidos::parse_pedidos;
pub use register::Registration;
pub use resolver::{Lookup, find};
pub use session::{Feedback, RenderDirective, Session, Transition};
pub use source::sources::JsonWorkbook;
pub use source::{DataSource, InMemorySource, SheetProvider, SourceSnapshot, load_snapshot};
pub use types::{Cell, Criterion, FeedbackText, Grid, PedidoId, SourceName, WindowLabel};
pub use window::{BackupWindow, WindowPolicy, backup_sheet_name, resolve_window};
