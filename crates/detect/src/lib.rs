#[macro_use]
mod util;

pub mod catalog;
pub mod columns;
pub mod demo;
pub mod engine;
pub mod export;
pub mod ids;
pub mod matcher;
pub mod row;
pub mod session;
pub mod table;

pub use catalog::{Catalog, CatalogError, SubscriptionRule};
pub use columns::{ColumnMap, ColumnRole};
pub use demo::demo_result;
pub use engine::{DetectError, DetectionEngine};
pub use export::{write_csv_report, write_json_report, ExportError};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use matcher::SubscriptionMatcher;
pub use row::{ParsedRow, RowParser};
pub use session::AuditSession;
pub use table::{CellValue, RawRow, TableError, TableOptions};

