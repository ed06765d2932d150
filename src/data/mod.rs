/// Data layer: record types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow> → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore  │  Vec<Record>, option lists
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  industry / country selections → FilteredView
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::DatasetError;
pub use filter::{FilteredView, RecordFilter};
pub use model::{Record, RecordStore};
