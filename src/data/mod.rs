/// Data layer: tabular resources, loading, and date-range filtering.
///
/// Architecture:
/// ```text
///  <name>.csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read + validate → LoadResult (Loaded | Empty(Condition))
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  DateRange over the key index → Filtered
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ dashboard │  panels for the UI
///   └───────────┘
/// ```

pub mod catalog;
pub mod condition;
pub mod filter;
pub mod loader;
pub mod model;
