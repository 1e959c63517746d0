/// Data layer: core types, loading, and the two chart transforms.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, payload bounds, site index
///   └─────────────┘
///        │                          │
///        ▼                          ▼
///   ┌──────────┐              ┌──────────┐
///   │ summary   │ site →       │  filter   │ site + payload range →
///   │           │ OutcomeSummary│          │ FilteredLaunchSet
///   └──────────┘              └──────────┘
/// ```
///
/// Both transforms are pure: they borrow the table read-only and return a
/// fresh derived table on every call.

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
