/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rename columns, parse rows → BikeDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ BikeDataset  │  Vec<Record>, read-only after load
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  season / month predicates → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group + mean/median/max/min/count
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  DashboardSummary for the central panel
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
