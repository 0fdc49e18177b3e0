/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   remote .csv / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + decode → SalaryDataset (memoized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalaryDataset │  Vec<SalaryRecord>, observed values
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  set-membership predicates → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  summary, top-N, histogram, counts → DashboardReport
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
