/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   air-quality .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  existence check → parse → schema check →
///   └──────────┘  timestamp derivation → numeric coercion
///        │
///        ▼
///   ┌────────────────┐
///   │ AirQualityTable │  Vec<Observation>, station index
///   └────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  station means, monthly resample, range queries
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
