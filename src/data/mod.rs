/// Data layer: core types, loading, filtering, scoring and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet      (or the built-in sample table)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → SteelDataset (derived columns, bounds)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SteelDataset │  Vec<SteelRecord>, treatments, bounds
///   └──────────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐   ┌─────────┐   ┌─────────┐
///   │  filter  │   │  score  │   │  stats  │
///   └──────────┘   └─────────┘   └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export  │  filtered rows → CSV
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
pub mod score;
pub mod stats;
