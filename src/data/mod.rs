/// Data layer: table model, loading, and binning.
///
/// Architecture:
/// ```text
///  kicks.data / orbits.data / grid.data
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (one Vec<f64> per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ KickTable/OrbitTable │  the columns the plots use
///   └──────────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ histogram │  50 equal-width bins → step outline
///   └───────────┘
/// ```

pub mod histogram;
pub mod loader;
pub mod model;
