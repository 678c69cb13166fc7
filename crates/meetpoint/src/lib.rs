//! Geometric summaries of planar point sets.
//!
//! Layout
//! - `center`: centroid, geometric median (compass search), travel costs.
//! - `tour`: nearest-neighbor visiting orders under Euclidean/Manhattan metrics.
//! - `poly`: least-squares polynomial fits through the points.
//! - `position`: mutable point collection with recomputed derived properties.
//! - `sample`: seeded point clouds for benchmarks and experiments.
//!
//! Points are plain Euclidean plane coordinates (`Vector2<f64>`); there is no
//! projection or CRS handling anywhere in this crate.

pub mod center;
pub mod error;
pub mod poly;
pub mod position;
pub mod sample;
pub mod tour;
mod types;

pub use error::{Error, Result};
pub use types::{CenterResult, Metric, Point};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::center::{
        centroid, cost, geometric_median, geometric_median_with, improvement, manhattan_cost,
        MedianCfg,
    };
    pub use crate::poly::{best_fit_polynomial, evaluate, guess_degree};
    pub use crate::position::{Lookup, OptionOverrides, Position, PositionOptions, Summary};
    pub use crate::tour::{heuristic_tour, tour_length};
    pub use crate::{CenterResult, Error, Metric, Point, Result};
}
