//! Basic value types shared by the stateless components.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the plane. Equality is exact component-wise equality.
pub type Point = Vector2<f64>;

/// A candidate center together with its total Euclidean travel cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenterResult {
    pub center: Point,
    /// Sum of distances from every point to `center`.
    pub score: f64,
}

/// Distance used when ordering points into a tour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Axis-aligned `|dx| + |dy|`, for grid-like driving.
    Manhattan,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        match self {
            Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
            Metric::Manhattan => dx.abs() + dy.abs(),
        }
    }
}

/// `true` if every coordinate is finite.
#[inline]
pub(crate) fn all_finite(points: &[Point]) -> bool {
    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}
