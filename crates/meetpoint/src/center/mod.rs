//! Centers of planar point sets.
//!
//! - `centroid`: coordinate-wise arithmetic mean (closed form).
//! - `geometric_median`: Fermat–Weber point via a derivative-free compass search.
//! - `cost` / `manhattan_cost`: total travel cost from every point to a candidate.
//!
//! Search model
//! - Start at the centroid with step `bounds * (centroid cost / n)`.
//! - Probe the compass directions in a fixed order; take the first strictly
//!   improving move and rescan at the same step. Halve the step when a full
//!   scan stagnates. Stop once `step <= epsilon`.
//! - The objective is convex, so the descent cannot get stuck in a spurious
//!   local minimum; determinism follows from the fixed probe order.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::types::all_finite;
use crate::{CenterResult, Error, Point, Result};

/// Probe directions W, NW, N, NE, E, SE, S, SW.
/// Even indices are the cardinal directions.
static COMPASS: [(f64, f64); 8] = [
    (-1.0, 0.0),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (0.0, 1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (1.0, 0.0),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (0.0, -1.0),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Compass search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedianCfg {
    /// Also probe the four diagonal directions.
    pub subsearch: bool,
    /// Terminal step size.
    pub epsilon: f64,
    /// Initial step as a multiple of the mean point-to-centroid distance.
    pub bounds: f64,
}

impl Default for MedianCfg {
    fn default() -> Self {
        Self {
            subsearch: false,
            epsilon: 1e-3,
            bounds: 10.0,
        }
    }
}

impl MedianCfg {
    /// Reject tolerances the search cannot terminate (or start) with.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::invalid_argument(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        if !(self.bounds.is_finite() && self.bounds > 0.0) {
            return Err(Error::invalid_argument(format!(
                "bounds must be finite and positive, got {}",
                self.bounds
            )));
        }
        Ok(())
    }

    fn directions(&self) -> impl Iterator<Item = Vector2<f64>> {
        let stride = if self.subsearch { 1 } else { 2 };
        COMPASS
            .iter()
            .step_by(stride)
            .map(|&(x, y)| Vector2::new(x, y))
    }
}

/// Sum of Euclidean distances from each point to `candidate`.
#[inline]
pub fn cost(points: &[Point], candidate: Point) -> f64 {
    points.iter().fold(0.0, |sum, p| {
        let dx = p.x - candidate.x;
        let dy = p.y - candidate.y;
        sum + (dx * dx + dy * dy).sqrt()
    })
}

/// Sum of Manhattan distances from each point to `candidate`.
#[inline]
pub fn manhattan_cost(points: &[Point], candidate: Point) -> f64 {
    points.iter().fold(0.0, |sum, p| {
        sum + (p.x - candidate.x).abs() + (p.y - candidate.y).abs()
    })
}

fn check_points(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::invalid_argument("center of an empty point set"));
    }
    if !all_finite(points) {
        return Err(Error::invalid_argument("point set has non-finite coordinates"));
    }
    Ok(())
}

fn mean(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    if sum.iter().all(|v| v.is_finite()) {
        return sum / n;
    }
    // The plain sum overflowed; dividing first keeps large finite inputs finite.
    points.iter().fold(Vector2::zeros(), |acc, p| acc + p / n)
}

/// Arithmetic mean of the points and its travel cost.
///
/// Fails with `NumericDegeneracy` when the cost is not representable.
pub fn centroid(points: &[Point]) -> Result<CenterResult> {
    check_points(points)?;
    let center = mean(points);
    let score = cost(points, center);
    if !score.is_finite() {
        return Err(Error::numeric_degeneracy(format!(
            "travel cost overflows at the centroid ({score})"
        )));
    }
    Ok(CenterResult { center, score })
}

/// Geometric median with search parameters given separately.
pub fn geometric_median(
    points: &[Point],
    subsearch: bool,
    epsilon: f64,
    bounds: f64,
) -> Result<CenterResult> {
    geometric_median_with(
        points,
        MedianCfg {
            subsearch,
            epsilon,
            bounds,
        },
    )
}

/// Geometric median (Fermat–Weber point) by compass search.
///
/// Post: `score <= centroid(points).score`; the returned center is within
/// roughly `epsilon` of the true minimizer for non-collinear inputs.
pub fn geometric_median_with(points: &[Point], cfg: MedianCfg) -> Result<CenterResult> {
    check_points(points)?;
    cfg.validate()?;

    let mut center = mean(points);
    let mut score = cost(points, center);
    let mut step = score / points.len() as f64 * cfg.bounds;
    if !(score.is_finite() && step.is_finite()) {
        return Err(Error::numeric_degeneracy(format!(
            "travel cost overflows at the centroid (cost {score}, step {step})"
        )));
    }

    let mut scans = 0usize;
    let mut moves = 0usize;
    while step > cfg.epsilon {
        scans += 1;
        let improved = cfg.directions().find_map(|dir| {
            let candidate = center + dir * step;
            let candidate_score = cost(points, candidate);
            (candidate_score < score).then_some((candidate, candidate_score))
        });
        match improved {
            Some((candidate, candidate_score)) => {
                tracing::trace!(step, score = candidate_score, "compass move");
                center = candidate;
                score = candidate_score;
                moves += 1;
            }
            None => step /= 2.0,
        }
    }
    tracing::debug!(
        n = points.len(),
        scans,
        moves,
        step,
        score,
        subsearch = cfg.subsearch,
        "geometric median converged"
    );
    Ok(CenterResult { center, score })
}

/// Fractional reduction in travel cost of `median_cost` versus `centroid_cost`.
///
/// Zero when all points coincide (both costs vanish).
pub fn improvement(centroid_cost: f64, median_cost: f64) -> f64 {
    if centroid_cost == 0.0 {
        return 0.0;
    }
    let ratio = (centroid_cost - median_cost) / centroid_cost;
    debug_assert!(ratio >= 0.0, "compass search ended above the centroid cost");
    ratio
}
