//! Least-squares polynomial fits `y = c0 + c1 x + … + ck x^k`.
//!
//! The x values are first mapped affinely onto `[-1, 1]`, the Vandermonde
//! system in the mapped variable is solved through its SVD (not the normal
//! equations, which square the condition number), and the coefficients are
//! then re-expanded in the original x. Rank loss is structural only: fewer
//! distinct x values than coefficients.

use nalgebra::{DMatrix, DVector, SVD};

use crate::types::all_finite;
use crate::{Error, Point, Result};

/// Base degree of `guess_degree` before counting turning points.
const GUESS_BASE_DEGREE: usize = 2;

/// Affine map `t = (x - mid) / half` sending `[min x, max x]` onto `[-1, 1]`.
#[derive(Clone, Copy, Debug)]
struct Unit {
    mid: f64,
    half: f64,
}

impl Unit {
    /// Halved before subtracting so that extreme but finite ranges do not overflow.
    fn spanning(points: &[Point]) -> Self {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        let half = hi / 2.0 - lo / 2.0;
        Self {
            mid: lo / 2.0 + hi / 2.0,
            half: if half > 0.0 { half } else { 1.0 },
        }
    }

    #[inline]
    fn map(self, x: f64) -> f64 {
        (x - self.mid) / self.half
    }

    /// Re-expand `sum d_j t^j` as ascending powers of x (Horner on `t(x)`).
    fn unmap(self, d: &[f64]) -> Vec<f64> {
        let a = 1.0 / self.half;
        let b = -self.mid / self.half;
        let Some((&lead, rest)) = d.split_last() else {
            return Vec::new();
        };
        let mut c = vec![lead];
        for &dj in rest.iter().rev() {
            let mut next = vec![0.0; c.len() + 1];
            for (i, &ci) in c.iter().enumerate() {
                next[i] += b * ci;
                next[i + 1] += a * ci;
            }
            next[0] += dj;
            c = next;
        }
        c
    }
}

fn distinct_x(points: &[Point]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}

/// Coefficients (ascending powers) of the least-squares polynomial of `degree`.
///
/// `None` selects `n - 1`, i.e. the interpolating polynomial.
pub fn best_fit_polynomial(points: &[Point], degree: Option<usize>) -> Result<Vec<f64>> {
    let n = points.len();
    if n == 0 {
        return Err(Error::invalid_argument("polynomial fit of an empty point set"));
    }
    if !all_finite(points) {
        return Err(Error::invalid_argument("point set has non-finite coordinates"));
    }
    let k = degree.unwrap_or(n - 1);
    if k >= n {
        return Err(Error::invalid_argument(format!(
            "degree {k} is underdetermined for {n} points"
        )));
    }
    let cols = k + 1;
    let distinct = distinct_x(points);
    if distinct < cols {
        return Err(Error::numeric_degeneracy(format!(
            "{distinct} distinct x values cannot determine {cols} coefficients"
        )));
    }

    let unit = Unit::spanning(points);
    let design = DMatrix::from_fn(n, cols, |i, j| unit.map(points[i].x).powi(j as i32));
    let rhs = DVector::from_iterator(n, points.iter().map(|p| p.y));
    let d = SVD::new(design, true, true)
        .solve(&rhs, 0.0)
        .map_err(|e| Error::numeric_degeneracy(e.to_string()))?;

    let coeffs = unit.unmap(d.as_slice());
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(Error::numeric_degeneracy(
            "polynomial coefficients overflow in the original x scale",
        ));
    }
    tracing::debug!(n, degree = k, distinct, "polynomial fitted");
    Ok(coeffs)
}

/// Evaluate ascending-power `coefficients` at `x` (Horner).
#[inline]
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Heuristic degree: `2 +` the number of turning points of y along sorted x,
/// capped at `n - 1`.
pub fn guess_degree(points: &[Point]) -> usize {
    let n = points.len();
    if n < 2 {
        return 0;
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    let rising = |i: usize| sorted[i].y < sorted[i + 1].y;

    let mut slope = rising(0);
    let mut extrema = 0usize;
    for i in 1..n - 1 {
        let s = rising(i);
        if s != slope {
            extrema += 1;
            slope = s;
        }
    }
    (GUESS_BASE_DEGREE + extrema).min(n - 1)
}
