//! Nearest-neighbor visiting orders.
//!
//! Greedy construction: from the start, always travel to the closest point not
//! yet visited (ties go to the lowest index). O(n²), no improvement phase; on
//! random instances the result is typically within ~25% of the optimal tour.

use crate::types::all_finite;
use crate::{Error, Metric, Point, Result};

/// Visiting order over all `points`, beginning at `start`.
///
/// Returns a permutation of `0..n` whose first entry is `start`.
/// An empty set yields an empty tour regardless of `start`.
pub fn heuristic_tour(points: &[Point], start: usize, metric: Metric) -> Result<Vec<usize>> {
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if start >= n {
        return Err(Error::invalid_argument(format!(
            "start index {start} out of range for {n} points"
        )));
    }
    if !all_finite(points) {
        return Err(Error::invalid_argument("point set has non-finite coordinates"));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let from = points[current];
        let mut best: Option<(usize, f64)> = None;
        for (j, &p) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let d = metric.distance(from, p);
            // Strict comparison keeps the lowest index on ties.
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }
    tracing::debug!(n, start, ?metric, "tour constructed");
    Ok(order)
}

/// Total length of `order` under `metric`; `closed` adds the leg back to the start.
///
/// Fails with `InvalidArgument` if `order` names an index outside `points`.
pub fn tour_length(
    points: &[Point],
    order: &[usize],
    metric: Metric,
    closed: bool,
) -> Result<f64> {
    if let Some(&bad) = order.iter().find(|&&i| i >= points.len()) {
        return Err(Error::invalid_argument(format!(
            "tour index {bad} out of range for {} points",
            points.len()
        )));
    }
    let open: f64 = order
        .windows(2)
        .map(|w| metric.distance(points[w[0]], points[w[1]]))
        .sum();
    Ok(match (closed, order.first(), order.last()) {
        (true, Some(&first), Some(&last)) if order.len() > 1 => {
            open + metric.distance(points[last], points[first])
        }
        _ => open,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;

    fn grid() -> Vec<Point> {
        vec![
            vector![5.4, 0.3],
            vector![0.8, 7.3],
            vector![1.3, 1.2],
            vector![7.6, 9.0],
            vector![4.6, 6.7],
            vector![3.8, 8.4],
            vector![8.9, 9.0],
            vector![0.0, 2.1],
            vector![8.9, 7.6],
            vector![6.3, 8.1],
            vector![9.0, 2.8],
        ]
    }

    #[test]
    fn nearest_neighbor_orders() {
        let pts = grid();
        let euclid = heuristic_tour(&pts, 0, Metric::Euclidean).unwrap();
        assert_eq!(euclid, vec![0, 2, 7, 1, 5, 4, 9, 3, 6, 8, 10]);
        let drive = heuristic_tour(&pts, 0, Metric::Manhattan).unwrap();
        assert_eq!(drive, vec![0, 2, 7, 1, 5, 4, 9, 3, 6, 8, 10]);
        let from3 = heuristic_tour(&pts, 3, Metric::Euclidean).unwrap();
        assert_eq!(from3, vec![3, 6, 8, 9, 4, 5, 1, 7, 2, 0, 10]);
    }

    #[test]
    fn ties_prefer_lowest_index() {
        let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![-1.0, 0.0]];
        assert_eq!(heuristic_tour(&pts, 0, Metric::Euclidean).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn duplicates_are_still_visited() {
        let pts = vec![vector![1.0, 1.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        assert_eq!(heuristic_tour(&pts, 0, Metric::Manhattan).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn trivial_tours() {
        assert!(heuristic_tour(&[], 0, Metric::Euclidean).unwrap().is_empty());
        let one = vec![vector![3.0, 4.0]];
        assert_eq!(heuristic_tour(&one, 0, Metric::Euclidean).unwrap(), vec![0]);
    }

    #[test]
    fn rejects_out_of_range_start() {
        let pts = grid();
        assert!(matches!(
            heuristic_tour(&pts, pts.len(), Metric::Euclidean),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn length_of_unit_square() {
        let sq = vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ];
        let order = [0, 1, 2, 3];
        assert_eq!(tour_length(&sq, &order, Metric::Euclidean, false).unwrap(), 3.0);
        assert_eq!(tour_length(&sq, &order, Metric::Euclidean, true).unwrap(), 4.0);
        assert_eq!(tour_length(&sq, &[0, 2], Metric::Manhattan, false).unwrap(), 2.0);
        assert_eq!(tour_length(&sq, &[1], Metric::Euclidean, true).unwrap(), 0.0);
        assert_eq!(tour_length(&sq, &[], Metric::Euclidean, true).unwrap(), 0.0);
    }

    #[test]
    fn length_rejects_foreign_indices() {
        let pts = grid();
        assert!(matches!(
            tour_length(&pts, &[0, pts.len()], Metric::Euclidean, false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            tour_length(&[], &[0], Metric::Manhattan, true),
            Err(Error::InvalidArgument(_))
        ));
    }

    proptest! {
        #[test]
        fn tour_is_permutation_from_start(
            pts in prop::collection::vec((-50.0..50.0f64, -50.0..50.0f64), 1..40),
            seed in any::<prop::sample::Index>(),
            manhattan in any::<bool>(),
        ) {
            let pts: Vec<Point> = pts.into_iter().map(|(x, y)| vector![x, y]).collect();
            let start = seed.index(pts.len());
            let metric = if manhattan { Metric::Manhattan } else { Metric::Euclidean };
            let order = heuristic_tour(&pts, start, metric).unwrap();
            prop_assert_eq!(order.len(), pts.len());
            prop_assert_eq!(order[0], start);
            let mut sorted = order.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..pts.len()).collect::<Vec<_>>());
        }
    }
}
