//! A mutable planar point set with geometric summaries.
//!
//! `Position` owns its points and an immutable `PositionOptions`. Every derived
//! property is recomputed from the current points on each call, so a read after
//! `add`/`remove`/`adjust` always reflects the mutation.
//!
//! Naming
//! - `median` is the arithmetic centroid (center of mass), not the per-axis
//!   statistical median. `center` is the geometric median. `score` compares
//!   the two and depends on this definition.
//!
//! External consumers (e.g. a mapping-service client) need only `middle` and
//! `locations`.

mod options;

pub use options::{OptionOverrides, PositionOptions};

use serde::{Deserialize, Serialize};

use crate::center::{centroid, geometric_median_with, improvement};
use crate::poly::{best_fit_polynomial, guess_degree};
use crate::tour::heuristic_tour;
use crate::{CenterResult, Metric, Point, Result};

/// Outcome of a point lookup in `remove`/`adjust`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup {
    /// The first exact match, with its index before the mutation.
    Found { index: usize, point: Point },
    NotFound,
}

impl Lookup {
    /// Index of the match, or `-1` if absent.
    pub fn index(&self) -> isize {
        match *self {
            Lookup::Found { index, .. } => index as isize,
            Lookup::NotFound => -1,
        }
    }

    pub fn point(&self) -> Option<Point> {
        match *self {
            Lookup::Found { point, .. } => Some(point),
            Lookup::NotFound => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }
}

/// All derived properties of a position, computed at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub locations: Vec<Point>,
    pub options: PositionOptions,
    pub median: Point,
    pub median_cost: f64,
    pub center: Point,
    pub center_cost: f64,
    pub score: f64,
    pub path: Vec<usize>,
    pub naive_drive: Vec<usize>,
    pub polynomial: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    locations: Vec<Point>,
    options: PositionOptions,
}

impl Position {
    /// Position with default options.
    pub fn new(locations: Vec<Point>) -> Self {
        Self {
            locations,
            options: PositionOptions::default(),
        }
    }

    /// Position whose options are the defaults overlaid with `overrides`.
    pub fn with_options(locations: Vec<Point>, overrides: OptionOverrides) -> Result<Self> {
        let options = overrides.apply(PositionOptions::default());
        options.validate()?;
        Ok(Self { locations, options })
    }

    #[inline]
    pub fn locations(&self) -> &[Point] {
        &self.locations
    }

    #[inline]
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn add(&mut self, point: Point) {
        self.locations.push(point);
    }

    /// Remove the first point exactly equal to `point`.
    pub fn remove(&mut self, point: Point) -> Lookup {
        match self.find(point) {
            Some(index) => Lookup::Found {
                index,
                point: self.locations.remove(index),
            },
            None => Lookup::NotFound,
        }
    }

    /// Replace the first point exactly equal to `point` with `to`, in place.
    pub fn adjust(&mut self, point: Point, to: Point) -> Lookup {
        match self.find(point) {
            Some(index) => Lookup::Found {
                index,
                point: std::mem::replace(&mut self.locations[index], to),
            },
            None => Lookup::NotFound,
        }
    }

    fn find(&self, point: Point) -> Option<usize> {
        self.locations.iter().position(|p| *p == point)
    }

    fn median_result(&self) -> Result<CenterResult> {
        centroid(&self.locations)
    }

    fn center_result(&self) -> Result<CenterResult> {
        geometric_median_with(&self.locations, self.options.median_cfg())
    }

    /// Geometric median of the locations.
    pub fn center(&self) -> Result<Point> {
        Ok(self.center_result()?.center)
    }

    /// Alias of `center`.
    pub fn meet_here(&self) -> Result<Point> {
        self.center()
    }

    /// Centroid of the locations.
    pub fn median(&self) -> Result<Point> {
        Ok(self.median_result()?.center)
    }

    /// `center` if `geometric`, else `median`.
    pub fn middle(&self, geometric: bool) -> Result<Point> {
        if geometric {
            self.center()
        } else {
            self.median()
        }
    }

    /// Fractional travel-cost reduction of `center` relative to `median`.
    pub fn score(&self) -> Result<f64> {
        let median = self.median_result()?;
        let center = self.center_result()?;
        Ok(improvement(median.score, center.score))
    }

    pub fn median_cost(&self) -> Result<f64> {
        Ok(self.median_result()?.score)
    }

    pub fn center_cost(&self) -> Result<f64> {
        Ok(self.center_result()?.score)
    }

    /// Euclidean nearest-neighbor tour from `options.start_index`.
    pub fn path(&self) -> Result<Vec<usize>> {
        heuristic_tour(&self.locations, self.options.start_index, Metric::Euclidean)
    }

    pub fn best_path(&self) -> Result<Vec<usize>> {
        self.path()
    }

    /// Manhattan nearest-neighbor tour from `options.start_index`.
    pub fn naive_drive(&self) -> Result<Vec<usize>> {
        heuristic_tour(&self.locations, self.options.start_index, Metric::Manhattan)
    }

    pub fn quick_path(&self) -> Result<Vec<usize>> {
        self.naive_drive()
    }

    /// Least-squares polynomial with `options.degree`.
    pub fn polynomial(&self) -> Result<Vec<f64>> {
        best_fit_polynomial(&self.locations, self.options.degree)
    }

    /// Suggested polynomial degree from the turning points of the data.
    pub fn degree_hint(&self) -> usize {
        guess_degree(&self.locations)
    }

    pub fn summary(&self) -> Result<Summary> {
        let median = self.median_result()?;
        let center = self.center_result()?;
        Ok(Summary {
            locations: self.locations.clone(),
            options: self.options,
            median: median.center,
            median_cost: median.score,
            center: center.center,
            center_cost: center.score,
            score: improvement(median.score, center.score),
            path: self.path()?,
            naive_drive: self.naive_drive()?,
            polynomial: self.polynomial()?,
        })
    }
}

impl From<Vec<Point>> for Position {
    fn from(locations: Vec<Point>) -> Self {
        Self::new(locations)
    }
}
