//! Per-position configuration and partial overrides.

use serde::{Deserialize, Serialize};

use crate::center::MedianCfg;
use crate::Result;

/// Immutable configuration owned by one `Position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionOptions {
    /// Probe diagonal directions in the compass search.
    pub subsearch: bool,
    /// Terminal step of the compass search.
    pub epsilon: f64,
    /// Initial step multiplier of the compass search.
    pub bounds: f64,
    /// First point of every tour.
    pub start_index: usize,
    /// Polynomial degree; `None` interpolates (`n - 1`).
    pub degree: Option<usize>,
}

impl Default for PositionOptions {
    fn default() -> Self {
        let median = MedianCfg::default();
        Self {
            subsearch: median.subsearch,
            epsilon: median.epsilon,
            bounds: median.bounds,
            start_index: 0,
            degree: None,
        }
    }
}

impl PositionOptions {
    #[inline]
    pub fn median_cfg(&self) -> MedianCfg {
        MedianCfg {
            subsearch: self.subsearch,
            epsilon: self.epsilon,
            bounds: self.bounds,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.median_cfg().validate()
    }
}

/// Caller-supplied partial configuration; unset fields keep the defaults.
///
/// Deserializes from any subset of the `PositionOptions` keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionOverrides {
    pub subsearch: Option<bool>,
    pub epsilon: Option<f64>,
    pub bounds: Option<f64>,
    pub start_index: Option<usize>,
    pub degree: Option<usize>,
}

impl OptionOverrides {
    /// Field-by-field overlay onto `base`.
    pub fn apply(&self, base: PositionOptions) -> PositionOptions {
        PositionOptions {
            subsearch: self.subsearch.unwrap_or(base.subsearch),
            epsilon: self.epsilon.unwrap_or(base.epsilon),
            bounds: self.bounds.unwrap_or(base.bounds),
            start_index: self.start_index.unwrap_or(base.start_index),
            degree: self.degree.or(base.degree),
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: OptionOverrides) -> OptionOverrides {
        OptionOverrides {
            subsearch: other.subsearch.or(self.subsearch),
            epsilon: other.epsilon.or(self.epsilon),
            bounds: other.bounds.or(self.bounds),
            start_index: other.start_index.or(self.start_index),
            degree: other.degree.or(self.degree),
        }
    }
}
