//! # Equilibrium Model
//!
//! Piecewise-linear vapor-liquid equilibrium over a fixed set of samples.
//!
//! - Forward lookup `y_equil(x)` interpolates the `(x, y)` pairs
//! - Inverse lookup `x_from_y(y)` interpolates the `(y, x)` pairs
//! - Queries outside the sampled range clamp to the nearest endpoint
//!
//! The table is validated once on construction and is immutable afterwards:
//! x must be strictly increasing and y non-decreasing, which every normal VLE
//! curve satisfies and the inverse lookup requires.

use crate::primitives::MAX_TABLE_POINTS;
use crate::{Axis, Point, ThieleError};
use serde::Serialize;

/// Validated, immutable vapor-liquid equilibrium samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquilibriumTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl EquilibriumTable {
    /// Build a table from two equal-length sample sequences.
    ///
    /// Fails with a data error when the sequences are empty, differ in
    /// length, contain non-finite or out-of-range values, or are not
    /// monotonic.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ThieleError> {
        if x.len() != y.len() {
            return Err(ThieleError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ThieleError::EmptyTable);
        }
        if x.len() > MAX_TABLE_POINTS {
            return Err(ThieleError::TableTooLarge {
                len: x.len(),
                max: MAX_TABLE_POINTS,
            });
        }

        for (index, (&xi, &yi)) in x.iter().zip(&y).enumerate() {
            if !xi.is_finite() || !yi.is_finite() {
                return Err(ThieleError::NonFiniteSample { index });
            }
            if !(0.0..=1.0).contains(&xi) {
                return Err(ThieleError::SampleOutOfRange {
                    index,
                    axis: Axis::X,
                    value: xi,
                });
            }
            if !(0.0..=1.0).contains(&yi) {
                return Err(ThieleError::SampleOutOfRange {
                    index,
                    axis: Axis::Y,
                    value: yi,
                });
            }
        }

        for index in 1..x.len() {
            if x[index] <= x[index - 1] {
                return Err(ThieleError::NonMonotonic {
                    axis: Axis::X,
                    index,
                });
            }
            if y[index] < y[index - 1] {
                return Err(ThieleError::NonMonotonic {
                    axis: Axis::Y,
                    index,
                });
            }
        }

        Ok(Self { x, y })
    }

    /// Build a table from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ThieleError> {
        let (x, y) = pairs.iter().copied().unzip();
        Self::new(x, y)
    }

    /// Equilibrium vapor fraction for liquid fraction `x`.
    #[must_use]
    pub fn y_equil(&self, x: f64) -> f64 {
        interpolate(x, &self.x, &self.y)
    }

    /// Liquid fraction in equilibrium with vapor fraction `y`.
    #[must_use]
    pub fn x_from_y(&self, y: f64) -> f64 {
        interpolate(y, &self.y, &self.x)
    }

    /// Liquid samples.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    /// Vapor samples.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    /// Iterate samples as diagram points.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point::new(x, y))
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Linear interpolation of `fp` over the non-decreasing knots `xp`,
/// clamping outside `[xp[0], xp[last]]`.
///
/// Equal adjacent knots resolve to the later segment, so a flat run in
/// `xp` never divides by zero.
fn interpolate(v: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (xp.first(), xp.last()) else {
        return f64::NAN;
    };
    if v.is_nan() {
        return f64::NAN;
    }
    if v <= first {
        return fp[0];
    }
    if v >= last {
        return fp[fp.len() - 1];
    }

    // first index with xp[hi] > v; 1 <= hi < len because first < v < last
    let hi = xp.partition_point(|&knot| knot <= v);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    fp[lo] + (fp[hi] - fp[lo]) * (v - xp[lo]) / span
}

// =============================================================================
// TESTS
// =============================================================================
