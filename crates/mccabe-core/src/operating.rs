//! # Operating-Line Model
//!
//! The two affine operating lines of a column with a saturated-liquid feed
//! (q = 1, vertical q-line at xF):
//!
//! | Line | Equation | Used for |
//! |------|----------|----------|
//! | Rectifying | `y = R/(R+1)·x + xD/(R+1)` | `x > xF` |
//! | Stripping | through `(xB, xB)` and `(xF, y_rect(xF))` | `x <= xF` |
//!
//! Both functions are defined for every real `x`; the validity ranges are a
//! selection rule applied by [`OperatingLines::select`], not a restriction
//! of the functions themselves.

use crate::primitives::FEED_SWITCH_EPSILON;
use crate::{DesignSpec, EquilibriumTable, Point, ThieleError};
use serde::{Deserialize, Serialize};

/// Which operating line governs a vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingLine {
    /// Above the feed: rectifying section.
    Rectifying,
    /// At or below the feed: stripping section.
    Stripping,
}

impl OperatingLine {
    /// Human-readable section name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            OperatingLine::Rectifying => "rectifying",
            OperatingLine::Stripping => "stripping",
        }
    }
}

impl std::fmt::Display for OperatingLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Both operating lines of a column, computed once from a [`DesignSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingLines {
    rectifying_slope: f64,
    rectifying_intercept: f64,
    stripping_slope: f64,
    xb: f64,
    xf: f64,
    y_rect_at_feed: f64,
}

impl OperatingLines {
    /// Derive both lines.
    ///
    /// The stripping slope `(y_rect(xF) - xB) / (xF - xB)` is computed here
    /// exactly once. A non-finite slope is reported as
    /// [`ThieleError::DegenerateFeed`] rather than stored.
    pub fn new(spec: &DesignSpec) -> Result<Self, ThieleError> {
        let r = spec.reflux_ratio();
        let rectifying_slope = r / (r + 1.0);
        let rectifying_intercept = spec.xd() / (r + 1.0);
        let y_rect_at_feed = rectifying_slope * spec.xf() + rectifying_intercept;

        let stripping_slope = (y_rect_at_feed - spec.xb()) / (spec.xf() - spec.xb());
        if !stripping_slope.is_finite() {
            return Err(ThieleError::DegenerateFeed {
                xf: spec.xf(),
                xb: spec.xb(),
            });
        }

        Ok(Self {
            rectifying_slope,
            rectifying_intercept,
            stripping_slope,
            xb: spec.xb(),
            xf: spec.xf(),
            y_rect_at_feed,
        })
    }

    /// Rectifying line value at `x`.
    #[must_use]
    pub fn y_rect(&self, x: f64) -> f64 {
        self.rectifying_slope * x + self.rectifying_intercept
    }

    /// Stripping line value at `x`.
    #[must_use]
    pub fn y_strip(&self, x: f64) -> f64 {
        self.stripping_slope * (x - self.xb) + self.xb
    }

    /// Select the line for a landing at liquid composition `x`.
    ///
    /// Rectifying strictly above `xF + FEED_SWITCH_EPSILON`, stripping otherwise.
    #[must_use]
    pub fn select(&self, x: f64) -> OperatingLine {
        if x > self.xf + FEED_SWITCH_EPSILON {
            OperatingLine::Rectifying
        } else {
            OperatingLine::Stripping
        }
    }

    /// Evaluate the given line at `x`.
    #[must_use]
    pub fn y_at(&self, line: OperatingLine, x: f64) -> f64 {
        match line {
            OperatingLine::Rectifying => self.y_rect(x),
            OperatingLine::Stripping => self.y_strip(x),
        }
    }

    /// Slope of the rectifying line, `R/(R+1)`.
    #[must_use]
    pub fn rectifying_slope(&self) -> f64 {
        self.rectifying_slope
    }

    /// Slope of the stripping line.
    #[must_use]
    pub fn stripping_slope(&self) -> f64 {
        self.stripping_slope
    }

    /// Rectifying line value at the feed composition.
    #[must_use]
    pub fn y_rect_at_feed(&self) -> f64 {
        self.y_rect_at_feed
    }

    /// Intersection of the two lines on the q-line.
    #[must_use]
    pub fn feed_point(&self) -> Point {
        Point::new(self.xf, self.y_rect_at_feed)
    }
}

/// Minimum reflux ratio at the q = 1 pinch.
///
/// The rectifying line that touches the equilibrium curve on the q-line
/// passes through `(xF, y*(xF))`, giving
/// `Rmin = (xD - y*) / (y* - xF)`. Returns `None` when the equilibrium curve
/// does not rise above the diagonal at the feed, in which case no finite
/// reflux separates the mixture. Tangent pinches above the feed are not
/// detected.
#[must_use]
pub fn minimum_reflux_ratio(table: &EquilibriumTable, spec: &DesignSpec) -> Option<f64> {
    let y_star = table.y_equil(spec.xf());
    let lift = y_star - spec.xf();
    if lift <= 0.0 {
        return None;
    }
    Some(((spec.xd() - y_star) / lift).max(0.0))
}

// =============================================================================
// TESTS
// =============================================================================
