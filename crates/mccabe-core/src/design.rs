//! # Design Specification
//!
//! The four scalar design parameters of a column: distillate, bottoms and
//! feed compositions plus the reflux ratio.
//!
//! Validation happens once, in [`DesignSpec::new`]. A `DesignSpec` that
//! exists is always usable by the operating-line model.

use crate::ThieleError;
use serde::Serialize;

/// Validated column design parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignSpec {
    xd: f64,
    xb: f64,
    xf: f64,
    reflux_ratio: f64,
}

impl DesignSpec {
    /// Validate and build a design specification.
    ///
    /// Checks, in order:
    /// 1. every composition is finite and in [0, 1]
    /// 2. the reflux ratio is finite and `> 0`
    /// 3. `xF != xB` (otherwise the stripping slope is undefined)
    /// 4. `xB < xF < xD`
    pub fn new(xd: f64, xb: f64, xf: f64, reflux_ratio: f64) -> Result<Self, ThieleError> {
        check_composition("xD", xd)?;
        check_composition("xB", xb)?;
        check_composition("xF", xf)?;

        if !reflux_ratio.is_finite() || reflux_ratio <= 0.0 {
            return Err(ThieleError::InvalidRefluxRatio(reflux_ratio));
        }

        if xf == xb {
            return Err(ThieleError::DegenerateFeed { xf, xb });
        }

        if !(xb < xf && xf < xd) {
            return Err(ThieleError::CompositionOrder { xb, xf, xd });
        }

        Ok(Self {
            xd,
            xb,
            xf,
            reflux_ratio,
        })
    }

    /// Distillate composition xD.
    #[must_use]
    pub fn xd(&self) -> f64 {
        self.xd
    }

    /// Bottoms composition xB.
    #[must_use]
    pub fn xb(&self) -> f64 {
        self.xb
    }

    /// Feed composition xF.
    #[must_use]
    pub fn xf(&self) -> f64 {
        self.xf
    }

    /// Reflux ratio R.
    #[must_use]
    pub fn reflux_ratio(&self) -> f64 {
        self.reflux_ratio
    }

    /// Same compositions, different reflux ratio.
    pub fn with_reflux_ratio(&self, reflux_ratio: f64) -> Result<Self, ThieleError> {
        Self::new(self.xd, self.xb, self.xf, reflux_ratio)
    }
}

fn check_composition(name: &'static str, value: f64) -> Result<(), ThieleError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ThieleError::CompositionOutOfRange { name, value })
    }
}

// =============================================================================
// TESTS
// =============================================================================
