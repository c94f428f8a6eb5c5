//! # Core Type Definitions
//!
//! This module contains the small value types shared by every stage of the
//! construction:
//! - Diagram coordinates (`Point`)
//! - Table axes (`Axis`)
//! - Error types (`ThieleError`, `ErrorKind`)
//!
//! All compositions are mole fractions of the more volatile component.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// POINT
// =============================================================================

/// A point on the McCabe-Thiele diagram.
///
/// `x` is the liquid mole fraction, `y` the vapor mole fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    /// Liquid mole fraction.
    pub x: f64,
    /// Vapor mole fraction.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point on the diagonal `y = x`.
    #[must_use]
    pub const fn on_diagonal(z: f64) -> Self {
        Self { x: z, y: z }
    }
}

// =============================================================================
// AXIS
// =============================================================================

/// One of the two sample axes of an equilibrium table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Liquid composition samples.
    X,
    /// Vapor composition samples.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Broad classification of a [`ThieleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The design parameters cannot describe a column.
    Configuration,
    /// The equilibrium data is unusable for interpolation.
    Data,
    /// Stage stepping ran out of iterations before reaching the bottoms.
    NonConvergence,
    /// Reading or writing outside the core failed.
    Io,
}

/// Errors that can occur while building a McCabe-Thiele construction.
///
/// - No silent failures: NaN and infinity never leave a constructor
/// - Use `Result<T, ThieleError>` for fallible operations
/// - The core never panics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThieleError {
    /// A composition (xD, xB or xF) is not a finite value in [0, 1].
    #[error("Composition {name} = {value} is outside [0, 1]")]
    CompositionOutOfRange {
        /// Which composition failed.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The reflux ratio is not a finite positive number.
    #[error("Reflux ratio must be finite and > 0, got {0}")]
    InvalidRefluxRatio(f64),

    /// xF equals xB, so the stripping line slope is undefined.
    #[error("Feed composition xF = {xf} equals bottoms composition xB = {xb}; stripping line slope is undefined")]
    DegenerateFeed {
        /// Feed composition.
        xf: f64,
        /// Bottoms composition.
        xb: f64,
    },

    /// Compositions are not ordered xB < xF < xD.
    #[error("Compositions must satisfy xB < xF < xD, got xB = {xb}, xF = {xf}, xD = {xd}")]
    CompositionOrder {
        /// Bottoms composition.
        xb: f64,
        /// Feed composition.
        xf: f64,
        /// Distillate composition.
        xd: f64,
    },

    /// No built-in equilibrium table has this name.
    #[error("Unknown equilibrium preset '{0}'")]
    UnknownPreset(String),

    /// Stepping limits are unusable (zero steps, bad tolerance).
    #[error("Invalid stepping configuration: {0}")]
    InvalidStepConfig(String),

    /// The equilibrium table has no samples.
    #[error("Equilibrium table is empty")]
    EmptyTable,

    /// The x and y sample sequences have different lengths.
    #[error("Equilibrium table length mismatch: {x_len} x samples, {y_len} y samples")]
    LengthMismatch {
        /// Number of x samples.
        x_len: usize,
        /// Number of y samples.
        y_len: usize,
    },

    /// The table holds more samples than the core accepts.
    #[error("Equilibrium table has {len} samples, maximum is {max}")]
    TableTooLarge {
        /// Number of samples supplied.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A sample is NaN or infinite.
    #[error("Equilibrium sample {index} is not finite")]
    NonFiniteSample {
        /// Index of the offending pair.
        index: usize,
    },

    /// A sample lies outside [0, 1].
    #[error("Equilibrium sample {index} ({axis} = {value}) is outside [0, 1]")]
    SampleOutOfRange {
        /// Index of the offending pair.
        index: usize,
        /// Axis of the offending value.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },

    /// x is not strictly increasing, or y decreases.
    #[error("Equilibrium table is not monotonic in {axis} at sample {index}")]
    NonMonotonic {
        /// Axis that breaks monotonicity.
        axis: Axis,
        /// Index of the first sample that breaks it.
        index: usize,
    },

    /// Stepping exhausted its iteration budget before reaching xB.
    #[error("Stage stepping did not converge within {max_steps} steps (last x = {last_x:.6}, target xB = {xb})")]
    NonConvergence {
        /// The iteration budget that was exhausted.
        max_steps: usize,
        /// Liquid composition of the last horizontal landing.
        last_x: f64,
        /// Bottoms target.
        xb: f64,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ThieleError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CompositionOutOfRange { .. }
            | Self::InvalidRefluxRatio(_)
            | Self::DegenerateFeed { .. }
            | Self::CompositionOrder { .. }
            | Self::UnknownPreset(_)
            | Self::InvalidStepConfig(_) => ErrorKind::Configuration,
            Self::EmptyTable
            | Self::LengthMismatch { .. }
            | Self::TableTooLarge { .. }
            | Self::NonFiniteSample { .. }
            | Self::SampleOutOfRange { .. }
            | Self::NonMonotonic { .. } => ErrorKind::Data,
            Self::NonConvergence { .. } => ErrorKind::NonConvergence,
            Self::IoError(_) | Self::SerializationError(_) => ErrorKind::Io,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_point() {
        let p = Point::on_diagonal(0.4);
        assert_eq!(p, Point::new(0.4, 0.4));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(
            ThieleError::DegenerateFeed { xf: 0.1, xb: 0.1 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(ThieleError::EmptyTable.kind(), ErrorKind::Data);
        assert_eq!(
            ThieleError::NonConvergence {
                max_steps: 300,
                last_x: 0.6,
                xb: 0.05
            }
            .kind(),
            ErrorKind::NonConvergence
        );
        assert_eq!(ThieleError::IoError("x".into()).kind(), ErrorKind::Io);
    }

    #[test]
    fn error_message_names_precondition() {
        let err = ThieleError::NonMonotonic {
            axis: Axis::X,
            index: 3,
        };
        assert_eq!(
            err.to_string(),
            "Equilibrium table is not monotonic in x at sample 3"
        );
    }
}
