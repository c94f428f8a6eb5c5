//! # Numeric Primitives
//!
//! Fixed constants of the stage-stepping procedure.
//!
//! These are compiled into the binary. Callers can override the iteration
//! ceiling and the convergence tolerance through [`crate::StepConfig`]; the
//! feed switch epsilon is not configurable.

/// Default iteration ceiling for stage stepping.
///
/// Each iteration is one theoretical stage, so a converged column can never
/// report more stages than this.
pub const DEFAULT_MAX_STEPS: usize = 300;

/// Hard ceiling accepted for `max_steps`.
pub const MAX_STEPS_LIMIT: usize = 100_000;

/// Default convergence tolerance on the bottoms composition.
///
/// Stepping stops once a horizontal landing satisfies `x <= xB + tolerance`.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Margin used when choosing between the rectifying and stripping lines.
///
/// The rectifying line is used only while `x > xF + FEED_SWITCH_EPSILON`,
/// so a landing exactly on the feed composition already uses the stripping line.
pub const FEED_SWITCH_EPSILON: f64 = 1e-12;

/// Maximum number of samples in an equilibrium table.
///
/// Tables larger than this are rejected to bound interpolation cost.
pub const MAX_TABLE_POINTS: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_dominates_switch_epsilon() {
        assert!(FEED_SWITCH_EPSILON < CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn default_steps_within_limit() {
        assert!(DEFAULT_MAX_STEPS <= MAX_STEPS_LIMIT);
    }
}
