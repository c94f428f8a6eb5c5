//! # Construction
//!
//! The single entry point that wires the equilibrium model, the operating
//! lines and the stepping procedure together.

use crate::operating::minimum_reflux_ratio;
use crate::{
    DesignSpec, DesignSummary, EquilibriumTable, OperatingLines, StageTrace, StepConfig, Stepper,
    ThieleError,
};

/// A solved McCabe-Thiele construction.
///
/// Holds its inputs alongside the results so renderers need nothing else.
#[derive(Debug, Clone)]
pub struct Construction {
    table: EquilibriumTable,
    spec: DesignSpec,
    lines: OperatingLines,
    trace: StageTrace,
}

impl Construction {
    /// Derive the operating lines and step off stages.
    ///
    /// Configuration and data errors are returned before any stepping
    /// happens. A non-convergent run is NOT an error here: the returned
    /// construction carries the partial trace flagged as
    /// [`crate::Outcome::NonConvergent`]. Use [`Construction::require_converged`]
    /// to turn that into a [`ThieleError::NonConvergence`].
    pub fn solve(
        table: EquilibriumTable,
        spec: DesignSpec,
        config: StepConfig,
    ) -> Result<Self, ThieleError> {
        let lines = OperatingLines::new(&spec)?;
        let trace = Stepper::new(&table, &lines, &spec, config)?.run();
        Ok(Self {
            table,
            spec,
            lines,
            trace,
        })
    }

    /// Equilibrium data.
    #[must_use]
    pub fn table(&self) -> &EquilibriumTable {
        &self.table
    }

    /// Design parameters.
    #[must_use]
    pub fn spec(&self) -> &DesignSpec {
        &self.spec
    }

    /// Operating lines.
    #[must_use]
    pub fn lines(&self) -> &OperatingLines {
        &self.lines
    }

    /// Stage staircase.
    #[must_use]
    pub fn trace(&self) -> &StageTrace {
        &self.trace
    }

    /// Structured summary of the result.
    #[must_use]
    pub fn summary(&self) -> DesignSummary {
        DesignSummary {
            reflux_ratio: self.spec.reflux_ratio(),
            y_rect_at_feed: self.lines.y_rect_at_feed(),
            stripping_slope: self.lines.stripping_slope(),
            stage_count: self.trace.stage_count(),
            feed_stage_index: self.trace.feed_stage_index(),
            feed_stage: self.trace.feed_stage(),
            outcome: self.trace.outcome(),
            minimum_reflux_ratio: minimum_reflux_ratio(&self.table, &self.spec),
        }
    }

    /// `Ok(self)` for a converged construction.
    pub fn require_converged(&self) -> Result<&Self, ThieleError> {
        self.trace.require_converged()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::hexane_cycloheptane;
    use crate::{ErrorKind, Outcome};

    #[test]
    fn solve_default_design() {
        let construction = Construction::solve(
            hexane_cycloheptane().expect("table"),
            DesignSpec::new(0.95, 0.05, 0.5, 2.0).expect("spec"),
            StepConfig::default(),
        )
        .expect("solve");

        let summary = construction.summary();
        assert_eq!(summary.stage_count, 6);
        assert_eq!(summary.feed_stage_index, Some(5));
        assert_eq!(summary.outcome, Outcome::Converged);
        assert!(construction.require_converged().is_ok());
    }

    #[test]
    fn bad_step_config_fails_before_stepping() {
        let result = Construction::solve(
            hexane_cycloheptane().expect("table"),
            DesignSpec::new(0.95, 0.05, 0.5, 2.0).expect("spec"),
            StepConfig {
                max_steps: 0,
                tolerance: 1e-6,
            },
        );
        assert!(matches!(result, Err(e) if e.kind() == ErrorKind::Configuration));
    }

    #[test]
    fn non_convergence_surfaces_through_require_converged() {
        let construction = Construction::solve(
            hexane_cycloheptane().expect("table"),
            DesignSpec::new(0.95, 0.05, 0.5, 0.3).expect("spec"),
            StepConfig::default(),
        )
        .expect("solve");

        let err = construction.require_converged().err().expect("error");
        assert_eq!(err.kind(), ErrorKind::NonConvergence);
    }
}
