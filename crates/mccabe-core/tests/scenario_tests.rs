//! # Scenario Tests (S1-S4)
//!
//! End-to-end constructions with fixed inputs and known outcomes.
//!
//! ## Scenarios
//! - S1: Identity equilibrium (no separation)
//! - S2: n-hexane / cycloheptane reference design
//! - S3: Reflux below the minimum (pinch)
//! - S4: Configuration and data errors

use mccabe_core::presets::{Preset, hexane_cycloheptane};
use mccabe_core::{
    Construction, DesignSpec, EquilibriumTable, ErrorKind, Outcome, Point, StepConfig,
    ThieleError, minimum_reflux_ratio,
};

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

fn reference_spec(reflux: f64) -> DesignSpec {
    DesignSpec::new(0.95, 0.05, 0.5, reflux).expect("spec")
}

// =============================================================================
// SCENARIO S1: IDENTITY EQUILIBRIUM
// =============================================================================

mod s1_identity_equilibrium {
    use super::*;

    /// S1.1: With y = x the staircase cannot leave (xD, xD).
    #[test]
    fn staircase_pins_at_distillate() {
        let table = Preset::Identity.table().expect("identity");
        let construction =
            Construction::solve(table, reference_spec(2.0), StepConfig::default()).expect("solve");
        let trace = construction.trace();

        assert_eq!(trace.outcome(), Outcome::NonConvergent);
        for p in trace.points() {
            assert!(approx(p.x, 0.95, 1e-12));
            assert!(approx(p.y, 0.95, 1e-12));
        }
    }

    /// S1.2: The partial stage count equals the iteration budget.
    #[test]
    fn stage_count_hits_budget() {
        let table = Preset::Identity.table().expect("identity");
        let config = StepConfig {
            max_steps: 12,
            ..StepConfig::default()
        };
        let construction = Construction::solve(table, reference_spec(2.0), config).expect("solve");

        assert_eq!(construction.trace().points().len(), 25);
        assert_eq!(construction.summary().stage_count, 12);
        assert!(!construction.summary().is_converged());
    }

    /// S1.3: No minimum reflux exists without separation.
    #[test]
    fn minimum_reflux_undefined() {
        let table = Preset::Identity.table().expect("identity");
        assert_eq!(minimum_reflux_ratio(&table, &reference_spec(2.0)), None);
    }
}

// =============================================================================
// SCENARIO S2: HEXANE / CYCLOHEPTANE REFERENCE DESIGN
// =============================================================================

mod s2_reference_design {
    use super::*;

    fn solve() -> Construction {
        Construction::solve(
            hexane_cycloheptane().expect("table"),
            reference_spec(2.0),
            StepConfig::default(),
        )
        .expect("solve")
    }

    /// S2.1: Rectifying line at xF is R/(R+1)·xF + xD/(R+1).
    #[test]
    fn rectifying_value_at_feed() {
        let summary = solve().summary();
        let expected = (2.0 / 3.0) * 0.5 + 0.95 / 3.0;
        assert!(approx(summary.y_rect_at_feed, expected, 1e-12));
        assert!(approx(summary.y_rect_at_feed, 0.65, 1e-12));
    }

    /// S2.2: Stripping slope from (xB, xB) and (xF, y_rect(xF)).
    #[test]
    fn stripping_slope() {
        let summary = solve().summary();
        assert!(approx(summary.stripping_slope, 0.6 / 0.45, 1e-12));
    }

    /// S2.3: Six stages, feed on the third.
    #[test]
    fn stage_count_and_feed() {
        let summary = solve().summary();
        assert_eq!(summary.outcome, Outcome::Converged);
        assert_eq!(summary.stage_count, 6);
        assert_eq!(summary.feed_stage_index, Some(5));
        assert_eq!(summary.feed_stage, Some(3));
    }

    /// S2.4: First vertices of the staircase.
    #[test]
    fn first_vertices() {
        let construction = solve();
        let points = construction.trace().points();

        assert_eq!(points[0], Point::on_diagonal(0.95));
        assert!(approx(points[1].x, 0.827_372_477, 1e-8));
        assert!(approx(points[1].y, 0.95, 1e-12));
        assert!(approx(points[2].y, 0.868_248_318, 1e-8));
        assert!(approx(points[3].x, 0.615_036_423, 1e-8));
        assert!(approx(points[5].x, 0.384_826_915, 1e-8));
    }

    /// S2.5: The run ends on a horizontal landing at or below xB.
    #[test]
    fn ends_at_bottoms() {
        let construction = solve();
        let last = construction.trace().last_point();
        assert!(last.x <= 0.05 + 1e-6);
        assert_eq!(construction.trace().points().len(), 12);
    }

    /// S2.6: Higher reflux never needs more stages.
    #[test]
    fn stages_fall_with_reflux() {
        let mut previous = usize::MAX;
        for reflux in [1.0, 2.0, 5.0, 20.0] {
            let summary = Construction::solve(
                hexane_cycloheptane().expect("table"),
                reference_spec(reflux),
                StepConfig::default(),
            )
            .expect("solve")
            .summary();
            assert!(summary.is_converged());
            assert!(summary.stage_count <= previous);
            previous = summary.stage_count;
        }
    }
}

// =============================================================================
// SCENARIO S3: REFLUX BELOW MINIMUM
// =============================================================================

mod s3_pinch {
    use super::*;

    /// S3.1: R = 0.3 is below Rmin ≈ 0.46 at the feed.
    #[test]
    fn reflux_below_minimum() {
        let table = hexane_cycloheptane().expect("table");
        let r_min = minimum_reflux_ratio(&table, &reference_spec(0.3)).expect("rmin");
        assert!(r_min > 0.3);
        assert!(approx(r_min, 0.4615, 1e-3));
    }

    /// S3.2: Stepping exhausts the budget and reports NonConvergence.
    #[test]
    fn reports_non_convergence() {
        let construction = Construction::solve(
            hexane_cycloheptane().expect("table"),
            reference_spec(0.3),
            StepConfig::default(),
        )
        .expect("solve");

        let err = construction.require_converged().err().expect("non-convergence");
        // pinned above the feed, between the 0.60 and 0.70 samples
        assert!(matches!(
            err,
            ThieleError::NonConvergence { max_steps: 300, last_x, .. } if last_x > 0.6 && last_x < 0.7
        ));
        assert_eq!(construction.summary().feed_stage_index, None);
    }
}

// =============================================================================
// SCENARIO S4: CONFIGURATION AND DATA ERRORS
// =============================================================================

mod s4_errors {
    use super::*;

    /// S4.1: xF == xB fails before any stepping.
    #[test]
    fn feed_equal_to_bottoms() {
        let err = DesignSpec::new(0.95, 0.2, 0.2, 2.0).expect_err("degenerate");
        assert_eq!(err, ThieleError::DegenerateFeed { xf: 0.2, xb: 0.2 });
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// S4.2: Non-positive reflux is a configuration error.
    #[test]
    fn zero_reflux() {
        let err = DesignSpec::new(0.95, 0.05, 0.5, 0.0).expect_err("reflux");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// S4.3: Mismatched samples are a data error.
    #[test]
    fn mismatched_table() {
        let err = EquilibriumTable::new(vec![0.0, 0.5, 1.0], vec![0.0, 1.0]).expect_err("table");
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    /// S4.4: A non-monotonic table is a data error.
    #[test]
    fn non_monotonic_table() {
        let err = EquilibriumTable::new(vec![0.0, 0.6, 0.4, 1.0], vec![0.0, 0.7, 0.8, 1.0])
            .expect_err("table");
        assert_eq!(err.kind(), ErrorKind::Data);
    }
}
