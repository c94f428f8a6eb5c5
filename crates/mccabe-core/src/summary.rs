//! # Design Summary
//!
//! The structured result of a construction: the four reported values plus
//! convergence state and diagnostics.

use crate::Outcome;
use serde::{Deserialize, Serialize};

/// Summary of one McCabe-Thiele construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSummary {
    /// Reflux ratio R.
    pub reflux_ratio: f64,
    /// Rectifying line value at xF.
    pub y_rect_at_feed: f64,
    /// Stripping line slope.
    pub stripping_slope: f64,
    /// Estimated theoretical stages. Partial when not converged.
    pub stage_count: usize,
    /// Vertex index of the feed stage in the trace.
    pub feed_stage_index: Option<usize>,
    /// 1-based feed stage number.
    pub feed_stage: Option<usize>,
    /// Converged or non-convergent.
    pub outcome: Outcome,
    /// Minimum reflux at the q = 1 pinch, when defined.
    pub minimum_reflux_ratio: Option<f64>,
}

impl DesignSummary {
    /// True when the stage count is final.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }

    /// Lines for an annotation box: R, stage count, feed stage index.
    #[must_use]
    pub fn annotation_lines(&self) -> Vec<String> {
        let stages = if self.is_converged() {
            self.stage_count.to_string()
        } else {
            format!("{} (not converged)", self.stage_count)
        };
        vec![
            format!("R = {}", self.reflux_ratio),
            format!("Stages (est): {}", stages),
            format!("Feed stage index: {}", display_index(self.feed_stage_index)),
        ]
    }
}

/// `None` renders as "none".
pub fn display_index(index: Option<usize>) -> String {
    index.map_or_else(|| "none".to_string(), |i| i.to_string())
}
