//! Text and JSON summaries.

use mccabe_core::summary::display_index;
use mccabe_core::{
    Construction, DesignSpec, DesignSummary, MoveKind, OperatingLine, Point, StageTrace,
    ThieleError,
};
use serde::Serialize;

// =============================================================================
// SUMMARY
// =============================================================================

/// Human-readable design summary.
pub fn render_summary(summary: &DesignSummary, component: &str) -> String {
    let mut out = String::new();
    out.push_str("McCabe-Thiele Design\n");
    out.push_str("====================\n");
    out.push_str(&format!("Component:     {}\n", component));
    out.push_str(&format!("Reflux ratio:  {}\n", summary.reflux_ratio));
    out.push('\n');
    out.push_str(&format!(
        "Rectifying y at xF:            {:.4}\n",
        summary.y_rect_at_feed
    ));
    out.push_str(&format!(
        "Stripping line slope:          {:.4}\n",
        summary.stripping_slope
    ));
    out.push_str(&format!(
        "Estimated theoretical stages:  {}\n",
        summary.stage_count
    ));
    out.push_str(&format!(
        "Feed stage index (approx):     {}\n",
        display_index(summary.feed_stage_index)
    ));
    out.push_str(&format!(
        "Feed stage (from top):         {}\n",
        display_index(summary.feed_stage)
    ));
    match summary.minimum_reflux_ratio {
        Some(rmin) => out.push_str(&format!("Minimum reflux (q = 1):        {:.4}\n", rmin)),
        None => out.push_str("Minimum reflux (q = 1):        undefined\n"),
    }
    out.push('\n');
    if summary.is_converged() {
        out.push_str("Outcome: converged\n");
    } else {
        out.push_str("Outcome: NOT CONVERGED - stage count and feed index are partial\n");
    }
    out
}

/// Machine-readable summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport<'a> {
    pub component: &'a str,
    pub design: &'a DesignSpec,
    pub converged: bool,
    pub summary: DesignSummary,
}

impl<'a> SummaryReport<'a> {
    pub fn new(construction: &'a Construction, component: &'a str) -> Self {
        let summary = construction.summary();
        Self {
            component,
            design: construction.spec(),
            converged: summary.is_converged(),
            summary,
        }
    }
}

/// Pretty-printed JSON of [`SummaryReport`].
pub fn summary_json(construction: &Construction, component: &str) -> Result<String, ThieleError> {
    to_json(&SummaryReport::new(construction, component))
}

// =============================================================================
// TRACE
// =============================================================================

#[derive(Debug, Serialize)]
struct TraceRow {
    index: usize,
    x: f64,
    y: f64,
    #[serde(rename = "move")]
    kind: Option<MoveKind>,
    line: Option<OperatingLine>,
}

fn trace_rows(trace: &StageTrace) -> Vec<TraceRow> {
    trace
        .points()
        .iter()
        .enumerate()
        .map(|(index, &Point { x, y })| TraceRow {
            index,
            x,
            y,
            kind: trace.vertex_kind(index),
            line: trace.vertex_line(index),
        })
        .collect()
}

/// One line per staircase vertex.
pub fn render_trace(trace: &StageTrace) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5}  {:>9}  {:>9}  {:<10}  {}\n",
        "index", "x", "y", "move", "line"
    ));
    for row in trace_rows(trace) {
        let kind = match row.kind {
            None => "start",
            Some(MoveKind::Horizontal) => "horizontal",
            Some(MoveKind::Vertical) => "vertical",
        };
        let line = row.line.map(|l| l.name()).unwrap_or("-");
        let marker = if trace.feed_stage_index() == Some(row.index) {
            "  <- feed stage"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:>5}  {:>9.6}  {:>9.6}  {:<10}  {}{}\n",
            row.index, row.x, row.y, kind, line, marker
        ));
    }
    out
}

/// Trace vertices and outcome as JSON.
pub fn trace_json(trace: &StageTrace) -> Result<String, ThieleError> {
    let output = serde_json::json!({
        "outcome": trace.outcome(),
        "stage_count": trace.stage_count(),
        "feed_stage_index": trace.feed_stage_index(),
        "points": trace_rows(trace),
    });
    to_json(&output)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ThieleError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ThieleError::SerializationError(format!("JSON: {}", e)))
}
