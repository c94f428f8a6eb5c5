//! # Reporting
//!
//! Renders a solved [`mccabe_core::Construction`]:
//!
//! - [`text`] - human summary, JSON summary, stage trace listing
//! - [`svg`] - the McCabe-Thiele diagram

pub mod svg;
pub mod text;

pub use svg::{DiagramOptions, render_svg};
pub use text::{SummaryReport, render_summary, render_trace, summary_json, trace_json};
