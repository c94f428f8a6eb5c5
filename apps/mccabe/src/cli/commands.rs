//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::DesignArgs;
use crate::config::{AppConfig, PlotSection};
use crate::input::validate_output_path;
use crate::report::{
    DiagramOptions, render_summary, render_svg, render_trace, summary_json, trace_json,
};
use mccabe_core::{Construction, ThieleError};
use std::path::Path;

// =============================================================================
// SHARED PIPELINE
// =============================================================================

/// A solved design together with its presentation settings.
#[derive(Debug, Clone)]
pub struct SolvedDesign {
    /// Operating lines, staircase and outcome.
    pub construction: Construction,
    /// Light component label used in reports.
    pub component: String,
    /// Diagram settings from the configuration.
    pub plot: PlotSection,
}

/// Load the configuration file (if any) and apply command-line overrides.
pub fn load_config(path: Option<&Path>, args: &DesignArgs) -> Result<AppConfig, ThieleError> {
    let mut config = AppConfig::load_or_default(path)?;
    config.apply(&args.overrides());
    Ok(config)
}

/// Validate every input and run the construction.
pub fn solve_config(config: &AppConfig) -> Result<SolvedDesign, ThieleError> {
    let spec = config.design.to_spec()?;
    config.stepping.validate()?;
    let equilibrium = config.equilibrium.resolve()?;

    tracing::info!(
        xd = spec.xd(),
        xb = spec.xb(),
        xf = spec.xf(),
        reflux_ratio = spec.reflux_ratio(),
        samples = equilibrium.table.len(),
        component = %equilibrium.component,
        "Solving design"
    );

    let construction = Construction::solve(equilibrium.table, spec, config.stepping)?;
    let trace = construction.trace();

    for (index, point) in trace.points().iter().enumerate() {
        tracing::debug!(
            index,
            x = point.x,
            y = point.y,
            line = trace.vertex_line(index).map(|l| l.name()),
            "Stage vertex"
        );
    }

    if trace.is_converged() {
        tracing::info!(
            stages = trace.stage_count(),
            feed_stage_index = trace.feed_stage_index(),
            "Stepping converged"
        );
    } else {
        tracing::warn!(
            max_steps = trace.max_steps(),
            last_x = trace.last_point().x,
            xb = spec.xb(),
            "Stepping did not converge; results are partial"
        );
    }

    Ok(SolvedDesign {
        construction,
        component: equilibrium.component,
        plot: config.plot.clone(),
    })
}

fn solve(config_path: Option<&Path>, args: &DesignArgs) -> Result<SolvedDesign, ThieleError> {
    let config = load_config(config_path, args)?;
    solve_config(&config)
}

// =============================================================================
// SOLVE COMMAND
// =============================================================================

/// Print the design summary.
///
/// A non-convergent run still prints its partial summary, then fails unless
/// `allow_partial` is set.
pub fn cmd_solve(
    config_path: Option<&Path>,
    json_mode: bool,
    args: &DesignArgs,
    allow_partial: bool,
) -> Result<(), ThieleError> {
    let solved = solve(config_path, args)?;
    let construction = &solved.construction;

    if json_mode {
        println!("{}", summary_json(construction, &solved.component)?);
    } else {
        print!("{}", render_summary(&construction.summary(), &solved.component));
    }

    if !allow_partial {
        construction.require_converged()?;
    }
    Ok(())
}

// =============================================================================
// PLOT COMMAND
// =============================================================================

/// Render the diagram to an SVG file.
pub fn cmd_plot(
    config_path: Option<&Path>,
    json_mode: bool,
    args: &DesignArgs,
    output: &Path,
    title: Option<String>,
    size: Option<u32>,
    allow_partial: bool,
) -> Result<(), ThieleError> {
    let solved = solve(config_path, args)?;
    let construction = &solved.construction;

    if !allow_partial {
        construction.require_converged()?;
    }

    let options = DiagramOptions {
        title: title.unwrap_or(solved.plot.title),
        size: size.unwrap_or(solved.plot.size),
        component: solved.component.clone(),
    };
    let svg = render_svg(construction, &options)?;

    let validated = validate_output_path(output)?;
    std::fs::write(&validated, svg.as_bytes())
        .map_err(|e| ThieleError::IoError(format!("Write SVG: {}", e)))?;
    tracing::info!("Wrote diagram to {:?}", validated);

    let summary = construction.summary();
    if json_mode {
        let result = serde_json::json!({
            "success": true,
            "output": validated.to_string_lossy(),
            "converged": summary.is_converged(),
            "stage_count": summary.stage_count,
            "feed_stage_index": summary.feed_stage_index,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&result)
                .map_err(|e| ThieleError::SerializationError(format!("JSON: {}", e)))?
        );
    } else {
        println!("Diagram written to {:?}", validated);
        for line in summary.annotation_lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}

// =============================================================================
// TRACE COMMAND
// =============================================================================

/// List the staircase vertices.
pub fn cmd_trace(
    config_path: Option<&Path>,
    json_mode: bool,
    args: &DesignArgs,
) -> Result<(), ThieleError> {
    let solved = solve(config_path, args)?;
    let trace = solved.construction.trace();

    if json_mode {
        println!("{}", trace_json(trace)?);
    } else {
        print!("{}", render_trace(trace));
        if !trace.is_converged() {
            println!();
            println!(
                "Did not converge within {} steps; listing is partial.",
                trace.max_steps()
            );
        }
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the default configuration.
pub fn cmd_init(json_mode: bool, output: &Path, force: bool) -> Result<(), ThieleError> {
    if output.exists() && !force {
        return Err(ThieleError::IoError(format!(
            "Configuration already exists at {:?}. Use --force to overwrite.",
            output
        )));
    }

    let validated = validate_output_path(output)?;
    let contents = AppConfig::template().to_toml()?;
    std::fs::write(&validated, contents.as_bytes())
        .map_err(|e| ThieleError::IoError(format!("Write config: {}", e)))?;
    tracing::info!("Wrote configuration to {:?}", validated);

    if json_mode {
        let result = serde_json::json!({
            "success": true,
            "output": validated.to_string_lossy(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&result)
                .map_err(|e| ThieleError::SerializationError(format!("JSON: {}", e)))?
        );
    } else {
        println!("Configuration written to {:?}", validated);
    }
    Ok(())
}
