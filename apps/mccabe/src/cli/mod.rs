//! # mccabe CLI Module
//!
//! This module implements the CLI interface for mccabe.
//!
//! ## Available Commands
//!
//! - `solve` - Print the design summary (default)
//! - `plot` - Render the McCabe-Thiele diagram to SVG
//! - `trace` - List every staircase vertex
//! - `init` - Write a default configuration file

mod commands;

use crate::config::{DEFAULT_CONFIG_FILE, Overrides};
use clap::{Args, Parser, Subcommand};
use mccabe_core::ThieleError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// mccabe - McCabe-Thiele stage estimation
///
/// Steps off theoretical stages for a binary distillation column with a
/// saturated-liquid feed and draws the construction.
#[derive(Parser, Debug)]
#[command(name = "mccabe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Design parameters shared by every solving command.
///
/// Each flag overrides the matching configuration value.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct DesignArgs {
    /// Distillate composition xD
    #[arg(long)]
    pub xd: Option<f64>,

    /// Bottoms composition xB
    #[arg(long)]
    pub xb: Option<f64>,

    /// Feed composition xF
    #[arg(long)]
    pub xf: Option<f64>,

    /// Reflux ratio R
    #[arg(short, long)]
    pub reflux: Option<f64>,

    /// Iteration ceiling of the stepping loop
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Convergence margin above xB
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Equilibrium data file (JSON or two-column text)
    #[arg(short, long)]
    pub equilibrium: Option<PathBuf>,

    /// Equilibrium file format (auto, json, text)
    #[arg(short = 't', long)]
    pub format: Option<String>,

    /// Built-in equilibrium table (hexane-cycloheptane, identity)
    #[arg(short, long)]
    pub preset: Option<String>,
}

impl DesignArgs {
    /// Configuration overrides carried by these flags.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            xd: self.xd,
            xb: self.xb,
            xf: self.xf,
            reflux_ratio: self.reflux,
            max_steps: self.max_steps,
            tolerance: self.tolerance,
            equilibrium: self.equilibrium.clone(),
            format: self.format.clone(),
            preset: self.preset.clone(),
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute and print the design summary
    Solve {
        #[command(flatten)]
        design: DesignArgs,

        /// Exit successfully even when stepping does not converge
        #[arg(long)]
        allow_partial: bool,
    },

    /// Render the McCabe-Thiele diagram as SVG
    Plot {
        #[command(flatten)]
        design: DesignArgs,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// Diagram title
        #[arg(long)]
        title: Option<String>,

        /// Canvas edge in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Draw a non-convergent staircase instead of failing
        #[arg(long)]
        allow_partial: bool,
    },

    /// List every staircase vertex with its move and operating line
    Trace {
        #[command(flatten)]
        design: DesignArgs,
    },

    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ThieleError> {
    let config = cli.config.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Solve {
            design,
            allow_partial,
        }) => cmd_solve(config, json_mode, &design, allow_partial),
        Some(Commands::Plot {
            design,
            output,
            title,
            size,
            allow_partial,
        }) => cmd_plot(
            config,
            json_mode,
            &design,
            &output,
            title,
            size,
            allow_partial,
        ),
        Some(Commands::Trace { design }) => cmd_trace(config, json_mode, &design),
        Some(Commands::Init { output, force }) => cmd_init(json_mode, &output, force),
        None => {
            // No subcommand - solve the configured design by default
            cmd_solve(config, json_mode, &DesignArgs::default(), false)
        }
    }
}
