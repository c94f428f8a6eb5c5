//! # mccabe-core
//!
//! The McCabe-Thiele engine - THE LOGIC.
//!
//! This crate performs the graphical McCabe-Thiele construction for a binary
//! distillation column without drawing anything: it interpolates vapor-liquid
//! equilibrium data, builds the rectifying and stripping operating lines, and
//! steps off theoretical stages from the distillate down to the bottoms.
//!
//! ## Pipeline
//!
//! ```text
//! EquilibriumTable ──┐
//!                    ├──► Stepper ──► StageTrace ──► DesignSummary
//! DesignSpec ──► OperatingLines ┘
//! ```
//!
//! Data flows strictly forward. The table and the operating lines are built
//! once and never mutated; the stepper consumes both and returns a trace value.
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO I/O, NO logging (pure Rust)
//! - Every precondition is checked at construction time
//! - Non-convergence is a flagged result, never a silent stage count

// =============================================================================
// MODULES
// =============================================================================

pub mod construction;
pub mod design;
pub mod equilibrium;
pub mod operating;
pub mod presets;
pub mod primitives;
pub mod stepping;
pub mod summary;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Axis, ErrorKind, Point, ThieleError};

// =============================================================================
// RE-EXPORTS: Models
// =============================================================================

pub use design::DesignSpec;
pub use equilibrium::EquilibriumTable;
pub use operating::{OperatingLine, OperatingLines, minimum_reflux_ratio};

// =============================================================================
// RE-EXPORTS: Stepping
// =============================================================================

pub use construction::Construction;
pub use stepping::{
    MoveKind, Outcome, Segment, StageTrace, StepConfig, StepState, Stepper, Transition,
};
pub use summary::DesignSummary;
