//! # Stage-Stepping Procedure
//!
//! Steps off theoretical stages from the distillate corner `(xD, xD)` down
//! to the bottoms composition.
//!
//! ## State Machine
//!
//! ```text
//!            ┌──────────── vertical move ────────────┐
//!            ▼                                       │
//!      ┌──────────┐  x <= xB + tol   ┌───────────┐   │
//!      │ STEPPING │ ───────────────► │ CONVERGED │   │
//!      └──────────┘                  └───────────┘   │
//!        │     └─────────────────────────────────────┘
//!        │ iteration == max_steps    ┌───────────────┐
//!        └─────────────────────────► │ NON_CONVERGENT│
//!                                    └───────────────┘
//! ```
//!
//! [`Stepper::transition`] is pure: it maps one [`StepState`] to the next and
//! returns the points that move appends. [`Stepper::run`] folds transitions
//! into a [`StageTrace`] and records the feed stage.
//!
//! Each STEPPING transition is one theoretical stage:
//! 1. Horizontal move to the equilibrium curve: `x = x_from_y(y)`
//! 2. Stop if `x <= xB + tol`
//! 3. Vertical move to the operating line selected by `x` against `xF`

use crate::primitives::{CONVERGENCE_TOLERANCE, DEFAULT_MAX_STEPS, MAX_STEPS_LIMIT};
use crate::{DesignSpec, EquilibriumTable, OperatingLine, OperatingLines, Point, ThieleError};
use serde::{Deserialize, Serialize};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Limits of the stepping loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepConfig {
    /// Iteration ceiling; each iteration is one stage.
    pub max_steps: usize,
    /// Convergence margin above xB.
    pub tolerance: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            tolerance: CONVERGENCE_TOLERANCE,
        }
    }
}

impl StepConfig {
    /// Reject a zero or oversized step budget and a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ThieleError> {
        if self.max_steps == 0 || self.max_steps > MAX_STEPS_LIMIT {
            return Err(ThieleError::InvalidStepConfig(format!(
                "max_steps must be in 1..={}, got {}",
                MAX_STEPS_LIMIT, self.max_steps
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ThieleError::InvalidStepConfig(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// State of the stepping procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepState {
    /// Still stepping; `iteration` stages have been completed so far.
    Stepping {
        /// Vapor composition the next horizontal move starts from.
        current_y: f64,
        /// Completed iterations.
        iteration: usize,
    },
    /// A horizontal landing reached the bottoms composition.
    Converged,
    /// The iteration budget ran out first.
    NonConvergent,
}

impl StepState {
    /// True for `Converged` and `NonConvergent`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepState::Stepping { .. })
    }
}

/// Result of one call to [`Stepper::transition`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the move.
    pub next: StepState,
    /// Points appended by the move: none, a horizontal landing, or a
    /// horizontal landing followed by a vertical landing.
    pub appended: Vec<Point>,
    /// Operating line used for the vertical move, if one was made.
    pub line: Option<OperatingLine>,
}

impl Transition {
    fn stay(state: StepState) -> Self {
        Self {
            next: state,
            appended: Vec::new(),
            line: None,
        }
    }
}

/// Direction of a staircase move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Constant y, onto the equilibrium curve.
    Horizontal,
    /// Constant x, onto an operating line.
    Vertical,
}

/// One edge of the staircase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Start vertex.
    pub from: Point,
    /// End vertex.
    pub to: Point,
    /// Move direction.
    pub kind: MoveKind,
}

/// Runs the stepping procedure over a fixed table and pair of lines.
#[derive(Debug, Clone, Copy)]
pub struct Stepper<'a> {
    table: &'a EquilibriumTable,
    lines: &'a OperatingLines,
    xd: f64,
    xb: f64,
    config: StepConfig,
}

impl<'a> Stepper<'a> {
    /// Build a stepper, validating `config`.
    pub fn new(
        table: &'a EquilibriumTable,
        lines: &'a OperatingLines,
        spec: &DesignSpec,
        config: StepConfig,
    ) -> Result<Self, ThieleError> {
        config.validate()?;
        Ok(Self {
            table,
            lines,
            xd: spec.xd(),
            xb: spec.xb(),
            config,
        })
    }

    /// The state before any move: vapor at xD, no iterations done.
    #[must_use]
    pub fn initial_state(&self) -> StepState {
        StepState::Stepping {
            current_y: self.xd,
            iteration: 0,
        }
    }

    /// Apply one move. Terminal states map to themselves with no points.
    #[must_use]
    pub fn transition(&self, state: StepState) -> Transition {
        let StepState::Stepping {
            current_y,
            iteration,
        } = state
        else {
            return Transition::stay(state);
        };

        if iteration >= self.config.max_steps {
            return Transition::stay(StepState::NonConvergent);
        }

        let x_new = self.table.x_from_y(current_y);
        let horizontal = Point::new(x_new, current_y);

        if x_new <= self.xb + self.config.tolerance {
            return Transition {
                next: StepState::Converged,
                appended: vec![horizontal],
                line: None,
            };
        }

        let line = self.lines.select(x_new);
        let next_y = self.lines.y_at(line, x_new);

        Transition {
            next: StepState::Stepping {
                current_y: next_y,
                iteration: iteration + 1,
            },
            appended: vec![horizontal, Point::new(x_new, next_y)],
            line: Some(line),
        }
    }

    /// Step from `(xD, xD)` until convergence or the iteration ceiling.
    #[must_use]
    pub fn run(&self) -> StageTrace {
        let mut trace = StageTrace {
            points: vec![Point::on_diagonal(self.xd)],
            lines: Vec::new(),
            feed_stage_index: None,
            outcome: Outcome::NonConvergent,
            max_steps: self.config.max_steps,
            xb: self.xb,
        };

        let mut state = self.initial_state();
        loop {
            let transition = self.transition(state);

            if let Some(line) = transition.line {
                if line == OperatingLine::Stripping && trace.feed_stage_index.is_none() {
                    // index of the horizontal landing about to be appended
                    trace.feed_stage_index = Some(trace.points.len());
                }
                trace.lines.push(line);
            }
            trace.points.extend(transition.appended);

            match transition.next {
                StepState::Stepping { .. } => state = transition.next,
                StepState::Converged => {
                    trace.outcome = Outcome::Converged;
                    break;
                }
                StepState::NonConvergent => {
                    trace.outcome = Outcome::NonConvergent;
                    break;
                }
            }
        }

        trace
    }
}

// =============================================================================
// STAGE TRACE
// =============================================================================

/// How a stepping run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Reached `xB + tol`.
    Converged,
    /// Ran out of iterations; counts are partial.
    NonConvergent,
}

/// The staircase built by one stepping run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTrace {
    points: Vec<Point>,
    lines: Vec<OperatingLine>,
    feed_stage_index: Option<usize>,
    outcome: Outcome,
    max_steps: usize,
    xb: f64,
}

impl StageTrace {
    /// Staircase vertices, starting at `(xD, xD)`.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Operating line of each vertical move, in order.
    #[must_use]
    pub fn lines(&self) -> &[OperatingLine] {
        &self.lines
    }

    /// Vertex index of the first horizontal landing stepped with the
    /// stripping line.
    #[must_use]
    pub fn feed_stage_index(&self) -> Option<usize> {
        self.feed_stage_index
    }

    /// 1-based stage number of the feed stage.
    #[must_use]
    pub fn feed_stage(&self) -> Option<usize> {
        self.feed_stage_index.map(|index| index.div_ceil(2))
    }

    /// How the run ended.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True when the run reached the bottoms composition.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }

    /// Estimated number of theoretical stages.
    ///
    /// `ceil((points - 1) / 2)`: a trailing horizontal-only landing counts
    /// as a full stage.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.points.len().saturating_sub(1).div_ceil(2)
    }

    /// Iteration ceiling the run used.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Last vertex of the staircase.
    #[must_use]
    pub fn last_point(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }

    /// Move that produced vertex `index`; `None` for the start vertex.
    #[must_use]
    pub fn vertex_kind(&self, index: usize) -> Option<MoveKind> {
        match index {
            0 => None,
            i if i >= self.points.len() => None,
            i if i % 2 == 1 => Some(MoveKind::Horizontal),
            _ => Some(MoveKind::Vertical),
        }
    }

    /// Operating line a vertical landing was taken on.
    #[must_use]
    pub fn vertex_line(&self, index: usize) -> Option<OperatingLine> {
        match self.vertex_kind(index) {
            Some(MoveKind::Vertical) => self.lines.get(index / 2 - 1).copied(),
            _ => None,
        }
    }

    /// Staircase edges in drawing order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Segment {
                from: pair[0],
                to: pair[1],
                kind: if i % 2 == 0 {
                    MoveKind::Horizontal
                } else {
                    MoveKind::Vertical
                },
            })
            .collect()
    }

    /// `Ok(self)` for a converged run, [`ThieleError::NonConvergence`] otherwise.
    pub fn require_converged(&self) -> Result<&Self, ThieleError> {
        match self.outcome {
            Outcome::Converged => Ok(self),
            Outcome::NonConvergent => Err(ThieleError::NonConvergence {
                max_steps: self.max_steps,
                last_x: self.last_point().x,
                xb: self.xb,
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
