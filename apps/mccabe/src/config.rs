//! # Configuration
//!
//! TOML configuration for the `mccabe` binary.
//!
//! Every section and key is optional; the defaults reproduce the reference
//! n-hexane / cycloheptane design (xD = 0.95, xB = 0.05, xF = 0.5, R = 2).
//!
//! ```toml
//! [design]
//! xd = 0.95
//! xb = 0.05
//! xf = 0.5
//! reflux_ratio = 2.0
//!
//! [equilibrium]
//! preset = "hexane-cycloheptane"
//!
//! [stepping]
//! max_steps = 300
//! tolerance = 1e-6
//!
//! [plot]
//! title = "McCabe-Thiele diagram"
//! size = 800
//! ```

use crate::input::{InputFormat, load_equilibrium, read_text_file};
use mccabe_core::presets::Preset;
use mccabe_core::{DesignSpec, EquilibriumTable, StepConfig, ThieleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name written by `mccabe init`.
pub const DEFAULT_CONFIG_FILE: &str = "mccabe.toml";

// =============================================================================
// SECTIONS
// =============================================================================

/// `[design]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignSection {
    pub xd: f64,
    pub xb: f64,
    pub xf: f64,
    pub reflux_ratio: f64,
}

impl Default for DesignSection {
    fn default() -> Self {
        Self {
            xd: 0.95,
            xb: 0.05,
            xf: 0.5,
            reflux_ratio: 2.0,
        }
    }
}

impl DesignSection {
    /// Validate into a [`DesignSpec`].
    pub fn to_spec(&self) -> Result<DesignSpec, ThieleError> {
        DesignSpec::new(self.xd, self.xb, self.xf, self.reflux_ratio)
    }
}

/// `[equilibrium]`
///
/// Precedence: `file`, then inline `x`/`y`, then `preset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EquilibriumSection {
    /// Built-in table name; `hexane-cycloheptane` when nothing else is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Inline liquid samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    /// Inline vapor samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    /// External data file, relative to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Data file format: auto, json, text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Light component label for the diagram axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

/// Equilibrium data resolved from configuration.
#[derive(Debug, Clone)]
pub struct ResolvedEquilibrium {
    pub table: EquilibriumTable,
    pub component: String,
}

impl EquilibriumSection {
    /// Load the table this section points at.
    pub fn resolve(&self) -> Result<ResolvedEquilibrium, ThieleError> {
        if let Some(file) = &self.file {
            let format = InputFormat::resolve(self.format.as_deref().unwrap_or("auto"), file)?;
            let table = load_equilibrium(file, format)?;
            return Ok(ResolvedEquilibrium {
                table,
                component: self.component_or("light component"),
            });
        }

        match (&self.x, &self.y) {
            (Some(x), Some(y)) => {
                let table = EquilibriumTable::new(x.clone(), y.clone())?;
                Ok(ResolvedEquilibrium {
                    table,
                    component: self.component_or("light component"),
                })
            }
            (Some(x), None) => Err(ThieleError::LengthMismatch {
                x_len: x.len(),
                y_len: 0,
            }),
            (None, Some(y)) => Err(ThieleError::LengthMismatch {
                x_len: 0,
                y_len: y.len(),
            }),
            (None, None) => {
                let preset: Preset = self
                    .preset
                    .as_deref()
                    .unwrap_or(Preset::HexaneCycloheptane.name())
                    .parse()?;
                Ok(ResolvedEquilibrium {
                    table: preset.table()?,
                    component: self.component_or(preset.component()),
                })
            }
        }
    }

    fn component_or(&self, fallback: &str) -> String {
        self.component
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// `[plot]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotSection {
    /// Diagram title.
    pub title: String,
    /// Width and height of the square SVG canvas in pixels.
    pub size: u32,
}

impl Default for PlotSection {
    fn default() -> Self {
        Self {
            title: "McCabe-Thiele diagram".to_string(),
            size: 800,
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// Complete configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub design: DesignSection,
    pub equilibrium: EquilibriumSection,
    pub stepping: StepConfig,
    pub plot: PlotSection,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub xd: Option<f64>,
    pub xb: Option<f64>,
    pub xf: Option<f64>,
    pub reflux_ratio: Option<f64>,
    pub max_steps: Option<usize>,
    pub tolerance: Option<f64>,
    pub equilibrium: Option<PathBuf>,
    pub format: Option<String>,
    pub preset: Option<String>,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ThieleError> {
        toml::from_str(contents)
            .map_err(|e| ThieleError::SerializationError(format!("Config: {}", e)))
    }

    /// Render as a TOML document.
    pub fn to_toml(&self) -> Result<String, ThieleError> {
        toml::to_string(self).map_err(|e| ThieleError::SerializationError(format!("Config: {}", e)))
    }

    /// Defaults with the equilibrium source spelled out, as written by `init`.
    pub fn template() -> Self {
        let preset = Preset::HexaneCycloheptane;
        Self {
            equilibrium: EquilibriumSection {
                preset: Some(preset.name().to_string()),
                component: Some(preset.component().to_string()),
                ..EquilibriumSection::default()
            },
            ..Self::default()
        }
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ThieleError> {
        tracing::info!("Loading configuration from {:?}", path);
        Self::from_toml(&read_text_file(path)?)
    }

    /// Read `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ThieleError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    ///
    /// An equilibrium file or preset from the command line replaces every
    /// table source of the file, and the file's component label with it.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(v) = overrides.xd {
            self.design.xd = v;
        }
        if let Some(v) = overrides.xb {
            self.design.xb = v;
        }
        if let Some(v) = overrides.xf {
            self.design.xf = v;
        }
        if let Some(v) = overrides.reflux_ratio {
            self.design.reflux_ratio = v;
        }
        if let Some(v) = overrides.max_steps {
            self.stepping.max_steps = v;
        }
        if let Some(v) = overrides.tolerance {
            self.stepping.tolerance = v;
        }

        if overrides.equilibrium.is_some() || overrides.preset.is_some() {
            self.equilibrium = EquilibriumSection {
                preset: overrides.preset.clone(),
                file: overrides.equilibrium.clone(),
                format: overrides.format.clone(),
                ..EquilibriumSection::default()
            };
        } else if overrides.format.is_some() {
            self.equilibrium.format = overrides.format.clone();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
