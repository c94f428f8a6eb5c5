//! # Built-in Equilibrium Data
//!
//! Reference VLE tables that ship with the crate.

use crate::{EquilibriumTable, ThieleError};

/// Liquid mole fractions of n-hexane, 0.00 to 1.00 in steps of 0.05.
pub const HEXANE_CYCLOHEPTANE_X: [f64; 21] = [
    0.00, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75,
    0.80, 0.85, 0.90, 0.95, 1.00,
];

/// Equilibrium vapor mole fractions of n-hexane over cycloheptane at 353.15 K.
///
/// Generated with Aspen Plus.
pub const HEXANE_CYCLOHEPTANE_Y: [f64; 21] = [
    0.0, 0.1824197, 0.3218958, 0.430985, 0.5181176, 0.5890586, 0.6478281, 0.6972854, 0.7395021,
    0.7760066, 0.8079447, 0.8361889, 0.8614127, 0.8841429, 0.9047961, 0.9237058, 0.9411415,
    0.9573229, 0.9724306, 0.9866146, 1.0,
];

/// A named preset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// n-hexane / cycloheptane at 353.15 K.
    HexaneCycloheptane,
    /// `y = x`: no separation at all. Useful as a degenerate reference.
    Identity,
}

impl Preset {
    /// All presets, in listing order.
    pub const ALL: [Preset; 2] = [Preset::HexaneCycloheptane, Preset::Identity];

    /// Configuration name of the preset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Preset::HexaneCycloheptane => "hexane-cycloheptane",
            Preset::Identity => "identity",
        }
    }

    /// Light component label used on diagram axes.
    #[must_use]
    pub fn component(&self) -> &'static str {
        match self {
            Preset::HexaneCycloheptane => "n-hexane",
            Preset::Identity => "light component",
        }
    }

    /// Look up a preset by configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Preset> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Build the preset's table.
    pub fn table(&self) -> Result<EquilibriumTable, ThieleError> {
        match self {
            Preset::HexaneCycloheptane => EquilibriumTable::new(
                HEXANE_CYCLOHEPTANE_X.to_vec(),
                HEXANE_CYCLOHEPTANE_Y.to_vec(),
            ),
            Preset::Identity => EquilibriumTable::new(
                HEXANE_CYCLOHEPTANE_X.to_vec(),
                HEXANE_CYCLOHEPTANE_X.to_vec(),
            ),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Preset {
    type Err = ThieleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s).ok_or_else(|| ThieleError::UnknownPreset(s.to_string()))
    }
}

/// The n-hexane / cycloheptane table.
pub fn hexane_cycloheptane() -> Result<EquilibriumTable, ThieleError> {
    Preset::HexaneCycloheptane.table()
}
