pub mod errors;

pub use errors::{PexmonError, PexmonErrorCategory, PexmonResult};

use crate::common::constants::{
    DEFAULT_ABUND, DEFAULT_FOLD_E, DEFAULT_GAMMA, DEFAULT_INCL, DEFAULT_IRON_ABUND,
    DEFAULT_REDSHIFT, DEFAULT_REL_REFL,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterName {
    Gamma,
    FoldE,
    RelRefl,
    Redshift,
    Abund,
    IronAbund,
    Incl,
}

impl ParameterName {
    /// Positional order expected by the fitting framework.
    pub const ALL: [Self; 7] = [
        Self::Gamma,
        Self::FoldE,
        Self::RelRefl,
        Self::Redshift,
        Self::Abund,
        Self::IronAbund,
        Self::Incl,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gamma => "Gamma",
            Self::FoldE => "foldE",
            Self::RelRefl => "rel_refl",
            Self::Redshift => "redshift",
            Self::Abund => "abund",
            Self::IronAbund => "iron_abund",
            Self::Incl => "incl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Serialize for ParameterName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Display for ParameterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// The seven pexmon model parameters, named as the fitting framework names them.
///
/// The evaluator only ever reads these; inclination stays in degrees and the
/// cosine is derived per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PexmonParameters {
    /// Power-law photon index.
    #[serde(rename = "Gamma")]
    pub gamma: f64,
    /// Cutoff energy in keV. Non-positive values disable the cutoff.
    #[serde(rename = "foldE")]
    pub fold_e: f64,
    pub rel_refl: f64,
    pub redshift: f64,
    pub abund: f64,
    /// Accepted for interface compatibility. Not consumed by the line fits.
    pub iron_abund: f64,
    /// Inclination in degrees.
    pub incl: f64,
}

impl Default for PexmonParameters {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            fold_e: DEFAULT_FOLD_E,
            rel_refl: DEFAULT_REL_REFL,
            redshift: DEFAULT_REDSHIFT,
            abund: DEFAULT_ABUND,
            iron_abund: DEFAULT_IRON_ABUND,
            incl: DEFAULT_INCL,
        }
    }
}

impl PexmonParameters {
    pub fn from_positional(values: [f64; 7]) -> Self {
        let [gamma, fold_e, rel_refl, redshift, abund, iron_abund, incl] = values;
        Self {
            gamma,
            fold_e,
            rel_refl,
            redshift,
            abund,
            iron_abund,
            incl,
        }
    }

    pub fn to_positional(&self) -> [f64; 7] {
        [
            self.gamma,
            self.fold_e,
            self.rel_refl,
            self.redshift,
            self.abund,
            self.iron_abund,
            self.incl,
        ]
    }

    pub fn value(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::Gamma => self.gamma,
            ParameterName::FoldE => self.fold_e,
            ParameterName::RelRefl => self.rel_refl,
            ParameterName::Redshift => self.redshift,
            ParameterName::Abund => self.abund,
            ParameterName::IronAbund => self.iron_abund,
            ParameterName::Incl => self.incl,
        }
    }

    pub fn set(&mut self, name: ParameterName, value: f64) {
        let slot = match name {
            ParameterName::Gamma => &mut self.gamma,
            ParameterName::FoldE => &mut self.fold_e,
            ParameterName::RelRefl => &mut self.rel_refl,
            ParameterName::Redshift => &mut self.redshift,
            ParameterName::Abund => &mut self.abund,
            ParameterName::IronAbund => &mut self.iron_abund,
            ParameterName::Incl => &mut self.incl,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, f64)> + '_ {
        ParameterName::ALL
            .iter()
            .map(move |name| (*name, self.value(*name)))
    }

    /// Cosine of the inclination angle, `cos(radians(incl))`.
    pub fn cos_inclination(&self) -> f64 {
        self.incl.to_radians().cos()
    }

    pub fn validate(&self) -> PexmonResult<()> {
        match self.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(PexmonError::input_validation(
                "INPUT.PARAMETER_VALUE",
                format!("parameter '{}' must be finite, got {}", name, value),
            )),
            None => Ok(()),
        }
    }
}
