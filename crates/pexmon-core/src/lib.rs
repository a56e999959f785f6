//! Neutral Compton reflection spectrum with Fe Ka, Fe Kb, Ni Ka and Compton
//! shoulder emission lines.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;

pub use domain::{ParameterName, PexmonError, PexmonErrorCategory, PexmonParameters, PexmonResult};
pub use modules::pexmon::{PexmonEvaluation, PexmonModel, evaluate_pexmon, run_pexmon};
