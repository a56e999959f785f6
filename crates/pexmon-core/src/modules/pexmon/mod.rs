//! Neutral Compton reflection with self-consistent Fe and Ni fluorescence.
//!
//! The continuum is a cutoff power law plus its reflection; four Gaussian
//! features (Fe Ka, Fe Kb, Ni Ka and the Fe Ka Compton shoulder) are laid on
//! top at the observed-frame energies, with strengths taken from the
//! empirical fits in [`coefficients`].

pub mod coefficients;

use super::grid::validate_energy_grid;
use super::parameters::parameters_from_named;
use super::traits::SpectralModel;
use crate::common::constants::PROVENANCE_BANNER;
use crate::domain::{PexmonParameters, PexmonResult};
use crate::numerics::{accumulate_gaussian_line, cutoff_power_law_into};
use std::collections::BTreeMap;

pub use coefficients::{
    AbundanceCorrection, LineCoefficients, ValidityWarning, abundance_correction,
    gamma_line_strength, inclination_factor, lines_disabled,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PexmonEvaluation {
    /// Continuum plus all four scaled lines, one value per input energy.
    pub flux: Vec<f64>,
    /// Cutoff power law plus reflection alone.
    pub continuum: Vec<f64>,
    pub coefficients: LineCoefficients,
    pub warnings: Vec<ValidityWarning>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PexmonModel;

impl PexmonModel {
    pub fn evaluate(
        &self,
        energies: &[f64],
        params: &PexmonParameters,
    ) -> PexmonResult<PexmonEvaluation> {
        validate_energy_grid(energies)?;
        params.validate()?;

        for line in PROVENANCE_BANNER {
            tracing::debug!(target: "pexmon", "{line}");
        }

        let (coefficients, warnings) = LineCoefficients::derive(params);
        for warning in &warnings {
            tracing::warn!(target: "pexmon", "{warning}");
        }

        let mut flux = vec![0.0; energies.len()];
        cutoff_power_law_into(
            energies,
            params.gamma,
            params.fold_e,
            params.rel_refl,
            &mut flux,
        )?;
        let continuum = flux.clone();

        let redshift_factor = 1.0 + params.redshift;
        for (line, strength) in coefficients.lines() {
            accumulate_gaussian_line(energies, redshift_factor, line, strength, &mut flux)?;
        }

        tracing::debug!(
            target: "pexmon",
            bins = energies.len(),
            fe_k_alpha = coefficients.fe_k_alpha,
            warnings = warnings.len(),
            "evaluated pexmon spectrum"
        );

        Ok(PexmonEvaluation {
            flux,
            continuum,
            coefficients,
            warnings,
        })
    }
}

impl SpectralModel for PexmonModel {
    fn name(&self) -> &'static str {
        "pexmon"
    }

    fn evaluate(
        &self,
        energies: &[f64],
        params: &PexmonParameters,
    ) -> PexmonResult<PexmonEvaluation> {
        PexmonModel::evaluate(self, energies, params)
    }
}

pub fn evaluate_pexmon(
    energies: &[f64],
    params: &PexmonParameters,
) -> PexmonResult<PexmonEvaluation> {
    PexmonModel.evaluate(energies, params)
}

/// Framework-facing entry point: named parameters in, photon flux out.
pub fn run_pexmon(energies: &[f64], named: &BTreeMap<String, f64>) -> PexmonResult<Vec<f64>> {
    let params = parameters_from_named(named)?;
    Ok(evaluate_pexmon(energies, &params)?.flux)
}
