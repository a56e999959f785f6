use super::SynthesisError;
use crate::common::constants::{EmissionLine, SQRT_TWO_PI};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianLineInput<'a> {
    pub energy_grid: &'a [f64],
    pub center: f64,
    pub width: f64,
}

impl<'a> GaussianLineInput<'a> {
    pub fn new(energy_grid: &'a [f64], center: f64, width: f64) -> Self {
        Self {
            energy_grid,
            center,
            width,
        }
    }

    pub fn for_line(energy_grid: &'a [f64], line: EmissionLine) -> Self {
        Self::new(energy_grid, line.center_kev, line.width_kev)
    }
}

pub trait LineProfileApi {
    fn gaussian_line(&self, input: GaussianLineInput<'_>) -> Result<Vec<f64>, SynthesisError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianLineProfile;

impl LineProfileApi for GaussianLineProfile {
    fn gaussian_line(&self, input: GaussianLineInput<'_>) -> Result<Vec<f64>, SynthesisError> {
        if !input.width.is_finite() || input.width <= 0.0 {
            return Err(SynthesisError::InvalidWidth { value: input.width });
        }
        if !input.center.is_finite() {
            return Err(SynthesisError::NonFiniteCenter {
                value: input.center,
            });
        }
        Ok(gaussian_line(input.energy_grid, input.center, input.width))
    }
}

/// Normalised Gaussian density at `energy`:
/// `exp(-(E - center)^2 / (2 width^2)) / (width sqrt(2 pi))`.
#[inline]
pub fn gaussian_density(energy: f64, center: f64, width: f64) -> f64 {
    let offset = energy - center;
    (-(offset * offset) / (2.0 * width * width)).exp() / (width * SQRT_TWO_PI)
}

/// Unchecked line profile; `width` must be positive.
pub fn gaussian_line(energy_grid: &[f64], center: f64, width: f64) -> Vec<f64> {
    energy_grid
        .iter()
        .map(|energy| gaussian_density(*energy, center, width))
        .collect()
}

/// Add `strength * profile(E * energy_scale)` into `output`.
///
/// The grid itself is read only; the scaled energy is formed per element.
pub fn accumulate_gaussian_line(
    energy_grid: &[f64],
    energy_scale: f64,
    line: EmissionLine,
    strength: f64,
    output: &mut [f64],
) -> Result<(), SynthesisError> {
    if energy_grid.len() != output.len() {
        return Err(SynthesisError::LengthMismatch {
            energy: energy_grid.len(),
            output: output.len(),
        });
    }

    for (flux, energy) in output.iter_mut().zip(energy_grid) {
        *flux += gaussian_density(energy * energy_scale, line.center_kev, line.width_kev) * strength;
    }
    Ok(())
}
