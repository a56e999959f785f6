use super::SynthesisError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuumInput<'a> {
    pub energy_grid: &'a [f64],
    pub gamma: f64,
    pub fold_e: f64,
    pub scale: f64,
}

impl<'a> ContinuumInput<'a> {
    pub fn new(energy_grid: &'a [f64], gamma: f64, fold_e: f64, scale: f64) -> Self {
        Self {
            energy_grid,
            gamma,
            fold_e,
            scale,
        }
    }
}

pub trait ContinuumModelApi {
    fn continuum_into(
        &self,
        input: ContinuumInput<'_>,
        output: &mut [f64],
    ) -> Result<(), SynthesisError>;
}

/// Cutoff power law plus a reflected copy scaled by `|scale|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflectedPowerLaw;

impl ContinuumModelApi for ReflectedPowerLaw {
    fn continuum_into(
        &self,
        input: ContinuumInput<'_>,
        output: &mut [f64],
    ) -> Result<(), SynthesisError> {
        cutoff_power_law_into(
            input.energy_grid,
            input.gamma,
            input.fold_e,
            input.scale,
            output,
        )
    }
}

/// Photon flux of `E^-gamma * exp(-E / fold_e)`; the exponential is skipped
/// when `fold_e <= 0`.
#[inline]
pub fn cutoff_power_law_density(energy: f64, gamma: f64, fold_e: f64) -> f64 {
    let base = energy.powf(-gamma);
    if fold_e > 0.0 {
        base * (-energy / fold_e).exp()
    } else {
        base
    }
}

/// Writes `base + base * |scale|` for every energy into `output`.
pub fn cutoff_power_law_into(
    energy_grid: &[f64],
    gamma: f64,
    fold_e: f64,
    scale: f64,
    output: &mut [f64],
) -> Result<(), SynthesisError> {
    if energy_grid.len() != output.len() {
        return Err(SynthesisError::LengthMismatch {
            energy: energy_grid.len(),
            output: output.len(),
        });
    }

    let reflection_scale = scale.abs();
    for (flux, energy) in output.iter_mut().zip(energy_grid) {
        let base = cutoff_power_law_density(*energy, gamma, fold_e);
        *flux = base + base * reflection_scale;
    }
    Ok(())
}

pub fn cutoff_power_law(energy_grid: &[f64], gamma: f64, fold_e: f64, scale: f64) -> Vec<f64> {
    let mut output = vec![0.0; energy_grid.len()];
    // Buffer is sized from the grid, so the length check cannot fail.
    let _ = cutoff_power_law_into(energy_grid, gamma, fold_e, scale, &mut output);
    output
}
