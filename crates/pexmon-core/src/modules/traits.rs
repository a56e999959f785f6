use super::pexmon::PexmonEvaluation;
use crate::domain::{PexmonParameters, PexmonResult};

pub trait SpectralModel {
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        energies: &[f64],
        params: &PexmonParameters,
    ) -> PexmonResult<PexmonEvaluation>;
}

/// Flux-only view used by fitting adapters that discard diagnostics.
pub trait PhotonFluxModel {
    fn photon_flux(&self, energies: &[f64], params: &PexmonParameters) -> PexmonResult<Vec<f64>>;
}

impl<T> PhotonFluxModel for T
where
    T: SpectralModel,
{
    fn photon_flux(&self, energies: &[f64], params: &PexmonParameters) -> PexmonResult<Vec<f64>> {
        self.evaluate(energies, params)
            .map(|evaluation| evaluation.flux)
    }
}
