pub mod continuum;
pub mod line;
pub mod tolerance;

pub use continuum::{
    ContinuumInput, ContinuumModelApi, ReflectedPowerLaw, cutoff_power_law,
    cutoff_power_law_density, cutoff_power_law_into,
};
pub use line::{
    GaussianLineInput, GaussianLineProfile, LineProfileApi, accumulate_gaussian_line,
    gaussian_density, gaussian_line,
};
pub use tolerance::{
    BinMismatch, NumericTolerance, PolicyToleranceComparison, SpectrumComparison,
    compare_spectra, compare_with_policy_tolerance,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("spectral buffers disagree in length: energy={energy}, output={output}")]
    LengthMismatch { energy: usize, output: usize },
    #[error("line width must be finite and > 0, got {value}")]
    InvalidWidth { value: f64 },
    #[error("line center must be finite, got {value}")]
    NonFiniteCenter { value: f64 },
}

impl From<SynthesisError> for crate::domain::PexmonError {
    fn from(error: SynthesisError) -> Self {
        crate::domain::PexmonError::internal("SYS.SPECTRAL_SYNTHESIS", error.to_string())
    }
}
