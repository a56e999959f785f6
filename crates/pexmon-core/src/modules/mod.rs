pub mod grid;
pub mod parameters;
pub mod pexmon;
pub mod serialization;

mod traits;

pub use traits::{PhotonFluxModel, SpectralModel};
