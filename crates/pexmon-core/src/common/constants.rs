//! Fixed line energies, empirical fit coefficients and parameter defaults.
//!
//! Fe line fits follow George & Fabian (1991) as tabulated by Nandra et al.
//! (2007); the continuum follows Magdziarz & Zdziarski (1995).

pub const SQRT_TWO_PI: f64 = 2.506_628_274_631_000_5_f64;

/// Rest-frame emission feature: center and Gaussian width, both in keV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionLine {
    pub name: &'static str,
    pub center_kev: f64,
    pub width_kev: f64,
}

pub const FE_K_ALPHA: EmissionLine = EmissionLine {
    name: "Fe Ka",
    center_kev: 6.4,
    width_kev: 0.005,
};
pub const FE_K_BETA: EmissionLine = EmissionLine {
    name: "Fe Kb",
    center_kev: 7.05,
    width_kev: 0.005,
};
pub const NI_K_ALPHA: EmissionLine = EmissionLine {
    name: "Ni Ka",
    center_kev: 7.47,
    width_kev: 0.005,
};
pub const COMPTON_SHOULDER: EmissionLine = EmissionLine {
    name: "Fe Ka CS",
    center_kev: 6.315,
    width_kev: 0.035,
};

// Fe Ka equivalent-width normalisation and Gamma dependence.
pub const FE_LINE_NORM: f64 = 4.75e-3;
pub const GAMMA_FIT_COEFF: f64 = 9.66;
pub const GAMMA_FIT_EXPONENT: f64 = -2.8;
pub const GAMMA_FIT_OFFSET: f64 = 0.56;
pub const GAMMA_FIT_MIN: f64 = 1.1;
pub const GAMMA_FIT_MAX: f64 = 2.5;
/// Gamma-fit value pinned at `GAMMA_FIT_MAX`.
pub const GAMMA_FIT_HIGH_FLOOR: f64 = 0.182;
/// Gamma-fit value pinned at `GAMMA_FIT_MIN`.
pub const GAMMA_FIT_LOW_CEILING: f64 = 6.83;

// Cubic in cos(incl).
pub const INCL_FIT_C1: f64 = 2.210;
pub const INCL_FIT_C2: f64 = -1.749;
pub const INCL_FIT_C3: f64 = 0.541;

// Quadratic in log10(abund).
pub const ABUND_FIT_C1: f64 = 0.641;
pub const ABUND_FIT_C2: f64 = -0.172;
/// Below this abundance the Fe line family is switched off.
pub const ABUND_FLOOR: f64 = 1.0e-7;
/// At or above this abundance the abundance correction is not applied.
pub const ABUND_FIT_MAX: f64 = 100.0;

pub const FE_K_BETA_RATIO: f64 = 17.0 / 150.0;
pub const NI_K_ALPHA_RATIO: f64 = 0.05;
pub const COMPTON_SHOULDER_BASE: f64 = 0.1;
pub const COMPTON_SHOULDER_SLOPE: f64 = 0.1;

/// Fold energy that switches the emission lines off. Distinct from the
/// cutoff switch, which is any `foldE <= 0`.
pub const NO_LINE_FOLD_ENERGY: f64 = 999_999.9;

pub const DEFAULT_GAMMA: f64 = 2.0;
pub const DEFAULT_FOLD_E: f64 = 100.0;
pub const DEFAULT_REL_REFL: f64 = -1.0;
pub const DEFAULT_REDSHIFT: f64 = 0.0;
pub const DEFAULT_ABUND: f64 = 1.0;
pub const DEFAULT_IRON_ABUND: f64 = 1.0;
pub const DEFAULT_INCL: f64 = 60.0;

pub const PROVENANCE_BANNER: [&str; 4] = [
    "Neutral Compton reflection with Fe emission",
    "Fe line: George & Fabian 1991, 249, 352",
    "Reflection: Magdziarz & Zdziarski 1995 MNRAS",
    "Full description in: Nandra et al. 2007, MNRAS",
];
