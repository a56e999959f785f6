use crate::common::constants::{
    ABUND_FIT_C1, ABUND_FIT_C2, ABUND_FIT_MAX, ABUND_FLOOR, COMPTON_SHOULDER,
    COMPTON_SHOULDER_BASE, COMPTON_SHOULDER_SLOPE, EmissionLine, FE_K_ALPHA, FE_K_BETA,
    FE_K_BETA_RATIO, FE_LINE_NORM, GAMMA_FIT_COEFF, GAMMA_FIT_EXPONENT, GAMMA_FIT_HIGH_FLOOR,
    GAMMA_FIT_LOW_CEILING, GAMMA_FIT_MAX, GAMMA_FIT_MIN, GAMMA_FIT_OFFSET, INCL_FIT_C1,
    INCL_FIT_C2, INCL_FIT_C3, NI_K_ALPHA, NI_K_ALPHA_RATIO, NO_LINE_FOLD_ENERGY,
};
use crate::domain::PexmonParameters;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Parameter fell outside the range the empirical Fe-line fits were made over.
///
/// Advisory only: the evaluation continues with the documented fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidityWarning {
    GammaAboveFitRange { gamma: f64 },
    GammaBelowFitRange { gamma: f64 },
    AbundanceAboveFitRange { abund: f64 },
}

impl Display for ValidityWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GammaAboveFitRange { gamma } => write!(
                f,
                "pexmon: Gamma={gamma} >= {GAMMA_FIT_MAX} - model invalid"
            ),
            Self::GammaBelowFitRange { gamma } => write!(
                f,
                "pexmon: Gamma={gamma} <= {GAMMA_FIT_MIN} - model invalid"
            ),
            Self::AbundanceAboveFitRange { abund } => write!(
                f,
                "pexmon: abundance={abund} >= {ABUND_FIT_MAX} solar - model invalid"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbundanceCorrection {
    /// Element effectively absent; the line family is zeroed.
    Absent,
    Scaled(f64),
    OutOfFitRange,
}

/// Fe Ka strength as a function of photon index, before any other correction.
pub fn gamma_line_strength(gamma: f64) -> (f64, Option<ValidityWarning>) {
    if gamma > GAMMA_FIT_MIN && gamma < GAMMA_FIT_MAX {
        let fit = GAMMA_FIT_COEFF * gamma.powf(GAMMA_FIT_EXPONENT) - GAMMA_FIT_OFFSET;
        (FE_LINE_NORM * fit, None)
    } else if gamma >= GAMMA_FIT_MAX {
        (
            FE_LINE_NORM * GAMMA_FIT_HIGH_FLOOR,
            Some(ValidityWarning::GammaAboveFitRange { gamma }),
        )
    } else {
        (
            FE_LINE_NORM * GAMMA_FIT_LOW_CEILING,
            Some(ValidityWarning::GammaBelowFitRange { gamma }),
        )
    }
}

/// Cubic in `mu = cos(incl)`.
pub fn inclination_factor(mu: f64) -> f64 {
    INCL_FIT_C1 * mu + INCL_FIT_C2 * mu * mu + INCL_FIT_C3 * mu * mu * mu
}

pub fn abundance_correction(abund: f64) -> AbundanceCorrection {
    if abund < ABUND_FLOOR {
        AbundanceCorrection::Absent
    } else if abund < ABUND_FIT_MAX {
        let log_abund = abund.log10();
        let exponent = ABUND_FIT_C1 * log_abund + ABUND_FIT_C2 * log_abund * log_abund;
        AbundanceCorrection::Scaled(10_f64.powf(exponent))
    } else {
        AbundanceCorrection::OutOfFitRange
    }
}

pub fn lines_disabled(fold_e: f64) -> bool {
    fold_e == NO_LINE_FOLD_ENERGY
}

/// Line strengths (photons cm^-2 s^-1 per unit continuum) for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCoefficients {
    pub cos_incl: f64,
    pub fe_k_alpha: f64,
    pub fe_k_beta: f64,
    pub ni_k_alpha: f64,
    pub compton_shoulder: f64,
}

impl LineCoefficients {
    pub fn derive(params: &PexmonParameters) -> (Self, Vec<ValidityWarning>) {
        let mut warnings = Vec::new();
        let mu = params.cos_inclination();

        let (mut strength, gamma_warning) = gamma_line_strength(params.gamma);
        warnings.extend(gamma_warning);

        strength *= inclination_factor(mu);

        match abundance_correction(params.abund) {
            AbundanceCorrection::Absent => strength = 0.0,
            AbundanceCorrection::Scaled(factor) => strength *= factor,
            AbundanceCorrection::OutOfFitRange => {
                warnings.push(ValidityWarning::AbundanceAboveFitRange {
                    abund: params.abund,
                });
            }
        }

        if lines_disabled(params.fold_e) {
            strength = 0.0;
        }

        strength *= params.rel_refl.abs();

        let coefficients = Self {
            cos_incl: mu,
            fe_k_alpha: strength,
            fe_k_beta: strength * FE_K_BETA_RATIO,
            ni_k_alpha: strength * NI_K_ALPHA_RATIO,
            compton_shoulder: strength * (COMPTON_SHOULDER_BASE + mu * COMPTON_SHOULDER_SLOPE),
        };
        (coefficients, warnings)
    }

    /// Features in accumulation order: Fe Ka, Fe Kb, Ni Ka, Compton shoulder.
    pub fn lines(&self) -> [(EmissionLine, f64); 4] {
        [
            (FE_K_ALPHA, self.fe_k_alpha),
            (FE_K_BETA, self.fe_k_beta),
            (NI_K_ALPHA, self.ni_k_alpha),
            (COMPTON_SHOULDER, self.compton_shoulder),
        ]
    }

    pub fn is_line_free(&self) -> bool {
        self.lines().iter().all(|(_, strength)| *strength == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AbundanceCorrection, LineCoefficients, ValidityWarning, abundance_correction,
        gamma_line_strength, inclination_factor, lines_disabled,
    };
    use crate::common::constants::{FE_LINE_NORM, NO_LINE_FOLD_ENERGY};
    use crate::domain::PexmonParameters;

    fn reference_params() -> PexmonParameters {
        PexmonParameters {
            gamma: 1.7,
            fold_e: 100.0,
            rel_refl: 1.0,
            redshift: 0.0,
            abund: 1.0,
            iron_abund: 1.0,
            incl: 60.0,
        }
    }

    #[test]
    fn gamma_branches_are_disjoint_and_exhaustive() {
        let (inside, warning) = gamma_line_strength(1.7);
        assert!(warning.is_none());
        let expected = FE_LINE_NORM * (9.66 * 1.7_f64.powf(-2.8) - 0.56);
        assert!((inside - expected).abs() <= 1.0e-15);

        let (high, warning) = gamma_line_strength(2.5);
        assert_eq!(high, FE_LINE_NORM * 0.182);
        assert_eq!(warning, Some(ValidityWarning::GammaAboveFitRange { gamma: 2.5 }));

        let (low, warning) = gamma_line_strength(1.1);
        assert_eq!(low, FE_LINE_NORM * 6.83);
        assert_eq!(warning, Some(ValidityWarning::GammaBelowFitRange { gamma: 1.1 }));

        let (_, warning) = gamma_line_strength(-3.0);
        assert!(matches!(warning, Some(ValidityWarning::GammaBelowFitRange { .. })));
    }

    #[test]
    fn gamma_fit_approaches_fallbacks_at_both_edges() {
        let (below_max, _) = gamma_line_strength(2.5 - 1.0e-9);
        let (above_min, _) = gamma_line_strength(1.1 + 1.0e-9);
        assert!((below_max - FE_LINE_NORM * 0.182).abs() <= FE_LINE_NORM * 1.0e-3);
        assert!((above_min - FE_LINE_NORM * 6.83).abs() <= FE_LINE_NORM * 1.0e-2);
    }

    #[test]
    fn inclination_cubic_matches_tabulated_points() {
        assert_eq!(inclination_factor(0.0), 0.0);
        assert!((inclination_factor(0.5) - 0.735_375).abs() <= 1.0e-12);
        assert!((inclination_factor(1.0) - 1.002).abs() <= 1.0e-12);
    }

    #[test]
    fn abundance_correction_covers_floor_fit_and_ceiling() {
        assert_eq!(abundance_correction(1.0e-8), AbundanceCorrection::Absent);
        assert_eq!(abundance_correction(1.0), AbundanceCorrection::Scaled(1.0));
        assert_eq!(abundance_correction(100.0), AbundanceCorrection::OutOfFitRange);

        let AbundanceCorrection::Scaled(factor) = abundance_correction(10.0) else {
            panic!("abund=10 should be inside the fit range");
        };
        assert!((factor - 10_f64.powf(0.641 - 0.172)).abs() <= 1.0e-12);

        assert!(matches!(
            abundance_correction(1.0e-7),
            AbundanceCorrection::Scaled(_)
        ));
    }

    #[test]
    fn dependent_lines_follow_fixed_ratios() {
        let (coefficients, warnings) = LineCoefficients::derive(&reference_params());
        assert!(warnings.is_empty());
        assert!((coefficients.cos_incl - 0.5).abs() <= 1.0e-12);

        let ka = coefficients.fe_k_alpha;
        assert!(ka > 0.0);
        assert!((coefficients.fe_k_beta - ka * 17.0 / 150.0).abs() <= 1.0e-18);
        assert!((coefficients.ni_k_alpha - ka * 0.05).abs() <= 1.0e-18);
        assert!((coefficients.compton_shoulder - ka * 0.15).abs() <= 1.0e-15);
    }

    #[test]
    fn reflection_scale_sign_is_discarded() {
        let positive = reference_params();
        let negative = PexmonParameters {
            rel_refl: -1.0,
            ..positive
        };
        assert_eq!(
            LineCoefficients::derive(&positive).0,
            LineCoefficients::derive(&negative).0
        );

        let zero = PexmonParameters {
            rel_refl: 0.0,
            ..positive
        };
        assert!(LineCoefficients::derive(&zero).0.is_line_free());
    }

    #[test]
    fn sentinels_zero_the_line_family() {
        let no_line = PexmonParameters {
            fold_e: NO_LINE_FOLD_ENERGY,
            ..reference_params()
        };
        assert!(lines_disabled(no_line.fold_e));
        assert!(LineCoefficients::derive(&no_line).0.is_line_free());

        let absent = PexmonParameters {
            abund: 1.0e-8,
            ..reference_params()
        };
        assert!(LineCoefficients::derive(&absent).0.is_line_free());

        assert!(!lines_disabled(999_999.0));
        assert!(!lines_disabled(0.0));
    }

    #[test]
    fn high_abundance_warns_and_skips_correction() {
        let rich = PexmonParameters {
            abund: 250.0,
            ..reference_params()
        };
        let (rich_lines, warnings) = LineCoefficients::derive(&rich);
        let (solar_lines, _) = LineCoefficients::derive(&reference_params());
        assert_eq!(
            warnings,
            vec![ValidityWarning::AbundanceAboveFitRange { abund: 250.0 }]
        );
        assert_eq!(rich_lines.fe_k_alpha, solar_lines.fe_k_alpha);
    }

    #[test]
    fn iron_abundance_does_not_change_coefficients() {
        let baseline = reference_params();
        let iron_rich = PexmonParameters {
            iron_abund: 20.0,
            ..baseline
        };
        assert_eq!(
            LineCoefficients::derive(&baseline),
            LineCoefficients::derive(&iron_rich)
        );
    }

    #[test]
    fn warnings_render_advisory_messages() {
        let message = ValidityWarning::GammaAboveFitRange { gamma: 3.0 }.to_string();
        assert_eq!(message, "pexmon: Gamma=3 >= 2.5 - model invalid");
    }
}
