use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NumericTolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
    #[serde(rename = "relativeFloor")]
    pub relative_floor: f64,
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self {
            abs_tol: 1.0e-12,
            rel_tol: 1.0e-6,
            relative_floor: 1.0e-30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

pub fn compare_with_policy_tolerance(
    baseline: f64,
    actual: f64,
    tolerance: NumericTolerance,
) -> PolicyToleranceComparison {
    let abs_diff = (actual - baseline).abs();
    let rel_denominator = baseline.abs().max(tolerance.relative_floor);
    let rel_diff = abs_diff / rel_denominator;
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * rel_denominator;

    PolicyToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinMismatch {
    pub index: usize,
    pub energy: f64,
    pub baseline: f64,
    pub actual: f64,
    pub abs_diff: f64,
    pub rel_diff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumComparison {
    pub tolerance: NumericTolerance,
    pub bin_count: usize,
    pub failing_bins: usize,
    pub max_abs_diff: f64,
    pub max_rel_diff: f64,
    pub worst: Option<BinMismatch>,
    pub passed: bool,
}

/// Bin-by-bin comparison of two flux arrays sampled on the same energies.
///
/// Returns `None` when the three slices disagree in length. NaN in either
/// spectrum fails that bin.
pub fn compare_spectra(
    energies: &[f64],
    baseline: &[f64],
    actual: &[f64],
    tolerance: NumericTolerance,
) -> Option<SpectrumComparison> {
    if energies.len() != baseline.len() || baseline.len() != actual.len() {
        return None;
    }

    let mut failing_bins = 0;
    let mut max_abs_diff = 0.0_f64;
    let mut max_rel_diff = 0.0_f64;
    let mut worst: Option<BinMismatch> = None;

    for (index, ((energy, expected), observed)) in
        energies.iter().zip(baseline).zip(actual).enumerate()
    {
        let comparison = compare_with_policy_tolerance(*expected, *observed, tolerance);
        let passes = comparison.passes && !comparison.abs_diff.is_nan();
        if !passes {
            failing_bins += 1;
        }

        max_abs_diff = max_abs_diff.max(comparison.abs_diff);
        max_rel_diff = max_rel_diff.max(comparison.rel_diff);

        let is_worse = match &worst {
            Some(current) => comparison.rel_diff.total_cmp(&current.rel_diff).is_gt(),
            None => comparison.rel_diff > 0.0 || comparison.rel_diff.is_nan(),
        };
        if is_worse {
            worst = Some(BinMismatch {
                index,
                energy: *energy,
                baseline: *expected,
                actual: *observed,
                abs_diff: comparison.abs_diff,
                rel_diff: comparison.rel_diff,
            });
        }
    }

    Some(SpectrumComparison {
        tolerance,
        bin_count: energies.len(),
        failing_bins,
        max_abs_diff,
        max_rel_diff,
        worst,
        passed: failing_bins == 0,
    })
}
