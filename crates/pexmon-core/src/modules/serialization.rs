use super::grid::{GridError, validate_energy_grid};
use super::pexmon::PexmonEvaluation;
use crate::domain::PexmonParameters;
use std::fs;
use std::path::Path;

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

pub fn format_scientific_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == f64::INFINITY {
        return "inf".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-inf".to_string();
    }
    // Shortest representation that parses back to the same bits.
    format!("{value:E}")
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}

/// Text table of one evaluation: `#` header lines, then
/// `index energy_kev flux continuum` rows.
pub fn render_spectrum_table(
    energies: &[f64],
    evaluation: &PexmonEvaluation,
    params: &PexmonParameters,
) -> String {
    let mut lines = Vec::with_capacity(energies.len() + 6);
    lines.push("# pexmon neutral Compton reflection with Fe and Ni lines".to_string());
    lines.push(format!(
        "# parameters: {}",
        params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    ));

    let coefficients = &evaluation.coefficients;
    lines.push(format!(
        "# line strengths: FeKa={} FeKb={} NiKa={} FeKaCS={}",
        format_scientific_f64(coefficients.fe_k_alpha),
        format_scientific_f64(coefficients.fe_k_beta),
        format_scientific_f64(coefficients.ni_k_alpha),
        format_scientific_f64(coefficients.compton_shoulder),
    ));
    for warning in &evaluation.warnings {
        lines.push(format!("# warning: {}", warning));
    }
    lines.push("# columns: index energy_kev flux continuum".to_string());

    for (index, ((energy, flux), continuum)) in energies
        .iter()
        .zip(&evaluation.flux)
        .zip(&evaluation.continuum)
        .enumerate()
    {
        lines.push(format!(
            "{:>6} {:>23} {:>23} {:>23}",
            index,
            format_scientific_f64(*energy),
            format_scientific_f64(*flux),
            format_scientific_f64(*continuum)
        ));
    }

    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectrumTable {
    pub energies: Vec<f64>,
    pub flux: Vec<f64>,
}

/// Reads `energy flux` pairs. Rows with two columns are `energy flux`; rows
/// with three or more are `index energy flux ...` as written by
/// [`render_spectrum_table`].
pub fn parse_spectrum_table(source: &str) -> Result<SpectrumTable, GridError> {
    let mut table = SpectrumTable::default();

    for (line_index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let (energy_token, flux_token) = match tokens.as_slice() {
            [energy, flux] => (*energy, *flux),
            [_, energy, flux, ..] => (*energy, *flux),
            _ => {
                return Err(GridError::Parse {
                    line: line_index + 1,
                    token: trimmed.to_string(),
                });
            }
        };

        let parse = |token: &str| {
            token.parse::<f64>().map_err(|_| GridError::Parse {
                line: line_index + 1,
                token: token.to_string(),
            })
        };
        table.energies.push(parse(energy_token)?);
        table.flux.push(parse(flux_token)?);
    }

    validate_energy_grid(&table.energies)?;
    Ok(table)
}
