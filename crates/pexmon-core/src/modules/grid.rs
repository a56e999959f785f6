use crate::domain::PexmonError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("energy grid must contain at least one energy")]
    Empty,
    #[error("energy at index {index} must be finite, got {value}")]
    NonFinite { index: usize, value: f64 },
    #[error("energy at index {index} must be > 0 keV, got {value}")]
    NonPositive { index: usize, value: f64 },
    #[error("energy range must satisfy 0 < emin <= emax, got emin={emin} emax={emax}")]
    InvalidRange { emin: f64, emax: f64 },
    #[error("energy grid needs at least one bin")]
    ZeroBins,
    #[error("line {line}: '{token}' is not a number")]
    Parse { line: usize, token: String },
    #[error("failed to read energy grid '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<GridError> for PexmonError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::Read { .. } => PexmonError::io_system("IO.ENERGY_GRID", error.to_string()),
            GridError::Parse { .. } => {
                PexmonError::input_validation("INPUT.ENERGY_GRID_FORMAT", error.to_string())
            }
            _ => PexmonError::input_validation("INPUT.ENERGY_GRID", error.to_string()),
        }
    }
}

/// Checks the evaluator's grid preconditions: non-empty, finite, strictly positive.
///
/// Ordering is not enforced; every bin is evaluated independently.
pub fn validate_energy_grid(energies: &[f64]) -> Result<(), GridError> {
    if energies.is_empty() {
        return Err(GridError::Empty);
    }

    for (index, value) in energies.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(GridError::NonFinite { index, value });
        }
        if value <= 0.0 {
            return Err(GridError::NonPositive { index, value });
        }
    }
    Ok(())
}

fn validate_range(emin: f64, emax: f64, bins: usize) -> Result<(), GridError> {
    if bins == 0 {
        return Err(GridError::ZeroBins);
    }
    if !emin.is_finite() || !emax.is_finite() || emin <= 0.0 || emax < emin {
        return Err(GridError::InvalidRange { emin, emax });
    }
    Ok(())
}

/// `bins` energies evenly spaced from `emin` to `emax` inclusive.
pub fn linear_grid(emin: f64, emax: f64, bins: usize) -> Result<Vec<f64>, GridError> {
    validate_range(emin, emax, bins)?;
    if bins == 1 {
        return Ok(vec![emin]);
    }

    let step = (emax - emin) / (bins - 1) as f64;
    let mut grid: Vec<f64> = (0..bins).map(|index| emin + index as f64 * step).collect();
    grid[bins - 1] = emax;
    Ok(grid)
}

/// `bins` energies evenly spaced in `log10(E)` from `emin` to `emax` inclusive.
pub fn logarithmic_grid(emin: f64, emax: f64, bins: usize) -> Result<Vec<f64>, GridError> {
    validate_range(emin, emax, bins)?;
    if bins == 1 {
        return Ok(vec![emin]);
    }

    let log_min = emin.log10();
    let log_step = (emax.log10() - log_min) / (bins - 1) as f64;
    let mut grid: Vec<f64> = (0..bins)
        .map(|index| 10_f64.powf(log_min + index as f64 * log_step))
        .collect();
    grid[0] = emin;
    grid[bins - 1] = emax;
    Ok(grid)
}

/// Reads the first column of whitespace separated text. Blank lines and lines
/// starting with `#` are skipped.
pub fn parse_energy_grid(source: &str) -> Result<Vec<f64>, GridError> {
    let mut energies = Vec::new();
    for (line_index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(token) = trimmed.split_whitespace().next() else {
            continue;
        };
        let value = token.parse::<f64>().map_err(|_| GridError::Parse {
            line: line_index + 1,
            token: token.to_string(),
        })?;
        energies.push(value);
    }

    validate_energy_grid(&energies)?;
    Ok(energies)
}

pub fn read_energy_grid(path: impl AsRef<Path>) -> Result<Vec<f64>, GridError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| GridError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_energy_grid(&source)
}
