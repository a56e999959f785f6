use super::CliError;
use anyhow::Context;
use pexmon_core::modules::grid::{linear_grid, logarithmic_grid, read_energy_grid};
use pexmon_core::modules::parameters::{load_parameter_file, out_of_bounds};
use pexmon_core::modules::serialization::{normalize_text_artifact, write_text_artifact};
use pexmon_core::{ParameterName, PexmonError, PexmonParameters};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub(super) fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when the CLI is driven in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(clap::Args, Default, Debug, Clone)]
pub(super) struct ModelArgs {
    /// JSON parameter file keyed by Gamma, foldE, rel_refl, redshift, abund, iron_abund, incl
    #[arg(long)]
    pub(super) params: Option<PathBuf>,

    /// Power-law photon index
    #[arg(long, allow_negative_numbers = true)]
    pub(super) gamma: Option<f64>,

    /// Cutoff energy in keV (0 disables the cutoff, 999999.9 disables the lines)
    #[arg(long = "fold-e", allow_negative_numbers = true)]
    pub(super) fold_e: Option<f64>,

    /// Reflection scaling
    #[arg(long, allow_negative_numbers = true)]
    pub(super) rel_refl: Option<f64>,

    /// Source redshift
    #[arg(long, allow_negative_numbers = true)]
    pub(super) redshift: Option<f64>,

    /// Abundance of elements heavier than He (solar units)
    #[arg(long)]
    pub(super) abund: Option<f64>,

    /// Iron abundance (solar units)
    #[arg(long)]
    pub(super) iron_abund: Option<f64>,

    /// Inclination in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub(super) incl: Option<f64>,
}

impl ModelArgs {
    fn overrides(&self) -> [(ParameterName, Option<f64>); 7] {
        [
            (ParameterName::Gamma, self.gamma),
            (ParameterName::FoldE, self.fold_e),
            (ParameterName::RelRefl, self.rel_refl),
            (ParameterName::Redshift, self.redshift),
            (ParameterName::Abund, self.abund),
            (ParameterName::IronAbund, self.iron_abund),
            (ParameterName::Incl, self.incl),
        ]
    }
}

#[derive(clap::Args, Debug, Clone)]
pub(super) struct GridArgs {
    /// Energy grid file (first column, keV)
    #[arg(long, conflicts_with_all = ["emin", "emax", "bins", "log"])]
    pub(super) grid: Option<PathBuf>,

    /// Lowest grid energy in keV
    #[arg(long, default_value_t = 0.1)]
    pub(super) emin: f64,

    /// Highest grid energy in keV
    #[arg(long, default_value_t = 100.0)]
    pub(super) emax: f64,

    /// Number of grid energies
    #[arg(long, default_value_t = 1000)]
    pub(super) bins: usize,

    /// Space the generated grid logarithmically
    #[arg(long)]
    pub(super) log: bool,
}

/// Parameter file (or defaults) with command-line overrides applied on top.
pub(super) fn resolve_parameters(args: &ModelArgs) -> Result<PexmonParameters, CliError> {
    let mut params = match &args.params {
        Some(path) => load_parameter_file(path).map_err(PexmonError::from)?,
        None => PexmonParameters::default(),
    };

    for (name, value) in args.overrides() {
        if let Some(value) = value {
            params.set(name, value);
        }
    }

    for violation in out_of_bounds(&params) {
        tracing::warn!(
            parameter = %violation.name,
            value = violation.value,
            min = ?violation.min,
            max = ?violation.max,
            "parameter outside its fitting bounds"
        );
    }
    Ok(params)
}

pub(super) fn resolve_grid(args: &GridArgs) -> Result<Vec<f64>, CliError> {
    let grid = match &args.grid {
        Some(path) => read_energy_grid(path),
        None if args.log => logarithmic_grid(args.emin, args.emax, args.bins),
        None => linear_grid(args.emin, args.emax, args.bins),
    };
    Ok(grid.map_err(PexmonError::from)?)
}

pub(super) fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| {
        CliError::Compute(PexmonError::io_system(
            "IO.CLI_INPUT",
            format!("failed to read '{}': {}", path.display(), source),
        ))
    })
}

pub(super) fn emit_text(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => write_text_artifact(path, content)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(normalize_text_artifact(content).as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{GridArgs, ModelArgs, resolve_grid, resolve_parameters};
    use crate::cli::CliError;
    use std::fs;
    use tempfile::TempDir;

    fn generated_grid() -> GridArgs {
        GridArgs {
            grid: None,
            emin: 1.0,
            emax: 10.0,
            bins: 10,
            log: false,
        }
    }

    #[test]
    fn overrides_apply_on_top_of_parameter_file() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("params.json");
        fs::write(&path, r#"{ "Gamma": 1.8, "incl": 30.0 }"#).expect("params written");

        let args = ModelArgs {
            params: Some(path),
            incl: Some(45.0),
            ..ModelArgs::default()
        };
        let params = resolve_parameters(&args).expect("parameters should resolve");
        assert_eq!(params.gamma, 1.8);
        assert_eq!(params.incl, 45.0);
        assert_eq!(params.fold_e, 100.0);
    }

    #[test]
    fn missing_parameter_file_is_a_compute_error() {
        let args = ModelArgs {
            params: Some("does/not/exist.json".into()),
            ..ModelArgs::default()
        };
        let error = resolve_parameters(&args).expect_err("missing file should fail");
        assert!(matches!(error, CliError::Compute(_)));
    }

    #[test]
    fn generated_grids_follow_spacing_flag() {
        let linear = resolve_grid(&generated_grid()).expect("linear grid");
        assert_eq!(linear.len(), 10);
        assert_eq!(linear[1], 2.0);

        let log = resolve_grid(&GridArgs {
            log: true,
            ..generated_grid()
        })
        .expect("log grid");
        assert_eq!(log[0], 1.0);
        assert_eq!(log[9], 10.0);
        assert!(log[1] < 2.0);
    }
}
