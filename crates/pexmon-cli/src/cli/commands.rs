use super::CliError;
use super::helpers::{GridArgs, ModelArgs, emit_text, read_text, resolve_grid, resolve_parameters};
use anyhow::Context;
use pexmon_core::modules::grid::GridError;
use pexmon_core::modules::parameters::PARAMETER_CATALOGUE;
use pexmon_core::modules::serialization::{
    format_fixed_f64, parse_spectrum_table, render_spectrum_table, write_text_artifact,
};
use pexmon_core::numerics::{NumericTolerance, SpectrumComparison, compare_spectra};
use pexmon_core::{PexmonError, PexmonParameters, evaluate_pexmon};
use serde::Serialize;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct EvalArgs {
    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    model: ModelArgs,

    /// Spectrum table output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct ParamsArgs {
    /// Print the catalogue as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct CompareArgs {
    /// Reference table: `energy flux` or `index energy flux ...` rows
    #[arg(long)]
    baseline: PathBuf,

    #[command(flatten)]
    model: ModelArgs,

    /// Absolute flux tolerance
    #[arg(long, default_value_t = 1.0e-12)]
    abs_tol: f64,

    /// Relative flux tolerance
    #[arg(long, default_value_t = 1.0e-6)]
    rel_tol: f64,

    /// JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(super) fn run_eval_command(args: EvalArgs) -> Result<i32, CliError> {
    let params = resolve_parameters(&args.model)?;
    let energies = resolve_grid(&args.grid)?;
    let evaluation = evaluate_pexmon(&energies, &params)?;

    let table = render_spectrum_table(&energies, &evaluation, &params);
    emit_text(args.output.as_deref(), &table)?;
    if let Some(output) = &args.output {
        eprintln!("Spectrum table: {}", output.display());
    }
    Ok(0)
}

pub(super) fn run_params_command(args: ParamsArgs) -> Result<i32, CliError> {
    if args.json {
        let rendered = serde_json::to_string_pretty(&PARAMETER_CATALOGUE)
            .context("failed to serialize parameter catalogue")?;
        emit_text(None, &rendered)?;
        return Ok(0);
    }

    let mut lines = vec![format!(
        "{:<11} {:>10} {:>8} {:>8} {:>6} {:<6} {}",
        "name", "initial", "min", "max", "fixed", "unit", "description"
    )];
    for row in &PARAMETER_CATALOGUE {
        let bound = |value: Option<f64>| {
            value.map_or_else(|| "-".to_string(), |value| value.to_string())
        };
        lines.push(format!(
            "{:<11} {} {:>8} {:>8} {:>6} {:<6} {}",
            row.name.as_str(),
            format_fixed_f64(row.initial_value, 10, 3),
            bound(row.min),
            bound(row.max),
            if row.fixed { "yes" } else { "no" },
            row.unit,
            row.description
        ));
    }
    emit_text(None, &lines.join("\n"))?;
    Ok(0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport<'a> {
    baseline: String,
    parameters: &'a PexmonParameters,
    comparison: &'a SpectrumComparison,
}

pub(super) fn run_compare_command(args: CompareArgs) -> Result<i32, CliError> {
    let params = resolve_parameters(&args.model)?;
    let source = read_text(&args.baseline)?;
    let baseline = parse_spectrum_table(&source).map_err(|error| match error {
        GridError::Parse { .. } => PexmonError::input_validation(
            "INPUT.BASELINE_TABLE",
            format!("{}: {}", args.baseline.display(), error),
        ),
        other => PexmonError::from(other),
    })?;

    let evaluation = evaluate_pexmon(&baseline.energies, &params)?;
    let tolerance = NumericTolerance {
        abs_tol: args.abs_tol,
        rel_tol: args.rel_tol,
        ..NumericTolerance::default()
    };
    let comparison = compare_spectra(
        &baseline.energies,
        &baseline.flux,
        &evaluation.flux,
        tolerance,
    )
    .ok_or_else(|| {
        PexmonError::internal(
            "SYS.COMPARE_SHAPE",
            "baseline and evaluated spectra disagree in length",
        )
    })?;

    println!("{}", render_comparison_summary(&comparison));
    if let Some(report_path) = &args.report {
        let report = CompareReport {
            baseline: args.baseline.display().to_string(),
            parameters: &params,
            comparison: &comparison,
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize compare report")?;
        write_text_artifact(report_path, &rendered)
            .with_context(|| format!("failed to write '{}'", report_path.display()))?;
        println!("JSON report: {}", report_path.display());
    }

    Ok(if comparison.passed { 0 } else { 1 })
}

fn render_comparison_summary(comparison: &SpectrumComparison) -> String {
    let mut summary = format!(
        "compare: {} bins, {} failing, max abs diff {:E}, max rel diff {:E}: {}",
        comparison.bin_count,
        comparison.failing_bins,
        comparison.max_abs_diff,
        comparison.max_rel_diff,
        if comparison.passed { "PASS" } else { "FAIL" }
    );
    if let Some(worst) = &comparison.worst {
        summary.push_str(&format!(
            "\nworst bin {} at {} keV: baseline {:E}, actual {:E}",
            worst.index, worst.energy, worst.baseline, worst.actual
        ));
    }
    summary
}
