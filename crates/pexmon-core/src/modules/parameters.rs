//! Parameter catalogue, named-parameter adapter and JSON parameter files.

use crate::common::constants::{
    DEFAULT_ABUND, DEFAULT_FOLD_E, DEFAULT_GAMMA, DEFAULT_INCL, DEFAULT_IRON_ABUND,
    DEFAULT_REDSHIFT, DEFAULT_REL_REFL,
};
use crate::domain::{ParameterName, PexmonError, PexmonParameters, PexmonResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: ParameterName,
    pub description: &'static str,
    pub unit: &'static str,
    pub initial_value: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub delta: Option<f64>,
    pub fixed: bool,
}

impl ParameterDescriptor {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

pub const PARAMETER_CATALOGUE: [ParameterDescriptor; 7] = [
    ParameterDescriptor {
        name: ParameterName::Gamma,
        description: "The power-law photon index, N_E prop. to E^{-Gamma}",
        unit: "",
        initial_value: DEFAULT_GAMMA,
        min: Some(-2.0),
        max: Some(9.0),
        delta: Some(0.1),
        fixed: false,
    },
    ParameterDescriptor {
        name: ParameterName::FoldE,
        description: "The cut-off energy (E_c) in keV. Set to 0 for no cut off.",
        unit: "keV",
        initial_value: DEFAULT_FOLD_E,
        min: Some(0.0),
        max: Some(1000.0),
        delta: Some(0.1),
        fixed: true,
    },
    ParameterDescriptor {
        name: ParameterName::RelRefl,
        description: "The reflection scaling parameter (1 for an isotropic source above the disk, less than 0 for no direct component)",
        unit: "",
        initial_value: DEFAULT_REL_REFL,
        min: Some(-2.0),
        max: Some(100.0),
        delta: Some(0.1),
        fixed: true,
    },
    ParameterDescriptor {
        name: ParameterName::Redshift,
        description: "The redshift of the source.",
        unit: "",
        initial_value: DEFAULT_REDSHIFT,
        min: None,
        max: None,
        delta: None,
        fixed: true,
    },
    ParameterDescriptor {
        name: ParameterName::Abund,
        description: "The abundance of the elements heavier than He relative to their solar abundance",
        unit: "solar",
        initial_value: DEFAULT_ABUND,
        min: None,
        max: None,
        delta: None,
        fixed: true,
    },
    ParameterDescriptor {
        name: ParameterName::IronAbund,
        description: "Iron abundance relative to the solar iron abundance",
        unit: "solar",
        initial_value: DEFAULT_IRON_ABUND,
        min: None,
        max: None,
        delta: None,
        fixed: true,
    },
    ParameterDescriptor {
        name: ParameterName::Incl,
        description: "Inclination angle",
        unit: "deg",
        initial_value: DEFAULT_INCL,
        min: None,
        max: None,
        delta: None,
        fixed: true,
    },
];

pub fn descriptor(name: ParameterName) -> &'static ParameterDescriptor {
    // Catalogue rows are stored in `ParameterName::ALL` order.
    &PARAMETER_CATALOGUE[name as usize]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundViolation {
    pub name: ParameterName,
    pub value: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Parameters outside the fitting bounds declared in the catalogue.
///
/// The evaluator accepts any finite value; callers use this to warn.
pub fn out_of_bounds(params: &PexmonParameters) -> Vec<BoundViolation> {
    params
        .iter()
        .filter_map(|(name, value)| {
            let descriptor = descriptor(name);
            (!descriptor.contains(value)).then_some(BoundViolation {
                name,
                value,
                min: descriptor.min,
                max: descriptor.max,
            })
        })
        .collect()
}

/// Builds parameters from a name -> value map. All seven names are required
/// and unknown names are rejected.
pub fn parameters_from_named(named: &BTreeMap<String, f64>) -> PexmonResult<PexmonParameters> {
    if let Some(unknown) = named
        .keys()
        .find(|key| ParameterName::from_name(key).is_none())
    {
        return Err(PexmonError::input_validation(
            "INPUT.PARAMETER_NAME",
            format!("unknown pexmon parameter '{}'", unknown),
        ));
    }

    let mut params = PexmonParameters::default();
    for name in ParameterName::ALL {
        let value = named
            .iter()
            .find(|(key, _)| ParameterName::from_name(key) == Some(name))
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                PexmonError::input_validation(
                    "INPUT.PARAMETER_MISSING",
                    format!("missing pexmon parameter '{}'", name),
                )
            })?;
        params.set(name, value);
    }
    Ok(params)
}

#[derive(Debug, thiserror::Error)]
pub enum ParameterFileError {
    #[error("failed to read parameter file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse parameter file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<ParameterFileError> for PexmonError {
    fn from(error: ParameterFileError) -> Self {
        match error {
            ParameterFileError::Read { .. } => {
                PexmonError::io_system("IO.PARAMETER_FILE", error.to_string())
            }
            ParameterFileError::Parse { .. } => {
                PexmonError::input_validation("INPUT.PARAMETER_FILE", error.to_string())
            }
        }
    }
}

/// Reads a JSON object keyed by framework parameter names. Absent keys keep
/// their catalogue initial values.
pub fn load_parameter_file(
    path: impl AsRef<Path>,
) -> Result<PexmonParameters, ParameterFileError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ParameterFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ParameterFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        PARAMETER_CATALOGUE, ParameterFileError, descriptor, load_parameter_file, out_of_bounds,
        parameters_from_named,
    };
    use crate::domain::{ParameterName, PexmonError, PexmonErrorCategory, PexmonParameters};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn named(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn catalogue_follows_positional_order_and_defaults() {
        for (row, name) in PARAMETER_CATALOGUE.iter().zip(ParameterName::ALL) {
            assert_eq!(row.name, name);
            assert_eq!(descriptor(name).name, name);
        }

        let defaults = PexmonParameters::default();
        for row in &PARAMETER_CATALOGUE {
            assert_eq!(defaults.value(row.name), row.initial_value);
        }
        assert!(!descriptor(ParameterName::Gamma).fixed);
        assert!(descriptor(ParameterName::Incl).fixed);
    }

    #[test]
    fn named_adapter_requires_every_parameter() {
        let complete = named(&[
            ("Gamma", 1.9),
            ("foldE", 300.0),
            ("rel_refl", -1.0),
            ("redshift", 0.02),
            ("abund", 1.0),
            ("iron_abund", 1.0),
            ("incl", 30.0),
        ]);
        let params = parameters_from_named(&complete).expect("complete map should convert");
        assert_eq!(params.gamma, 1.9);
        assert_eq!(params.fold_e, 300.0);
        assert_eq!(params.redshift, 0.02);
        assert_eq!(params.incl, 30.0);

        let mut partial = complete.clone();
        partial.remove("incl");
        let error = parameters_from_named(&partial).expect_err("missing incl should fail");
        assert_eq!(error.placeholder(), "INPUT.PARAMETER_MISSING");
        assert!(error.message().contains("incl"));

        let mut extra = complete;
        extra.insert("norm".to_string(), 1.0);
        let error = parameters_from_named(&extra).expect_err("unknown name should fail");
        assert_eq!(error.placeholder(), "INPUT.PARAMETER_NAME");
    }

    #[test]
    fn bounds_check_reports_only_bounded_parameters() {
        let params = PexmonParameters {
            gamma: 12.0,
            fold_e: -5.0,
            redshift: 7.0,
            incl: 95.0,
            ..PexmonParameters::default()
        };
        let violations = out_of_bounds(&params);
        let names: Vec<ParameterName> = violations.iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec![ParameterName::Gamma, ParameterName::FoldE]);
        assert_eq!(violations[0].max, Some(9.0));
        assert!(out_of_bounds(&PexmonParameters::default()).is_empty());
    }

    #[test]
    fn parameter_file_fills_missing_fields_with_defaults() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("params.json");
        fs::write(&path, r#"{ "Gamma": 1.7, "foldE": 999999.9, "abund": 2.0 }"#)
            .expect("parameter file should be written");

        let params = load_parameter_file(&path).expect("parameter file should load");
        assert_eq!(params.gamma, 1.7);
        assert_eq!(params.fold_e, 999_999.9);
        assert_eq!(params.abund, 2.0);
        assert_eq!(params.incl, 60.0);
    }

    #[test]
    fn parameter_file_errors_map_to_categories() {
        let temp = TempDir::new().expect("tempdir should be created");
        let missing = load_parameter_file(temp.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(missing, ParameterFileError::Read { .. }));
        assert_eq!(
            PexmonError::from(missing).category(),
            PexmonErrorCategory::IoSystemError
        );

        let path = temp.path().join("broken.json");
        fs::write(&path, "{ \"Gamma\": ").expect("broken file should be written");
        let broken = load_parameter_file(&path).expect_err("truncated JSON should fail");
        assert_eq!(
            PexmonError::from(broken).placeholder(),
            "INPUT.PARAMETER_FILE"
        );
    }
}
