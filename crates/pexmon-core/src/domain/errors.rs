use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PexmonResult<T> = Result<T, PexmonError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PexmonErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl PexmonErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl Display for PexmonErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Error surfaced at the library boundary.
///
/// `placeholder` is a stable dotted identifier (`INPUT.ENERGY_GRID`,
/// `IO.PARAMETER_FILE`, ...) that tests and scripts can match on without
/// depending on the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PexmonError {
    category: PexmonErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl PexmonError {
    pub fn new(
        category: PexmonErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            PexmonErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PexmonErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PexmonErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PexmonErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> PexmonErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for PexmonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for PexmonError {}

#[cfg(test)]
mod tests {
    use super::{PexmonError, PexmonErrorCategory};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (PexmonErrorCategory::Success, 0, "Success"),
            (
                PexmonErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (PexmonErrorCategory::IoSystemError, 3, "IoSystemError"),
            (PexmonErrorCategory::ComputationError, 4, "ComputationError"),
            (PexmonErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, label) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), label);
            assert_eq!(category.to_string(), label);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = PexmonError::input_validation(
            "INPUT.ENERGY_GRID",
            "energy at index 3 must be > 0, got -1",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.ENERGY_GRID] energy at index 3 must be > 0, got -1"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 2")
        );
    }

    #[test]
    fn success_category_is_not_fatal() {
        let info = PexmonError::new(PexmonErrorCategory::Success, "RUN.DONE", "ok");
        assert_eq!(info.diagnostic_line(), "INFO: [RUN.DONE] ok");
        assert!(info.fatal_exit_line().is_none());
    }
}
