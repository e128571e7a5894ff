//! Error types for joint generation.
//!
//! Geometry and resolution failures are value-level errors. A degenerate but
//! still generated edge is not an error; it is reported as a warning on the
//! generated path instead.

use thiserror::Error;

/// Errors that can occur while generating or sizing a tabbed joint.
#[derive(Error, Debug)]
pub enum JointError {
    /// Non-positive lengths or widths, or a derived division count below one.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Tab constraints contradict each other or cannot fit the length.
    #[error("Overconstrained tab specification: {0}")]
    OverconstrainedSpec(String),

    /// A fixed tab width is below the manufacturable minimum.
    #[error("Tab width {width} is below the minimum tab width {min}")]
    TabTooNarrow { width: f64, min: f64 },

    /// An operator parameter failed validation.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

impl JointError {
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn overconstrained(msg: impl Into<String>) -> Self {
        Self::OverconstrainedSpec(msg.into())
    }
}

/// Errors related to operator parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for joint operations.
pub type JointResult<T> = Result<T, JointError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
