//! Error kinds surfaced by the editors.
//!
//! Every failure leaves engine state untouched; hosts show the message to the
//! user (validation, parse) and carry on with the previous valid state.

/// Bad user input or an incomplete layout document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("minimum store size must be at least {min}x{min} ft (got {length_ft}x{width_ft})")]
    AreaTooSmall { length_ft: f64, width_ft: f64, min: f64 },
    #[error("rack name must not be empty")]
    EmptyName,
    #[error("columns must be {min}-{max} (got {got})")]
    ColumnsOutOfRange { got: i64, min: u32, max: u32 },
    #[error("invalid layout document: missing `{0}`")]
    MissingKey(&'static str),
}

/// Failure while importing or exporting a layout document.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EditorError {
    /// Stable code for hosts that branch on the error kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Parse(_) => "E_PARSE",
        }
    }
}
