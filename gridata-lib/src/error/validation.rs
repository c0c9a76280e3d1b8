//! Validation error types

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Optional error code.
    pub code: Option<String>,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new field validation error with an error code.
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: {} ({})", self.field, self.message, code)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// A validation failure: one or more per-field errors.
///
/// Produced locally by form validators before a request is issued. A
/// submission that fails validation is blocked entirely.
#[derive(Debug, Clone, Default)]
pub struct ValidationError {
    /// The per-field errors.
    pub errors: Vec<FieldValidationError>,
}

impl ValidationError {
    /// Creates an empty validation error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validation error with a single field error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldValidationError::new(field, message)],
        }
    }

    /// Adds a field error.
    pub fn push(&mut self, error: FieldValidationError) {
        self.errors.push(error);
    }

    /// Returns `true` if no field errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into a `Result`: `Ok` when no errors were recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed")?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
