//! Error types for simulator evaluations.
//!
//! Every evaluation either succeeds or fails with a [`SimError`] that is
//! reported straight back to the caller. Nothing is retried and no failure
//! affects other evaluations.

use std::fmt;

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Structured context for simulator errors.
///
/// Records which evaluation failed and on which parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The evaluation being performed (e.g., "pricing.cost", "scheduling.solve")
    pub operation: Option<String>,
    /// The offending parameter, if a single one can be named
    pub parameter: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the offending parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none() && self.parameter.is_none() && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref parameter) = self.parameter {
            parts.push(format!("parameter={}", parameter));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for simulator evaluations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A parameter is out of its domain (negative hours, budget or counts,
    /// malformed matrices or tier tables).
    #[error("Invalid input: {message} {context}")]
    InvalidInput {
        message: String,
        context: ErrorContext,
    },

    /// The scheduling problem has no solution under the given constraints.
    #[error("Infeasible: {message} {context}")]
    Infeasible {
        message: String,
        context: ErrorContext,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// The LP solver failed for a reason other than infeasibility.
    #[error("Solver error: {message} {context}")]
    Solver {
        message: String,
        context: ErrorContext,
    },
}

impl SimError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an invalid input error with context.
    pub fn invalid_input_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InvalidInput {
            message: message.into(),
            context,
        }
    }

    /// Create an infeasibility error.
    pub fn infeasible(message: impl Into<String>) -> Self {
        Self::Infeasible {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an infeasibility error with context.
    pub fn infeasible_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Infeasible {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a solver error.
    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Infeasible { .. } => "INFEASIBLE",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Solver { .. } => "SOLVER_ERROR",
        }
    }

    /// The bare message, without context.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. }
            | Self::Infeasible { message, .. }
            | Self::Configuration { message, .. }
            | Self::Solver { message, .. } => message,
        }
    }

    /// The structured context attached to this error.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InvalidInput { context, .. }
            | Self::Infeasible { context, .. }
            | Self::Configuration { context, .. }
            | Self::Solver { context, .. } => context,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("pricing.cost")
            .with_parameter("hours")
            .with_details("got -1");
        assert_eq!(
            ctx.to_string(),
            "[operation=pricing.cost, parameter=hours, details=got -1]"
        );
    }

    #[test]
    fn test_empty_context_display() {
        let err = SimError::infeasible("no tutor can cover Precalculus");
        assert_eq!(
            err.to_string().trim_end(),
            "Infeasible: no tutor can cover Precalculus"
        );
    }

    #[test]
    fn test_codes_and_predicates() {
        let err = SimError::invalid_input_with_context(
            "hours must be non-negative",
            ErrorContext::new("pricing.cost").with_parameter("hours"),
        );
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.is_invalid_input());
        assert!(!err.is_infeasible());
        assert_eq!(err.message(), "hours must be non-negative");
        assert_eq!(err.context().parameter.as_deref(), Some("hours"));

        assert_eq!(SimError::solver("x").code(), "SOLVER_ERROR");
        assert_eq!(SimError::configuration("x").code(), "CONFIGURATION_ERROR");
    }
}
