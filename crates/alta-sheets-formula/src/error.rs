//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while constructing or evaluating a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Expression text violates the grammar
    #[error("Syntax error: {reason}")]
    Syntax {
        reason: String,
        /// 1-based index of the offending token, when one exists
        position: Option<usize>,
    },

    /// The resolver reported no value for a variable
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Division with a zero right-hand operand
    #[error("Divide by zero")]
    DivideByZero,

    /// Evaluation reached a state a validated formula cannot produce
    #[error("Internal evaluation error: {0}")]
    Internal(&'static str),
}

impl FormulaError {
    pub(crate) fn syntax(reason: impl Into<String>) -> Self {
        FormulaError::Syntax {
            reason: reason.into(),
            position: None,
        }
    }

    pub(crate) fn syntax_at(reason: impl Into<String>, position: usize) -> Self {
        FormulaError::Syntax {
            reason: reason.into(),
            position: Some(position),
        }
    }
}
