//! Error types for expression evaluation and the calculator components.

use thiserror::Error;

/// Calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),

    #[error("Unknown function {0}")]
    UnknownFunction(String),

    #[error("Wrong number of arguments for {name}: expected {expected}, got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("Cannot calculate inverse, determinant is zero")]
    SingularMatrix,

    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    #[error("Cannot differentiate {0}")]
    UnsupportedDerivative(String),

    #[error("Cell ({row}, {col}) is outside the 3x3 grid")]
    CellOutOfRange { row: usize, col: usize },
}

impl CalcError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn undefined_symbol(name: impl Into<String>) -> Self {
        Self::UndefinedSymbol(name.into())
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction(name.into())
    }

    pub fn unsupported_derivative(what: impl Into<String>) -> Self {
        Self::UnsupportedDerivative(what.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
