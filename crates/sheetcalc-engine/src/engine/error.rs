//! Fatal engine errors.
//!
//! Invalid and circular references are not errors here: they reduce to the
//! `#NAN` / `#ERROR` sentinels and end up in the grid. Everything in this
//! enum aborts the evaluation pass.

use thiserror::Error;

use super::cell_ref::CellRef;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Malformed formula {formula:?}: {reason}")]
    MalformedFormula { formula: String, reason: String },

    #[error("Division by zero in {cell}")]
    DivisionByZero { cell: CellRef },

    #[error("Integer overflow in {cell}")]
    Overflow { cell: CellRef },

    #[error("Reference chain deeper than {max_depth} at {cell}")]
    DepthExceeded { cell: CellRef, max_depth: usize },
}

impl EngineError {
    pub(crate) fn malformed(formula: &str, reason: impl Into<String>) -> Self {
        EngineError::MalformedFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
