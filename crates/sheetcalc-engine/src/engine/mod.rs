//! Spreadsheet engine API.
//!
//! This module provides the formula evaluation core:
//!
//! - [`CellType`], [`Grid`], [`Sentinel`] - Data structures for cell storage
//! - [`CellRef`] - Identifier resolution (A1 notation ↔ row/col indices)
//! - [`Formula`] - Tokenizer producing operands and operators
//! - [`references_are_valid`] - One-hop reference validation
//! - [`detect_cycle`] - Circular reference detection
//! - [`Evaluator`], [`evaluate_grid`] - Precedence-aware reduction and the full sweep

mod cell;
mod cell_ref;
mod cycle;
mod error;
mod eval;
mod tokenize;
mod validate;

pub use cell::{CellType, Grid, Sentinel};
pub use cell_ref::CellRef;
pub use cycle::detect_cycle;
pub use error::{EngineError, Result};
pub use eval::{DEFAULT_MAX_DEPTH, EvalStats, Evaluator, MAX_DEPTH_LIMIT, Value, evaluate_grid};
pub use tokenize::{Formula, Operand, Operator};
pub use validate::{find_invalid_reference, references_are_valid};
