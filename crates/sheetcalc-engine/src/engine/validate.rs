//! One-hop reference validation.
//!
//! A formula is usable only if every cell it names exists and is not empty.
//! Referenced formulas are not inspected; that is the cycle detector's and
//! evaluator's job.

use super::{CellRef, Formula, Grid};

/// Return the first reference that is out of bounds or points at an empty cell.
pub fn find_invalid_reference(formula: &Formula, grid: &Grid) -> Option<CellRef> {
    formula
        .references()
        .find(|cell| grid.get(*cell).is_none_or(|content| content.is_empty()))
}

/// True when every reference in the formula points at a non-empty, in-bounds cell.
pub fn references_are_valid(formula: &Formula, grid: &Grid) -> bool {
    find_invalid_reference(formula, grid).is_none()
}
