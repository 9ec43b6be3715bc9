//! Circular reference detection for formula cells.
//!
//! Before a formula is reduced we check whether reaching its value would
//! require the owning cell's own value (e.g., A1 references B1, B1 references
//! C1, C1 references A1). The walk follows references through formula cells
//! only; literals, sentinels, empty and out-of-range cells end a branch.
//!
//! The target is fixed for the whole walk. Each cell is explored at most once,
//! so diamond-shaped reference graphs stay linear and a loop that does not pass
//! through the target cannot trap the walk.

use std::collections::{HashMap, HashSet};

use super::error::Result;
use super::{CellRef, CellType, Formula, Grid};

/// Detect whether `formula`, owned by `target`, depends on `target`.
/// Returns Some(cycle_path) starting and ending at `target` if it does.
pub fn detect_cycle(target: CellRef, formula: &Formula, grid: &Grid) -> Result<Option<Vec<CellRef>>> {
    let mut visited: HashSet<CellRef> = HashSet::new();
    // Child -> the cell whose formula referenced it first.
    let mut parent: HashMap<CellRef, CellRef> = HashMap::new();
    let mut stack: Vec<CellRef> = Vec::new();

    for cell in formula.references() {
        if cell == target {
            return Ok(Some(vec![target, target]));
        }
        if visited.insert(cell) {
            parent.insert(cell, target);
            stack.push(cell);
        }
    }

    while let Some(current) = stack.pop() {
        let Some(CellType::Formula(text)) = grid.get(current) else {
            continue;
        };
        let nested = Formula::parse(text)?;

        for cell in nested.references() {
            if cell == target {
                return Ok(Some(cycle_path(target, current, &parent)));
            }
            if visited.insert(cell) {
                parent.insert(cell, current);
                stack.push(cell);
            }
        }
    }

    log::trace!("{}: no cycle ({} cells walked)", target, visited.len());
    Ok(None)
}

fn cycle_path(target: CellRef, last: CellRef, parent: &HashMap<CellRef, CellRef>) -> Vec<CellRef> {
    let mut path = vec![target];
    let mut current = last;
    while current != target {
        path.push(current);
        current = parent[&current];
    }
    path.push(target);
    path.reverse();
    path
}
