//! Formula reduction and the grid-wide evaluation sweep.
//!
//! A formula is reduced in three stages: every reference must point at a
//! non-empty cell in the grid (else `#NAN`), the owning cell must not be
//! reachable from its own references (else `#ERROR`), then operand pairs are
//! folded together, leftmost `*` or `/` first and `+`/`-` left to right once no
//! multiplicative operator remains. Referenced formula cells are reduced on
//! demand from their raw text.

use std::collections::HashMap;
use std::fmt;

use super::cycle::detect_cycle;
use super::error::{EngineError, Result};
use super::validate::find_invalid_reference;
use super::{CellRef, CellType, Formula, Grid, Operand, Operator, Sentinel};

/// Default bound on how many formula cells a reference chain may pass through.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest depth bound accepted; deeper chains would outgrow the main thread's stack.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// The reduced value of a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    Sentinel(Sentinel),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Sentinel(s) => write!(f, "{}", s),
        }
    }
}

impl From<Value> for CellType {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => CellType::Literal(n),
            Value::Sentinel(s) => CellType::Error(s),
        }
    }
}

/// Reduces formulas against a read-only grid.
///
/// Results of referenced formula cells are memoized for the evaluator's
/// lifetime. A cell's value depends only on its own formula and the grid, so
/// the cache never changes an outcome.
pub struct Evaluator<'g> {
    grid: &'g Grid,
    max_depth: usize,
    cache: HashMap<CellRef, Value>,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Evaluator {
            grid,
            max_depth: DEFAULT_MAX_DEPTH,
            cache: HashMap::new(),
        }
    }

    /// Bound reference chains to `max_depth` formula cells, capped at
    /// [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// Value of any cell: formulas are reduced, literals and sentinels are
    /// returned as-is, empty and out-of-range cells read as `#NAN`.
    pub fn evaluate_cell(&mut self, cell: CellRef) -> Result<Value> {
        self.value_of(cell, 0)
    }

    /// Reduce `text` as if it were the formula stored at `owner`.
    pub fn evaluate_formula(&mut self, text: &str, owner: CellRef) -> Result<Value> {
        self.reduce(text, owner, 0)
    }

    fn value_of(&mut self, cell: CellRef, depth: usize) -> Result<Value> {
        let grid = self.grid;
        match grid.get(cell) {
            Some(CellType::Formula(text)) => {
                if let Some(value) = self.cache.get(&cell) {
                    return Ok(*value);
                }
                let value = self.reduce(text, cell, depth)?;
                self.cache.insert(cell, value);
                Ok(value)
            }
            Some(CellType::Literal(n)) => Ok(Value::Number(*n)),
            Some(CellType::Error(s)) => Ok(Value::Sentinel(*s)),
            Some(CellType::Empty) | None => Ok(Value::Sentinel(Sentinel::Nan)),
        }
    }

    fn resolve(&mut self, operand: Operand, depth: usize) -> Result<Value> {
        match operand {
            Operand::Literal(n) => Ok(Value::Number(n)),
            Operand::Ref(cell) => self.value_of(cell, depth + 1),
        }
    }

    fn reduce(&mut self, text: &str, owner: CellRef, depth: usize) -> Result<Value> {
        if depth >= self.max_depth {
            return Err(EngineError::DepthExceeded {
                cell: owner,
                max_depth: self.max_depth,
            });
        }

        let formula = Formula::parse(text)?;

        if let Some(bad) = find_invalid_reference(&formula, self.grid) {
            log::trace!("{}: reference {} is empty or out of range", owner, bad);
            return Ok(Value::Sentinel(Sentinel::Nan));
        }

        if !formula.is_literal() {
            if let Some(path) = detect_cycle(owner, &formula, self.grid)? {
                log::trace!("{}: circular reference {}", owner, format_path(&path));
                return Ok(Value::Sentinel(Sentinel::Error));
            }
        }

        let Formula {
            mut operands,
            mut operators,
        } = formula;

        while operands.len() > 1 {
            let i = operators
                .iter()
                .position(|op| op.is_multiplicative())
                .unwrap_or(0);

            let lhs = self.resolve(operands[i], depth)?;
            let rhs = self.resolve(operands[i + 1], depth)?;
            let (a, b) = match (lhs, rhs) {
                (Value::Sentinel(Sentinel::Error), _) | (_, Value::Sentinel(Sentinel::Error)) => {
                    return Ok(Value::Sentinel(Sentinel::Error));
                }
                (Value::Sentinel(Sentinel::Nan), _) | (_, Value::Sentinel(Sentinel::Nan)) => {
                    return Ok(Value::Sentinel(Sentinel::Nan));
                }
                (Value::Number(a), Value::Number(b)) => (a, b),
            };

            operands[i] = Operand::Literal(apply(operators[i], a, b, owner)?);
            operands.remove(i + 1);
            operators.remove(i);
        }

        self.resolve(operands[0], depth)
    }
}

fn apply(op: Operator, a: i64, b: i64, owner: CellRef) -> Result<i64> {
    let result = match op {
        Operator::Add => a.checked_add(b),
        Operator::Sub => a.checked_sub(b),
        Operator::Mul => a.checked_mul(b),
        Operator::Div => {
            if b == 0 {
                return Err(EngineError::DivisionByZero { cell: owner });
            }
            a.checked_div(b)
        }
    };
    result.ok_or(EngineError::Overflow { cell: owner })
}

fn format_path(path: &[CellRef]) -> String {
    path.iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Summary of one evaluation sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    pub formulas: usize,
    pub nan: usize,
    pub errors: usize,
}

/// Replace every formula cell in the grid with its reduced value.
///
/// All formulas are reduced against the untouched grid first and written back
/// afterwards, so no reduction ever observes an already-replaced cell. On a
/// fatal error the grid is left unmodified.
pub fn evaluate_grid(grid: &mut Grid, max_depth: usize) -> Result<EvalStats> {
    let results = {
        let mut evaluator = Evaluator::new(grid).with_max_depth(max_depth);
        let mut results = Vec::new();
        for (cell, text) in grid.formulas() {
            let value = evaluator.evaluate_cell(cell)?;
            log::debug!("{}: ={} -> {}", cell, text, value);
            results.push((cell, value));
        }
        results
    };

    let mut stats = EvalStats::default();
    for (cell, value) in results {
        stats.formulas += 1;
        match value {
            Value::Sentinel(Sentinel::Nan) => stats.nan += 1,
            Value::Sentinel(Sentinel::Error) => stats.errors += 1,
            Value::Number(_) => {}
        }
        grid.set(cell, value.into());
    }
    Ok(stats)
}
