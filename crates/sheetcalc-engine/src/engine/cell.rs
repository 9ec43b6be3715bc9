//! Cell data structures for the spreadsheet grid.
//!
//! - [`CellType`] - What a cell holds: nothing, an integer, a sentinel, or a formula
//! - [`Sentinel`] - The two terminal error values, `#NAN` and `#ERROR`
//! - [`Grid`] - Dense rectangular storage, padded at construction and never resized

use std::fmt;

use super::cell_ref::CellRef;

/// Terminal non-numeric value of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Reference to an out-of-range or empty cell.
    Nan,
    /// Direct or transitive self-reference.
    Error,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Nan => "#NAN",
            Sentinel::Error => "#ERROR",
        }
    }

    pub fn from_text(text: &str) -> Option<Sentinel> {
        match text {
            "#NAN" => Some(Sentinel::Nan),
            "#ERROR" => Some(Sentinel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content stored in a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellType {
    Empty,
    Literal(i64),
    Error(Sentinel),
    /// Raw formula text without the leading `=`.
    Formula(String),
}

impl CellType {
    /// Classify raw cell text.
    /// - Empty string -> Empty
    /// - Starts with '=' (after optional whitespace) -> Formula (without the '=')
    /// - `#NAN` / `#ERROR` -> Error
    /// - Integer in canonical form (no padding, no `+`, no leading zeros) -> Literal
    ///
    /// Returns None for anything else, including whitespace-only text. A
    /// literal is written back from its value, so only text that renders the
    /// same way is accepted.
    pub fn from_input(input: &str) -> Option<CellType> {
        if input.is_empty() {
            return Some(CellType::Empty);
        }

        if let Some(formula) = input.trim_start().strip_prefix('=') {
            return Some(CellType::Formula(formula.to_string()));
        }

        if let Some(sentinel) = Sentinel::from_text(input) {
            return Some(CellType::Error(sentinel));
        }

        input
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == input)
            .map(CellType::Literal)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellType::Empty)
    }

}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Empty => Ok(()),
            CellType::Literal(n) => write!(f, "{}", n),
            CellType::Error(sentinel) => write!(f, "{}", sentinel),
            CellType::Formula(s) => write!(f, "={}", s),
        }
    }
}

/// Rectangular grid of cells. Every row has the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<CellType>>,
    width: usize,
}

impl Grid {
    /// Build a grid from jagged rows, padding short rows with `Empty`
    /// up to the widest row.
    pub fn from_rows(mut rows: Vec<Vec<CellType>>) -> Grid {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellType::Empty);
        }
        Grid { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, cell: CellRef) -> Option<&CellType> {
        self.rows.get(cell.row)?.get(cell.col)
    }

    /// Replace a cell in place. Returns the previous content, or None if the
    /// position is outside the grid (the grid is never grown).
    pub fn set(&mut self, cell: CellRef, value: CellType) -> Option<CellType> {
        let slot = self.rows.get_mut(cell.row)?.get_mut(cell.col)?;
        Some(std::mem::replace(slot, value))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// All formula cells in row-major order.
    pub fn formulas(&self) -> impl Iterator<Item = (CellRef, &str)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                CellType::Formula(f) => Some((CellRef::new(col, row), f.as_str())),
                _ => None,
            })
        })
    }

    pub fn has_formulas(&self) -> bool {
        self.formulas().next().is_some()
    }
}
