//! Cell identifier resolution.
//!
//! Converts spreadsheet-style identifiers (e.g., "A1", "b2", "AA100") into
//! zero-indexed row/column coordinates and back.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::error::EngineError;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Resolve an identifier such as "AB12" (or "=AB12").
    /// Returns None if the identifier is malformed.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name.strip_prefix('=').unwrap_or(name))
    }

    /// Letters then digits, row numbered from 1. A coordinate too large for
    /// `usize` saturates: it lies outside every grid, so it reads as a
    /// missing cell rather than a malformed one.
    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = identifier_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        // Base-26 with digit values A=1..Z=26, so there is no zero digit.
        let col_acc = letters
            .bytes()
            .map(|c| (c.to_ascii_uppercase() - b'A') as usize + 1)
            .fold(0usize, |acc, digit| acc.saturating_mul(26).saturating_add(digit));

        if numbers.bytes().all(|b| b == b'0') {
            return None;
        }
        let row_number = numbers.parse::<usize>().unwrap_or(usize::MAX);

        Some(CellRef::new(col_acc - 1, row_number - 1))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = Vec::new();
        let mut rest = Some(col);
        while let Some(n) = rest {
            letters.push(b'A' + (n % 26) as u8);
            rest = (n / 26).checked_sub(1);
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }
}

fn identifier_re() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell identifier regex must compile")
    })
}

/// Strict form used for formula operands: no leading `=`.
impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| EngineError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}
