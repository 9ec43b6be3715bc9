//! Formula tokenizer.
//!
//! Splits formula text such as `=A1 + 2*b3` into its ordered operands
//! (`A1`, `2`, `B3`) and ordered operators (`+`, `*`). Whitespace anywhere in
//! the formula is ignored. There are no parentheses, functions or unary signs.

use std::fmt;

use super::cell_ref::CellRef;
use super::error::{EngineError, Result};

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn from_char(c: char) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.as_char() == c)
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Multiplication and division are applied before addition and subtraction.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An operand token: an integer literal or a reference to another cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Ref(CellRef),
}

/// A tokenized formula. Always holds one more operand than operators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    pub operands: Vec<Operand>,
    pub operators: Vec<Operator>,
}

impl Formula {
    /// Tokenize formula text, with or without its leading `=`.
    pub fn parse(text: &str) -> Result<Formula> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let body = compact.strip_prefix('=').unwrap_or(&compact);

        let operators: Vec<Operator> = body.chars().filter_map(Operator::from_char).collect();
        let operands = body
            .split(|c: char| Operator::from_char(c).is_some())
            .filter(|run| !run.is_empty())
            .map(|run| parse_operand(text, run))
            .collect::<Result<Vec<_>>>()?;

        if operands.is_empty() {
            return Err(EngineError::malformed(text, "no operands"));
        }
        // Every gap between operators must hold an operand, so a leading sign,
        // a trailing operator or two adjacent operators all break the count.
        if operators.len() + 1 != operands.len() {
            return Err(EngineError::malformed(
                text,
                format!(
                    "{} operators between {} operands",
                    operators.len(),
                    operands.len()
                ),
            ));
        }

        Ok(Formula {
            operands,
            operators,
        })
    }

    /// True when no operand refers to another cell. Such a formula can never
    /// be self-referential.
    pub fn is_literal(&self) -> bool {
        self.operands
            .iter()
            .all(|operand| matches!(operand, Operand::Literal(_)))
    }

    /// Cell references in the order they appear.
    pub fn references(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.operands.iter().filter_map(|operand| match operand {
            Operand::Ref(cell) => Some(*cell),
            Operand::Literal(_) => None,
        })
    }
}

fn parse_operand(formula: &str, run: &str) -> Result<Operand> {
    if run.bytes().all(|b| b.is_ascii_digit()) {
        return run
            .parse::<i64>()
            .map(Operand::Literal)
            .map_err(|_| EngineError::malformed(formula, format!("literal {} out of range", run)));
    }
    run.parse::<CellRef>().map(Operand::Ref)
}
