//! Storage module for delimiter-separated grid files

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content, write_sheet_to};
