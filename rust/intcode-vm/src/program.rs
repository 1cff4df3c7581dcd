//! Program listings: parsing and the initial memory image.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a textual program listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty program listing")]
    Empty,
    #[error("bad integer '{text}' at element {index}")]
    BadInteger { text: String, index: usize },
}

/// A parsed Intcode listing.
///
/// Immutable once parsed; every machine built from it copies the cells
/// into its own memory, so one listing can seed any number of machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    cells: Vec<i64>,
}

impl Program {
    pub fn new(cells: Vec<i64>) -> Self {
        Program { cells }
    }

    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    /// Parse a comma-separated listing of signed decimal integers.
    /// Whitespace around each element (including a trailing newline) is
    /// tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let mut cells = Vec::new();
        for (index, raw) in s.trim().split(',').enumerate() {
            let text = raw.trim();
            let value = text.parse::<i64>().map_err(|_| ParseError::BadInteger {
                text: text.to_string(),
                index,
            })?;
            cells.push(value);
        }
        Ok(Program { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_values() {
        let program: Program = "1,-2,3".parse().unwrap();
        assert_eq!(program.cells(), &[1, -2, 3]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let program: Program = " 1, 2 ,3\n".parse().unwrap();
        assert_eq!(program.cells(), &[1, 2, 3]);
    }

    #[test]
    fn rejects_empty_listing() {
        assert_eq!("  \n".parse::<Program>(), Err(ParseError::Empty));
    }

    #[test]
    fn reports_the_offending_element() {
        let err = "1,2,x,4".parse::<Program>().unwrap_err();
        assert_eq!(
            err,
            ParseError::BadInteger {
                text: "x".to_string(),
                index: 2
            }
        );
    }
}
