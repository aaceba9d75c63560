//! Plumbing between raw puzzle text and the solvers.

use thiserror::Error;

use crate::computer::Word;

#[derive(Debug, Error, Eq, PartialEq)]
#[error("bad program word {0:?}")]
pub struct BadWord(String);

/// Parse a comma-separated program into a memory image.
pub fn parse_program(text: &str) -> Result<Vec<Word>, BadWord> {
    text.trim()
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse()
                .map_err(|_| BadWord(token.to_string()))
        })
        .collect()
}
