use std::str::Utf8Error;
use thiserror::Error;

/// Failure to parse an input.
///
/// Malformed quoting and grouping are always recovered, so these only arise at the input boundary.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input bytes are not valid UTF-8.
    #[error("Parse error: input is not valid UTF-8 (valid up to byte {valid_up_to}).")]
    Encoding {
        /// The length of the valid UTF-8 prefix.
        valid_up_to: usize,
    },
}

impl From<Utf8Error> for ParseError {
    fn from(error: Utf8Error) -> Self {
        ParseError::Encoding {
            valid_up_to: error.valid_up_to(),
        }
    }
}
