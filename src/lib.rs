//! `subargs` parses a single command line string into flags, values, positionals, and nested sub-argument groups.
//!
//! The parser is schema-less: every flag name it encounters is accepted, and the caller interprets the result.
//! It is also tolerant: malformed quoting and grouping are recovered rather than rejected.
//!
//! # Usage
//! ```
//! let arguments = subargs::parse("-v --name=demo -t [ one -xy ] input.txt");
//!
//! assert_eq!(arguments.flag("v"), Some(true));
//! assert_eq!(arguments.value("name"), Some("demo"));
//! assert_eq!(arguments.positionals(), &["input.txt"]);
//!
//! let t = arguments.group("t").unwrap();
//! assert_eq!(t.positionals(), &["one"]);
//! assert_eq!(t.flag("x"), Some(true));
//! assert_eq!(t.flag("y"), Some(true));
//! ```
//!
//! # Syntax
//! * Words are separated by whitespace.
//! Any word that is not a flag (or a flag's value) is a *positional*, collected in order under [`Arguments::positionals`].
//! * `--name` sets `name` to `true`, and `--no-name` sets `name` to `false`.
//! * `--name=value` sets `name` to the string `value`.
//! Everything up to the next unescaped whitespace is the value, including `=`, `[` and `]` (except a trailing `]` run, which closes a group).
//! * `-abc` sets each of `a`, `b` and `c` to `true`, and `-no-abc` sets each of them to `false`.
//! * A single short flag may take a value: `-o=value` or `-o value`.
//! Multi-letter clusters never take values.
//! * A flag directly followed by `[` owns a sub-argument group: `-t [ -n pos ]` sets `t` to a nested [`Arguments`].
//! Groups nest to any depth.
//! * `"double"` and `'single'` quotes keep whitespace, dashes and brackets literal.
//! A backslash escapes a following quote or whitespace character; any other backslash is kept as is.
//! * When a flag is repeated, the last occurrence wins.
//!
//! # Error Recovery
//! * An unterminated quote is closed at the end of input: `-Z "value` sets `Z` to `value`.
//! * A stray quote trailing a quoted word is dropped: `"value""` is the positional `value`.
//! * An unterminated group is closed at the end of input: `-Z [ -z pos` sets `Z` to a group holding `z=pos`.
//! * An unmatched `]`, or a `[` without an owning flag, is ignored.
//! * A flag without a usable name (`-=x`, `--no-`, or the reserved `$`) is kept as the positional word it was written as.
//!
//! The only failure is at the input boundary, when bytes are not valid UTF-8 (see [`parse_bytes`]).
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events for scanned tokens, group boundaries, and recoveries.
//! * `unit_test`: For features that help with unit testing.
#![deny(missing_docs)]
mod model;
mod parser;
mod tokens;

pub use model::*;
pub use parser::ParseError;

use parser::TreeBuilder;

/// Parse the command line string `input`.
///
/// This never fails; malformed input is recovered into a best effort result.
pub fn parse(input: &str) -> Arguments {
    TreeBuilder::new(input).build()
}

/// Parse the command line bytes `input`, which must be valid UTF-8.
pub fn parse_bytes(input: &[u8]) -> Result<Arguments, ParseError> {
    let input = std::str::from_utf8(input)?;
    Ok(parse(input))
}

impl std::str::FromStr for Arguments {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
