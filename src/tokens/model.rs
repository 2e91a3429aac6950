pub(crate) const DOUBLE_QUOTE: char = '"';
pub(crate) const SINGLE_QUOTE: char = '\'';
pub(crate) const BACKSLASH: char = '\\';
pub(crate) const OPEN: char = '[';
pub(crate) const CLOSE: char = ']';
pub(crate) const ASSIGN: char = '=';
pub(crate) const NEGATION: &str = "no-";

/// A lexical unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A bare or quoted word, with quotes and escapes resolved.
    Word(String),
    /// `--name` or `--name=value`.
    Long {
        name: String,
        assignment: Option<String>,
    },
    /// `-abc`, `-no-abc`, or `-a=value`.
    /// The `no-` prefix is stripped from `cluster` and recorded in `negated`.
    Short {
        cluster: String,
        negated: bool,
        assignment: Option<String>,
    },
    /// `[`
    Open,
    /// `]`
    Close,
}

pub(crate) fn is_quote(c: char) -> bool {
    c == DOUBLE_QUOTE || c == SINGLE_QUOTE
}
