#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::POSITIONALS_KEY;
use crate::tokens::model::*;

/// Lazily splits an input string into [`Token`]s.
///
/// Malformed quoting never fails the scan: an unterminated quote is closed at the end of input,
/// and a stray quote directly trailing a closed quoted word is dropped.
pub(crate) struct Scanner<'s> {
    input: &'s str,
    offset: usize,
    // `]` characters already consumed from the input, but not yet emitted.
    pending_closes: usize,
}

impl<'s> std::fmt::Debug for Scanner<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("input", &self.input)
            .field("offset", &self.offset)
            .field("pending_closes", &self.pending_closes)
            .finish()
    }
}

impl<'s> Scanner<'s> {
    pub(crate) fn new(input: &'s str) -> Self {
        Self {
            input,
            offset: 0,
            pending_closes: 0,
        }
    }

    fn rest(&self) -> &'s str {
        &self.input[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }

            self.advance(c);
        }
    }

    /// The length of the `]` run at the cursor, provided nothing but whitespace (or the end of input) follows it.
    fn closing_run(&self) -> Option<usize> {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let unit = &rest[..end];

        if !unit.is_empty() && unit.chars().all(|c| c == CLOSE) {
            Some(unit.len())
        } else {
            None
        }
    }

    fn take_closing_run(&mut self) -> bool {
        match self.closing_run() {
            Some(length) => {
                self.offset += length;
                self.pending_closes += length;
                true
            }
            None => false,
        }
    }

    fn at_boundary(&self) -> bool {
        match self.peek() {
            None => true,
            Some(c) => c.is_whitespace() || self.closing_run().is_some(),
        }
    }

    /// Resolve the character following a (just consumed) backslash.
    fn escape(&mut self, text: &mut String) {
        match self.peek() {
            Some(c) if c.is_whitespace() || is_quote(c) => {
                self.advance(c);
                text.push(c);
            }
            Some(c) => {
                self.advance(c);
                text.push(BACKSLASH);
                text.push(c);
            }
            None => text.push(BACKSLASH),
        }
    }

    /// Read unquoted text into `text` until whitespace, a closing run, or an unescaped `stop` character.
    fn segment(&mut self, text: &mut String, stop: fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || stop(c) {
                break;
            }

            if c == CLOSE && self.take_closing_run() {
                break;
            }

            self.advance(c);

            if c == BACKSLASH {
                self.escape(text);
            } else {
                text.push(c);
            }
        }
    }

    /// Read the inside of a quoted segment; the cursor is past the opening `quote`.
    fn quoted(&mut self, quote: char) -> String {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            self.advance(c);

            if c == quote {
                return text;
            } else if c == BACKSLASH {
                self.escape(&mut text);
            } else {
                text.push(c);
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dangling {quote} quote closed at the end of input: '{text}'.");
        }

        text
    }

    fn discard_stray_quote(&mut self) {
        if let Some(c) = self.peek() {
            if is_quote(c) {
                let offset = self.offset;
                self.advance(c);

                if self.at_boundary() {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Discarding stray {c} quote at offset {offset}.");
                    }
                } else {
                    self.offset = offset;
                }
            }
        }
    }

    /// Read the value following `=`: bare and quoted segments, up to unescaped whitespace.
    fn assignment(&mut self) -> String {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c.is_whitespace() || self.pending_closes > 0 {
                break;
            }

            if is_quote(c) {
                self.advance(c);
                value.push_str(&self.quoted(c));
            } else {
                self.segment(&mut value, is_quote);
            }
        }

        value
    }

    fn flag(&mut self) -> Token {
        let start = self.offset;
        let long = self.rest().starts_with("--");
        self.offset += if long { 2 } else { 1 };

        // A lone '-' or '--' is not a flag marker.
        if self.at_boundary() {
            return Token::Word(self.input[start..self.offset].to_string());
        }

        let mut name = String::new();
        self.segment(&mut name, |c| c == ASSIGN);
        let assignment = if self.pending_closes == 0 && self.peek() == Some(ASSIGN) {
            self.advance(ASSIGN);
            Some(self.assignment())
        } else {
            None
        };

        // A flag without a usable name stays a positional word, spelled as written.
        let effective = match name.strip_prefix(NEGATION) {
            Some(_) if long && assignment.is_some() => name.as_str(),
            Some(stripped) => stripped,
            None => name.as_str(),
        };

        if effective.is_empty() || effective == POSITIONALS_KEY {
            // Any trailing ']' run was consumed, but belongs to the pending closes.
            let end = self.offset - self.pending_closes;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Flag without a usable name '{}' kept as a word.", &self.input[start..end]);
            }

            return Token::Word(self.input[start..end].to_string());
        }

        if long {
            return Token::Long { name, assignment };
        }

        match name.strip_prefix(NEGATION) {
            Some(cluster) => Token::Short {
                cluster: cluster.to_string(),
                negated: true,
                assignment,
            },
            None => Token::Short {
                cluster: name,
                negated: false,
                assignment,
            },
        }
    }

    fn scan(&mut self) -> Option<Token> {
        if self.pending_closes > 0 {
            self.pending_closes -= 1;
            return Some(Token::Close);
        }

        self.skip_whitespace();
        let c = self.peek()?;

        let token = match c {
            OPEN => {
                self.advance(c);
                Token::Open
            }
            CLOSE => {
                self.advance(c);
                Token::Close
            }
            DOUBLE_QUOTE | SINGLE_QUOTE => {
                self.advance(c);
                let text = self.quoted(c);
                self.discard_stray_quote();
                Token::Word(text)
            }
            '-' => self.flag(),
            _ => {
                let mut text = String::new();
                self.segment(&mut text, is_quote);
                Token::Word(text)
            }
        };

        Some(token)
    }
}

impl<'s> Iterator for Scanner<'s> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.scan();

        #[cfg(feature = "tracing_debug")]
        {
            if let Some(ref token) = token {
                debug!("Scanned {token:?} (offset={}).", self.offset);
            }
        }

        token
    }
}
