use std::iter::Peekable;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::{Arguments, Value};
use crate::tokens::*;

/// Assembles [`Arguments`] from the tokens of a [`Scanner`], recursing into each `[ .. ]` group.
///
/// The top level ends at the end of input; a nested group ends at its `]`, or at the end of input when the `]` is missing.
pub(crate) struct TreeBuilder<'s> {
    tokens: Peekable<Scanner<'s>>,
}

impl<'s> std::fmt::Debug for TreeBuilder<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder").finish_non_exhaustive()
    }
}

impl<'s> TreeBuilder<'s> {
    pub(crate) fn new(input: &'s str) -> Self {
        Self {
            tokens: Scanner::new(input).peekable(),
        }
    }

    pub(crate) fn build(mut self) -> Arguments {
        self.group(0)
    }

    fn group(&mut self, depth: usize) -> Arguments {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Entering group at depth {depth}.");
        }

        let mut arguments = Arguments::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Word(word) => arguments.push_positional(word),
                Token::Long { name, assignment } => {
                    self.long(&mut arguments, name, assignment, depth);
                }
                Token::Short {
                    cluster,
                    negated,
                    assignment,
                } => {
                    self.short(&mut arguments, cluster, negated, assignment, depth);
                }
                Token::Open => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring '[' without an owning flag at depth {depth}.");
                    }
                }
                Token::Close => {
                    if depth > 0 {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Closing group at depth {depth}.");
                        }

                        return arguments;
                    }

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring unmatched ']' at the top level.");
                    }
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            if depth > 0 {
                debug!("Dangling group at depth {depth} closed at the end of input.");
            }
        }

        arguments
    }

    fn open_group(&mut self, depth: usize) -> Option<Arguments> {
        self.tokens
            .next_if_eq(&Token::Open)
            .map(|_| self.group(depth + 1))
    }

    fn long(
        &mut self,
        arguments: &mut Arguments,
        name: String,
        assignment: Option<String>,
        depth: usize,
    ) {
        // Find a 'long' flag, such as:
        //  --name=..
        //  --no-name
        //  --name [ .. ]
        //  --name
        if let Some(value) = assignment {
            arguments.insert(name, Value::String(value));
        } else if let Some(stripped) = name.strip_prefix(NEGATION) {
            arguments.insert(stripped, Value::Boolean(false));
        } else if let Some(group) = self.open_group(depth) {
            arguments.insert(name, Value::Group(group));
        } else {
            arguments.insert(name, Value::Boolean(true));
        }
    }

    fn short(
        &mut self,
        arguments: &mut Arguments,
        cluster: String,
        negated: bool,
        assignment: Option<String>,
        depth: usize,
    ) {
        let mut letters = cluster.chars();

        if let (Some(letter), None) = (letters.next(), letters.next()) {
            // Find a single 'short' flag, such as:
            //  -n=..
            //  -n [ .. ]
            //  -n ..
            //  -n
            // The same forms apply to a negated flag (-no-n); negation only affects the boolean.
            let name = letter.to_string();

            if let Some(value) = assignment {
                arguments.insert(name, Value::String(value));
            } else if let Some(group) = self.open_group(depth) {
                arguments.insert(name, Value::Group(group));
            } else if let Some(Token::Word(value)) =
                self.tokens.next_if(|token| matches!(token, Token::Word(_)))
            {
                arguments.insert(name, Value::String(value));
            } else {
                arguments.insert(name, Value::Boolean(!negated));
            }

            return;
        }

        // Multiple 'short' flags (-abc, -no-abc) are always booleans.
        #[cfg(feature = "tracing_debug")]
        {
            if let Some(ref value) = assignment {
                debug!("Discarding assignment '{value}' to the short cluster '{cluster}'.");
            }
        }

        for letter in cluster.chars() {
            arguments.insert(letter.to_string(), Value::Boolean(!negated));
        }
    }
}
