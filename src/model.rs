use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The reserved key under which positional words are presented.
///
/// No flag can occupy this slot; [`Arguments::get`] always returns `None` for it.
pub const POSITIONALS_KEY: &str = "$";

/// The value assigned to a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Flag presence (`--name`, `-n`) or negation (`--no-name`, `-no-n`).
    Boolean(bool),
    /// An assigned (`--name=..`, `-n=..`) or adjacent (`-n ..`) value, with quotes and escapes resolved.
    String(String),
    /// A sub-argument group (`-n [ .. ]`).
    Group(Arguments),
}

impl Value {
    /// The boolean, if this is a `Value::Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The text, if this is a `Value::String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The nested arguments, if this is a `Value::Group`.
    pub fn as_group(&self) -> Option<&Arguments> {
        match self {
            Value::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Arguments> for Value {
    fn from(value: Arguments) -> Self {
        Value::Group(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Group(group) => group.serialize(serializer),
        }
    }
}

/// The structured form of one argument group: the top level of the input, or the inside of a `[ .. ]` group.
///
/// Flags are kept in the order they were first discovered.
/// A repeated flag overwrites the earlier value (last write wins) but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    flags: IndexMap<String, Value>,
    positionals: Vec<String>,
}

impl Arguments {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the flag `name`; the reserved positionals key is never stored as a flag.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();

        if name == POSITIONALS_KEY {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Dropping flag '{POSITIONALS_KEY}' (reserved for positionals): {value:?}.");
            }

            return;
        }

        self.flags.insert(name, value);
    }

    pub(crate) fn push_positional(&mut self, word: String) {
        self.positionals.push(word);
    }

    /// The positional words, in discovery order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// The value for the flag `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    /// The flag `name`, if it was set as a boolean.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// The flag `name`, if it was assigned a string value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The flag `name`, if it introduced a sub-argument group.
    pub fn group(&self, name: &str) -> Option<&Arguments> {
        self.get(name).and_then(Value::as_group)
    }

    /// Whether the flag `name` was seen at this depth.
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Iterate the flags (not the positionals) in discovery order.
    pub fn flags(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.flags.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The number of distinct flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags were seen (positionals are not counted).
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Construction helpers, for asserting against whole parse results.
#[cfg(any(test, feature = "unit_test"))]
impl Arguments {
    /// Add (or overwrite) the flag `name`.
    pub fn with_flag(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Append a positional word.
    pub fn with_positional(mut self, word: &str) -> Self {
        self.push_positional(word.to_string());
        self
    }
}

impl std::ops::Index<&str> for Arguments {
    type Output = Value;

    /// # Panics
    /// When the flag `name` is absent.
    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no flag '{name}' in arguments"),
        }
    }
}

impl Serialize for Arguments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.flags.len() + 1))?;
        for (name, value) in &self.flags {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(POSITIONALS_KEY, &self.positionals)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Boolean(true), Some(true), None, false)]
    #[case(Value::Boolean(false), Some(false), None, false)]
    #[case(Value::from("abc"), None, Some("abc"), false)]
    #[case(Value::from(Arguments::new()), None, None, true)]
    fn value_accessors(
        #[case] value: Value,
        #[case] expected_bool: Option<bool>,
        #[case] expected_str: Option<&str>,
        #[case] expected_group: bool,
    ) {
        assert_eq!(value.as_bool(), expected_bool);
        assert_eq!(value.as_str(), expected_str);
        assert_eq!(value.as_group().is_some(), expected_group);
    }

    #[test]
    fn arguments_empty() {
        let arguments = Arguments::new();
        assert!(arguments.is_empty());
        assert_eq!(arguments.len(), 0);
        assert!(arguments.positionals().is_empty());
        assert_eq!(arguments.get(POSITIONALS_KEY), None);
    }

    #[test]
    fn arguments_last_write_wins() {
        let mut arguments = Arguments::new();
        arguments.insert("a", Value::Boolean(true));
        arguments.insert("b", Value::from("x"));
        arguments.insert("a", Value::from("y"));

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments.value("a"), Some("y"));
        assert_eq!(arguments.flag("a"), None);
        let names: Vec<&str> = arguments.flags().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn arguments_reserved_key_is_not_a_flag() {
        let mut arguments = Arguments::new();
        arguments.insert(POSITIONALS_KEY, Value::Boolean(true));
        arguments.push_positional("pos".to_string());

        assert!(arguments.is_empty());
        assert_eq!(arguments.get(POSITIONALS_KEY), None);
        assert_eq!(
            serde_json::to_string(&arguments).unwrap(),
            r#"{"$":["pos"]}"#
        );
    }

    #[test]
    fn arguments_positionals_keep_order() {
        let mut arguments = Arguments::new();
        arguments.push_positional("one".to_string());
        arguments.push_positional("two".to_string());
        arguments.push_positional("one".to_string());

        assert_eq!(arguments.positionals(), &["one", "two", "one"]);
        assert!(arguments.is_empty());
    }

    #[test]
    fn arguments_index() {
        let mut inner = Arguments::new();
        inner.insert("z", Value::Boolean(true));
        let mut arguments = Arguments::new();
        arguments.insert("t", Value::Group(inner));

        assert_eq!(arguments["t"].as_group().unwrap()["z"], Value::Boolean(true));
        assert!(arguments.contains("t"));
        assert!(arguments.group("t").unwrap().contains("z"));
    }

    #[test]
    #[should_panic(expected = "no flag 'missing' in arguments")]
    fn arguments_index_missing() {
        let arguments = Arguments::new();
        let _ = &arguments["missing"];
    }
}
