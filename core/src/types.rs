//! Specification type definitions for help rendering.
//!
//! This module defines the data model handed to the renderer by whatever
//! layer discovers a program's options: one [`Specification`] per option or
//! positional value, [`Verb`] descriptors for sub-commands, and [`Example`]s
//! for the usage section. The types are designed for serialization with
//! [`serde`] so a whole command can be described in a YAML or JSON file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_set::ValueSet;

/// A literal value attached to a specification or an example sample.
///
/// Used both for default values shown in help text and for the values
/// assigned in an [`Example`] sample.
///
/// # Examples
///
/// ```
/// use command_help_core::ArgValue;
///
/// assert_eq!(ArgValue::from(true).to_string(), "true");
/// assert_eq!(ArgValue::from("out.txt").to_string(), "out.txt");
/// assert_eq!(ArgValue::from(vec![1_i64, 2, 3]).to_string(), "1 2 3");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean literal, rendered as lowercase `true`/`false`.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// String, rendered verbatim.
    Text(String),
    /// Sequence, rendered as its elements space-joined.
    List(Vec<ArgValue>),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// How many tokens a specification consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// No value; presence alone sets the option.
    Switch,
    /// Exactly one value (the default).
    #[default]
    Scalar,
    /// One or more values.
    Sequence,
}

/// Description of one named option.
///
/// At least one of `short_name`/`long_name` must be non-empty; names are
/// stored without dashes, the renderer adds them when asked to.
///
/// # Examples
///
/// ```
/// use command_help_core::OptionSpec;
///
/// let output = OptionSpec::new("o", "output")
///     .with_meta_value("FILE")
///     .with_help("Write results to FILE.")
///     .required();
/// assert_eq!(output.name_text(), "o, output");
/// assert!(output.required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSpec {
    /// Short form without dash (e.g. `"o"`).
    pub short_name: String,
    /// Long form without dashes (e.g. `"output"`).
    pub long_name: String,
    pub required: bool,
    /// Placeholder shown after the name (e.g. `FILE`).
    pub meta_value: String,
    pub help_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ArgValue>,
    /// Resolved value-set description; empty unless a value set was declared.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_set_text: Vec<String>,
    pub arity: Arity,
    pub hidden: bool,
}

impl OptionSpec {
    /// Creates an option that takes a single value.
    pub fn new(short_name: &str, long_name: &str) -> Self {
        Self {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
            ..Default::default()
        }
    }

    /// Creates a boolean switch.
    pub fn switch(short_name: &str, long_name: &str) -> Self {
        Self {
            arity: Arity::Switch,
            ..Self::new(short_name, long_name)
        }
    }

    pub fn with_help(mut self, help_text: &str) -> Self {
        self.help_text = help_text.to_string();
        self
    }

    pub fn with_meta_value(mut self, meta_value: &str) -> Self {
        self.meta_value = meta_value.to_string();
        self
    }

    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attaches the description of a resolved value set.
    ///
    /// Only the description is kept; validity checks belong to the binder.
    pub fn with_value_set<T>(mut self, value_set: &ValueSet<T>) -> Self {
        self.value_set_text = value_set.description().to_vec();
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn has_short(&self) -> bool {
        !self.short_name.is_empty()
    }

    pub fn has_long(&self) -> bool {
        !self.long_name.is_empty()
    }

    /// Returns both names joined as `"s, long"`, or whichever one exists.
    pub fn name_text(&self) -> String {
        match (self.has_short(), self.has_long()) {
            (true, true) => format!("{}, {}", self.short_name, self.long_name),
            (true, false) => self.short_name.clone(),
            _ => self.long_name.clone(),
        }
    }

    /// Checks whether `name` (without dashes) is one of this option's names.
    pub fn matches(&self, name: &str) -> bool {
        (self.has_short() && self.short_name == name) || (self.has_long() && self.long_name == name)
    }
}

/// Description of one positional value.
///
/// # Examples
///
/// ```
/// use command_help_core::ValueSpec;
///
/// let input = ValueSpec::new(0).with_meta_name("INPUT").with_help("File to read.");
/// assert_eq!(input.index, 0);
/// assert_eq!(input.meta_name, "INPUT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueSpec {
    /// Position among the values, unique within one specification set.
    pub index: usize,
    pub meta_name: String,
    pub meta_value: String,
    pub help_text: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ArgValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_set_text: Vec<String>,
    pub arity: Arity,
    pub hidden: bool,
}

impl ValueSpec {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_meta_name(mut self, meta_name: &str) -> Self {
        self.meta_name = meta_name.to_string();
        self
    }

    pub fn with_meta_value(mut self, meta_value: &str) -> Self {
        self.meta_value = meta_value.to_string();
        self
    }

    pub fn with_help(mut self, help_text: &str) -> Self {
        self.help_text = help_text.to_string();
        self
    }

    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_value_set<T>(mut self, value_set: &ValueSet<T>) -> Self {
        self.value_set_text = value_set.description().to_vec();
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One accepted option or positional value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Specification {
    Option(OptionSpec),
    Value(ValueSpec),
}

impl Specification {
    pub fn help_text(&self) -> &str {
        match self {
            Self::Option(o) => &o.help_text,
            Self::Value(v) => &v.help_text,
        }
    }

    pub fn required(&self) -> bool {
        match self {
            Self::Option(o) => o.required,
            Self::Value(v) => v.required,
        }
    }

    pub fn default_value(&self) -> Option<&ArgValue> {
        match self {
            Self::Option(o) => o.default_value.as_ref(),
            Self::Value(v) => v.default_value.as_ref(),
        }
    }

    pub fn value_set_text(&self) -> &[String] {
        match self {
            Self::Option(o) => &o.value_set_text,
            Self::Value(v) => &v.value_set_text,
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Self::Option(o) => o.hidden,
            Self::Value(v) => v.hidden,
        }
    }

    pub fn as_option(&self) -> Option<&OptionSpec> {
        match self {
            Self::Option(o) => Some(o),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueSpec> {
        match self {
            Self::Value(v) => Some(v),
            Self::Option(_) => None,
        }
    }
}

impl From<OptionSpec> for Specification {
    fn from(spec: OptionSpec) -> Self {
        Self::Option(spec)
    }
}

impl From<ValueSpec> for Specification {
    fn from(spec: ValueSpec) -> Self {
        Self::Value(spec)
    }
}

/// A named sub-command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verb {
    pub name: String,
    pub help_text: String,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Verb {
    pub fn new(name: &str, help_text: &str) -> Self {
        Self {
            name: name.to_string(),
            help_text: help_text.to_string(),
            ..Default::default()
        }
    }

    /// Checks the verb name and its aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Switches controlling how an example's command line is reconstructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatStyle {
    /// Use `-s` instead of `--long` when both exist.
    pub prefer_short_name: bool,
    /// Merge short-named switches into one `-abc` token.
    pub group_switches: bool,
    /// Write `--long=value` instead of `--long value`.
    pub use_equal_token: bool,
}

/// One option assignment inside a [`Sample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOption {
    /// Short or long name of the option, without dashes.
    pub name: String,
    pub value: ArgValue,
}

/// A populated set of options used to reconstruct an example command line.
///
/// Options keep their insertion order; positional values follow them in
/// index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    pub options: Vec<SampleOption>,
    pub values: Vec<ArgValue>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.options.push(SampleOption {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn with_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// A usage example rendered in the `USAGE:` section.
///
/// # Examples
///
/// ```
/// use command_help_core::{Example, FormatStyle, Sample};
///
/// let example = Example::new("Normal scenario", Sample::new().with_option("verbose", true))
///     .with_style(FormatStyle { prefer_short_name: true, ..Default::default() });
/// assert_eq!(example.styles().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    pub description: String,
    pub sample: Sample,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub format_styles: Vec<FormatStyle>,
}

impl Example {
    pub fn new(description: &str, sample: Sample) -> Self {
        Self {
            description: description.to_string(),
            sample,
            format_styles: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: FormatStyle) -> Self {
        self.format_styles.push(style);
        self
    }

    /// Declared styles, or a single default style when none were declared.
    pub fn styles(&self) -> Vec<FormatStyle> {
        if self.format_styles.is_empty() {
            vec![FormatStyle::default()]
        } else {
            self.format_styles.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_display() {
        assert_eq!(ArgValue::Bool(false).to_string(), "false");
        assert_eq!(ArgValue::Integer(42).to_string(), "42");
        assert_eq!(ArgValue::Float(0.5).to_string(), "0.5");
        assert_eq!(ArgValue::from("a b").to_string(), "a b");
        assert_eq!(ArgValue::from(vec!["x", "y"]).to_string(), "x y");
        assert_eq!(ArgValue::List(Vec::new()).to_string(), "");
    }

    #[test]
    fn test_option_name_text() {
        assert_eq!(OptionSpec::new("v", "verbose").name_text(), "v, verbose");
        assert_eq!(OptionSpec::new("v", "").name_text(), "v");
        assert_eq!(OptionSpec::new("", "verbose").name_text(), "verbose");
    }

    #[test]
    fn test_option_matches() {
        let spec = OptionSpec::switch("v", "verbose");
        assert!(spec.matches("v"));
        assert!(spec.matches("verbose"));
        assert!(!spec.matches(""));
        assert!(!spec.matches("x"));
    }

    #[test]
    fn test_specification_roundtrips_through_json() {
        let spec: Specification = OptionSpec::new("o", "output")
            .with_default("a.out")
            .required()
            .into();
        let raw = serde_json::to_string(&spec).unwrap();
        assert!(raw.contains("\"kind\":\"option\""));
        let back: Specification = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_example_default_style() {
        let example = Example::new("plain", Sample::new());
        assert_eq!(example.styles(), vec![FormatStyle::default()]);
    }
}
