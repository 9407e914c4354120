//! Parse errors produced by the upstream binder.
//!
//! The renderer never constructs these; it classifies them (meaningful or
//! informational, mutually exclusive or individual) and turns them into
//! text through a sentence builder.

use serde::{Deserialize, Serialize};

/// Names of the specification an error refers to.
///
/// Both names are empty for positional values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NameInfo {
    pub short_name: String,
    pub long_name: String,
}

impl NameInfo {
    pub fn new(short_name: &str, long_name: &str) -> Self {
        Self {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
        }
    }

    /// Name info for a value not bound to an option name.
    pub fn positional() -> Self {
        Self::default()
    }

    pub fn is_positional(&self) -> bool {
        self.short_name.is_empty() && self.long_name.is_empty()
    }

    /// Display text: `"s, long"`, or whichever name exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_help_core::NameInfo;
    ///
    /// assert_eq!(NameInfo::new("o", "output").name_text(), "o, output");
    /// assert_eq!(NameInfo::new("", "output").name_text(), "output");
    /// ```
    pub fn name_text(&self) -> String {
        match (self.short_name.is_empty(), self.long_name.is_empty()) {
            (false, false) => format!("{}, {}", self.short_name, self.long_name),
            (false, true) => self.short_name.clone(),
            _ => self.long_name.clone(),
        }
    }
}

/// Discriminant of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadFormatToken,
    MissingValueOption,
    UnknownOption,
    MissingRequired,
    MutuallyExclusiveSet,
    BadFormatConversion,
    SequenceOutOfRange,
    RepeatedOption,
    NoVerbSelected,
    BadVerbSelected,
    HelpRequested,
    HelpVerbRequested,
    VersionRequested,
    SetValueException,
    MissingGroupOption,
    MultipleDefaultVerbs,
}

/// An error reported by the argument binder.
///
/// # Examples
///
/// ```
/// use command_help_core::{ErrorKind, NameInfo, ParseError};
///
/// let err = ParseError::MissingRequired { name: NameInfo::new("o", "output") };
/// assert_eq!(err.kind(), ErrorKind::MissingRequired);
/// assert!(err.is_meaningful());
/// assert!(!ParseError::VersionRequested.is_meaningful());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// A token could not be interpreted at all.
    BadFormatToken { token: String },
    /// An option that needs a value was given none.
    MissingValueOption { name: NameInfo },
    /// An option name that no specification declares.
    UnknownOption { token: String },
    /// A required option or value was not supplied.
    MissingRequired { name: NameInfo },
    /// Options from different exclusive sets were supplied together.
    MutuallyExclusiveSet { name: NameInfo, set_name: String },
    /// A value could not be converted to the option's type.
    BadFormatConversion { name: NameInfo },
    /// A sequence got fewer or more items than allowed.
    SequenceOutOfRange { name: NameInfo },
    /// A non-repeatable option appeared more than once.
    RepeatedOption { name: NameInfo },
    NoVerbSelected,
    BadVerbSelected { token: String },
    /// `--help` was requested.
    HelpRequested,
    /// `help <verb>` was requested; `matched` tells whether the verb exists.
    HelpVerbRequested {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verb: Option<String>,
        #[serde(default)]
        matched: bool,
    },
    /// `--version` was requested.
    VersionRequested,
    /// Assigning a bound value failed.
    SetValueException { name: NameInfo, message: String },
    /// None of the options in a required group was supplied.
    MissingGroupOption { group: String, names: Vec<NameInfo> },
    MultipleDefaultVerbs,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadFormatToken { .. } => ErrorKind::BadFormatToken,
            Self::MissingValueOption { .. } => ErrorKind::MissingValueOption,
            Self::UnknownOption { .. } => ErrorKind::UnknownOption,
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::MutuallyExclusiveSet { .. } => ErrorKind::MutuallyExclusiveSet,
            Self::BadFormatConversion { .. } => ErrorKind::BadFormatConversion,
            Self::SequenceOutOfRange { .. } => ErrorKind::SequenceOutOfRange,
            Self::RepeatedOption { .. } => ErrorKind::RepeatedOption,
            Self::NoVerbSelected => ErrorKind::NoVerbSelected,
            Self::BadVerbSelected { .. } => ErrorKind::BadVerbSelected,
            Self::HelpRequested => ErrorKind::HelpRequested,
            Self::HelpVerbRequested { .. } => ErrorKind::HelpVerbRequested,
            Self::VersionRequested => ErrorKind::VersionRequested,
            Self::SetValueException { .. } => ErrorKind::SetValueException,
            Self::MissingGroupOption { .. } => ErrorKind::MissingGroupOption,
            Self::MultipleDefaultVerbs => ErrorKind::MultipleDefaultVerbs,
        }
    }

    /// Informational sentinels that end parsing without being a failure.
    pub fn stops_processing(&self) -> bool {
        matches!(
            self,
            Self::HelpRequested | Self::HelpVerbRequested { .. } | Self::VersionRequested
        )
    }

    /// Whether the error should be shown to the user.
    ///
    /// Excludes the sentinels and an unknown `help` token, which binders
    /// report when `help` is used as an option on a verb-less program.
    pub fn is_meaningful(&self) -> bool {
        if self.stops_processing() {
            return false;
        }
        !matches!(self, Self::UnknownOption { token } if token.eq_ignore_ascii_case("help"))
    }
}

/// Filters `errors` down to the ones worth rendering, preserving order.
pub fn meaningful_errors(errors: &[ParseError]) -> impl Iterator<Item = &ParseError> {
    errors.iter().filter(|e| e.is_meaningful())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_not_meaningful() {
        assert!(!ParseError::HelpRequested.is_meaningful());
        assert!(!ParseError::VersionRequested.is_meaningful());
        assert!(
            !ParseError::HelpVerbRequested {
                verb: Some("push".into()),
                matched: true
            }
            .is_meaningful()
        );
    }

    #[test]
    fn test_unknown_help_token_is_not_meaningful() {
        let err = ParseError::UnknownOption {
            token: "HELP".into(),
        };
        assert!(!err.is_meaningful());
        let err = ParseError::UnknownOption {
            token: "colour".into(),
        };
        assert!(err.is_meaningful());
    }

    #[test]
    fn test_meaningful_errors_preserves_order() {
        let errors = vec![
            ParseError::NoVerbSelected,
            ParseError::HelpRequested,
            ParseError::BadFormatToken { token: "x".into() },
        ];
        let kinds: Vec<ErrorKind> = meaningful_errors(&errors).map(ParseError::kind).collect();
        assert_eq!(kinds, vec![ErrorKind::NoVerbSelected, ErrorKind::BadFormatToken]);
    }

    #[test]
    fn test_positional_name_info() {
        assert!(NameInfo::positional().is_positional());
        assert!(!NameInfo::new("", "x").is_positional());
        assert_eq!(NameInfo::positional().name_text(), "");
    }

    #[test]
    fn test_parse_error_deserializes_from_tagged_json() {
        let raw = r#"{"kind":"mutually_exclusive_set","name":{"long_name":"a"},"set_name":"one"}"#;
        let err: ParseError = serde_json::from_str(raw).unwrap();
        assert_eq!(
            err,
            ParseError::MutuallyExclusiveSet {
                name: NameInfo::new("", "a"),
                set_name: "one".into()
            }
        );
    }
}
