//! Localized fixed strings used while rendering.
//!
//! A [`SentenceBuilder`] supplies every piece of user-facing prose the
//! renderer does not get from the specifications themselves. The crate
//! ships [`EnglishSentenceBuilder`]; other languages plug in by
//! implementing the trait.

use command_help_core::{NameInfo, ParseError};

/// Provider of localized help text fragments.
pub trait SentenceBuilder: Send + Sync {
    /// Marker prefixed to the help text of required specifications.
    fn required_word(&self) -> String;

    /// Heading above the rendered parse errors.
    fn errors_heading_text(&self) -> String;

    /// Heading above the usage examples.
    fn usage_heading_text(&self) -> String;

    /// Help text of the synthetic `help` entry.
    fn help_command_text(&self, add_dashes: bool) -> String;

    /// Help text of the synthetic `version` entry.
    fn version_command_text(&self, add_dashes: bool) -> String;

    /// Message for a single error; informational errors yield an empty string.
    fn format_error(&self, error: &ParseError) -> String;

    /// Message for all mutually-exclusive-set errors at once, one line per set.
    fn format_mutually_exclusive_set_errors(&self, errors: &[&ParseError]) -> String;
}

/// Default English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishSentenceBuilder;

impl SentenceBuilder for EnglishSentenceBuilder {
    fn required_word(&self) -> String {
        "Required.".to_string()
    }

    fn errors_heading_text(&self) -> String {
        "ERROR(S):".to_string()
    }

    fn usage_heading_text(&self) -> String {
        "USAGE:".to_string()
    }

    fn help_command_text(&self, add_dashes: bool) -> String {
        if add_dashes {
            "Display this help screen.".to_string()
        } else {
            "Display more information on a specific command.".to_string()
        }
    }

    fn version_command_text(&self, _add_dashes: bool) -> String {
        "Display version information.".to_string()
    }

    fn format_error(&self, error: &ParseError) -> String {
        match error {
            ParseError::BadFormatToken { token } => {
                format!("Token '{token}' is not recognized.")
            }
            ParseError::MissingValueOption { name } => {
                format!("Option '{}' has no value.", name.name_text())
            }
            ParseError::UnknownOption { token } => format!("Option '{token}' is unknown."),
            ParseError::MissingRequired { name } if name.is_positional() => {
                "A required value not bound to option name is missing.".to_string()
            }
            ParseError::MissingRequired { name } => {
                format!("Required option '{}' is missing.", name.name_text())
            }
            ParseError::BadFormatConversion { name } if name.is_positional() => {
                "A value not bound to option name is defined with a bad format.".to_string()
            }
            ParseError::BadFormatConversion { name } => {
                format!("Option '{}' is defined with a bad format.", name.name_text())
            }
            ParseError::SequenceOutOfRange { name } if name.is_positional() => {
                "A sequence value not bound to option name is defined with few items than required."
                    .to_string()
            }
            ParseError::SequenceOutOfRange { name } => format!(
                "A sequence option '{}' is defined with fewer or more items than required.",
                name.name_text()
            ),
            ParseError::RepeatedOption { name } => {
                format!("Option '{}' is defined multiple times.", name.name_text())
            }
            ParseError::BadVerbSelected { token } => format!("Verb '{token}' is not recognized."),
            ParseError::NoVerbSelected => "No verb selected.".to_string(),
            ParseError::SetValueException { name, message } => format!(
                "Error setting value to option '{}': {message}",
                name.name_text()
            ),
            ParseError::MissingGroupOption { group, names } => format!(
                "At least one option from group '{group}' ({}) is required.",
                names
                    .iter()
                    .map(NameInfo::name_text)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ParseError::MultipleDefaultVerbs => {
                "More than one default verb is not allowed.".to_string()
            }
            // Mutually exclusive errors are only meaningful as a group.
            ParseError::MutuallyExclusiveSet { .. }
            | ParseError::HelpRequested
            | ParseError::HelpVerbRequested { .. }
            | ParseError::VersionRequested => String::new(),
        }
    }

    fn format_mutually_exclusive_set_errors(&self, errors: &[&ParseError]) -> String {
        let mut sets: Vec<(&str, Vec<String>)> = Vec::new();
        for error in errors {
            let ParseError::MutuallyExclusiveSet { name, set_name } = error else {
                continue;
            };
            let name_text = name.name_text();
            match sets.iter_mut().find(|entry| entry.0 == set_name.as_str()) {
                Some((_, names)) => names.push(name_text),
                None => sets.push((set_name.as_str(), vec![name_text])),
            }
        }

        sets.iter()
            .map(|(set, names)| {
                let mut incompatible: Vec<&str> = Vec::new();
                for (_, other) in sets.iter().filter(|(other_set, _)| other_set != set) {
                    for name in other {
                        if !incompatible.contains(&name.as_str()) {
                            incompatible.push(name);
                        }
                    }
                }

                let (noun, verb) = if names.len() > 1 {
                    ("Options", "are")
                } else {
                    ("Option", "is")
                };
                let names = quote_join(names.iter().map(String::as_str));
                if incompatible.is_empty() {
                    format!("{noun}: {names} {verb} not compatible with other options.")
                } else {
                    format!(
                        "{noun}: {names} {verb} not compatible with: {}.",
                        quote_join(incompatible.into_iter())
                    )
                }
            })
            .collect::<Vec<_>>()
            .join(crate::NEWLINE)
    }
}

fn quote_join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
