//! Builds the parse outcome a binder would report, from `--error` flags.
//!
//! Each flag is `KIND` or `KIND:ARG`. Names are looked up in the
//! definition so errors show both the short and the long form.

use command_help_core::{NameInfo, ParseError, ParseOutcome, Specification};

use crate::definition::CommandDefinition;

/// Accepted `--error` kinds, for messages and `--help`.
pub const ERROR_KINDS: &[&str] = &[
    "bad-format-token:TOKEN",
    "missing-value:NAME",
    "unknown-option:TOKEN",
    "missing-required[:NAME]",
    "mutually-exclusive:NAME:SET",
    "bad-format[:NAME]",
    "sequence-out-of-range[:NAME]",
    "repeated-option:NAME",
    "no-verb",
    "bad-verb:TOKEN",
    "help",
    "version",
    "set-value:NAME:MESSAGE",
    "missing-group:GROUP:NAME,NAME",
    "multiple-default-verbs",
];

/// Parses one `--error` argument.
pub fn parse_error_arg(raw: &str, definition: &CommandDefinition) -> Result<ParseError, String> {
    let (kind, rest) = match raw.split_once(':') {
        Some((kind, rest)) => (kind, Some(rest)),
        None => (raw, None),
    };
    let name = |arg: Option<&str>| name_info(arg.unwrap_or_default(), definition);
    let required = |arg: Option<&str>| {
        arg.filter(|a| !a.is_empty())
            .map(String::from)
            .ok_or_else(|| format!("Error kind '{kind}' needs an argument"))
    };

    let error = match kind {
        "bad-format-token" => ParseError::BadFormatToken {
            token: required(rest)?,
        },
        "missing-value" => ParseError::MissingValueOption {
            name: name(Some(required(rest)?.as_str())),
        },
        "unknown-option" => ParseError::UnknownOption {
            token: required(rest)?,
        },
        "missing-required" => ParseError::MissingRequired { name: name(rest) },
        "mutually-exclusive" => {
            let (option, set) = required(rest)?
                .split_once(':')
                .map(|(o, s)| (o.to_string(), s.to_string()))
                .ok_or_else(|| "Expected mutually-exclusive:NAME:SET".to_string())?;
            ParseError::MutuallyExclusiveSet {
                name: name(Some(option.as_str())),
                set_name: set,
            }
        }
        "bad-format" => ParseError::BadFormatConversion { name: name(rest) },
        "sequence-out-of-range" => ParseError::SequenceOutOfRange { name: name(rest) },
        "repeated-option" => ParseError::RepeatedOption {
            name: name(Some(required(rest)?.as_str())),
        },
        "no-verb" => ParseError::NoVerbSelected,
        "bad-verb" => ParseError::BadVerbSelected {
            token: required(rest)?,
        },
        "help" => ParseError::HelpRequested,
        "version" => ParseError::VersionRequested,
        "set-value" => {
            let (option, message) = required(rest)?
                .split_once(':')
                .map(|(o, m)| (o.to_string(), m.to_string()))
                .ok_or_else(|| "Expected set-value:NAME:MESSAGE".to_string())?;
            ParseError::SetValueException {
                name: name(Some(option.as_str())),
                message,
            }
        }
        "missing-group" => {
            let (group, names) = required(rest)?
                .split_once(':')
                .map(|(g, n)| (g.to_string(), n.to_string()))
                .ok_or_else(|| "Expected missing-group:GROUP:NAME,NAME".to_string())?;
            ParseError::MissingGroupOption {
                group,
                names: names.split(',').map(|n| name(Some(n.trim()))).collect(),
            }
        }
        "multiple-default-verbs" => ParseError::MultipleDefaultVerbs,
        other => {
            return Err(format!(
                "Unknown error kind '{other}'. Expected one of: {}",
                ERROR_KINDS.join(", ")
            ));
        }
    };
    Ok(error)
}

/// Both names of the option called `name`, or a best guess when the
/// definition does not declare it. An empty name is positional.
fn name_info(name: &str, definition: &CommandDefinition) -> NameInfo {
    if name.is_empty() {
        return NameInfo::positional();
    }
    let declared = definition
        .specifications
        .iter()
        .chain(definition.verbs.iter().flat_map(|v| v.specifications.iter()))
        .filter_map(Specification::as_option)
        .find(|option| option.matches(name));
    match declared {
        Some(option) => NameInfo::new(&option.short_name, &option.long_name),
        None if name.chars().count() == 1 => NameInfo::new(name, ""),
        None => NameInfo::new("", name),
    }
}

/// The not-parsed outcome for the given flags.
///
/// Without any error flag the outcome is a plain help request.
pub fn build_outcome(
    definition: &CommandDefinition,
    errors: &[String],
    help_verb: Option<&str>,
) -> Result<ParseOutcome, String> {
    let mut parsed: Vec<ParseError> = errors
        .iter()
        .map(|raw| parse_error_arg(raw, definition))
        .collect::<Result<_, _>>()?;

    if let Some(verb) = help_verb {
        parsed.push(ParseError::HelpVerbRequested {
            verb: Some(verb.to_string()),
            matched: definition.has_verb(verb),
        });
    }
    if parsed.is_empty() {
        parsed.push(ParseError::HelpRequested);
    }

    Ok(ParseOutcome::not_parsed(definition.command_model(), parsed)
        .with_choices(definition.verb_models()))
}
