//! Specification-set validation.
//!
//! Checks the structural invariants the renderer relies on: every option
//! has a name, names are unique, positional indexes are unique, and verbs
//! are named and distinct. Like the rest of the crate this reports problems
//! as data instead of panicking; validation stops at the first problem.
//!
//! # Examples
//!
//! ```
//! use command_help_core::*;
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::switch("v", "verbose").into(),
//!     ValueSpec::new(0).into(),
//! ];
//! assert!(validate_specifications(&specs, true).is_empty());
//!
//! // Two values at the same position
//! let specs: Vec<Specification> = vec![ValueSpec::new(0).into(), ValueSpec::new(0).into()];
//! assert_eq!(
//!     validate_specifications(&specs, true),
//!     vec![ValidationError::DuplicateValueIndex(0)]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{Specification, Verb};

/// Names taken by the synthetic help/version entries.
pub const RESERVED_OPTION_NAMES: [&str; 2] = ["help", "version"];

/// Specification-set validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An option has neither a short nor a long name.
    #[error("option must define a short or long name")]
    MissingOptionName,
    /// Two options share a name.
    #[error("duplicate option name: {0}")]
    DuplicateOptionName(String),
    /// Two positional values share an index.
    #[error("duplicate value index: {0}")]
    DuplicateValueIndex(usize),
    /// An option collides with a built-in entry.
    #[error("option name is reserved for the built-in entry: {0}")]
    ReservedOptionName(String),
    /// A verb has an empty name.
    #[error("verb name cannot be empty")]
    EmptyVerbName,
    /// Two verbs (or aliases) share a name.
    #[error("duplicate verb: {0}")]
    DuplicateVerb(String),
}

/// Validates one options type's specification set.
///
/// With `reserve_builtins`, the long names `help` and `version` are refused
/// because the renderer appends entries with those names.
pub fn validate_specifications(
    specs: &[Specification],
    reserve_builtins: bool,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut names: HashSet<&str> = HashSet::new();
    let mut indexes: HashSet<usize> = HashSet::new();

    for spec in specs {
        match spec {
            Specification::Option(option) => {
                if !option.has_short() && !option.has_long() {
                    errors.push(ValidationError::MissingOptionName);
                    return errors;
                }
                if reserve_builtins && RESERVED_OPTION_NAMES.contains(&option.long_name.as_str())
                {
                    errors.push(ValidationError::ReservedOptionName(
                        option.long_name.clone(),
                    ));
                    return errors;
                }
                for name in [&option.short_name, &option.long_name] {
                    if !name.is_empty() && !names.insert(name.as_str()) {
                        errors.push(ValidationError::DuplicateOptionName(name.clone()));
                        return errors;
                    }
                }
            }
            Specification::Value(value) => {
                if !indexes.insert(value.index) {
                    errors.push(ValidationError::DuplicateValueIndex(value.index));
                    return errors;
                }
            }
        }
    }

    errors
}

/// Validates a verb listing: non-empty names, no name or alias reused.
pub fn validate_verbs(verbs: &[Verb]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for verb in verbs {
        let name = verb.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyVerbName);
            return errors;
        }
        for candidate in std::iter::once(name).chain(verb.aliases.iter().map(String::as_str)) {
            if !seen.insert(candidate) {
                errors.push(ValidationError::DuplicateVerb(candidate.to_string()));
                return errors;
            }
        }
    }

    errors
}
