//! Command models and the parse outcome handed to the help builder.

use serde::{Deserialize, Serialize};

use crate::parse_error::ParseError;
use crate::types::{Example, Specification, Verb};

/// Everything the renderer knows about one options type.
///
/// `specifications` is in declaration order; the built-in `help` and
/// `version` entries are added by the renderer, never stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandModel {
    pub specifications: Vec<Specification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

impl CommandModel {
    pub fn new(specifications: Vec<Specification>) -> Self {
        Self {
            specifications,
            examples: Vec::new(),
        }
    }

    pub fn with_examples(mut self, examples: Vec<Example>) -> Self {
        self.examples = examples;
        self
    }
}

/// A verb together with the options type it selects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbModel {
    pub verb: Verb,
    pub command: CommandModel,
}

impl VerbModel {
    pub fn new(verb: Verb, command: CommandModel) -> Self {
        Self { verb, command }
    }
}

/// Whether the binder produced an options object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStatus {
    Parsed,
    NotParsed(Vec<ParseError>),
}

/// Result of running the binder over the process arguments.
///
/// # Examples
///
/// ```
/// use command_help_core::{CommandModel, ParseError, ParseOutcome};
///
/// let outcome =
///     ParseOutcome::not_parsed(CommandModel::default(), vec![ParseError::HelpRequested]);
/// assert!(outcome.is_not_parsed());
/// assert_eq!(outcome.errors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The options type the binder settled on.
    pub current: CommandModel,
    /// Verbs available at this level; empty for verb-less programs.
    pub choices: Vec<VerbModel>,
    pub status: ParseStatus,
}

impl ParseOutcome {
    pub fn parsed(current: CommandModel) -> Self {
        Self {
            current,
            choices: Vec::new(),
            status: ParseStatus::Parsed,
        }
    }

    pub fn not_parsed(current: CommandModel, errors: Vec<ParseError>) -> Self {
        Self {
            current,
            choices: Vec::new(),
            status: ParseStatus::NotParsed(errors),
        }
    }

    pub fn with_choices(mut self, choices: Vec<VerbModel>) -> Self {
        self.choices = choices;
        self
    }

    pub fn is_not_parsed(&self) -> bool {
        matches!(self.status, ParseStatus::NotParsed(_))
    }

    /// Errors of a failed parse; empty when parsing succeeded.
    pub fn errors(&self) -> &[ParseError] {
        match &self.status {
            ParseStatus::Parsed => &[],
            ParseStatus::NotParsed(errors) => errors,
        }
    }

    /// Finds a verb choice by name or alias.
    pub fn find_choice(&self, name: &str) -> Option<&VerbModel> {
        self.choices.iter().find(|c| c.verb.matches(name))
    }

    pub fn verbs(&self) -> Vec<&Verb> {
        self.choices.iter().map(|c| &c.verb).collect()
    }
}
