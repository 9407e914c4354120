//! Automatic help screens built from a parse outcome.

use std::fmt;
use std::sync::Arc;

use command_help_core::{ErrorKind, Example, ParseError, ParseOutcome, meaningful_errors};
use tracing::debug;

use crate::config::{HelpConfig, HelpDefaults};
use crate::error::{HelpError, Result};
use crate::help::HelpText;
use crate::parse_errors::default_parsing_errors_handler;
use crate::usage::{CommandLineFormatter, Unparser, render_usage_lines};

/// Builds [`HelpText`]s for failed parses.
///
/// # Examples
///
/// ```
/// use command_help_core::{CommandModel, NameInfo, OptionSpec, ParseError, ParseOutcome};
/// use command_help_render::{HelpBuilder, HelpConfig, HelpDefaults};
///
/// let command = CommandModel::new(vec![OptionSpec::new("o", "output").required().into()]);
/// let outcome = ParseOutcome::not_parsed(
///     command,
///     vec![ParseError::MissingRequired { name: NameInfo::new("o", "output") }],
/// );
///
/// let defaults = HelpDefaults::new("tool", "tool 1.0", "");
/// let builder = HelpBuilder::new(HelpConfig::default(), defaults);
/// let text = builder.auto_build(&outcome).unwrap().finalize();
/// assert!(text.contains("ERROR(S):"));
/// assert!(text.contains("Required option 'o, output' is missing."));
/// assert!(text.contains("Required."));
/// ```
#[derive(Clone)]
pub struct HelpBuilder {
    config: HelpConfig,
    defaults: HelpDefaults,
    formatter: Option<Arc<dyn CommandLineFormatter + Send + Sync>>,
}

impl HelpBuilder {
    pub fn new(config: HelpConfig, defaults: HelpDefaults) -> Self {
        Self {
            config,
            defaults,
            formatter: None,
        }
    }

    /// Replaces the default example command-line formatter.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: CommandLineFormatter + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    pub fn defaults(&self) -> &HelpDefaults {
        &self.defaults
    }

    /// Builds the help screen appropriate for `outcome`.
    ///
    /// - a version request yields only the heading and copyright;
    /// - `help <verb>` for a known verb yields that verb's own help;
    /// - `help` alone yields the verb index;
    /// - anything else yields the full screen with an error section.
    ///
    /// # Errors
    ///
    /// Returns [`HelpError::ExpectedNotParsedResult`] if `outcome` was parsed.
    pub fn auto_build(&self, outcome: &ParseOutcome) -> Result<HelpText> {
        if !outcome.is_not_parsed() {
            return Err(HelpError::ExpectedNotParsedResult);
        }
        let errors = outcome.errors();
        let verbs_index = match help_verb_request(outcome) {
            Some((verb, matched)) => {
                if !matched || verb.and_then(|name| outcome.find_choice(name)).is_none() {
                    debug!(?verb, "Requested verb not found, building verb index");
                }
                true
            }
            None => false,
        };

        self.auto_build_with(
            outcome,
            |help| default_parsing_errors_handler(help, errors),
            |example| example,
            verbs_index,
        )
    }

    /// Builds a help screen with caller-supplied error and example hooks.
    ///
    /// A version request and `help <verb>` for a known verb take precedence
    /// over everything else, exactly as in [`auto_build`](Self::auto_build).
    /// `on_error` runs only when `outcome` carries meaningful errors.
    /// `verbs_index` forces the verb listing even without a
    /// [`ParseError::NoVerbSelected`], provided verbs exist.
    ///
    /// # Errors
    ///
    /// Returns [`HelpError::ExpectedNotParsedResult`] if `outcome` was parsed.
    pub fn auto_build_with<E, X>(
        &self,
        outcome: &ParseOutcome,
        on_error: E,
        on_example: X,
        verbs_index: bool,
    ) -> Result<HelpText>
    where
        E: FnOnce(HelpText) -> HelpText,
        X: Fn(Example) -> Example,
    {
        if !outcome.is_not_parsed() {
            return Err(HelpError::ExpectedNotParsedResult);
        }
        let errors = outcome.errors();

        if errors.iter().any(|e| e.kind() == ErrorKind::VersionRequested) {
            debug!("Building version screen");
            return Ok(self.build_version());
        }

        let requested = help_verb_request(outcome)
            .filter(|(_, matched)| *matched)
            .and_then(|(verb, _)| verb)
            .and_then(|name| outcome.find_choice(name));
        if let Some(choice) = requested {
            debug!(verb = %choice.verb.name, "Building help for requested verb");
            let nested = ParseOutcome::not_parsed(choice.command.clone(), Vec::new());
            return self.auto_build_with(&nested, on_error, on_example, false);
        }

        let has_meaningful = meaningful_errors(errors).next().is_some();

        let mut help = HelpText::new(self.config.clone(), Arc::clone(&self.defaults.sentences));
        help.set_heading(&self.defaults.heading);
        if self.config.always_show_copyright || has_meaningful {
            help.set_copyright(&self.defaults.copyright);
        }

        if has_meaningful {
            help = on_error(help);
        }

        let specs = &outcome.current.specifications;
        let unparser = Unparser::new(specs);
        let formatter: &dyn CommandLineFormatter = match &self.formatter {
            Some(custom) => custom.as_ref(),
            None => &unparser,
        };
        let usage = render_usage_lines(
            &outcome.current.examples,
            &self.defaults.app_alias,
            formatter,
            on_example,
        );
        if !usage.is_empty() {
            let heading = help.sentences().usage_heading_text();
            if !heading.is_empty() {
                if !help.pre_options_lines().is_empty() {
                    help.add_pre_options_line("");
                }
                help.add_pre_options_line(&heading);
            }
            help.add_pre_options_lines(usage);
        }

        let no_verb = errors.iter().any(|e| e.kind() == ErrorKind::NoVerbSelected);
        if !outcome.choices.is_empty() && (verbs_index || no_verb) {
            debug!(verbs = outcome.choices.len(), "Building verb index");
            help.add_verbs(&outcome.verbs());
        } else {
            debug!(specifications = specs.len(), "Building options help");
            help.add_options(specs);
        }
        Ok(help)
    }

    /// Heading and copyright only.
    pub fn build_version(&self) -> HelpText {
        let mut help = HelpText::new(self.config.clone(), Arc::clone(&self.defaults.sentences));
        help.set_heading(&self.defaults.heading)
            .set_copyright(&self.defaults.copyright);
        help
    }
}

/// The verb named by a `help <verb>` request, and whether the binder matched it.
fn help_verb_request(outcome: &ParseOutcome) -> Option<(Option<&str>, bool)> {
    outcome.errors().iter().find_map(|error| match error {
        ParseError::HelpVerbRequested { verb, matched } => Some((verb.as_deref(), *matched)),
        _ => None,
    })
}

impl fmt::Debug for HelpBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpBuilder")
            .field("config", &self.config)
            .field("defaults", &self.defaults)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use command_help_core::{
        CommandModel, FormatStyle, NameInfo, OptionSpec, Sample, ValueSpec, Verb, VerbModel,
    };

    use super::*;
    use crate::NEWLINE;

    fn defaults() -> HelpDefaults {
        HelpDefaults::new("tool", "tool 2.0", "Copyright (C) 2024 Acme")
    }

    fn builder() -> HelpBuilder {
        HelpBuilder::new(HelpConfig::default().with_additional_new_line(false), defaults())
    }

    fn command() -> CommandModel {
        CommandModel::new(vec![
            OptionSpec::switch("v", "verbose").with_help("Chatty output.").into(),
            ValueSpec::new(0).with_meta_name("INPUT").required().into(),
        ])
    }

    fn verbs() -> Vec<VerbModel> {
        vec![
            VerbModel::new(
                Verb::new("add", "Add files."),
                CommandModel::new(vec![
                    OptionSpec::switch("f", "force").with_help("Overwrite.").into(),
                ]),
            ),
            VerbModel::new(Verb::new("commit", "Record changes."), CommandModel::default()),
        ]
    }

    #[test]
    fn test_parsed_outcome_is_rejected() {
        let outcome = ParseOutcome::parsed(command());
        assert!(matches!(
            builder().auto_build(&outcome),
            Err(HelpError::ExpectedNotParsedResult)
        ));
        assert!(builder()
            .auto_build_with(&outcome, |h| h, |e| e, false)
            .is_err());
    }

    #[test]
    fn test_version_request_shows_heading_and_copyright_only() {
        let outcome = ParseOutcome::not_parsed(command(), vec![ParseError::VersionRequested]);
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert_eq!(text, format!("tool 2.0{NEWLINE}Copyright (C) 2024 Acme"));
    }

    #[test]
    fn test_version_request_wins_over_verb_index() {
        let outcome = ParseOutcome::not_parsed(command(), vec![ParseError::VersionRequested])
            .with_choices(verbs());
        let text = builder()
            .auto_build_with(&outcome, |h| h, |e| e, true)
            .unwrap()
            .finalize();
        assert_eq!(text, format!("tool 2.0{NEWLINE}Copyright (C) 2024 Acme"));
    }

    #[test]
    fn test_help_verb_wins_over_verb_index() {
        let outcome = ParseOutcome::not_parsed(
            CommandModel::default(),
            vec![ParseError::HelpVerbRequested {
                verb: Some("add".into()),
                matched: true,
            }],
        )
        .with_choices(verbs());
        let text = builder()
            .auto_build_with(&outcome, |h| h, |e| e, true)
            .unwrap()
            .finalize();
        assert!(text.contains("  -f, --force    Overwrite."));
        assert!(!text.contains("Add files."));
    }

    #[test]
    fn test_help_request_lists_options_without_errors() {
        let outcome = ParseOutcome::not_parsed(command(), vec![ParseError::HelpRequested]);
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert!(!text.contains("ERROR(S):"));
        assert!(text.contains("  -v, --verbose     Chatty output."));
        assert!(text.contains("  INPUT (pos. 0)    Required."));
    }

    #[test]
    fn test_copyright_hidden_without_errors_when_configured() {
        let config = HelpConfig::default().with_always_show_copyright(false);
        let builder = HelpBuilder::new(config, defaults());

        let help_only = ParseOutcome::not_parsed(command(), vec![ParseError::HelpRequested]);
        assert!(builder.auto_build(&help_only).unwrap().copyright().is_empty());

        let failing = ParseOutcome::not_parsed(
            command(),
            vec![ParseError::UnknownOption {
                token: "x".into(),
            }],
        );
        assert_eq!(
            builder.auto_build(&failing).unwrap().copyright(),
            "Copyright (C) 2024 Acme"
        );
    }

    #[test]
    fn test_errors_precede_usage() {
        let examples = vec![Example::new(
            "Verbose run",
            Sample::new().with_option("verbose", true).with_value("a.txt"),
        )];
        let outcome = ParseOutcome::not_parsed(
            command().with_examples(examples),
            vec![ParseError::MissingRequired {
                name: NameInfo::positional(),
            }],
        );
        let help = builder().auto_build(&outcome).unwrap();
        assert_eq!(
            help.pre_options_lines(),
            [
                "",
                "ERROR(S):",
                "  A required value not bound to option name is missing.",
                "",
                "USAGE:",
                "Verbose run:",
                "  tool --verbose a.txt",
            ]
        );
    }

    #[test]
    fn test_no_verb_selected_lists_verbs() {
        let outcome =
            ParseOutcome::not_parsed(CommandModel::default(), vec![ParseError::NoVerbSelected])
                .with_choices(verbs());
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert!(text.contains("  add        Add files."));
        assert!(text.contains("  commit     Record changes."));
        assert!(text.contains("No verb selected."));
    }

    #[test]
    fn test_help_verb_matched_renders_verb_options() {
        let outcome = ParseOutcome::not_parsed(
            CommandModel::default(),
            vec![ParseError::HelpVerbRequested {
                verb: Some("add".into()),
                matched: true,
            }],
        )
        .with_choices(verbs());
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert!(text.contains("  -f, --force    Overwrite."));
        assert!(!text.contains("Record changes."));
    }

    #[test]
    fn test_help_verb_unmatched_renders_index() {
        let outcome = ParseOutcome::not_parsed(
            CommandModel::default(),
            vec![ParseError::HelpVerbRequested {
                verb: Some("nope".into()),
                matched: false,
            }],
        )
        .with_choices(verbs());
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert!(text.contains("Record changes."));
        assert!(!text.contains("ERROR(S):"));
    }

    #[test]
    fn test_help_verb_claimed_match_without_choice_renders_index() {
        let outcome = ParseOutcome::not_parsed(
            CommandModel::default(),
            vec![ParseError::HelpVerbRequested {
                verb: Some("ghost".into()),
                matched: true,
            }],
        )
        .with_choices(verbs());
        let text = builder().auto_build(&outcome).unwrap().finalize();
        assert!(text.contains("  add        Add files."));
    }

    #[test]
    fn test_auto_build_is_idempotent() {
        let outcome = ParseOutcome::not_parsed(
            command(),
            vec![ParseError::UnknownOption {
                token: "zap".into(),
            }],
        );
        let builder = builder();
        let first = builder.auto_build(&outcome).unwrap().finalize();
        let second = builder.auto_build(&outcome).unwrap().finalize();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_formatter_and_example_mapping() {
        let examples = vec![Example::new("Run", Sample::new().with_value("x"))];
        let outcome = ParseOutcome::not_parsed(
            command().with_examples(examples),
            vec![ParseError::HelpRequested],
        );
        let builder = builder().with_formatter(|sample: &Sample, _: &FormatStyle| {
            format!("<{} values>", sample.values.len())
        });
        let help = builder
            .auto_build_with(
                &outcome,
                |h| h,
                |mut e| {
                    e.description = "Mapped".into();
                    e
                },
                false,
            )
            .unwrap();
        assert_eq!(
            help.pre_options_lines(),
            ["USAGE:", "Mapped:", "  tool <1 values>"]
        );
    }

    #[test]
    fn test_on_error_skipped_without_meaningful_errors() {
        let outcome = ParseOutcome::not_parsed(command(), vec![ParseError::HelpRequested]);
        let help = builder()
            .auto_build_with(
                &outcome,
                |mut h| {
                    h.add_pre_options_line("should not appear");
                    h
                },
                |e| e,
                false,
            )
            .unwrap();
        assert!(help.pre_options_lines().is_empty());
    }

    #[test]
    fn test_verbs_index_requires_choices() {
        let outcome = ParseOutcome::not_parsed(command(), vec![ParseError::HelpRequested]);
        let help = builder()
            .auto_build_with(&outcome, |h| h, |e| e, true)
            .unwrap();
        assert!(help.options_block().contains("--verbose"));
    }
}
