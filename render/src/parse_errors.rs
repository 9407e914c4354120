//! Turning parse errors into indented text lines.

use command_help_core::{ErrorKind, ParseError, meaningful_errors};
use tracing::debug;

use crate::help::HelpText;
use crate::sentence::SentenceBuilder;
use crate::NEWLINE;

/// Renders meaningful errors with caller-supplied formatters.
///
/// Individual errors come first, one per line. Mutually-exclusive-set
/// errors are formatted together afterwards and may span several lines.
/// Every line is prefixed with `indent` spaces. Returns an empty string
/// when nothing is worth showing.
pub fn render_parsing_errors_with<E, M>(
    errors: &[ParseError],
    format_error: E,
    format_mutually_exclusive: M,
    indent: usize,
) -> String
where
    E: Fn(&ParseError) -> String,
    M: Fn(&[&ParseError]) -> String,
{
    let (exclusive, individual): (Vec<&ParseError>, Vec<&ParseError>) = meaningful_errors(errors)
        .partition(|error| error.kind() == ErrorKind::MutuallyExclusiveSet);
    debug!(
        individual = individual.len(),
        exclusive = exclusive.len(),
        "Rendering parse errors"
    );

    let pad = " ".repeat(indent);
    let mut lines: Vec<String> = individual
        .into_iter()
        .map(|error| format_error(error))
        .filter(|line| !line.is_empty())
        .map(|line| format!("{pad}{line}"))
        .collect();

    if !exclusive.is_empty() {
        let grouped = format_mutually_exclusive(&exclusive);
        lines.extend(
            grouped
                .split(NEWLINE)
                .filter(|line| !line.is_empty())
                .map(|line| format!("{pad}{line}")),
        );
    }

    lines.join(NEWLINE)
}

/// Renders meaningful errors with a sentence builder's messages.
///
/// # Examples
///
/// ```
/// use command_help_core::{NameInfo, ParseError};
/// use command_help_render::{EnglishSentenceBuilder, render_parsing_errors};
///
/// let errors = [
///     ParseError::MissingRequired { name: NameInfo::new("o", "output") },
///     ParseError::HelpRequested,
/// ];
/// let text = render_parsing_errors(&errors, &EnglishSentenceBuilder, 2);
/// assert_eq!(text, "  Required option 'o, output' is missing.");
/// ```
pub fn render_parsing_errors(
    errors: &[ParseError],
    sentences: &dyn SentenceBuilder,
    indent: usize,
) -> String {
    render_parsing_errors_with(
        errors,
        |error| sentences.format_error(error),
        |group| sentences.format_mutually_exclusive_set_errors(group),
        indent,
    )
}

/// The error section added to a help screen when parsing failed: a blank
/// line, the errors heading and the rendered errors indented by two.
pub fn default_parsing_errors_handler(mut help: HelpText, errors: &[ParseError]) -> HelpText {
    if meaningful_errors(errors).next().is_none() {
        return help;
    }

    let rendered = render_parsing_errors(errors, help.sentences(), 2);
    if rendered.is_empty() {
        return help;
    }

    let heading = help.sentences().errors_heading_text();
    help.add_pre_options_line("");
    help.add_pre_options_line(&heading);
    help.add_pre_options_lines(rendered.split(NEWLINE).map(String::from).collect::<Vec<_>>());
    help
}
