//! Usage examples: reconstructing command lines from samples.

use command_help_core::{
    ArgValue, Arity, Example, FormatStyle, OptionSpec, Sample, SampleOption, Specification,
};
use tracing::debug;

/// Turns an example [`Sample`] back into the text a user would type.
///
/// Closures of the form `Fn(&Sample, &FormatStyle) -> String` implement
/// this trait, so a custom formatter is usually just a closure.
pub trait CommandLineFormatter {
    fn format_command_line(&self, sample: &Sample, style: &FormatStyle) -> String;
}

impl<F> CommandLineFormatter for F
where
    F: Fn(&Sample, &FormatStyle) -> String,
{
    fn format_command_line(&self, sample: &Sample, style: &FormatStyle) -> String {
        self(sample, style)
    }
}

/// Default formatter, driven by the specifications of the current command.
///
/// # Examples
///
/// ```
/// use command_help_core::{FormatStyle, OptionSpec, Sample, Specification};
/// use command_help_render::{CommandLineFormatter, Unparser};
///
/// let specs: Vec<Specification> = vec![
///     OptionSpec::switch("v", "verbose").into(),
///     OptionSpec::new("o", "output").into(),
/// ];
/// let sample = Sample::new()
///     .with_option("verbose", true)
///     .with_option("output", "my file.txt")
///     .with_value("input.txt");
///
/// let line = Unparser::new(&specs).format_command_line(&sample, &FormatStyle::default());
/// assert_eq!(line, "--verbose --output \"my file.txt\" input.txt");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Unparser<'a> {
    specs: &'a [Specification],
}

impl<'a> Unparser<'a> {
    pub fn new(specs: &'a [Specification]) -> Self {
        Self { specs }
    }

    fn find(&self, name: &str) -> Option<&'a OptionSpec> {
        self.specs
            .iter()
            .filter_map(Specification::as_option)
            .find(|spec| spec.matches(name))
    }

    fn is_short_switch(&self, option: &SampleOption) -> bool {
        matches!(option.value, ArgValue::Bool(true))
            && self
                .find(&option.name)
                .is_some_and(|spec| spec.arity == Arity::Switch && spec.has_short())
    }

    fn format_option(&self, option: &SampleOption, style: &FormatStyle) -> Option<String> {
        if matches!(option.value, ArgValue::Bool(false)) {
            return None;
        }

        let (name, is_long, is_switch) = match self.find(&option.name) {
            Some(spec) => {
                let use_short = spec.has_short() && (style.prefer_short_name || !spec.has_long());
                let name = if use_short {
                    &spec.short_name
                } else {
                    &spec.long_name
                };
                (name.as_str(), !use_short, spec.arity == Arity::Switch)
            }
            None => (
                option.name.as_str(),
                option.name.chars().count() > 1,
                false,
            ),
        };

        let dashes = if is_long { "--" } else { "-" };
        if is_switch || matches!(option.value, ArgValue::Bool(true)) {
            return Some(format!("{dashes}{name}"));
        }

        let separator = if is_long && style.use_equal_token { "=" } else { " " };
        Some(format!(
            "{dashes}{name}{separator}{}",
            format_value(&option.value)
        ))
    }
}

impl CommandLineFormatter for Unparser<'_> {
    fn format_command_line(&self, sample: &Sample, style: &FormatStyle) -> String {
        let mut tokens: Vec<String> = Vec::new();
        let mut rest: Vec<&SampleOption> = sample.options.iter().collect();

        if style.group_switches {
            let (grouped, others): (Vec<&SampleOption>, Vec<&SampleOption>) =
                rest.into_iter().partition(|option| self.is_short_switch(option));
            let letters: String = grouped
                .iter()
                .filter_map(|option| self.find(&option.name))
                .map(|spec| spec.short_name.as_str())
                .collect();
            if !letters.is_empty() {
                tokens.push(format!("-{letters}"));
            }
            rest = others;
        }

        tokens.extend(
            rest.into_iter()
                .filter_map(|option| self.format_option(option, style)),
        );
        tokens.extend(sample.values.iter().map(format_value));
        tokens.join(" ")
    }
}

fn format_value(value: &ArgValue) -> String {
    match value {
        ArgValue::List(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(" "),
        other => quote(&other.to_string()),
    }
}

fn quote(text: &str) -> String {
    if text.is_empty() || text.contains(char::is_whitespace) || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\\\""))
    } else {
        text.to_string()
    }
}

/// Renders every example as a `description:` line followed by one indented
/// command line per format style.
///
/// `on_example` may rewrite an example before it is rendered.
pub fn render_usage_lines<F>(
    examples: &[Example],
    app_alias: &str,
    formatter: &dyn CommandLineFormatter,
    on_example: F,
) -> Vec<String>
where
    F: Fn(Example) -> Example,
{
    let mut lines = Vec::new();
    for example in examples.iter().cloned().map(on_example) {
        debug!(
            description = %example.description,
            styles = example.styles().len(),
            "Rendering usage example"
        );
        lines.push(format!("{}:", example.description));
        for style in example.styles() {
            let command_line = formatter.format_command_line(&example.sample, &style);
            let parts: Vec<&str> = [app_alias, command_line.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect();
            lines.push(format!("  {}", parts.join(" ")));
        }
    }
    lines
}
