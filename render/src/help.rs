//! The help document and its options block.
//!
//! A [`HelpText`] accumulates sections in phases (pre-options lines, the
//! options block, post-options lines) and is finalized into one string.
//! Sections that stay empty are left out entirely.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use command_help_core::{OptionSpec, Specification};
//! use command_help_render::{EnglishSentenceBuilder, HelpConfig, HelpText};
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::new("o", "output").with_meta_value("FILE").with_help("Output path.").into(),
//! ];
//! let config = HelpConfig::default().with_additional_new_line(false);
//! let mut help = HelpText::new(config, Arc::new(EnglishSentenceBuilder));
//! help.set_heading("tool 1.0");
//! help.add_options(&specs);
//!
//! let text = help.to_string();
//! assert!(text.starts_with("tool 1.0"));
//! assert!(text.contains("  -o FILE, --output=FILE    Output path."));
//! ```

use std::fmt;
use std::sync::Arc;

use command_help_core::{Arity, OptionSpec, Specification, ValueSpec, Verb};
use tracing::debug;

use crate::config::HelpConfig;
use crate::sentence::SentenceBuilder;
use crate::wrap::{display_width, fit_line, wrap_and_indent};
use crate::NEWLINE;

/// Columns around a label: two before it, four after it.
const LABEL_PADDING: usize = 6;

/// Rendering progress of a [`HelpText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPhase {
    Empty,
    PreOptions,
    OptionsBlock,
    PostOptions,
    Finalized,
}

/// A help screen under construction.
#[derive(Clone)]
pub struct HelpText {
    heading: String,
    copyright: String,
    pre_options: Vec<String>,
    options_block: String,
    post_options: Vec<String>,
    config: HelpConfig,
    sentences: Arc<dyn SentenceBuilder>,
    phase: RenderPhase,
}

impl HelpText {
    pub fn new(config: HelpConfig, sentences: Arc<dyn SentenceBuilder>) -> Self {
        Self {
            heading: String::new(),
            copyright: String::new(),
            pre_options: Vec::new(),
            options_block: String::new(),
            post_options: Vec::new(),
            config,
            sentences,
            phase: RenderPhase::Empty,
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn set_heading(&mut self, heading: &str) -> &mut Self {
        self.heading = heading.to_string();
        self
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn set_copyright(&mut self, copyright: &str) -> &mut Self {
        self.copyright = copyright.to_string();
        self
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    pub fn sentences(&self) -> &dyn SentenceBuilder {
        self.sentences.as_ref()
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn pre_options_lines(&self) -> &[String] {
        &self.pre_options
    }

    pub fn post_options_lines(&self) -> &[String] {
        &self.post_options
    }

    /// The wrapped options block, empty until options or verbs are added.
    pub fn options_block(&self) -> &str {
        &self.options_block
    }

    /// Appends a line above the options block, wrapped to the display width.
    pub fn add_pre_options_line(&mut self, line: &str) -> &mut Self {
        let width = self.config.max_display_width;
        self.pre_options.extend(fit_line(line, width));
        self.advance(RenderPhase::PreOptions);
        self
    }

    pub fn add_pre_options_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_pre_options_line(line.as_ref());
        }
        self
    }

    /// Appends a line below the options block, wrapped to the display width.
    pub fn add_post_options_line(&mut self, line: &str) -> &mut Self {
        let width = self.config.max_display_width;
        self.post_options.extend(fit_line(line, width));
        self.advance(RenderPhase::PostOptions);
        self
    }

    pub fn add_post_options_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_post_options_line(line.as_ref());
        }
        self
    }

    /// Renders an options type's specifications.
    ///
    /// Options come first in declaration order followed by the synthetic
    /// `help`/`version` entries, then positional values by index.
    pub fn add_options(&mut self, specs: &[Specification]) -> &mut Self {
        let ordered = rendering_order(specs, &self.config, self.sentences.as_ref());
        let required_word = self.sentences.required_word();
        let add_dashes = self.config.add_dashes_to_option;
        self.add_options_block(&ordered, &required_word, add_dashes)
    }

    /// Renders a verb listing, each verb shown as a dashless switch.
    pub fn add_verbs(&mut self, verbs: &[&Verb]) -> &mut Self {
        let specs = verbs_to_specifications(verbs, &self.config, self.sentences.as_ref());
        self.add_options_block(&specs, "", false)
    }

    /// Finishes the document.
    pub fn finalize(mut self) -> String {
        let text = self.compose();
        self.phase = RenderPhase::Finalized;
        text
    }

    /// The finished document split into lines.
    pub fn render_lines(&self) -> Vec<String> {
        self.compose().lines().map(String::from).collect()
    }

    fn advance(&mut self, phase: RenderPhase) {
        self.phase = self.phase.max(phase);
    }

    fn add_options_block(
        &mut self,
        specs: &[Specification],
        required_word: &str,
        add_dashes: bool,
    ) -> &mut Self {
        let visible: Vec<(&Specification, String)> = specs
            .iter()
            .filter(|spec| !spec.hidden())
            .map(|spec| (spec, label(spec, add_dashes)))
            .collect();

        let max_label = visible
            .iter()
            .map(|(_, label)| display_width(label))
            .max()
            .unwrap_or(0);
        let indent = max_label + LABEL_PADDING;
        let remaining = self.config.max_display_width.saturating_sub(indent);
        debug!(
            entries = visible.len(),
            max_label, remaining, "Rendering options block"
        );

        let mut block = String::new();
        for (spec, label) in &visible {
            let help =
                entry_help_text(spec, required_word, self.config.add_value_sets_to_help_text);
            let mut lines = wrap_and_indent(&help, indent, remaining).into_iter();
            let first = lines.next().unwrap_or_default();

            let pad = " ".repeat(max_label.saturating_sub(display_width(label)));
            block.push_str(&format!("  {label}{pad}    {first}"));
            for line in lines {
                block.push_str(NEWLINE);
                block.push_str(&line);
            }
            block.push_str(NEWLINE);
            if self.config.additional_new_line_after_option {
                block.push_str(NEWLINE);
            }
        }

        self.options_block = block;
        self.advance(RenderPhase::OptionsBlock);
        self
    }

    fn compose(&self) -> String {
        let mut out = self.heading.clone();
        push_section(&mut out, &self.copyright, false);
        push_section(&mut out, &self.pre_options.join(NEWLINE), false);
        push_section(&mut out, &self.options_block, true);
        push_section(&mut out, &self.post_options.join(NEWLINE), false);
        out
    }
}

fn push_section(out: &mut String, text: &str, blank_before: bool) {
    if text.is_empty() {
        return;
    }
    if !out.is_empty() && !out.ends_with(NEWLINE) {
        out.push_str(NEWLINE);
    }
    if blank_before && !out.is_empty() {
        out.push_str(NEWLINE);
    }
    out.push_str(text);
}

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose())
    }
}

impl fmt::Debug for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpText")
            .field("heading", &self.heading)
            .field("copyright", &self.copyright)
            .field("pre_options", &self.pre_options)
            .field("options_block", &self.options_block)
            .field("post_options", &self.post_options)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Options in declaration order, the enabled synthetic entries, then
/// positional values sorted by index.
pub fn rendering_order(
    specs: &[Specification],
    config: &HelpConfig,
    sentences: &dyn SentenceBuilder,
) -> Vec<Specification> {
    let mut ordered: Vec<Specification> = specs
        .iter()
        .filter(|spec| matches!(spec, Specification::Option(_)))
        .cloned()
        .collect();
    ordered.extend(builtin_entries(config, sentences, config.add_dashes_to_option));

    let mut values: Vec<&ValueSpec> = specs.iter().filter_map(Specification::as_value).collect();
    values.sort_by_key(|v| v.index);
    ordered.extend(values.into_iter().cloned().map(Specification::Value));
    ordered
}

/// Verbs as dashless switches followed by the synthetic entries.
pub fn verbs_to_specifications(
    verbs: &[&Verb],
    config: &HelpConfig,
    sentences: &dyn SentenceBuilder,
) -> Vec<Specification> {
    let mut specs: Vec<Specification> = verbs
        .iter()
        .map(|verb| {
            let mut spec = OptionSpec::switch("", &verb.name).with_help(&verb.help_text);
            spec.hidden = verb.hidden;
            Specification::Option(spec)
        })
        .collect();
    specs.extend(builtin_entries(config, sentences, false));
    specs
}

fn builtin_entries(
    config: &HelpConfig,
    sentences: &dyn SentenceBuilder,
    add_dashes: bool,
) -> Vec<Specification> {
    let mut entries = Vec::new();
    if config.auto_help {
        entries.push(
            OptionSpec::switch("", "help")
                .with_help(&sentences.help_command_text(add_dashes))
                .into(),
        );
    }
    if config.auto_version {
        entries.push(
            OptionSpec::switch("", "version")
                .with_help(&sentences.version_command_text(add_dashes))
                .into(),
        );
    }
    entries
}

fn label(spec: &Specification, add_dashes: bool) -> String {
    match spec {
        Specification::Option(option) => option_label(option, add_dashes),
        Specification::Value(value) => value_label(value),
    }
}

fn option_label(spec: &OptionSpec, add_dashes: bool) -> String {
    let mut label = String::new();
    let has_meta = !spec.meta_value.is_empty() && spec.arity != Arity::Switch;

    if spec.has_short() {
        if add_dashes {
            label.push('-');
        }
        label.push_str(&spec.short_name);
        if has_meta {
            label.push(' ');
            label.push_str(&spec.meta_value);
        }
        if spec.has_long() {
            label.push_str(", ");
        }
    }
    if spec.has_long() {
        if add_dashes {
            label.push_str("--");
        }
        label.push_str(&spec.long_name);
        if has_meta {
            label.push('=');
            label.push_str(&spec.meta_value);
        }
    }
    label
}

fn value_label(spec: &ValueSpec) -> String {
    let mut label = if spec.meta_name.is_empty() {
        format!("value pos. {}", spec.index)
    } else {
        format!("{} (pos. {})", spec.meta_name, spec.index)
    };
    if !spec.meta_value.is_empty() {
        label.push(' ');
        label.push_str(&spec.meta_value);
    }
    label
}

fn entry_help_text(spec: &Specification, required_word: &str, add_value_sets: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if spec.required() && !required_word.is_empty() {
        parts.push(required_word.to_string());
    }
    if let Some(default) = spec.default_value() {
        parts.push(format!("(Default: {default})"));
    }
    if !spec.help_text().is_empty() {
        parts.push(spec.help_text().to_string());
    }
    if add_value_sets && !spec.value_set_text().is_empty() {
        parts.push(format!("Valid values: {}", spec.value_set_text().join(", ")));
    }
    parts.join(" ")
}
