//! Help and usage text rendering for command-line programs.
//!
//! Given the option specifications of a program (see
//! [`command_help_core`]), this crate produces the screen a user sees after
//! `--help`, `--version` or a failed parse: heading, copyright, errors,
//! usage examples and a column-aligned, word-wrapped options block.
//!
//! # Main entry points
//!
//! - [`HelpBuilder::auto_build`]: pick the right screen for a parse outcome.
//! - [`HelpText`]: assemble a screen by hand, then [`HelpText::finalize`].
//! - [`render_parsing_errors`]: error lines only.
//! - [`wrap`]: the greedy word wrapper used for every block.
//!
//! # Example
//!
//! ```
//! use command_help_core::{CommandModel, OptionSpec, ParseError, ParseOutcome, ValueSpec};
//! use command_help_render::{HelpBuilder, HelpConfig, HelpDefaults};
//!
//! let command = CommandModel::new(vec![
//!     OptionSpec::new("o", "output")
//!         .with_meta_value("FILE")
//!         .with_help("Where to write the report.")
//!         .into(),
//!     ValueSpec::new(0).with_meta_name("INPUT").required().into(),
//! ]);
//! let outcome = ParseOutcome::not_parsed(command, vec![ParseError::HelpRequested]);
//!
//! let defaults = HelpDefaults::new("report", "report 0.4.0", "Copyright (C) 2024 Acme");
//! let builder = HelpBuilder::new(HelpConfig::default(), defaults);
//! let text = builder.auto_build(&outcome).unwrap().finalize();
//!
//! assert!(text.starts_with("report 0.4.0"));
//! assert!(text.contains("-o FILE, --output=FILE"));
//! assert!(text.lines().all(|line| line.chars().count() <= 80));
//! ```

mod builder;
mod config;
mod error;
mod help;
mod parse_errors;
mod sentence;
mod usage;
mod wrap;

pub use builder::HelpBuilder;
pub use config::{CopyrightInfo, DEFAULT_MAX_DISPLAY_WIDTH, HeadingInfo, HelpConfig, HelpDefaults};
pub use error::{HelpError, Result};
pub use help::{HelpText, RenderPhase, rendering_order, verbs_to_specifications};
pub use parse_errors::{
    default_parsing_errors_handler, render_parsing_errors, render_parsing_errors_with,
};
pub use sentence::{EnglishSentenceBuilder, SentenceBuilder};
pub use usage::{CommandLineFormatter, Unparser, render_usage_lines};
pub use wrap::wrap;

/// Line separator used between rendered lines.
#[cfg(windows)]
pub const NEWLINE: &str = "\r\n";

/// Line separator used between rendered lines.
#[cfg(not(windows))]
pub const NEWLINE: &str = "\n";
