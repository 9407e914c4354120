//! Render configuration and process-scoped defaults.
//!
//! [`HelpConfig`] holds the layout switches and is YAML-serializable so an
//! entry point can keep it in a file. [`HelpDefaults`] replaces the
//! heading, copyright and sentence builder a program would otherwise look
//! up globally: it is built once at startup and handed to the
//! [`HelpBuilder`](crate::HelpBuilder).
//!
//! # Example YAML
//!
//! ```yaml
//! max_display_width: 100
//! add_dashes_to_option: true
//! additional_new_line_after_option: false
//! add_value_sets_to_help_text: true
//! always_show_copyright: true
//! auto_help: true
//! auto_version: true
//! ```

use std::fmt;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sentence::{EnglishSentenceBuilder, SentenceBuilder};

/// Display width used when none is configured.
pub const DEFAULT_MAX_DISPLAY_WIDTH: usize = 80;

/// Layout switches for a rendered help screen.
///
/// # Examples
///
/// ```
/// use command_help_render::HelpConfig;
///
/// let config = HelpConfig::default().with_max_display_width(100);
/// assert_eq!(config.max_display_width, 100);
/// assert!(config.add_dashes_to_option);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Total column budget for every rendered line.
    pub max_display_width: usize,
    /// Prefix option names with `-`/`--`.
    pub add_dashes_to_option: bool,
    /// Emit a blank line after every option entry.
    pub additional_new_line_after_option: bool,
    /// Append `Valid values: ...` to entries with a value set.
    pub add_value_sets_to_help_text: bool,
    /// Show the copyright line even when no error is being reported.
    pub always_show_copyright: bool,
    /// Append the synthetic `help` entry.
    pub auto_help: bool,
    /// Append the synthetic `version` entry.
    pub auto_version: bool,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            max_display_width: DEFAULT_MAX_DISPLAY_WIDTH,
            add_dashes_to_option: true,
            additional_new_line_after_option: true,
            add_value_sets_to_help_text: false,
            always_show_copyright: true,
            auto_help: true,
            auto_version: true,
        }
    }
}

impl HelpConfig {
    /// Loads configuration from a YAML (or JSON) file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::HelpError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::HelpError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::HelpError::Io) if the file cannot be written, or
    /// [`Yaml`](crate::HelpError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn with_max_display_width(mut self, width: usize) -> Self {
        self.max_display_width = width;
        self
    }

    pub fn with_dashes(mut self, add_dashes: bool) -> Self {
        self.add_dashes_to_option = add_dashes;
        self
    }

    pub fn with_additional_new_line(mut self, enabled: bool) -> Self {
        self.additional_new_line_after_option = enabled;
        self
    }

    pub fn with_value_sets(mut self, enabled: bool) -> Self {
        self.add_value_sets_to_help_text = enabled;
        self
    }

    pub fn with_always_show_copyright(mut self, enabled: bool) -> Self {
        self.always_show_copyright = enabled;
        self
    }
}

/// Program name and version shown as the first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingInfo {
    pub program: String,
    pub version: Option<String>,
}

impl HeadingInfo {
    pub fn new(program: &str, version: Option<&str>) -> Self {
        Self {
            program: program.to_string(),
            version: version.map(String::from),
        }
    }
}

impl fmt::Display for HeadingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) if !version.is_empty() => write!(f, "{} {version}", self.program),
            _ => f.write_str(&self.program),
        }
    }
}

/// Copyright line, rendered as `Copyright (C) <year> <author>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightInfo {
    pub author: String,
    pub year: Option<i32>,
}

impl CopyrightInfo {
    pub fn new(author: &str, year: Option<i32>) -> Self {
        Self {
            author: author.to_string(),
            year,
        }
    }

    /// Copyright for `author` dated with the current local year.
    pub fn current_year(author: &str) -> Self {
        Self::new(author, Some(chrono::Local::now().year()))
    }
}

impl fmt::Display for CopyrightInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "Copyright (C) {year} {}", self.author),
            None => write!(f, "Copyright (C) {}", self.author),
        }
    }
}

/// Heading, copyright, program alias and sentence builder shared by every
/// render in one process.
///
/// # Examples
///
/// ```
/// use command_help_render::HelpDefaults;
///
/// let defaults = HelpDefaults::new("tool", "tool 1.2.0", "Copyright (C) 2024 Acme");
/// assert_eq!(defaults.heading, "tool 1.2.0");
/// assert_eq!(defaults.sentences.required_word(), "Required.");
/// ```
#[derive(Clone)]
pub struct HelpDefaults {
    /// Name used to prefix example command lines.
    pub app_alias: String,
    pub heading: String,
    pub copyright: String,
    pub sentences: Arc<dyn SentenceBuilder>,
}

impl HelpDefaults {
    pub fn new(app_alias: &str, heading: &str, copyright: &str) -> Self {
        Self {
            app_alias: app_alias.to_string(),
            heading: heading.to_string(),
            copyright: copyright.to_string(),
            sentences: Arc::new(EnglishSentenceBuilder),
        }
    }

    /// Builds defaults from package metadata, typically
    /// `env!("CARGO_PKG_NAME")`, `env!("CARGO_PKG_VERSION")` and
    /// `env!("CARGO_PKG_AUTHORS")` (colon-separated).
    pub fn from_package(name: &str, version: &str, authors: &str) -> Self {
        let heading = HeadingInfo::new(name, Some(version)).to_string();
        let authors = authors
            .split(':')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let copyright = if authors.is_empty() {
            String::new()
        } else {
            CopyrightInfo::current_year(&authors).to_string()
        };
        Self::new(name, &heading, &copyright)
    }

    pub fn with_sentences(mut self, sentences: Arc<dyn SentenceBuilder>) -> Self {
        self.sentences = sentences;
        self
    }
}

impl Default for HelpDefaults {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Debug for HelpDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpDefaults")
            .field("app_alias", &self.app_alias)
            .field("heading", &self.heading)
            .field("copyright", &self.copyright)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("help.yaml");
        let config = HelpConfig::default()
            .with_max_display_width(120)
            .with_value_sets(true);
        config.save(&path).unwrap();
        assert_eq!(HelpConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let config: HelpConfig = serde_yaml::from_str("max_display_width: 60\n").unwrap();
        assert_eq!(config.max_display_width, 60);
        assert!(config.auto_help);
        assert!(config.additional_new_line_after_option);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = HelpConfig::load("/nonexistent/help.yaml").unwrap_err();
        assert!(matches!(err, crate::HelpError::Io(_)));
    }

    #[test]
    fn test_heading_info_display() {
        assert_eq!(HeadingInfo::new("tool", Some("0.3.1")).to_string(), "tool 0.3.1");
        assert_eq!(HeadingInfo::new("tool", None).to_string(), "tool");
    }

    #[test]
    fn test_copyright_info_display() {
        assert_eq!(
            CopyrightInfo::new("Acme", Some(2024)).to_string(),
            "Copyright (C) 2024 Acme"
        );
        assert_eq!(CopyrightInfo::new("Acme", None).to_string(), "Copyright (C) Acme");
    }

    #[test]
    fn test_defaults_from_package() {
        let defaults = HelpDefaults::from_package("tool", "1.0.0", "Ann <a@x.io>:Bob");
        assert_eq!(defaults.app_alias, "tool");
        assert_eq!(defaults.heading, "tool 1.0.0");
        assert!(defaults.copyright.starts_with("Copyright (C) "));
        assert!(defaults.copyright.ends_with("Ann <a@x.io>, Bob"));

        let anonymous = HelpDefaults::from_package("tool", "1.0.0", "");
        assert!(anonymous.copyright.is_empty());
    }
}
