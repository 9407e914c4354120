//! Command definition files.
//!
//! A definition describes one program: its heading metadata, top-level
//! specifications and examples, optional verbs, and value sets keyed by the
//! name of the option (or positional meta name) they constrain.
//!
//! ```yaml
//! program: backup
//! version: 3.1.0
//! author: Example Corp
//! specifications:
//!   - kind: option
//!     short_name: l
//!     long_name: level
//!     help_text: Compression level.
//! value_sets:
//!   level:
//!     values: [low, high]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::Path;

use command_help_core::{
    CommandModel, Example, Specification, ValidationError, ValueSetSource, Verb, VerbModel,
    resolve, validate_specifications, validate_verbs,
};
use command_help_render::{CopyrightInfo, HeadingInfo, HelpDefaults};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandDefinition {
    pub program: String,
    pub version: Option<String>,
    /// Copyright holder; no copyright line when absent.
    pub author: Option<String>,
    /// Copyright year; the current year when absent.
    pub year: Option<i32>,
    pub specifications: Vec<Specification>,
    pub examples: Vec<Example>,
    pub verbs: Vec<VerbDefinition>,
    pub value_sets: BTreeMap<String, ValueSetDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbDefinition {
    pub name: String,
    pub help_text: String,
    pub hidden: bool,
    pub aliases: Vec<String>,
    pub specifications: Vec<Specification>,
    pub examples: Vec<Example>,
}

/// A finite value set declared in a definition file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueSetDefinition {
    pub values: Vec<String>,
    /// Replaces the listed values in help text when non-empty.
    pub description: Vec<String>,
}

impl CommandDefinition {
    /// Loads a definition, as JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<Self, String> {
        let file = fs::File::open(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let reader = BufReader::new(file);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut definition: Self = if is_json {
            serde_json::from_reader(reader)
                .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?
        } else {
            serde_yaml::from_reader(reader)
                .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?
        };
        definition.attach_value_sets()?;
        debug!(
            program = %definition.program,
            specifications = definition.specifications.len(),
            verbs = definition.verbs.len(),
            "Loaded command definition"
        );
        Ok(definition)
    }

    /// Resolves every declared value set and copies its description onto the
    /// specifications it names, in every verb as well as at top level.
    pub fn attach_value_sets(&mut self) -> Result<(), String> {
        for (name, declared) in &self.value_sets {
            let source = ValueSetSource::finite(declared.values.clone())
                .with_description(declared.description.clone());
            let value_set = resolve(source).map_err(|err| format!("Value set '{name}': {err}"))?;

            let targets = self
                .specifications
                .iter_mut()
                .chain(self.verbs.iter_mut().flat_map(|v| v.specifications.iter_mut()))
                .filter(|spec| spec_name_matches(spec, name));
            let mut attached = 0;
            for spec in targets {
                match spec {
                    Specification::Option(option) => {
                        option.value_set_text = value_set.description().to_vec();
                    }
                    Specification::Value(value) => {
                        value.value_set_text = value_set.description().to_vec();
                    }
                }
                attached += 1;
            }
            if attached == 0 {
                return Err(format!(
                    "Value set '{name}' does not match any specification"
                ));
            }
        }
        Ok(())
    }

    /// Structural problems across the top level and every verb.
    pub fn validate(&self, reserve_builtins: bool) -> Vec<ValidationError> {
        let mut errors = validate_specifications(&self.specifications, reserve_builtins);
        if !errors.is_empty() {
            return errors;
        }
        let verbs: Vec<Verb> = self.verbs.iter().map(VerbDefinition::verb).collect();
        errors = validate_verbs(&verbs);
        if !errors.is_empty() {
            return errors;
        }
        for verb in &self.verbs {
            errors = validate_specifications(&verb.specifications, reserve_builtins);
            if !errors.is_empty() {
                return errors;
            }
        }
        errors
    }

    pub fn command_model(&self) -> CommandModel {
        CommandModel::new(self.specifications.clone()).with_examples(self.examples.clone())
    }

    pub fn verb_models(&self) -> Vec<VerbModel> {
        self.verbs
            .iter()
            .map(|v| {
                VerbModel::new(
                    v.verb(),
                    CommandModel::new(v.specifications.clone()).with_examples(v.examples.clone()),
                )
            })
            .collect()
    }

    pub fn has_verb(&self, name: &str) -> bool {
        self.verbs.iter().any(|v| v.verb().matches(name))
    }

    pub fn help_defaults(&self) -> HelpDefaults {
        let heading = HeadingInfo::new(&self.program, self.version.as_deref()).to_string();
        let copyright = match &self.author {
            Some(author) => match self.year {
                Some(year) => CopyrightInfo::new(author, Some(year)),
                None => CopyrightInfo::current_year(author),
            }
            .to_string(),
            None => String::new(),
        };
        HelpDefaults::new(&self.program, &heading, &copyright)
    }
}

impl VerbDefinition {
    pub fn verb(&self) -> Verb {
        Verb {
            name: self.name.clone(),
            help_text: self.help_text.clone(),
            hidden: self.hidden,
            aliases: self.aliases.clone(),
        }
    }
}

fn spec_name_matches(spec: &Specification, name: &str) -> bool {
    match spec {
        Specification::Option(option) => option.matches(name),
        Specification::Value(value) => value.meta_name == name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"
program: backup
version: 3.1.0
author: Example Corp
year: 2024
specifications:
  - kind: option
    short_name: l
    long_name: level
    help_text: Compression level.
  - kind: value
    index: 0
    meta_name: SOURCE
    required: true
verbs:
  - name: restore
    help_text: Restore files.
    specifications:
      - kind: option
        long_name: level
value_sets:
  level:
    values: [low, high, low]
"#;

    fn parse(raw: &str) -> CommandDefinition {
        serde_yaml::from_str(raw).unwrap()
    }

    #[test]
    fn test_value_sets_attach_to_matching_specs() {
        let mut definition = parse(DEFINITION);
        definition.attach_value_sets().unwrap();
        assert_eq!(definition.specifications[0].value_set_text(), ["low", "high"]);
        assert_eq!(
            definition.verbs[0].specifications[0].value_set_text(),
            ["low", "high"]
        );
        assert!(definition.specifications[1].value_set_text().is_empty());
    }

    #[test]
    fn test_value_set_description_overrides_values() {
        let mut definition = parse(DEFINITION);
        definition
            .value_sets
            .get_mut("level")
            .unwrap()
            .description = vec!["a compression level".into()];
        definition.attach_value_sets().unwrap();
        assert_eq!(
            definition.specifications[0].value_set_text(),
            ["a compression level"]
        );
    }

    #[test]
    fn test_unmatched_value_set_is_rejected() {
        let mut definition = parse("program: x\nvalue_sets:\n  ghost:\n    values: [a]\n");
        let err = definition.attach_value_sets().unwrap_err();
        assert!(err.contains("ghost"));
    }

    #[test]
    fn test_empty_value_set_attaches_without_text() {
        let mut definition = parse(DEFINITION);
        definition.value_sets.get_mut("level").unwrap().values.clear();
        definition.attach_value_sets().unwrap();
        assert!(definition.specifications[0].value_set_text().is_empty());
    }

    #[test]
    fn test_help_defaults_from_metadata() {
        let defaults = parse(DEFINITION).help_defaults();
        assert_eq!(defaults.app_alias, "backup");
        assert_eq!(defaults.heading, "backup 3.1.0");
        assert_eq!(defaults.copyright, "Copyright (C) 2024 Example Corp");

        let anonymous = parse("program: x\n").help_defaults();
        assert_eq!(anonymous.heading, "x");
        assert!(anonymous.copyright.is_empty());
    }

    #[test]
    fn test_validate_reports_duplicate_verbs() {
        let mut definition = parse(DEFINITION);
        definition.verbs.push(definition.verbs[0].clone());
        let errors = definition.validate(true);
        assert_eq!(
            errors,
            [ValidationError::DuplicateVerb("restore".into())]
        );
    }

    #[test]
    fn test_verb_models_carry_specifications() {
        let definition = parse(DEFINITION);
        let models = definition.verb_models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].verb.name, "restore");
        assert_eq!(models[0].command.specifications.len(), 1);
        assert!(definition.has_verb("restore"));
        assert!(!definition.has_verb("create"));
    }
}
