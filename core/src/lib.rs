//! Core types for rendering command-line help.
//!
//! This crate defines the data the help renderer consumes:
//!
//! - [`Specification`]: one option ([`OptionSpec`]) or positional value
//!   ([`ValueSpec`]) with its help text, default and value-set description.
//! - [`Verb`]: a named sub-command, and [`VerbModel`] pairing it with its
//!   own [`CommandModel`].
//! - [`Example`]: a usage example built from a [`Sample`] and
//!   [`FormatStyle`]s.
//! - [`ParseError`] / [`ParseOutcome`]: what the argument binder reports.
//!
//! Valid-value constraints are resolved with [`resolve`] (or a
//! [`ValueSetRegistry`] for named providers) into a [`ValueSet`], whose
//! description can be attached to a specification.
//!
//! Validation ([`validate_specifications`], [`validate_verbs`]) catches
//! structural errors such as duplicate names and positional indexes.
//!
//! # Example
//!
//! ```
//! use command_help_core::*;
//!
//! let formats = resolve(ValueSetSource::finite(vec!["json", "yaml"])).unwrap();
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::new("f", "format")
//!         .with_meta_value("FMT")
//!         .with_default("json")
//!         .with_value_set(&formats)
//!         .into(),
//!     ValueSpec::new(0).with_meta_name("INPUT").required().into(),
//! ];
//!
//! assert!(validate_specifications(&specs, true).is_empty());
//! assert_eq!(specs[0].value_set_text(), ["json", "yaml"]);
//! ```

mod outcome;
mod parse_error;
mod types;
mod validate;
mod value_set;

pub use outcome::{CommandModel, ParseOutcome, ParseStatus, VerbModel};
pub use parse_error::{ErrorKind, NameInfo, ParseError, meaningful_errors};
pub use types::*;
pub use validate::{
    RESERVED_OPTION_NAMES, ValidationError, validate_specifications, validate_verbs,
};
pub use value_set::{
    Predicate, ValueSet, ValueSetError, ValueSetProvider, ValueSetRegistry, ValueSetSource,
    resolve,
};
