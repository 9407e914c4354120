//! Valid-value resolution.
//!
//! A [`ValueSetSource`] declares where an option's acceptable values come
//! from: an explicit list, a custom predicate, a provider object exposing
//! one or more capabilities, or a provider registered by name. Resolving it
//! yields a [`ValueSet`]: a membership predicate plus a best-effort textual
//! description for help output.
//!
//! Precedence rules:
//!
//! - Predicate: a custom-validity capability wins over enumeration.
//! - Description: explicit text, then the provider's own description, then
//!   the stringified enumerated values, then nothing.
//!
//! # Examples
//!
//! ```
//! use command_help_core::{ValueSetSource, resolve};
//!
//! let colors = resolve(ValueSetSource::finite(vec!["Red", "Green", "Blue"])).unwrap();
//! assert!(colors.accepts(&"Green"));
//! assert!(!colors.accepts(&"Purple"));
//! assert_eq!(colors.description(), ["Red", "Green", "Blue"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Shared validity predicate.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

type ProviderFactory<T> = Box<dyn Fn() -> Option<Arc<dyn ValueSetProvider<T>>> + Send + Sync>;

/// Errors raised while resolving a value-set source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueSetError {
    /// The source neither enumerates values nor supplies a validity check.
    ///
    /// An explicit but empty enumeration is valid and accepts nothing.
    #[error("value set source '{0}' neither enumerates values nor supplies a validity check")]
    InvalidValueSetSource(String),
    /// The source type could not be instantiated.
    #[error("value set source '{0}' cannot be constructed")]
    ValueSetSourceNotConstructible(String),
}

/// Capabilities a value-set provider type may expose.
///
/// Every method is optional; a provider must implement at least one of
/// [`values`](Self::values) or [`validity`](Self::validity) to be usable.
pub trait ValueSetProvider<T>: Send + Sync {
    /// Closed set of acceptable values.
    fn values(&self) -> Option<Vec<T>> {
        None
    }

    /// Open-set validity check.
    fn validity(&self) -> Option<Predicate<T>> {
        None
    }

    /// Human-readable description the type supplies about itself.
    fn describe(&self) -> Option<Vec<String>> {
        None
    }
}

/// Declared origin of a value set.
pub enum ValueSetSource<T> {
    /// Explicit finite list with optional explicit description.
    Finite {
        values: Vec<T>,
        description: Option<Vec<String>>,
    },
    /// Open set; the description cannot be derived so it is supplied here.
    Custom {
        predicate: Predicate<T>,
        description: Vec<String>,
    },
    /// Provider object, with optional explicit description.
    Provider {
        provider: Arc<dyn ValueSetProvider<T>>,
        description: Option<Vec<String>>,
    },
    /// Provider registered by name in a [`ValueSetRegistry`].
    Named {
        type_name: String,
        description: Option<Vec<String>>,
    },
}

impl<T> ValueSetSource<T> {
    pub fn finite(values: impl IntoIterator<Item = T>) -> Self {
        Self::Finite {
            values: values.into_iter().collect(),
            description: None,
        }
    }

    pub fn custom(
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        description: Vec<String>,
    ) -> Self {
        Self::Custom {
            predicate: Arc::new(predicate),
            description,
        }
    }

    pub fn provider(provider: impl ValueSetProvider<T> + 'static) -> Self {
        Self::Provider {
            provider: Arc::new(provider),
            description: None,
        }
    }

    pub fn named(type_name: &str) -> Self {
        Self::Named {
            type_name: type_name.to_string(),
            description: None,
        }
    }

    /// Overrides the description with caller-supplied text.
    pub fn with_description(self, text: Vec<String>) -> Self {
        match self {
            Self::Finite { values, .. } => Self::Finite {
                values,
                description: Some(text),
            },
            Self::Custom { predicate, .. } => Self::Custom {
                predicate,
                description: text,
            },
            Self::Provider { provider, .. } => Self::Provider {
                provider,
                description: Some(text),
            },
            Self::Named { type_name, .. } => Self::Named {
                type_name,
                description: Some(text),
            },
        }
    }
}

/// Resolved predicate and description pair.
#[derive(Clone)]
pub struct ValueSet<T> {
    predicate: Predicate<T>,
    description: Vec<String>,
}

impl<T> ValueSet<T> {
    /// Returns `true` when `value` belongs to the set.
    pub fn accepts(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    pub fn description(&self) -> &[String] {
        &self.description
    }

    pub fn predicate(&self) -> Predicate<T> {
        Arc::clone(&self.predicate)
    }
}

impl<T> fmt::Debug for ValueSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSet")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Named provider factories used to resolve [`ValueSetSource::Named`].
///
/// # Examples
///
/// ```
/// use command_help_core::{ValueSetProvider, ValueSetRegistry, ValueSetSource};
///
/// #[derive(Default)]
/// struct Levels;
///
/// impl ValueSetProvider<String> for Levels {
///     fn values(&self) -> Option<Vec<String>> {
///         Some(vec!["low".into(), "high".into()])
///     }
/// }
///
/// let mut registry = ValueSetRegistry::new();
/// registry.register::<Levels>("levels");
/// let set = registry.resolve(ValueSetSource::named("levels")).unwrap();
/// assert!(set.accepts(&"high".to_string()));
/// ```
pub struct ValueSetRegistry<T> {
    factories: HashMap<String, ProviderFactory<T>>,
}

impl<T> Default for ValueSetRegistry<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<T> ValueSetRegistry<T>
where
    T: Eq + Hash + fmt::Display + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider type constructed with no arguments.
    pub fn register<P>(&mut self, type_name: &str)
    where
        P: ValueSetProvider<T> + Default + 'static,
    {
        self.factories.insert(
            type_name.to_string(),
            Box::new(|| Some(Arc::new(P::default()) as Arc<dyn ValueSetProvider<T>>)),
        );
    }

    /// Registers a factory that may fail to produce an instance.
    pub fn register_factory(
        &mut self,
        type_name: &str,
        factory: impl Fn() -> Option<Arc<dyn ValueSetProvider<T>>> + Send + Sync + 'static,
    ) {
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Resolves a source into a predicate and description.
    ///
    /// # Errors
    ///
    /// Returns [`ValueSetError::ValueSetSourceNotConstructible`] when a named
    /// provider is unknown or its factory yields nothing, and
    /// [`ValueSetError::InvalidValueSetSource`] when a provider exposes
    /// neither enumeration nor validity.
    pub fn resolve(&self, source: ValueSetSource<T>) -> Result<ValueSet<T>, ValueSetError> {
        match source {
            ValueSetSource::Finite {
                values,
                description,
            } => resolve_capabilities("finite", Some(values), None, description, None),
            ValueSetSource::Custom {
                predicate,
                description,
            } => resolve_capabilities("custom", None, Some(predicate), Some(description), None),
            ValueSetSource::Provider {
                provider,
                description,
            } => resolve_provider("provider", provider.as_ref(), description),
            ValueSetSource::Named {
                type_name,
                description,
            } => {
                let provider = self
                    .factories
                    .get(&type_name)
                    .and_then(|factory| factory())
                    .ok_or_else(|| {
                        ValueSetError::ValueSetSourceNotConstructible(type_name.clone())
                    })?;
                resolve_provider(&type_name, provider.as_ref(), description)
            }
        }
    }
}

/// Resolves a source that needs no registry.
///
/// A [`ValueSetSource::Named`] source always fails here with
/// [`ValueSetError::ValueSetSourceNotConstructible`].
pub fn resolve<T>(source: ValueSetSource<T>) -> Result<ValueSet<T>, ValueSetError>
where
    T: Eq + Hash + fmt::Display + Send + Sync + 'static,
{
    ValueSetRegistry::new().resolve(source)
}

fn resolve_provider<T>(
    label: &str,
    provider: &dyn ValueSetProvider<T>,
    explicit: Option<Vec<String>>,
) -> Result<ValueSet<T>, ValueSetError>
where
    T: Eq + Hash + fmt::Display + Send + Sync + 'static,
{
    resolve_capabilities(
        label,
        provider.values(),
        provider.validity(),
        explicit,
        provider.describe(),
    )
}

fn resolve_capabilities<T>(
    label: &str,
    values: Option<Vec<T>>,
    validity: Option<Predicate<T>>,
    explicit: Option<Vec<String>>,
    self_described: Option<Vec<String>>,
) -> Result<ValueSet<T>, ValueSetError>
where
    T: Eq + Hash + fmt::Display + Send + Sync + 'static,
{
    let enumerates = values.is_some();
    let mut enumerated: Vec<T> = Vec::new();
    for value in values.unwrap_or_default() {
        if !enumerated.contains(&value) {
            enumerated.push(value);
        }
    }

    let description = explicit
        .filter(|text| !text.is_empty())
        .map(|text| ("explicit", text))
        .or_else(|| {
            self_described
                .filter(|text| !text.is_empty())
                .map(|text| ("self-described", text))
        })
        .unwrap_or_else(|| {
            (
                "enumerated",
                enumerated.iter().map(ToString::to_string).collect(),
            )
        });

    let (predicate_origin, predicate) = match validity {
        Some(predicate) => ("custom", predicate),
        None if enumerates => {
            let members: HashSet<T> = enumerated.into_iter().collect();
            let membership: Predicate<T> = Arc::new(move |value: &T| members.contains(value));
            ("membership", membership)
        }
        None => return Err(ValueSetError::InvalidValueSetSource(label.to_string())),
    };

    debug!(
        source = label,
        predicate = predicate_origin,
        description = description.0,
        "Resolved value set"
    );

    Ok(ValueSet {
        predicate,
        description: description.1,
    })
}
