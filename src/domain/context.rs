//! Call-time context of a triggered event.
//!
//! An event is triggered in one of four forms: bare, with an entity, with
//! substitution parameters, or with both. [`EventContext`] names those forms
//! explicitly; `From` conversions let call sites pass the natural value.
//!
//! ```
//! use log_manager::{EventContext, Params};
//!
//! let bare: EventContext = ().into();
//! let entity: EventContext = "scheduler_1".into();
//! let params: EventContext = Params::new().with("time", 1000).into();
//! let both: EventContext = ("scheduler_1", Params::new().with("time", 1000)).into();
//!
//! assert_eq!(bare.entity(), None);
//! assert_eq!(entity.entity(), Some("scheduler_1"));
//! assert!(params.entity().is_none());
//! assert_eq!(both.params().and_then(|p| p.get("time")), Some("1000"));
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

/// Substitution values for `%{key}` placeholders.
///
/// Values are formatted when inserted, so any `Display` type can be passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// The four ways an event can be triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventContext {
    /// No entity, no parameters
    #[default]
    None,
    /// Scoped to an entity; the entity is also available as `%{entity}`
    Entity(String),
    /// Parameters only; never suppressed
    Params(Params),
    /// Scoped to an entity, with additional parameters
    EntityWithParams(String, Params),
}

impl EventContext {
    /// The entity this event is scoped to, if any.
    pub fn entity(&self) -> Option<&str> {
        match self {
            EventContext::Entity(entity) | EventContext::EntityWithParams(entity, _) => {
                Some(entity)
            }
            EventContext::None | EventContext::Params(_) => None,
        }
    }

    /// The substitution parameters, if any.
    pub fn params(&self) -> Option<&Params> {
        match self {
            EventContext::Params(params) | EventContext::EntityWithParams(_, params) => {
                Some(params)
            }
            EventContext::None | EventContext::Entity(_) => None,
        }
    }
}

impl From<()> for EventContext {
    fn from(_: ()) -> Self {
        EventContext::None
    }
}

impl From<&str> for EventContext {
    fn from(entity: &str) -> Self {
        EventContext::Entity(entity.to_string())
    }
}

impl From<String> for EventContext {
    fn from(entity: String) -> Self {
        EventContext::Entity(entity)
    }
}

impl From<Params> for EventContext {
    fn from(params: Params) -> Self {
        EventContext::Params(params)
    }
}

impl From<(&str, Params)> for EventContext {
    fn from((entity, params): (&str, Params)) -> Self {
        EventContext::EntityWithParams(entity.to_string(), params)
    }
}

impl From<(String, Params)> for EventContext {
    fn from((entity, params): (String, Params)) -> Self {
        EventContext::EntityWithParams(entity, params)
    }
}
