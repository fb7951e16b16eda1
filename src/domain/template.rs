//! Message templates with `%{key}` placeholders.

use crate::domain::context::Params;
use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;

/// Reserved placeholder key bound to the event's entity.
pub const ENTITY_KEY: &str = "entity";

/// Error produced while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The pattern references a key with no value in the merged mapping
    #[error("template '{template}' references %{{{key}}} but no value was supplied")]
    MissingPlaceholderValue {
        /// Name of the template being rendered
        template: String,
        /// The placeholder key without a value
        key: String,
    },
}

/// A named message pattern.
///
/// Placeholders are written `%{key}`. A literal percent sign may be written
/// `%%`; any other `%` is copied through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    pattern: String,
}

impl Template {
    /// Create a template.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render the message for an optional entity and parameter set.
    ///
    /// Parameters are merged first, then the entity under `entity`, so an
    /// explicit entity wins over a parameter of the same name. When nothing
    /// is supplied the pattern is returned unchanged without allocating.
    ///
    /// # Errors
    /// Returns [`RenderError::MissingPlaceholderValue`] if the pattern uses a
    /// key that is not in the merged mapping.
    ///
    /// # Example
    /// ```
    /// use log_manager::{Params, Template};
    ///
    /// let template = Template::new("scheduled", "Schedule for %{entity} at %{time}");
    /// let params = Params::new().with("time", 1000);
    ///
    /// let message = template.render(Some("S1"), Some(&params)).unwrap();
    /// assert_eq!(message, "Schedule for S1 at 1000");
    /// ```
    pub fn render<'a>(
        &'a self,
        entity: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Cow<'a, str>, RenderError> {
        let mut values: BTreeMap<&str, &str> = BTreeMap::new();
        if let Some(params) = params {
            values.extend(params.iter());
        }
        if let Some(entity) = entity {
            values.insert(ENTITY_KEY, entity);
        }

        if values.is_empty() {
            return Ok(Cow::Borrowed(&self.pattern));
        }

        self.substitute(&values).map(Cow::Owned)
    }

    fn substitute(&self, values: &BTreeMap<&str, &str>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];

            if let Some(after) = tail.strip_prefix('%') {
                out.push('%');
                rest = after;
                continue;
            }

            if let Some(body) = tail.strip_prefix('{') {
                if let Some(end) = body.find('}') {
                    let key = &body[..end];
                    let value = values.get(key).ok_or_else(|| {
                        RenderError::MissingPlaceholderValue {
                            template: self.name.clone(),
                            key: key.to_string(),
                        }
                    })?;
                    out.push_str(value);
                    rest = &body[end + 1..];
                    continue;
                }
            }

            // Unterminated or not a placeholder
            out.push('%');
            rest = tail;
        }

        out.push_str(rest);
        Ok(out)
    }
}
