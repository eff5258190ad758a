//! Template records for application input files.

use crate::context::{ContextMap, ContextProvider};
use crate::entity::{insert_opt, ExportMode, NamedEntity};
use crate::errors::{RenderError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::engine;

/// A template for one application input file.
///
/// Holds the raw `content`, an ordered list of context providers, and the
/// output of the last successful render. A template is in the *unrendered*
/// state until [`Self::render`] or [`Self::set_rendered`] populates
/// `rendered`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Input file name, e.g. `pw_scf.in`.
    pub name: String,

    /// The authoritative, unrendered source text with `{{ ... }}` markers.
    pub content: String,

    /// Output of the last successful render; `None` until first render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,

    /// Descriptive link to the owning application; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Descriptive link to the application version; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_version: Option<String>,

    /// Descriptive link to the consuming executable; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_name: Option<String>,

    /// Context providers contributing to the rendering namespace, in
    /// insertion order. Duplicate names are permitted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_providers: Vec<ContextProvider>,

    /// When true, the rendered text has been hand-edited downstream and
    /// [`Self::render`] must not overwrite it.
    #[serde(default)]
    pub is_manually_changed: bool,

    /// Schema version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Unrecognized fields, retained so they round-trip through export.
    #[serde(flatten)]
    pub extra: ContextMap,
}

impl Template {
    /// Creates a template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            rendered: None,
            application_name: None,
            application_version: None,
            executable_name: None,
            context_providers: Vec::new(),
            is_manually_changed: false,
            schema_version: None,
            extra: ContextMap::new(),
        }
    }

    /// Constructs a template from a JSON mapping, validating required fields.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let template: Self = serde_json::from_value(value)
            .map_err(|err| ValidationError::new("template", err.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Checks the record's required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("name"));
        }
        if self.content.is_empty() {
            return Err(ValidationError::missing("content"));
        }
        Ok(())
    }

    /// Sets the application name link.
    #[must_use]
    pub fn with_application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    /// Sets the application version link.
    #[must_use]
    pub fn with_application_version(mut self, application_version: impl Into<String>) -> Self {
        self.application_version = Some(application_version.into());
        self
    }

    /// Sets the executable name link.
    #[must_use]
    pub fn with_executable_name(mut self, executable_name: impl Into<String>) -> Self {
        self.executable_name = Some(executable_name.into());
        self
    }

    /// Appends a context provider.
    #[must_use]
    pub fn with_context_provider(mut self, provider: ContextProvider) -> Self {
        self.context_providers.push(provider);
        self
    }

    /// Marks the template as manually changed.
    #[must_use]
    pub fn with_manually_changed(mut self, changed: bool) -> Self {
        self.is_manually_changed = changed;
        self
    }

    /// Sets the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = Some(schema_version.into());
        self
    }

    /// Replaces the raw content. Does not clear `rendered`.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Replaces the rendered text directly, bypassing the render pipeline.
    pub fn set_rendered(&mut self, rendered: impl Into<String>) {
        self.rendered = Some(rendered.into());
    }

    /// Appends a context provider. Order is preserved and duplicates are
    /// not checked.
    pub fn add_context_provider(&mut self, provider: ContextProvider) {
        self.context_providers.push(provider);
    }

    /// Removes the first provider structurally equal to `provider`.
    /// A no-op when no such provider is present.
    pub fn remove_context_provider(&mut self, provider: &ContextProvider) {
        if let Some(index) = self.context_providers.iter().position(|p| p == provider) {
            self.context_providers.remove(index);
        }
    }

    /// Assembles the rendering namespace from the external context and the
    /// providers' contributions.
    ///
    /// External keys enter first, so plain `{name: value}` substitutions
    /// work without a provider; each provider's [`ContextProvider::yield_data`]
    /// is then merged in order, later entries overwriting earlier keys.
    #[must_use]
    pub fn rendering_context(&self, external: Option<&ContextMap>) -> ContextMap {
        let mut namespace = external.cloned().unwrap_or_default();
        for provider in &self.context_providers {
            namespace.extend(provider.yield_data(external));
        }
        namespace
    }

    /// Collects the contributions of providers whose effective edited marker
    /// is truthy, for persisting user overrides across reconstruction.
    #[must_use]
    pub fn persistent_context(&self, external: Option<&ContextMap>) -> ContextMap {
        let mut out = ContextMap::new();
        for provider in &self.context_providers {
            if provider.resolve_effective(external).edited() {
                out.extend(provider.yield_data(external));
            }
        }
        out
    }

    /// Renders `content` into `rendered` using the assembled namespace.
    ///
    /// A manually changed template is a guarded no-op. On failure `rendered`
    /// is left untouched; it is only replaced when the entire substitution
    /// succeeds.
    pub fn render(&mut self, external: Option<&ContextMap>) -> Result<(), RenderError> {
        if self.is_manually_changed {
            debug!(template = %self.name, "skipping render of manually changed template");
            return Ok(());
        }
        let namespace = self.rendering_context(external);
        let rendered = engine::substitute(&self.name, &self.content, &namespace)?;
        debug!(template = %self.name, variables = namespace.len(), "rendered template");
        self.rendered = Some(rendered);
        Ok(())
    }

    /// The rendered text if set, else the raw content. Never fails.
    #[must_use]
    pub fn get_rendered(&self) -> &str {
        self.rendered.as_deref().unwrap_or(&self.content)
    }

    /// Renders (honoring the manually-changed guard) and exports the full
    /// record as a JSON object.
    pub fn get_rendered_json(&mut self, external: Option<&ContextMap>) -> Result<Value, RenderError> {
        self.render(external)?;
        Ok(Value::Object(self.to_map(ExportMode::ExcludeUnset)))
    }

    /// Exports the template to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("content".to_string(), Value::String(self.content.clone()));
        insert_opt(
            &mut map,
            "rendered",
            self.rendered.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "application_name",
            self.application_name.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "application_version",
            self.application_version.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "executable_name",
            self.executable_name.clone().map(Value::String),
            mode,
        );
        if !self.context_providers.is_empty() || mode == ExportMode::IncludeAll {
            map.insert(
                "context_providers".to_string(),
                Value::Array(
                    self.context_providers
                        .iter()
                        .map(|provider| Value::Object(provider.to_map(mode)))
                        .collect(),
                ),
            );
        }
        map.insert(
            "is_manually_changed".to_string(),
            Value::Bool(self.is_manually_changed),
        );
        insert_opt(
            &mut map,
            "schema_version",
            self.schema_version.clone().map(Value::String),
            mode,
        );
        map.extend(self.extra.clone());
        map
    }
}

impl NamedEntity for Template {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }
}
