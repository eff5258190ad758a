//! Flavor records: named calculation setups of an executable.

use crate::context::ContextMap;
use crate::entity::{insert_opt, insert_seq, ExportMode, NamedEntity};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One input file requested by a flavor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlavorInput {
    /// Identifier of the template to render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// Name of the template to render; falls back to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,

    /// Name of the resulting input file, when different from the template
    /// name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FlavorInput {
    /// Creates an input referencing a template by name.
    #[must_use]
    pub fn from_template_name(template_name: impl Into<String>) -> Self {
        Self {
            template_id: None,
            template_name: Some(template_name.into()),
            name: None,
        }
    }

    /// Sets the output file name override.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name to look the template up under: `template_name` when set and
    /// non-empty, else `name`.
    #[must_use]
    pub fn template_lookup_name(&self) -> Option<&str> {
        self.template_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }

    /// Exports the input reference to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        insert_opt(
            &mut map,
            "template_id",
            self.template_id.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "template_name",
            self.template_name.clone().map(Value::String),
            mode,
        );
        insert_opt(&mut map, "name", self.name.clone().map(Value::String), mode);
        map
    }
}

/// A flavor of an executable: one named way of running it, with the input
/// files it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    /// Flavor name, e.g. `scf`.
    pub name: String,

    /// Identifier of the owning executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_id: Option<String>,

    /// Name of the owning executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_name: Option<String>,

    /// Name of the owning application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Input templates for this flavor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input: Vec<FlavorInput>,

    /// Application versions this flavor supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_application_versions: Option<Vec<String>>,

    /// Whether material rendering is disabled for this flavor.
    #[serde(default)]
    pub disable_render_materials: bool,

    /// Marks the default flavor of an executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    /// Schema version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Pre-processors for this calculation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_processors: Vec<Value>,

    /// Post-processors for this calculation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_processors: Vec<Value>,

    /// Monitors for this calculation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<Value>,

    /// Results produced by this calculation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Value>,

    /// Unrecognized fields, retained so they round-trip through export.
    #[serde(flatten)]
    pub extra: ContextMap,
}

impl Flavor {
    /// Creates a flavor with the given name and default fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executable_id: None,
            executable_name: None,
            application_name: None,
            input: Vec::new(),
            supported_application_versions: None,
            disable_render_materials: false,
            is_default: None,
            schema_version: None,
            pre_processors: Vec::new(),
            post_processors: Vec::new(),
            monitors: Vec::new(),
            results: Vec::new(),
            extra: ContextMap::new(),
        }
    }

    /// Constructs a flavor from a JSON mapping, validating required fields.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let flavor: Self = serde_json::from_value(value)
            .map_err(|err| ValidationError::new("flavor", err.to_string()))?;
        flavor.validate()?;
        Ok(flavor)
    }

    /// Checks the record's required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("name"));
        }
        Ok(())
    }

    /// Sets the owning executable name.
    #[must_use]
    pub fn with_executable_name(mut self, executable_name: impl Into<String>) -> Self {
        self.executable_name = Some(executable_name.into());
        self
    }

    /// Sets the owning application name.
    #[must_use]
    pub fn with_application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    /// Appends an input template reference.
    #[must_use]
    pub fn with_input(mut self, input: FlavorInput) -> Self {
        self.input.push(input);
        self
    }

    /// Sets the supported application versions.
    #[must_use]
    pub fn with_supported_application_versions(mut self, versions: Vec<String>) -> Self {
        self.supported_application_versions = Some(versions);
        self
    }

    /// Marks the record as the default among its siblings.
    #[must_use]
    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    /// Sets the monitors.
    #[must_use]
    pub fn with_monitors(mut self, monitors: Vec<Value>) -> Self {
        self.monitors = monitors;
        self
    }

    /// Sets the results.
    #[must_use]
    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        self.results = results;
        self
    }

    /// Whether the flavor supports the given application version. A flavor
    /// without an explicit list supports every version.
    #[must_use]
    pub fn supports_application_version(&self, version: &str) -> bool {
        self.supported_application_versions
            .as_ref()
            .map_or(true, |versions| versions.iter().any(|v| v == version))
    }

    /// Exports the flavor to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        insert_opt(
            &mut map,
            "executable_id",
            self.executable_id.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "executable_name",
            self.executable_name.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "application_name",
            self.application_name.clone().map(Value::String),
            mode,
        );
        if !self.input.is_empty() || mode == ExportMode::IncludeAll {
            map.insert(
                "input".to_string(),
                Value::Array(
                    self.input
                        .iter()
                        .map(|input| Value::Object(input.to_map(mode)))
                        .collect(),
                ),
            );
        }
        insert_opt(
            &mut map,
            "supported_application_versions",
            self.supported_application_versions.clone().map(|versions| {
                Value::Array(versions.into_iter().map(Value::String).collect())
            }),
            mode,
        );
        map.insert(
            "disable_render_materials".to_string(),
            Value::Bool(self.disable_render_materials),
        );
        insert_opt(
            &mut map,
            "is_default",
            self.is_default.map(Value::Bool),
            mode,
        );
        insert_opt(
            &mut map,
            "schema_version",
            self.schema_version.clone().map(Value::String),
            mode,
        );
        insert_seq(&mut map, "pre_processors", self.pre_processors.clone(), mode);
        insert_seq(
            &mut map,
            "post_processors",
            self.post_processors.clone(),
            mode,
        );
        insert_seq(&mut map, "monitors", self.monitors.clone(), mode);
        insert_seq(&mut map, "results", self.results.clone(), mode);
        map.extend(self.extra.clone());
        map
    }
}

impl NamedEntity for Flavor {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }

    fn is_default(&self) -> bool {
        self.is_default.unwrap_or(false)
    }
}
