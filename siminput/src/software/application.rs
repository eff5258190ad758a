//! Application records.

use crate::context::ContextMap;
use crate::entity::{insert_opt, ExportMode, NamedEntity};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Applications that consume a material as part of their input.
pub const MATERIAL_USING_APPLICATIONS: [&str; 3] = ["vasp", "nwchem", "espresso"];

/// A simulation software application, e.g. Quantum ESPRESSO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Application name, e.g. `espresso`.
    pub name: String,

    /// The short name, e.g. `qe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Short description of the application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Application version, e.g. `6.3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Application build, e.g. `VTST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,

    /// Whether advanced compute options are present.
    #[serde(default)]
    pub has_advanced_compute_options: bool,

    /// Whether licensing is required.
    #[serde(default)]
    pub is_licensed: bool,

    /// Marks the default record among same-named siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    /// Schema version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Unrecognized fields, retained so they round-trip through export.
    #[serde(flatten)]
    pub extra: ContextMap,
}

impl Application {
    /// Creates an application with the given name and default fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            summary: None,
            version: None,
            build: None,
            has_advanced_compute_options: false,
            is_licensed: false,
            is_default: None,
            schema_version: None,
            extra: ContextMap::new(),
        }
    }

    /// The built-in default application configuration.
    #[must_use]
    pub fn default_config() -> Self {
        Self::new("espresso")
            .with_short_name("qe")
            .with_summary("Quantum Espresso")
            .with_version("6.3")
            .with_build("Default")
    }

    /// Constructs an application from a JSON mapping, validating required
    /// fields.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let application: Self = serde_json::from_value(value)
            .map_err(|err| ValidationError::new("application", err.to_string()))?;
        application.validate()?;
        Ok(application)
    }

    /// Checks the record's required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("name"));
        }
        Ok(())
    }

    /// Sets the short name.
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the build.
    #[must_use]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Sets the advanced-compute-options flag.
    #[must_use]
    pub fn with_advanced_compute_options(mut self, enabled: bool) -> Self {
        self.has_advanced_compute_options = enabled;
        self
    }

    /// Sets the licensing flag.
    #[must_use]
    pub fn with_licensed(mut self, licensed: bool) -> Self {
        self.is_licensed = licensed;
        self
    }

    /// Marks the record as the default among its siblings.
    #[must_use]
    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    /// Sets the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = Some(schema_version.into());
        self
    }

    /// Whether the application consumes a material. Exact, case-sensitive
    /// membership in the known set.
    #[must_use]
    pub fn is_using_material(&self) -> bool {
        MATERIAL_USING_APPLICATIONS.contains(&self.name.as_str())
    }

    /// The short name if set and non-empty, else the name.
    #[must_use]
    pub fn get_short_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    /// Exports the application to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        insert_opt(
            &mut map,
            "short_name",
            self.short_name.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "summary",
            self.summary.clone().map(Value::String),
            mode,
        );
        insert_opt(
            &mut map,
            "version",
            self.version.clone().map(Value::String),
            mode,
        );
        insert_opt(&mut map, "build", self.build.clone().map(Value::String), mode);
        map.insert(
            "has_advanced_compute_options".to_string(),
            Value::Bool(self.has_advanced_compute_options),
        );
        map.insert("is_licensed".to_string(), Value::Bool(self.is_licensed));
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
        map.extend(self.extra.clone());
        map
    }
}

impl NamedEntity for Application {
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
