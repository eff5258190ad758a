//! Executable records.

use crate::context::ContextMap;
use crate::entity::{insert_opt, insert_seq, ExportMode, NamedEntity};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An executable of an application, e.g. `pw.x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Executable {
    /// Executable name, e.g. `pw.x`.
    pub name: String,

    /// Identifiers of the applications this executable belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_id: Vec<String>,

    /// Whether advanced compute options are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_advanced_compute_options: Option<bool>,

    /// Marks the default executable of an application.
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

impl Executable {
    /// Creates an executable with the given name and default fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            application_id: Vec::new(),
            has_advanced_compute_options: None,
            is_default: None,
            schema_version: None,
            pre_processors: Vec::new(),
            post_processors: Vec::new(),
            monitors: Vec::new(),
            results: Vec::new(),
            extra: ContextMap::new(),
        }
    }

    /// Constructs an executable from a JSON mapping, validating required
    /// fields.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let executable: Self = serde_json::from_value(value)
            .map_err(|err| ValidationError::new("executable", err.to_string()))?;
        executable.validate()?;
        Ok(executable)
    }

    /// Checks the record's required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("name"));
        }
        Ok(())
    }

    /// Adds an owning application identifier.
    #[must_use]
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application_id.push(application.into());
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

    /// Sets the pre-processors.
    #[must_use]
    pub fn with_pre_processors(mut self, pre_processors: Vec<Value>) -> Self {
        self.pre_processors = pre_processors;
        self
    }

    /// Sets the post-processors.
    #[must_use]
    pub fn with_post_processors(mut self, post_processors: Vec<Value>) -> Self {
        self.post_processors = post_processors;
        self
    }

    /// Whether the executable belongs to the named application.
    #[must_use]
    pub fn belongs_to(&self, application: &str) -> bool {
        self.application_id.iter().any(|id| id == application)
    }

    /// Exports the executable to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        insert_seq(
            &mut map,
            "application_id",
            self.application_id
                .iter()
                .map(|id| Value::String(id.clone()))
                .collect(),
            mode,
        );
        insert_opt(
            &mut map,
            "has_advanced_compute_options",
            self.has_advanced_compute_options.map(Value::Bool),
            mode,
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

impl NamedEntity for Executable {
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
