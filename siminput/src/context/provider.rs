//! Context providers: named slots of configuration data with edit tracking.

use crate::context::ProviderKind;
use crate::entity::{insert_opt, ExportMode, NamedEntity};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON object mapping used for context data throughout the crate.
pub type ContextMap = serde_json::Map<String, Value>;

/// Default grouping domain for providers.
pub const DEFAULT_DOMAIN: &str = "default";

/// Entity name for unit-level providers.
pub const ENTITY_UNIT: &str = "unit";

/// Entity name for subworkflow-level providers.
pub const ENTITY_SUBWORKFLOW: &str = "subworkflow";

/// Jinja truthiness: `null`, `false`, numeric zero, and empty strings,
/// arrays, and objects are falsy; everything else is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int != 0
            } else if let Some(uint) = number.as_u64() {
                uint != 0
            } else {
                number.as_f64().is_some_and(|float| float != 0.0)
            }
        }
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_entity_name() -> String {
    ENTITY_UNIT.to_string()
}

/// A provider's resolved values after applying context precedence.
///
/// Each component is `None` only when the key was missing at every
/// precedence level; a stored JSON `null` resolves to `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectiveContext {
    /// Resolved data value.
    pub data: Option<Value>,
    /// Resolved edited marker.
    pub is_edited: Option<Value>,
    /// Resolved auxiliary payload.
    pub extra_data: Option<Value>,
}

impl EffectiveContext {
    /// Whether the resolved edited marker is truthy.
    #[must_use]
    pub fn edited(&self) -> bool {
        self.is_edited.as_ref().is_some_and(is_truthy)
    }
}

/// A named, domain-scoped holder of configuration data.
///
/// Providers contribute values to a template's rendering namespace under
/// their name and two derived keys, and can recover previously captured
/// override state through their `context` snapshot. They are value types:
/// each [`crate::template::Template`] owns its own list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextProvider {
    /// Identifying name; also the namespace key for the provider's data.
    ///
    /// Well-known names are enumerated by [`ProviderKind`], but any
    /// non-empty string is structurally legal.
    pub name: String,

    /// Grouping domain for the provider.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// The entity the provider attaches to, `"unit"` or `"subworkflow"`.
    #[serde(default = "default_entity_name")]
    pub entity_name: String,

    /// Default or stored data value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContextMap>,

    /// Auxiliary payload surfaced under [`Self::extra_data_key`], for
    /// example to track a material change between provider instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<ContextMap>,

    /// Whether a user has overridden `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_edited: Option<bool>,

    /// Previously captured external-context snapshot, keyed by this
    /// provider's name and derived keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMap>,

    /// Whether the provider's data may itself contain jinja variables.
    #[serde(default)]
    pub is_using_jinja_variables: bool,

    /// JSON schema describing the provider's data, when form-backed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<ContextMap>,

    /// UI schema paired with `json_schema` for form generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_schema: Option<ContextMap>,

    /// Custom field descriptors for form rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ContextMap>,

    /// Default presentation styles for `fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field_styles: Option<ContextMap>,

    /// Schema version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Unrecognized fields, retained so they round-trip through export.
    #[serde(flatten)]
    pub extra: ContextMap,
}

impl ContextProvider {
    /// Creates a provider with the given name and default fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: default_domain(),
            entity_name: default_entity_name(),
            data: None,
            extra_data: None,
            is_edited: None,
            context: None,
            is_using_jinja_variables: false,
            json_schema: None,
            ui_schema: None,
            fields: None,
            default_field_styles: None,
            schema_version: None,
            extra: ContextMap::new(),
        }
    }

    /// Creates a provider named after a well-known kind.
    #[must_use]
    pub fn of_kind(kind: ProviderKind) -> Self {
        Self::new(kind.as_str())
    }

    /// Constructs a provider from a JSON mapping, validating required fields.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let provider: Self = serde_json::from_value(value)
            .map_err(|err| ValidationError::new("context_provider", err.to_string()))?;
        provider.validate()?;
        Ok(provider)
    }

    /// Checks the record's required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("name"));
        }
        Ok(())
    }

    /// Sets the domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the entity name.
    #[must_use]
    pub fn with_entity_name(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = entity_name.into();
        self
    }

    /// Sets the data value.
    #[must_use]
    pub fn with_data(mut self, data: ContextMap) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the auxiliary payload.
    #[must_use]
    pub fn with_extra_data(mut self, extra_data: ContextMap) -> Self {
        self.extra_data = Some(extra_data);
        self
    }

    /// Sets the edited marker.
    #[must_use]
    pub fn with_is_edited(mut self, is_edited: bool) -> Self {
        self.is_edited = Some(is_edited);
        self
    }

    /// Sets the captured context snapshot.
    #[must_use]
    pub fn with_context(mut self, context: ContextMap) -> Self {
        self.context = Some(context);
        self
    }

    /// Marks the provider's data as containing jinja variables.
    #[must_use]
    pub fn with_jinja_variables(mut self, enabled: bool) -> Self {
        self.is_using_jinja_variables = enabled;
        self
    }

    /// Sets the JSON schema.
    #[must_use]
    pub fn with_json_schema(mut self, json_schema: ContextMap) -> Self {
        self.json_schema = Some(json_schema);
        self
    }

    /// Sets the UI schema.
    #[must_use]
    pub fn with_ui_schema(mut self, ui_schema: ContextMap) -> Self {
        self.ui_schema = Some(ui_schema);
        self
    }

    /// Sets the custom field descriptors.
    #[must_use]
    pub fn with_fields(mut self, fields: ContextMap) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets the default field styles.
    #[must_use]
    pub fn with_default_field_styles(mut self, styles: ContextMap) -> Self {
        self.default_field_styles = Some(styles);
        self
    }

    /// Sets the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = Some(schema_version.into());
        self
    }

    /// The namespace key carrying the provider's auxiliary payload.
    ///
    /// The raw name is concatenated verbatim, without case transformation.
    #[must_use]
    pub fn extra_data_key(&self) -> String {
        format!("{}ExtraData", self.name)
    }

    /// The namespace key carrying the provider's edited marker.
    ///
    /// The raw name is concatenated verbatim, without case transformation.
    #[must_use]
    pub fn is_edited_key(&self) -> String {
        format!("is{}Edited", self.name)
    }

    /// Whether the provider attaches to a unit.
    #[must_use]
    pub fn is_unit_provider(&self) -> bool {
        self.entity_name == ENTITY_UNIT
    }

    /// Whether the provider attaches to a subworkflow.
    #[must_use]
    pub fn is_subworkflow_provider(&self) -> bool {
        self.entity_name == ENTITY_SUBWORKFLOW
    }

    /// Resolves the provider's effective values against an optional external
    /// context.
    ///
    /// Precedence per component, highest first: the `external` argument, the
    /// stored `context` snapshot, then the provider's own fields. Lookups use
    /// the provider name and the two derived keys. A key missing at a higher
    /// source falls through; a key present with JSON `null` counts as present
    /// and short-circuits.
    #[must_use]
    pub fn resolve_effective(&self, external: Option<&ContextMap>) -> EffectiveContext {
        EffectiveContext {
            data: self.resolve_component(external, &self.name, || {
                self.data.clone().map(Value::Object)
            }),
            is_edited: self.resolve_component(external, &self.is_edited_key(), || {
                self.is_edited.map(Value::Bool)
            }),
            extra_data: self.resolve_component(external, &self.extra_data_key(), || {
                self.extra_data.clone().map(Value::Object)
            }),
        }
    }

    fn resolve_component(
        &self,
        external: Option<&ContextMap>,
        key: &str,
        fallback: impl FnOnce() -> Option<Value>,
    ) -> Option<Value> {
        if let Some(found) = external.and_then(|map| map.get(key)) {
            return Some(found.clone());
        }
        if let Some(found) = self.context.as_ref().and_then(|map| map.get(key)) {
            return Some(found.clone());
        }
        fallback()
    }

    /// The provider's contribution to a rendering namespace.
    ///
    /// Always contains the provider name and [`Self::is_edited_key`]
    /// (missing effective values map to `null`); [`Self::extra_data_key`]
    /// is included only when the effective extra data is truthy.
    #[must_use]
    pub fn yield_data(&self, external: Option<&ContextMap>) -> ContextMap {
        let effective = self.resolve_effective(external);
        let mut out = ContextMap::new();
        out.insert(self.name.clone(), effective.data.unwrap_or(Value::Null));
        out.insert(
            self.is_edited_key(),
            effective.is_edited.unwrap_or(Value::Null),
        );
        if let Some(extra_data) = effective.extra_data {
            if is_truthy(&extra_data) {
                out.insert(self.extra_data_key(), extra_data);
            }
        }
        out
    }

    /// Exports the provider to a JSON mapping.
    #[must_use]
    pub fn to_map(&self, mode: ExportMode) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("domain".to_string(), Value::String(self.domain.clone()));
        map.insert(
            "entity_name".to_string(),
            Value::String(self.entity_name.clone()),
        );
        insert_opt(&mut map, "data", self.data.clone().map(Value::Object), mode);
        insert_opt(
            &mut map,
            "extra_data",
            self.extra_data.clone().map(Value::Object),
            mode,
        );
        insert_opt(&mut map, "is_edited", self.is_edited.map(Value::Bool), mode);
        insert_opt(
            &mut map,
            "context",
            self.context.clone().map(Value::Object),
            mode,
        );
        map.insert(
            "is_using_jinja_variables".to_string(),
            Value::Bool(self.is_using_jinja_variables),
        );
        insert_opt(
            &mut map,
            "json_schema",
            self.json_schema.clone().map(Value::Object),
            mode,
        );
        insert_opt(
            &mut map,
            "ui_schema",
            self.ui_schema.clone().map(Value::Object),
            mode,
        );
        insert_opt(
            &mut map,
            "fields",
            self.fields.clone().map(Value::Object),
            mode,
        );
        insert_opt(
            &mut map,
            "default_field_styles",
            self.default_field_styles.clone().map(Value::Object),
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

impl NamedEntity for ContextProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }
}
