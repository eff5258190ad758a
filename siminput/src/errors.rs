//! Error types for the siminput data models.
//!
//! Construction failures, rendering failures, and registry lookup failures
//! each have their own type; [`SiminputError`] is the umbrella for callers
//! that work across the whole crate.

use thiserror::Error;

/// The main error type for siminput operations.
#[derive(Debug, Error)]
pub enum SiminputError {
    /// A record failed construction-time validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A template failed to render.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// A registry lookup failed.
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error raised when a required field is missing, empty, or has a wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field '{field}': {message}")]
pub struct ValidationError {
    /// The offending field.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error for a missing or empty required field.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "required and must be non-empty")
    }
}

/// Errors raised while rendering a template.
///
/// Every variant names the template it originated from; `rendered` is never
/// mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A variable referenced by the template has no value in the namespace.
    #[error("Template '{template}': unresolved variable '{variable}'")]
    UnresolvedVariable {
        /// The template name.
        template: String,
        /// The variable path that did not resolve.
        variable: String,
    },

    /// The template text is not valid substitution syntax.
    #[error("Template '{template}': syntax error: {detail}")]
    Syntax {
        /// The template name.
        template: String,
        /// The engine's syntax diagnostic.
        detail: String,
    },

    /// The substitution engine failed for another reason.
    #[error("Template '{template}': render failed: {detail}")]
    Engine {
        /// The template name.
        template: String,
        /// The engine's diagnostic.
        detail: String,
    },
}

impl RenderError {
    /// Creates an unresolved-variable error.
    #[must_use]
    pub fn unresolved(template: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::UnresolvedVariable {
            template: template.into(),
            variable: variable.into(),
        }
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(template: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Syntax {
            template: template.into(),
            detail: detail.into(),
        }
    }

    /// Creates an engine error.
    #[must_use]
    pub fn engine(template: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Engine {
            template: template.into(),
            detail: detail.into(),
        }
    }

    /// Returns the name of the template the error originated from.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::UnresolvedVariable { template, .. }
            | Self::Syntax { template, .. }
            | Self::Engine { template, .. } => template,
        }
    }
}

/// Errors raised by [`crate::software::ApplicationRegistry`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No application with the requested name is registered.
    #[error("Application not found: {name}")]
    ApplicationNotFound {
        /// The requested application name.
        name: String,
    },

    /// The application exists but not at the requested version.
    #[error("Version '{version}' not available for application '{name}'")]
    VersionNotAvailable {
        /// The requested application name.
        name: String,
        /// The requested version.
        version: String,
    },

    /// No matching executable is registered for the application.
    #[error("Executable not found: {name} (application '{application}')")]
    ExecutableNotFound {
        /// The requested executable name, or the empty string when the
        /// default executable was requested.
        name: String,
        /// The owning application name.
        application: String,
    },

    /// No template with the requested name is registered.
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// The requested template name.
        name: String,
    },
}

impl RegistryError {
    /// Creates an application-not-found error.
    #[must_use]
    pub fn application_not_found(name: impl Into<String>) -> Self {
        Self::ApplicationNotFound { name: name.into() }
    }

    /// Creates a version-not-available error.
    #[must_use]
    pub fn version_not_available(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::VersionNotAvailable {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Creates an executable-not-found error.
    #[must_use]
    pub fn executable_not_found(name: impl Into<String>, application: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            name: name.into(),
            application: application.into(),
        }
    }

    /// Creates a template-not-found error.
    #[must_use]
    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }
}
