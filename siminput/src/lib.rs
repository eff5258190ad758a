//! # Siminput
//!
//! Data models for configuring and rendering input files for scientific
//! simulation software such as Quantum ESPRESSO, VASP, and NWChem.
//!
//! Siminput describes simulation software declaratively and turns that
//! description into concrete input files:
//!
//! - **Software records**: applications, their executables, and the flavors
//!   (named calculation setups) of each executable
//! - **Templates**: input file text with `{{ ... }}` markers, rendered
//!   against a merged context namespace
//! - **Context providers**: named units of context data with a fixed
//!   precedence between stored and externally supplied values
//! - **Registry**: an in-memory store resolving the soft name references
//!   between records
//!
//! ## Quick Start
//!
//! ```rust
//! use siminput::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), siminput::errors::SiminputError> {
//! let mut cutoffs = ContextMap::new();
//! cutoffs.insert("ecutwfc".to_string(), json!(40));
//!
//! let mut template = Template::new("pw_scf.in", "ecutwfc = {{ cutoffs.ecutwfc }}")
//!     .with_context_provider(ContextProvider::new("cutoffs").with_data(cutoffs));
//!
//! template.render(None)?;
//! assert_eq!(template.get_rendered(), "ecutwfc = 40");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod entity;
pub mod errors;
pub mod software;
pub mod template;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{
        is_truthy, ContextMap, ContextProvider, EffectiveContext, ProviderKind, DEFAULT_DOMAIN,
        ENTITY_SUBWORKFLOW, ENTITY_UNIT,
    };
    pub use crate::entity::{ExportMode, NamedEntity};
    pub use crate::errors::{RegistryError, RenderError, SiminputError, ValidationError};
    pub use crate::software::{
        Application, ApplicationRegistry, Executable, Flavor, FlavorInput,
    };
    pub use crate::template::Template;
}
