//! Records describing simulation software and its runnable units.
//!
//! This module provides:
//! - The [`Application`], [`Executable`] and [`Flavor`] records
//! - The [`ApplicationRegistry`] resolving the soft name references
//!   between records and templates

mod application;
mod executable;
mod flavor;
mod registry;
#[cfg(test)]
mod software_tests;

pub use application::{Application, MATERIAL_USING_APPLICATIONS};
pub use executable::Executable;
pub use flavor::{Flavor, FlavorInput};
pub use registry::ApplicationRegistry;
