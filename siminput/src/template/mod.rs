//! Template records and the rendering pipeline.

mod engine;
mod model;

pub use model::Template;
