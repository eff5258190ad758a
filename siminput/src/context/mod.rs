//! Context providers feeding the template rendering namespace.
//!
//! This module provides:
//! - The [`ContextProvider`] record with three-level context precedence
//! - The [`ProviderKind`] enumeration of well-known provider names
//! - The [`ContextMap`] alias used for JSON object data across the crate

mod kind;
mod provider;

pub use kind::ProviderKind;
pub use provider::{
    is_truthy, ContextMap, ContextProvider, EffectiveContext, DEFAULT_DOMAIN, ENTITY_SUBWORKFLOW,
    ENTITY_UNIT,
};
