//! Shared domain types for the site configuration service: entities,
//! identifiers, and the error taxonomy every other crate builds on.

pub mod config;
pub mod draft;
pub mod error;
pub mod ids;
pub mod industry;
pub mod patch;
pub mod project;
pub mod template;
