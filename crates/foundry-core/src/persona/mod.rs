//! Persona configuration for the extraction agent.

pub mod model;
mod template;

pub use model::Persona;
