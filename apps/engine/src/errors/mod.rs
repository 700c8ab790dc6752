//! Error handling for the rules engine.

pub mod domain;

pub use domain::{DomainError, IllegalActionKind};
