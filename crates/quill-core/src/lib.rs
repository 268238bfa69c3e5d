//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ownership;
pub mod ports;

pub use error::DomainError;
pub use ownership::{Authored, allow_mutate, ensure_author};
