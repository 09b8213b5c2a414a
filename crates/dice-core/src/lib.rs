//! Core types, errors, and validation rules for the dice maker.
//!
//! This crate provides the foundational types shared by the other crates:
//! - Die types and their metadata
//! - Export and engraving configuration
//! - Error types
//! - Validation of user supplied text and uploads

pub mod errors;
pub mod types;
pub mod validation;

pub use errors::*;
pub use types::*;
pub use validation::{ValidationIssue, ValidationResult};
