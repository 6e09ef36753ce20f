//! Utility functions for identifier generation and input validation.
//!
//! - [`code_generator`] - Random short identifier generation
//! - [`url_validator`] - Destination URL validation

pub mod code_generator;
pub mod url_validator;
