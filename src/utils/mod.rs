//! Utility functions for shortcode generation, URL checks and request metadata.
//!
//! - [`code_generator`] - Shortcode generation and validation
//! - [`url_validator`] - Destination URL validation
//! - [`client_info`] - Click metadata extraction from HTTP headers

pub mod client_info;
pub mod code_generator;
pub mod url_validator;
