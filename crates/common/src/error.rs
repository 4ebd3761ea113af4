//! Error types for bid request assembly.
//!
//! Errors are reported through [`error_stack::Report`] so callers get the
//! chain of contexts that led to a failure. Best-effort inputs such as the
//! ORTB config strings never surface here: they are logged and skipped.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum RequestBuilderError {
    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The ad unit configuration cannot produce a bid request.
    #[display("Invalid ad unit: {message}")]
    InvalidAdUnit { message: String },

    /// A targeting value was rejected.
    #[display("Invalid targeting: {message}")]
    InvalidTargeting { message: String },

    /// A native request value was out of range.
    #[display("Invalid native configuration: {message}")]
    InvalidNative { message: String },

    /// The request could not be converted to or from JSON.
    #[display("Serialization error: {message}")]
    Serialization { message: String },
}
