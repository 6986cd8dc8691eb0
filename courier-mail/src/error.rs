//! Courier error types.

use thiserror::Error;

/// Result type for courier operations.
pub type Result<T> = std::result::Result<T, CourierError>;

/// Errors raised while loading configuration, composing or dispatching a
/// message.
///
/// Every failure a send can run into surfaces as one of these variants, with
/// the underlying cause preserved where one exists.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration source unreadable or malformed.
    #[error("SMTP configuration couldn't be loaded from '{location}'")]
    ConfigLoad {
        /// Path or description of the configuration source.
        location: String,
        /// Underlying I/O or parse failure.
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested configuration name was never loaded.
    #[error("unknown configuration: '{0}'")]
    UnknownConfiguration(String),

    /// An obligatory parameter is absent.
    #[error("the parameter '{0}' is expected but couldn't be found")]
    MissingParameter(&'static str),

    /// A required template part could not be located.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Template found but parameter substitution failed.
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The SMTP server rejected or failed to deliver the message.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The message could not be assembled into a MIME structure.
    #[error("message build failed: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid e-mail address.
    #[error("invalid e-mail address: {0}")]
    InvalidAddress(String),

    /// A rendered header line does not form a valid header name.
    #[error("invalid header name: '{0}'")]
    InvalidHeader(String),

    /// Missing required message field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Attachment error.
    #[error("attachment error: {0}")]
    Attachment(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
