//! # Courier Mail
//!
//! Composition and dispatch of templated e-mail messages.
//!
//! Given a logical message name and a set of named parameters, courier picks
//! the per-part templates (headers, subject, body), renders them with the
//! parameters, assembles the result into a message and sends it through a
//! named SMTP configuration selected at call time.
//!
//! ## Features
//!
//! - **Named configurations**: multiple SMTP profiles loaded once from a
//!   JSON file, selected per send
//! - **Template cache**: per-part templates loaded lazily and cached for the
//!   process lifetime
//! - **Body variants**: plain text, HTML, both, or whichever exists
//! - **Sender override**: replace the configured sender for a single send
//! - **Attachments**: file and inline attachments, passed through in order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use courier_mail::{
//!     EmailMessageHandler, FilesystemLoader, MessageHandler,
//!     MessageParameters, TemplateVariant,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = Arc::new(FilesystemLoader::new("./templates"));
//!     let handler = EmailMessageHandler::from_config_path("smtp.json", loader)?;
//!
//!     let parameters = MessageParameters::new()
//!         .configuration("info")
//!         .template("welcome")
//!         .recipient("Ann", "Lee", "ann@example.com")
//!         .variant(TemplateVariant::Both)
//!         .var("activationLink", "https://example.com/activate/abc123");
//!
//!     handler.handle_message(parameters).await?;
//!     Ok(())
//! }
//! ```
//!
//! Template files are addressed as `{name}_{part}.tpl`: the send above reads
//! `welcome_subject.tpl`, `welcome_body.tpl.txt`, `welcome_body.tpl.html`
//! and, when present, `welcome_headers.tpl`.

mod address;
mod attachment;
mod composer;
mod config;
mod dispatcher;
mod error;
mod handler;
mod message;
mod template;
mod transport;

pub use address::Address;
pub use attachment::{Attachment, ContentDisposition};
pub use composer::{MessageComposer, MessageParameters, TemplateVariant};
pub use config::{ConfigurationRegistry, SmtpConfiguration};
pub use dispatcher::Dispatcher;
pub use error::{CourierError, Result};
pub use handler::EmailMessageHandler;
pub use message::ComposedMessage;
pub use template::{
    BodyVariant, EmbeddedLoader, FilesystemLoader, TemplateCache, TemplateKey, TemplateLoader,
    TemplatePart,
};
pub use transport::{SmtpTransport, Transport};

use async_trait::async_trait;

/// A handler for one kind of outbound message.
///
/// Implementations receive the full parameter mapping for a single send and
/// either deliver the message or report the first failure encountered.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Compose and dispatch one message described by `parameters`.
    async fn handle_message(&self, parameters: MessageParameters) -> Result<()>;
}

/// Prelude for common imports.
///
/// ```
/// use courier_mail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageHandler;
    pub use crate::address::Address;
    pub use crate::attachment::{Attachment, ContentDisposition};
    pub use crate::composer::{MessageComposer, MessageParameters, TemplateVariant};
    pub use crate::config::{ConfigurationRegistry, SmtpConfiguration};
    pub use crate::error::{CourierError, Result};
    pub use crate::handler::EmailMessageHandler;
    pub use crate::message::ComposedMessage;
    pub use crate::template::{FilesystemLoader, TemplateCache, TemplateLoader};
    pub use crate::transport::{SmtpTransport, Transport};
}
