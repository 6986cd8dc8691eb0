//! The message-send entry point.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::MessageHandler;
use crate::composer::{MessageComposer, MessageParameters};
use crate::config::ConfigurationRegistry;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::template::{TemplateCache, TemplateLoader};
use crate::transport::{SmtpTransport, Transport};

/// Sends templated e-mail messages through named SMTP configurations.
///
/// The single public operation is [`handle_message`]: validate the
/// parameters, render the template parts, assemble the message and dispatch
/// it. Registry and template cache are built once and shared across sends.
///
/// [`handle_message`]: MessageHandler::handle_message
pub struct EmailMessageHandler {
    composer: MessageComposer,
    dispatcher: Dispatcher,
}

impl EmailMessageHandler {
    /// Create a handler from a configuration file and a template loader,
    /// delivering through SMTP.
    pub fn from_config_path(
        path: impl AsRef<Path>,
        loader: Arc<dyn TemplateLoader>,
    ) -> Result<Self> {
        let registry = Arc::new(ConfigurationRegistry::from_path(path)?);
        Ok(Self::new(registry, loader))
    }

    /// Create a handler delivering through SMTP.
    pub fn new(registry: Arc<ConfigurationRegistry>, loader: Arc<dyn TemplateLoader>) -> Self {
        Self::with_transport(registry, loader, Arc::new(SmtpTransport::new()))
    }

    /// Create a handler delivering through a custom transport.
    pub fn with_transport(
        registry: Arc<ConfigurationRegistry>,
        loader: Arc<dyn TemplateLoader>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let templates = Arc::new(TemplateCache::new(loader));
        Self {
            composer: MessageComposer::new(Arc::clone(&registry), templates),
            dispatcher: Dispatcher::new(registry, transport),
        }
    }
}

#[async_trait]
impl MessageHandler for EmailMessageHandler {
    async fn handle_message(&self, parameters: MessageParameters) -> Result<()> {
        let configuration_name = parameters.obligatory()?.configuration_name.to_string();
        let message = self.composer.compose(&parameters)?;
        self.dispatcher.dispatch(&configuration_name, &message).await
    }
}
