//! Message dispatch through named transport configurations.

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigurationRegistry;
use crate::error::Result;
use crate::message::ComposedMessage;
use crate::transport::Transport;

/// Resolves a named configuration and hands the composed message to the
/// transport.
///
/// One dispatch per invocation; the first failure at any stage is reported
/// to the caller and nothing is retried.
pub struct Dispatcher {
    registry: Arc<ConfigurationRegistry>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and a transport.
    pub fn new(registry: Arc<ConfigurationRegistry>, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Send `message` through the configuration registered under
    /// `configuration_name`.
    pub async fn dispatch(
        &self,
        configuration_name: &str,
        message: &ComposedMessage,
    ) -> Result<()> {
        let configuration = self.registry.get(configuration_name)?;
        self.transport.send(configuration, message).await?;

        info!(
            configuration = configuration_name,
            to = %message.to,
            subject = %message.subject,
            "message dispatched"
        );
        Ok(())
    }
}
