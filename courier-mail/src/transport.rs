//! Message delivery through SMTP.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    transport::smtp::authentication::Credentials,
};
use tracing::debug;

use crate::config::SmtpConfiguration;
use crate::error::Result;
use crate::message::ComposedMessage;

/// Delivers a composed message through one transport configuration.
///
/// The composition engine only ever hands a complete message to this seam
/// and receives success or failure back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `message` using the connection settings in `configuration`.
    async fn send(
        &self,
        configuration: &SmtpConfiguration,
        message: &ComposedMessage,
    ) -> Result<()>;
}

/// SMTP delivery via lettre.
///
/// A session is constructed per send from the configuration selected at call
/// time; there is no pooling, retrying or queueing here.
#[derive(Debug, Default)]
pub struct SmtpTransport;

impl SmtpTransport {
    /// Create a new SMTP transport.
    pub fn new() -> Self {
        Self
    }

    /// Build an SMTP session for the given configuration.
    ///
    /// `ssl` and `starttls` are independent toggles. An implicitly encrypted
    /// connection needs no upgrade, so `ssl` governs connection setup when
    /// both are set.
    fn session(configuration: &SmtpConfiguration) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = if configuration.ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&configuration.hostname)?
        } else if configuration.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&configuration.hostname)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&configuration.hostname)
        };

        builder = builder.port(configuration.port);

        if let (Some(username), Some(password)) =
            (&configuration.username, &configuration.password)
        {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(
        &self,
        configuration: &SmtpConfiguration,
        message: &ComposedMessage,
    ) -> Result<()> {
        let session = Self::session(configuration)?;
        let mail = message.to_lettre()?;

        debug!(
            host = %configuration.hostname,
            port = configuration.port,
            to = %message.to,
            subject = %message.subject,
            "sending message via SMTP"
        );

        session.send(mail).await?;

        debug!("message sent");
        Ok(())
    }
}
