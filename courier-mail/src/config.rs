//! SMTP transport configurations and the named-configuration registry.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CourierError, Result};

/// A named SMTP transport profile.
///
/// Immutable once loaded; the registry owns every instance and hands out
/// shared references only.
#[derive(Debug, Clone)]
pub struct SmtpConfiguration {
    /// Name under which this profile is registered.
    pub name: String,
    /// SMTP server hostname.
    pub hostname: String,
    /// SMTP server port.
    pub port: u16,
    /// Upgrade the session to TLS after connecting (STARTTLS).
    pub starttls: bool,
    /// Connect with TLS already established (implicit TLS).
    pub ssl: bool,
    /// Username for authentication.
    pub username: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
    /// Default sender address.
    pub from_email: String,
    /// Default sender display name.
    pub from_sender_name: String,
}

/// One configuration block as it appears in the JSON source.
///
/// Two shapes are accepted: the current one with independent `starttls` and
/// `ssl` flags, and the legacy one with a single `authentication` boolean
/// that implied STARTTLS plus credentials.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfiguration {
    smtp_hostname: String,
    smtp_port: u16,
    #[serde(default)]
    authentication: Option<bool>,
    #[serde(default)]
    starttls: Option<bool>,
    #[serde(default)]
    ssl: Option<bool>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(rename = "fromEMail")]
    from_email: String,
    from_sender_name: String,
}

impl RawConfiguration {
    fn into_configuration(self, name: String) -> SmtpConfiguration {
        SmtpConfiguration {
            name,
            hostname: self.smtp_hostname,
            port: self.smtp_port,
            starttls: self.starttls.or(self.authentication).unwrap_or(false),
            ssl: self.ssl.unwrap_or(false),
            username: self.username,
            password: self.password,
            from_email: self.from_email,
            from_sender_name: self.from_sender_name,
        }
    }
}

/// Registry of named SMTP configurations, loaded once at startup.
///
/// The source is an ordered sequence of configuration blocks; when the same
/// name appears more than once, the later block replaces the earlier one.
#[derive(Debug, Default)]
pub struct ConfigurationRegistry {
    configurations: HashMap<String, SmtpConfiguration>,
}

impl ConfigurationRegistry {
    /// Load the registry from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|e| CourierError::ConfigLoad {
            location: location.clone(),
            cause: Box::new(e),
        })?;
        Self::parse(&json, &location)
    }

    /// Load the registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, "inline configuration")
    }

    fn parse(json: &str, location: &str) -> Result<Self> {
        let blocks: Vec<HashMap<String, RawConfiguration>> =
            serde_json::from_str(json).map_err(|e| CourierError::ConfigLoad {
                location: location.to_string(),
                cause: Box::new(e),
            })?;

        let mut configurations = HashMap::new();
        for block in blocks {
            for (name, raw) in block {
                configurations.insert(name.clone(), raw.into_configuration(name));
            }
        }

        debug!(
            count = configurations.len(),
            location, "loaded SMTP configurations"
        );

        Ok(Self { configurations })
    }

    /// Look up a configuration by name.
    pub fn get(&self, name: &str) -> Result<&SmtpConfiguration> {
        self.configurations
            .get(name)
            .ok_or_else(|| CourierError::UnknownConfiguration(name.to_string()))
    }

    /// Number of registered configurations.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}
