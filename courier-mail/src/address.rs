//! Sender and recipient addresses.

use std::fmt;

use crate::error::{CourierError, Result};

/// An e-mail address with an optional display name.
///
/// Composition builds one of these for the sender, the recipient and, when
/// the full cc triple is supplied, the carbon-copy recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// The address itself.
    pub email: String,
    /// Display name shown alongside the address.
    pub name: Option<String>,
}

impl Address {
    /// Create an address without a display name.
    pub fn new(email: impl Into<String>) -> Result<Self> {
        Ok(Self {
            email: checked(email.into())?,
            name: None,
        })
    }

    /// Create an address with a display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            email: checked(email.into())?,
            name: Some(name.into()),
        })
    }

    /// Convert to a lettre mailbox.
    pub(crate) fn to_mailbox(&self) -> Result<lettre::message::Mailbox> {
        let address: lettre::Address = self
            .email
            .parse()
            .map_err(|_| CourierError::InvalidAddress(self.email.clone()))?;
        Ok(lettre::message::Mailbox::new(self.name.clone(), address))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// Shallow mailbox check; lettre's parse at send time is authoritative.
fn checked(email: String) -> Result<String> {
    let trimmed = email.trim();
    let well_formed = !trimmed.contains(char::is_whitespace)
        && trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if well_formed {
        Ok(trimmed.to_string())
    } else {
        Err(CourierError::InvalidAddress(email))
    }
}
