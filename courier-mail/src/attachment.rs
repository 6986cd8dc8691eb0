//! Attachment descriptors.
//!
//! The composition engine treats attachments as opaque: descriptors are
//! carried into the outbound message in the order they were supplied and
//! only interpreted when the MIME structure is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CourierError, Result};

/// How an attachment is presented to the recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentDisposition {
    /// Offered as a downloadable file.
    #[default]
    Attachment,
    /// Embedded into the HTML body, referenced by content id.
    Inline,
}

/// One attachment of an outbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Raw content.
    #[serde(default)]
    pub data: Vec<u8>,
    /// Presentation mode.
    #[serde(default)]
    pub disposition: ContentDisposition,
    /// Content id for `cid:` references from the HTML body.
    #[serde(default)]
    pub content_id: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Attachment {
    /// Create an attachment from raw bytes and an explicit MIME type.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
            disposition: ContentDisposition::Attachment,
            content_id: None,
            description: None,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                CourierError::Attachment(format!("no usable file name in '{}'", path.display()))
            })?
            .to_string();

        let data = std::fs::read(path)?;
        let content_type = content_type_for(&filename);
        Ok(Self::new(filename, content_type, data))
    }

    /// Create an attachment from bytes, guessing the MIME type from the file
    /// name extension.
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename);
        Self::new(filename, content_type, data)
    }

    /// Embed this attachment into the HTML body.
    pub fn inline(mut self) -> Self {
        self.disposition = ContentDisposition::Inline;
        self
    }

    /// Set the content id and mark the attachment inline, for references
    /// like `<img src="cid:logo">`.
    pub fn content_id(mut self, id: impl Into<String>) -> Self {
        self.content_id = Some(id.into());
        self.disposition = ContentDisposition::Inline;
        self
    }

    /// Mark the attachment inline under a freshly generated content id.
    pub fn with_generated_content_id(self) -> Self {
        self.content_id(format!("{}@courier", uuid::Uuid::new_v4()))
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Content size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}
