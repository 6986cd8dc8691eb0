//! The composed outbound message.

use lettre::Message;
use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Attachment as MimeAttachment, MultiPart, SinglePart};

use crate::address::Address;
use crate::attachment::{Attachment, ContentDisposition};
use crate::error::{CourierError, Result};

/// A fully composed message, built once per send and discarded after
/// dispatch.
#[derive(Debug, Clone)]
pub struct ComposedMessage {
    /// Resolved sender.
    pub from: Address,
    /// Primary recipient.
    pub to: Address,
    /// Carbon-copy recipient, present only when the full cc triple was
    /// supplied.
    pub cc: Option<Address>,
    /// Extra headers in rendered order.
    pub headers: Vec<(String, String)>,
    /// Rendered subject line.
    pub subject: String,
    /// Plain text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Attachments in caller-supplied order.
    pub attachments: Vec<Attachment>,
}

impl ComposedMessage {
    /// Check the message invariants before dispatch.
    ///
    /// A message must carry at least one body variant.
    pub fn validate(&self) -> Result<()> {
        if self.text.is_none() && self.html.is_none() {
            return Err(CourierError::MissingField("text/html body"));
        }
        Ok(())
    }

    /// Build the outgoing MIME message.
    pub(crate) fn to_lettre(&self) -> Result<Message> {
        self.validate()?;

        let mut builder = Message::builder()
            .from(self.from.to_mailbox()?)
            .to(self.to.to_mailbox()?)
            .subject(&self.subject);

        if let Some(cc) = &self.cc {
            builder = builder.cc(cc.to_mailbox()?);
        }

        let mut message = if self.attachments.is_empty() {
            builder.multipart(self.body_part())?
        } else {
            let mut mixed = MultiPart::mixed().multipart(self.body_part());
            for attachment in &self.attachments {
                mixed = mixed.singlepart(attachment_part(attachment)?);
            }
            builder.multipart(mixed)?
        };

        for (name, value) in &self.headers {
            let header = HeaderName::new_from_ascii(name.clone())
                .map_err(|_| CourierError::InvalidHeader(name.clone()))?;
            message
                .headers_mut()
                .insert_raw(HeaderValue::new(header, value.clone()));
        }

        Ok(message)
    }

    /// The alternative part holding whichever body variants exist.
    fn body_part(&self) -> MultiPart {
        let alternative = MultiPart::alternative();
        match (&self.text, &self.html) {
            (Some(text), Some(html)) => alternative
                .singlepart(text_part(text))
                .singlepart(html_part(html)),
            (Some(text), None) => alternative.singlepart(text_part(text)),
            (None, Some(html)) => alternative.singlepart(html_part(html)),
            (None, None) => unreachable!(), // validated above
        }
    }
}

fn text_part(text: &str) -> SinglePart {
    SinglePart::builder()
        .header(ContentType::TEXT_PLAIN)
        .body(text.to_string())
}

fn html_part(html: &str) -> SinglePart {
    SinglePart::builder()
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())
}

fn attachment_part(attachment: &Attachment) -> Result<SinglePart> {
    let content_type = attachment
        .content_type
        .parse::<ContentType>()
        .map_err(|_| CourierError::Attachment(format!(
            "invalid content type '{}' for attachment '{}'",
            attachment.content_type, attachment.filename
        )))?;

    let part = match attachment.disposition {
        ContentDisposition::Inline => {
            let content_id = attachment
                .content_id
                .clone()
                .unwrap_or_else(|| attachment.filename.clone());
            MimeAttachment::new_inline(content_id).body(attachment.data.clone(), content_type)
        }
        ContentDisposition::Attachment => {
            MimeAttachment::new(attachment.filename.clone()).body(attachment.data.clone(), content_type)
        }
    };

    Ok(part)
}
