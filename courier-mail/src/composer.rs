//! Parameter validation and message composition.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::address::Address;
use crate::attachment::Attachment;
use crate::config::{ConfigurationRegistry, SmtpConfiguration};
use crate::error::{CourierError, Result};
use crate::message::ComposedMessage;
use crate::template::{BodyVariant, FilesystemLoader, TemplateCache, TemplateKey};

/// Content-variant selector for the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemplateVariant {
    /// Render the plain text variant only.
    Text,
    /// Render the HTML variant only.
    Html,
    /// Render both variants; each must exist.
    Both,
    /// Use the text variant when present, otherwise HTML; at least one must
    /// exist.
    Any,
}

/// Caller-supplied parameters for one message send.
///
/// The obligatory fields are the configuration name, the template name and
/// the recipient triple; everything else is optional. Unknown keys collect
/// into [`extra`](Self::extra) and are available to the templates unchanged,
/// as are all named fields. Wire names are camelCase (`recipientEMail`,
/// `templateVariant`, …).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageParameters {
    /// Name of the transport configuration to send through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
    /// Logical template name, e.g. `"welcome"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    /// Base path prepended to derived template filenames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    /// Filesystem directory to load templates from, overriding the handler's
    /// loader for this send.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path_file: Option<PathBuf>,
    /// Body variant selector; absent selects the legacy unsuffixed body
    /// template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variant: Option<TemplateVariant>,
    /// Recipient first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_firstname: Option<String>,
    /// Recipient last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_lastname: Option<String>,
    /// Recipient e-mail address.
    #[serde(rename = "recipientEMail", skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    /// Sender first name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_firstname: Option<String>,
    /// Sender last name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_lastname: Option<String>,
    /// Sender e-mail override.
    #[serde(rename = "senderEMail", skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    /// Carbon-copy first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_firstname: Option<String>,
    /// Carbon-copy last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_lastname: Option<String>,
    /// Carbon-copy e-mail address.
    #[serde(rename = "ccEMail", skip_serializing_if = "Option::is_none")]
    pub cc_email: Option<String>,
    /// Attachments, passed through in order. Not exposed to templates.
    #[serde(skip_serializing)]
    pub attachments: Vec<Attachment>,
    /// Any other parameter, passed through to the templates unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageParameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport configuration name.
    pub fn configuration(mut self, name: impl Into<String>) -> Self {
        self.configuration_name = Some(name.into());
        self
    }

    /// Set the logical template name.
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Set the template base path.
    pub fn template_path(mut self, path: impl Into<String>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Load templates from the given directory for this send.
    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_path_file = Some(dir.into());
        self
    }

    /// Set the body variant selector.
    pub fn variant(mut self, variant: TemplateVariant) -> Self {
        self.template_variant = Some(variant);
        self
    }

    /// Set the recipient triple.
    pub fn recipient(
        mut self,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.recipient_firstname = Some(firstname.into());
        self.recipient_lastname = Some(lastname.into());
        self.recipient_email = Some(email.into());
        self
    }

    /// Override the configured sender for this send.
    pub fn sender(
        mut self,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.sender_firstname = Some(firstname.into());
        self.sender_lastname = Some(lastname.into());
        self.sender_email = Some(email.into());
        self
    }

    /// Set the carbon-copy triple.
    pub fn cc(
        mut self,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.cc_firstname = Some(firstname.into());
        self.cc_lastname = Some(lastname.into());
        self.cc_email = Some(email.into());
        self
    }

    /// Add an attachment.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Add an extra template variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Extract the obligatory parameters, failing on the first absent one.
    pub(crate) fn obligatory(&self) -> Result<ObligatoryParameters<'_>> {
        Ok(ObligatoryParameters {
            configuration_name: self
                .configuration_name
                .as_deref()
                .ok_or(CourierError::MissingParameter("configurationName"))?,
            template_name: self
                .template_name
                .as_deref()
                .ok_or(CourierError::MissingParameter("templateName"))?,
            recipient_firstname: self
                .recipient_firstname
                .as_deref()
                .ok_or(CourierError::MissingParameter("recipientFirstname"))?,
            recipient_lastname: self
                .recipient_lastname
                .as_deref()
                .ok_or(CourierError::MissingParameter("recipientLastname"))?,
            recipient_email: self
                .recipient_email
                .as_deref()
                .ok_or(CourierError::MissingParameter("recipientEMail"))?,
        })
    }

    /// The value object handed to the template engine.
    fn render_context(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Parameters that must be present in every send.
pub(crate) struct ObligatoryParameters<'a> {
    pub configuration_name: &'a str,
    pub template_name: &'a str,
    pub recipient_firstname: &'a str,
    pub recipient_lastname: &'a str,
    pub recipient_email: &'a str,
}

/// Renders template parts and assembles the outbound message.
pub struct MessageComposer {
    registry: Arc<ConfigurationRegistry>,
    templates: Arc<TemplateCache>,
}

impl MessageComposer {
    /// Create a composer over a configuration registry and a template cache.
    pub fn new(registry: Arc<ConfigurationRegistry>, templates: Arc<TemplateCache>) -> Self {
        Self {
            registry,
            templates,
        }
    }

    /// Validate `parameters`, render headers, subject and body, and build a
    /// [`ComposedMessage`] ready for dispatch.
    pub fn compose(&self, parameters: &MessageParameters) -> Result<ComposedMessage> {
        let obligatory = parameters.obligatory()?;
        let configuration = self.registry.get(obligatory.configuration_name)?;

        let base_path = normalize_base_path(parameters.template_path.as_deref());
        let override_loader = parameters
            .template_path_file
            .as_ref()
            .map(FilesystemLoader::new);
        let context = parameters.render_context()?;

        let render = |key: &TemplateKey| -> Result<String> {
            match override_loader.as_ref() {
                Some(loader) => self.templates.render_with(loader, &base_path, key, &context),
                None => self.templates.render(&base_path, key, &context),
            }
        };

        // The headers template is optional: any failure to locate or render
        // it resolves to an empty header set.
        let headers = match render(&TemplateKey::headers(obligatory.template_name)) {
            Ok(block) => parse_headers(&block),
            Err(_) => Vec::new(),
        };

        let subject = render(&TemplateKey::subject(obligatory.template_name))?
            .trim()
            .to_string();

        let (text, html) =
            render_body(obligatory.template_name, parameters.template_variant, render)?;

        let from = resolve_sender(parameters, configuration)?;
        let to = Address::with_name(
            obligatory.recipient_email,
            format!(
                "{} {}",
                obligatory.recipient_firstname, obligatory.recipient_lastname
            ),
        )?;

        // cc applies only when the full triple is present
        let cc = match (
            &parameters.cc_firstname,
            &parameters.cc_lastname,
            &parameters.cc_email,
        ) {
            (Some(firstname), Some(lastname), Some(email)) => Some(Address::with_name(
                email.as_str(),
                format!("{firstname} {lastname}"),
            )?),
            _ => None,
        };

        debug!(
            template = obligatory.template_name,
            configuration = obligatory.configuration_name,
            "composed message"
        );

        Ok(ComposedMessage {
            from,
            to,
            cc,
            headers,
            subject,
            text,
            html,
            attachments: parameters.attachments.clone(),
        })
    }
}

/// Normalize the template base path to end with a separator; absent means
/// the root of the template search space.
fn normalize_base_path(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() && !path.ends_with('/') => format!("{path}/"),
        Some(path) => path.to_string(),
        None => String::new(),
    }
}

/// Render the body according to the variant selector.
fn render_body<F>(
    template_name: &str,
    variant: Option<TemplateVariant>,
    render: F,
) -> Result<(Option<String>, Option<String>)>
where
    F: Fn(&TemplateKey) -> Result<String>,
{
    match variant {
        None => {
            let body = render(&TemplateKey::body(template_name, None))?;
            Ok((Some(body), None))
        }
        Some(TemplateVariant::Text) => {
            let text = render(&TemplateKey::body(template_name, Some(BodyVariant::Text)))?;
            Ok((Some(text), None))
        }
        Some(TemplateVariant::Html) => {
            let html = render(&TemplateKey::body(template_name, Some(BodyVariant::Html)))?;
            Ok((None, Some(html)))
        }
        Some(TemplateVariant::Both) => {
            let text = render(&TemplateKey::body(template_name, Some(BodyVariant::Text)))?;
            let html = render(&TemplateKey::body(template_name, Some(BodyVariant::Html)))?;
            Ok((Some(text), Some(html)))
        }
        Some(TemplateVariant::Any) => {
            // The text attempt swallows every failure, not only a missing
            // file; only the html attempt reports.
            let text_key = TemplateKey::body(template_name, Some(BodyVariant::Text));
            if let Ok(text) = render(&text_key) {
                return Ok((Some(text), None));
            }
            let html_key = TemplateKey::body(template_name, Some(BodyVariant::Html));
            match render(&html_key) {
                Ok(html) => Ok((None, Some(html))),
                Err(_) => Err(CourierError::TemplateNotFound(format!(
                    "neither '{}' nor '{}' could be found for template '{}'",
                    text_key.filename(),
                    html_key.filename(),
                    template_name
                ))),
            }
        }
    }
}

/// Resolve the message sender: caller overrides beat configuration defaults.
///
/// Supplying any of the three sender fields switches to the override; fields
/// left out fall back to the configured default. The stored configuration is
/// never touched.
fn resolve_sender(
    parameters: &MessageParameters,
    configuration: &SmtpConfiguration,
) -> Result<Address> {
    let overridden = parameters.sender_firstname.is_some()
        || parameters.sender_lastname.is_some()
        || parameters.sender_email.is_some();

    if !overridden {
        return Address::with_name(
            configuration.from_email.as_str(),
            configuration.from_sender_name.as_str(),
        );
    }

    let email = parameters
        .sender_email
        .as_deref()
        .unwrap_or(&configuration.from_email);
    let name = match (
        parameters.sender_firstname.as_deref(),
        parameters.sender_lastname.as_deref(),
    ) {
        (None, None) => configuration.from_sender_name.clone(),
        (firstname, lastname) => [firstname, lastname]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" "),
    };

    Address::with_name(email, name)
}

/// Parse a rendered headers block, one `Name: value` pair per line, split at
/// the first colon. Lines without a colon are ignored.
fn parse_headers(block: &str) -> Vec<(String, String)> {
    block
        .lines()
        .filter_map(|line| {
            line.split_once(':')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateLoader;
    use std::collections::HashMap;

    struct MapLoader(HashMap<String, String>);

    impl MapLoader {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl TemplateLoader for MapLoader {
        fn load(&self, path: &str) -> Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| CourierError::TemplateNotFound(path.to_string()))
        }
    }

    const CONFIG: &str = r#"[
        {
            "info": {
                "smtpHostname": "smtp.example.com",
                "smtpPort": 587,
                "starttls": true,
                "fromEMail": "info@example.com",
                "fromSenderName": "Example Info"
            }
        }
    ]"#;

    fn composer(templates: &[(&str, &str)]) -> MessageComposer {
        let registry = Arc::new(ConfigurationRegistry::from_json(CONFIG).unwrap());
        let cache = Arc::new(TemplateCache::new(Arc::new(MapLoader::new(templates))));
        MessageComposer::new(registry, cache)
    }

    fn base_parameters() -> MessageParameters {
        MessageParameters::new()
            .configuration("info")
            .template("welcome")
            .recipient("Ann", "Lee", "ann@example.com")
    }

    #[test]
    fn test_missing_obligatory_parameter_names_the_key() {
        let composer = composer(&[]);

        let mut parameters = base_parameters();
        parameters.configuration_name = None;
        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(
            err,
            CourierError::MissingParameter("configurationName")
        ));

        let mut parameters = base_parameters();
        parameters.template_name = None;
        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(err, CourierError::MissingParameter("templateName")));

        let mut parameters = base_parameters();
        parameters.recipient_firstname = None;
        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(
            err,
            CourierError::MissingParameter("recipientFirstname")
        ));

        let mut parameters = base_parameters();
        parameters.recipient_lastname = None;
        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(
            err,
            CourierError::MissingParameter("recipientLastname")
        ));

        let mut parameters = base_parameters();
        parameters.recipient_email = None;
        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(
            err,
            CourierError::MissingParameter("recipientEMail")
        ));
    }

    #[test]
    fn test_unknown_configuration_fails() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);
        let parameters = base_parameters().configuration("absent");

        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(err, CourierError::UnknownConfiguration(_)));
    }

    #[test]
    fn test_legacy_body_without_variant_selector() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Welcome {{recipientFirstname}}"),
            ("welcome_body.tpl", "Hello {{recipientFirstname}}!"),
        ]);

        let composed = composer.compose(&base_parameters()).unwrap();
        assert_eq!(composed.subject, "Welcome Ann");
        assert_eq!(composed.text.as_deref(), Some("Hello Ann!"));
        assert!(composed.html.is_none());
    }

    #[test]
    fn test_both_variants_required() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl.txt", "text"),
            ("welcome_body.tpl.html", "<p>html</p>"),
        ]);
        let parameters = base_parameters().variant(TemplateVariant::Both);

        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.text.as_deref(), Some("text"));
        assert_eq!(composed.html.as_deref(), Some("<p>html</p>"));
    }

    #[test]
    fn test_both_fails_when_one_variant_is_missing() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl.txt", "text"),
        ]);
        let parameters = base_parameters().variant(TemplateVariant::Both);

        let err = composer.compose(&parameters).unwrap_err();
        assert!(matches!(err, CourierError::TemplateNotFound(_)));
    }

    #[test]
    fn test_any_falls_back_to_the_present_variant() {
        let text_only = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl.txt", "text"),
        ]);
        let composed = text_only
            .compose(&base_parameters().variant(TemplateVariant::Any))
            .unwrap();
        assert_eq!(composed.text.as_deref(), Some("text"));
        assert!(composed.html.is_none());

        let html_only = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl.html", "<p>html</p>"),
        ]);
        let composed = html_only
            .compose(&base_parameters().variant(TemplateVariant::Any))
            .unwrap();
        assert!(composed.text.is_none());
        assert_eq!(composed.html.as_deref(), Some("<p>html</p>"));
    }

    #[test]
    fn test_any_with_neither_variant_names_both_filenames() {
        let composer = composer(&[("welcome_subject.tpl", "Hi")]);
        let parameters = base_parameters().variant(TemplateVariant::Any);

        let err = composer.compose(&parameters).unwrap_err();
        match err {
            CourierError::TemplateNotFound(message) => {
                assert!(message.contains("welcome_body.tpl.txt"));
                assert!(message.contains("welcome_body.tpl.html"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_headers_template_is_not_an_error() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let composed = composer.compose(&base_parameters()).unwrap();
        assert!(composed.headers.is_empty());
    }

    #[test]
    fn test_headers_are_rendered_and_parsed() {
        let composer = composer(&[
            (
                "welcome_headers.tpl",
                "X-Campaign: {{campaign}}\nnot a header line\nX-Priority: 1",
            ),
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);
        let parameters = base_parameters().var("campaign", "spring");

        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(
            composed.headers,
            vec![
                ("X-Campaign".to_string(), "spring".to_string()),
                ("X-Priority".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_subject_template_is_fatal() {
        let composer = composer(&[("welcome_body.tpl", "Hello")]);

        let err = composer.compose(&base_parameters()).unwrap_err();
        assert!(matches!(err, CourierError::TemplateNotFound(_)));
    }

    #[test]
    fn test_unresolved_reference_is_a_render_error() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi {{missingVariable}}"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let err = composer.compose(&base_parameters()).unwrap_err();
        assert!(matches!(err, CourierError::Render(_)));
    }

    #[test]
    fn test_default_sender_comes_from_the_configuration() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let composed = composer.compose(&base_parameters()).unwrap();
        assert_eq!(composed.from.email, "info@example.com");
        assert_eq!(composed.from.name.as_deref(), Some("Example Info"));
    }

    #[test]
    fn test_sender_override_does_not_mutate_the_configuration() {
        let registry = Arc::new(ConfigurationRegistry::from_json(CONFIG).unwrap());
        let cache = Arc::new(TemplateCache::new(Arc::new(MapLoader::new(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]))));
        let composer = MessageComposer::new(Arc::clone(&registry), cache);

        let parameters = base_parameters().sender("A", "B", "a@x.com");
        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.from.email, "a@x.com");
        assert_eq!(composed.from.name.as_deref(), Some("A B"));

        let configuration = registry.get("info").unwrap();
        assert_eq!(configuration.from_email, "info@example.com");
        assert_eq!(configuration.from_sender_name, "Example Info");
    }

    #[test]
    fn test_partial_sender_override_falls_back_per_field() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let mut parameters = base_parameters();
        parameters.sender_email = Some("other@example.com".to_string());
        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.from.email, "other@example.com");
        assert_eq!(composed.from.name.as_deref(), Some("Example Info"));
    }

    #[test]
    fn test_partial_cc_is_silently_ignored() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let mut parameters = base_parameters();
        parameters.cc_email = Some("cc@example.com".to_string());
        let composed = composer.compose(&parameters).unwrap();
        assert!(composed.cc.is_none());
    }

    #[test]
    fn test_full_cc_triple_adds_a_recipient() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let parameters = base_parameters().cc("Bo", "Ek", "bo@example.com");
        let composed = composer.compose(&parameters).unwrap();
        let cc = composed.cc.unwrap();
        assert_eq!(cc.email, "bo@example.com");
        assert_eq!(cc.name.as_deref(), Some("Bo Ek"));
    }

    #[test]
    fn test_recipient_display_name_joins_first_and_last() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let composed = composer.compose(&base_parameters()).unwrap();
        assert_eq!(composed.to.email, "ann@example.com");
        assert_eq!(composed.to.name.as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn test_attachments_pass_through_in_order() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Hi"),
            ("welcome_body.tpl", "Hello"),
        ]);

        let parameters = base_parameters()
            .attach(Attachment::new("a.txt", "text/plain", b"a".to_vec()))
            .attach(Attachment::new("b.txt", "text/plain", b"b".to_vec()));
        let composed = composer.compose(&parameters).unwrap();
        let names: Vec<&str> = composed
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_template_base_path_is_normalized() {
        let composer = composer(&[
            ("emails/en/welcome_subject.tpl", "Hi"),
            ("emails/en/welcome_body.tpl", "Hello"),
        ]);

        let parameters = base_parameters().template_path("emails/en");
        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.subject, "Hi");
    }

    #[test]
    fn test_extra_parameters_reach_the_templates() {
        let composer = composer(&[
            ("welcome_subject.tpl", "Your {{plan}} plan"),
            ("welcome_body.tpl", "Hello {{recipientFirstname}}"),
        ]);

        let parameters = base_parameters().var("plan", "premium");
        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.subject, "Your premium plan");
    }

    #[test]
    fn test_template_dir_override_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("welcome_subject.tpl"), "From disk").unwrap();
        std::fs::write(dir.path().join("welcome_body.tpl"), "Body").unwrap();

        let composer = composer(&[]);
        let parameters = base_parameters().template_dir(dir.path());
        let composed = composer.compose(&parameters).unwrap();
        assert_eq!(composed.subject, "From disk");
    }

    #[test]
    fn test_parameters_deserialize_from_camel_case_json() {
        let parameters: MessageParameters = serde_json::from_str(
            r#"{
                "configurationName": "info",
                "templateName": "welcome",
                "recipientFirstname": "Ann",
                "recipientLastname": "Lee",
                "recipientEMail": "ann@example.com",
                "templateVariant": "BOTH",
                "memberCompany": "Acme GmbH"
            }"#,
        )
        .unwrap();

        assert_eq!(parameters.configuration_name.as_deref(), Some("info"));
        assert_eq!(parameters.template_variant, Some(TemplateVariant::Both));
        assert_eq!(
            parameters.extra.get("memberCompany"),
            Some(&Value::String("Acme GmbH".to_string()))
        );
    }
}
