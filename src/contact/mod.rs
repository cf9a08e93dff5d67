//! Outbound contact mail relay.
//!
//! Accepts a submitted contact form and relays it through an HTTP email
//! provider (Resend-compatible: bearer-authenticated JSON POST). The api
//! key is never stored in `folio.toml`; it comes from an environment
//! variable or a key file outside the repository.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ContactConfig;
use crate::log;

/// A submitted contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// All three fields are required.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.message.trim().is_empty()
        {
            return Err(MailError::InvalidForm("Missing required fields".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0}")]
    InvalidForm(String),

    #[error("no api key available (set ${0} or configure contact.api_key_file)")]
    MissingKey(String),

    #[error("failed to read api key file {path}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("mail request failed")]
    Request(#[from] reqwest::Error),

    #[error("mail provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Relay payload in provider wire format.
#[derive(Debug, Serialize)]
struct EmailPayload {
    from: String,
    to: Vec<String>,
    subject: String,
    reply_to: String,
    text: String,
    html: String,
}

impl EmailPayload {
    fn build(config: &ContactConfig, form: &ContactForm) -> Self {
        Self {
            from: config.from.clone(),
            to: vec![config.to.clone()],
            subject: format!("New message from {}", form.name),
            reply_to: form.email.clone(),
            text: format!(
                "Name: {}\nEmail: {}\n\n{}",
                form.name, form.email, form.message
            ),
            html: format!(
                "<p><strong>Name:</strong> {}</p>\
                 <p><strong>Email:</strong> {}</p>\
                 <p>{}</p>",
                escape_html(&form.name),
                escape_html(&form.email),
                escape_html(&form.message)
            ),
        }
    }
}

pub struct Mailer {
    config: ContactConfig,
}

impl Mailer {
    pub fn new(config: ContactConfig) -> Self {
        Self { config }
    }

    /// Validate and relay a contact form.
    ///
    /// Returns the provider's response body on success.
    pub fn send(&self, form: &ContactForm) -> Result<serde_json::Value, MailError> {
        form.validate()?;
        let key = self.api_key()?;
        let payload = EmailPayload::build(&self.config, form);

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        let response = client
            .post(&self.config.api_url)
            .bearer_auth(key.trim())
            .json(&payload)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(MailError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        log!("mail"; "relayed contact message from {}", form.email);
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::Null))
    }

    /// Resolve the api key: key file first, then environment variable.
    fn api_key(&self) -> Result<String, MailError> {
        if let Some(path) = &self.config.api_key_file {
            return std::fs::read_to_string(path).map_err(|source| MailError::KeyFile {
                path: path.clone(),
                source,
            });
        }

        std::env::var(&self.config.api_key_env)
            .map_err(|_| MailError::MissingKey(self.config.api_key_env.clone()))
    }
}

/// Escape HTML-special characters in user-supplied text.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello there".to_string(),
        }
    }

    fn config() -> ContactConfig {
        ContactConfig {
            enable: true,
            from: "Folio <noreply@example.com>".to_string(),
            to: "owner@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());

        let mut missing = form();
        missing.message = "   ".to_string();
        assert!(matches!(
            missing.validate(),
            Err(MailError::InvalidForm(_))
        ));
    }

    #[test]
    fn test_payload_shape() {
        let payload = EmailPayload::build(&config(), &form());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["from"], "Folio <noreply@example.com>");
        assert_eq!(json["to"][0], "owner@example.com");
        assert_eq!(json["subject"], "New message from Ada");
        assert_eq!(json["reply_to"], "ada@example.com");
        assert!(json["text"].as_str().unwrap().contains("Hello there"));
    }

    #[test]
    fn test_payload_escapes_html() {
        let mut evil = form();
        evil.message = "<script>alert('x')</script>".to_string();
        let payload = EmailPayload::build(&config(), &evil);

        assert!(payload.html.contains("&lt;script&gt;"));
        assert!(!payload.html.contains("<script>"));
    }

    #[test]
    fn test_api_key_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let key_path = tmp.path().join("key");
        std::fs::write(&key_path, "secret-key\n").unwrap();

        let mut cfg = config();
        cfg.api_key_file = Some(key_path);
        let mailer = Mailer::new(cfg);
        assert_eq!(mailer.api_key().unwrap().trim(), "secret-key");
    }

    #[test]
    fn test_missing_api_key() {
        let mut cfg = config();
        cfg.api_key_env = "FOLIO_TEST_KEY_THAT_IS_NOT_SET".to_string();
        let mailer = Mailer::new(cfg);
        assert!(matches!(mailer.api_key(), Err(MailError::MissingKey(_))));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<i>"), "&lt;i&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
