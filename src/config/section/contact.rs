//! `[contact]` section configuration.
//!
//! Settings for the outbound contact mail relay (`POST /send`).
//!
//! # Example
//!
//! ```toml
//! [contact]
//! enable = true
//! from = "Notes <onboarding@resend.dev>"   # Sender shown on the mail
//! to = "alice@example.com"                 # Inbox that receives submissions
//! api_key_file = "~/.resend-key"           # Optional: key file, otherwise $RESEND_API_KEY
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contact mail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Enable the `POST /send` endpoint.
    pub enable: bool,

    /// Sender address ("Name <mail@host>" or plain address).
    pub from: String,

    /// Destination inbox for submissions.
    pub to: String,

    /// Transactional mail API endpoint (Resend-compatible).
    pub api_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Path to a file containing the API key.
    ///
    /// # Security
    /// - Store outside repository (e.g., `~/.resend-key`)
    /// - Never commit keys to version control!
    pub api_key_file: Option<PathBuf>,
}

/// Field paths for diagnostics.
pub struct ContactFields {
    pub enable: FieldPath,
    pub from: FieldPath,
    pub to: FieldPath,
    pub api_url: FieldPath,
    pub api_key_env: FieldPath,
    pub api_key_file: FieldPath,
}

impl ContactConfig {
    pub const FIELDS: ContactFields = ContactFields {
        enable: FieldPath::new("contact.enable"),
        from: FieldPath::new("contact.from"),
        to: FieldPath::new("contact.to"),
        api_url: FieldPath::new("contact.api_url"),
        api_key_env: FieldPath::new("contact.api_key_env"),
        api_key_file: FieldPath::new("contact.api_key_file"),
    };

    /// Validate contact configuration.
    ///
    /// # Checks
    /// - `from` and `to` must be set when the endpoint is enabled
    /// - `api_url` must be a valid http(s) URL
    /// - If `api_key_file` is set, it must exist and be a file
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.from.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.from,
                "sender address is required",
                "e.g.: from = \"Notes <onboarding@resend.dev>\"",
            );
        }
        if self.to.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.to,
                "destination inbox is required",
                "e.g.: to = \"you@example.com\"",
            );
        }

        match url::Url::parse(&self.api_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => diag.error(
                Self::FIELDS.api_url,
                format!("scheme '{}' not supported, must be http or https", parsed.scheme()),
            ),
            Err(e) => diag.error(Self::FIELDS.api_url, format!("invalid URL: {}", e)),
        }

        if let Some(path) = &self.api_key_file {
            if !path.exists() {
                diag.error(
                    Self::FIELDS.api_key_file,
                    format!("key file not found: {}", path.display()),
                );
            } else if !path.is_file() {
                diag.error(
                    Self::FIELDS.api_key_file,
                    format!("key file is not a file: {}", path.display()),
                );
            }
        } else if std::env::var(&self.api_key_env).is_err() {
            diag.hint(
                Self::FIELDS.api_key_env,
                format!("${} is not set; mail sending will fail until it is", self.api_key_env),
            );
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            enable: false,
            from: String::new(),
            to: String::new(),
            api_url: "https://api.resend.com/emails".to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
            api_key_file: None,
        }
    }
}
