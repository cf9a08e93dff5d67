//! HTTP response plumbing for the JSON api.

use anyhow::Result;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime::types::JSON;

/// A handler's decision: a JSON body or a raw document (feed, sitemap).
pub enum ApiResponse {
    Json {
        status: u16,
        body: serde_json::Value,
    },
    Raw {
        status: u16,
        content_type: &'static str,
        body: String,
    },
}

impl ApiResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::Json { status, body }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::Json {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn raw(status: u16, content_type: &'static str, body: String) -> Self {
        Self::Raw {
            status,
            content_type,
            body,
        }
    }
}

/// Send a response, honoring HEAD by dropping the body.
pub fn send(request: Request, response: ApiResponse) -> Result<()> {
    let (status, content_type, body) = match response {
        ApiResponse::Json { status, body } => (status, JSON, body.to_string()),
        ApiResponse::Raw {
            status,
            content_type,
            body,
        } => (status, content_type, body),
    };

    if request.method() == &Method::Head {
        let response = Response::empty(StatusCode(status))
            .with_header(make_header("Content-Type", content_type));
        request.respond(response)?;
        return Ok(());
    }

    let response = Response::from_data(body.into_bytes())
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
