//! Request routing for the JSON api.
//!
//! Paths are matched after stripping any trailing slash, so `/notes`
//! and `/notes/` hit the same handler. Read endpoints accept GET and
//! HEAD; everything else on a known path is a 405.

use std::io::Read;
use std::path::Path;

use anyhow::Result;
use percent_encoding::percent_decode_str;
use tiny_http::{Method, Request};

use super::ServerState;
use super::handlers;
use super::response::{self, ApiResponse};

/// Upper bound on a contact form payload.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Decoded query parameters, in request order.
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let mut params = Vec::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.push((decode(key), decode(value)));
        }
        Self(params)
    }

    /// First value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Percent-decode one query component. `+` decodes to a space.
fn decode(component: &str) -> String {
    let unplussed = component.replace('+', " ");
    percent_decode_str(&unplussed).decode_utf8_lossy().into_owned()
}

pub fn route(mut request: Request, state: &ServerState) -> Result<()> {
    let url = request.url().to_string();
    let (raw_path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let path = normalize_path(raw_path);
    let params = QueryParams::parse(query);
    let method = request.method().clone();

    let api = if path == "/notes" {
        read_only(&method, || handlers::notes(state, &params))
    } else if path == "/projects" {
        read_only(&method, || handlers::projects(state, &params))
    } else if path == "/photos" {
        read_only(&method, || handlers::photos(state, &params))
    } else if let Some(name) = path.strip_prefix("/feed/") {
        read_only(&method, || handlers::feed(state, name))
    } else if path == "/send" {
        if method == Method::Post {
            match read_body(&mut request) {
                Some(body) => handlers::send_form(state, &body),
                None => ApiResponse::error(400, "Invalid request body"),
            }
        } else {
            method_not_allowed()
        }
    } else if is_sitemap_path(state, &path) {
        read_only(&method, || handlers::sitemap(state))
    } else {
        ApiResponse::error(404, "Not found")
    };

    response::send(request, api)
}

/// Strip trailing slashes, keeping the bare root.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn read_body(request: &mut Request) -> Option<String> {
    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .ok()?;
    Some(body)
}

fn is_sitemap_path(state: &ServerState, path: &str) -> bool {
    state.config.site.sitemap.enable
        && Path::new(path.trim_start_matches('/')) == state.config.site.sitemap.path
}

fn read_only(method: &Method, handler: impl FnOnce() -> ApiResponse) -> ApiResponse {
    match method {
        Method::Get | Method::Head => handler(),
        _ => method_not_allowed(),
    }
}

fn method_not_allowed() -> ApiResponse {
    ApiResponse::error(405, "Method not allowed")
}
