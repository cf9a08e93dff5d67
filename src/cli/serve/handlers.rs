//! Endpoint handlers for the JSON api.
//!
//! | Endpoint                | Response                            |
//! |-------------------------|-------------------------------------|
//! | `GET /notes`            | `{ posts, pagination }`             |
//! | `GET /notes?slug=x`     | full document (metadata + raw body) |
//! | `GET /projects`         | `{ projects, pagination }`          |
//! | `GET /projects?id=x`    | single project                      |
//! | `GET /photos`           | `{ photos }`                        |
//! | `GET /feed/{name}`      | rendered feed document              |
//! | `POST /send`            | `{ success, data }`                 |
//!
//! Handlers return an [`ApiResponse`] instead of writing to the socket, so
//! they stay testable without a running server.

use serde_json::json;

use super::ServerState;
use super::response::ApiResponse;
use super::router::QueryParams;
use crate::contact::{ContactForm, MailError};
use crate::content::ContentError;
use crate::content::paginate::paginate;
use crate::generator::feed::FeedFormat;
use crate::log;
use crate::utils::mime;

/// Listing page size when the request does not name one.
const DEFAULT_PAGE_SIZE: usize = 10;

pub fn notes(state: &ServerState, params: &QueryParams) -> ApiResponse {
    let docs = match state.cache.documents() {
        Ok(docs) => docs,
        Err(error) => return load_failure(error),
    };

    // ?id= is accepted as an alias for ?slug=
    if let Some(slug) = params.get("slug").or_else(|| params.get("id")) {
        return match docs.iter().find(|doc| doc.slug == slug) {
            Some(doc) => ApiResponse::json(200, doc.to_full_json()),
            None => ApiResponse::error(404, "Post not found"),
        };
    }

    let page = positive_param(params, "page", 1);
    let limit = positive_param(params, "limit", DEFAULT_PAGE_SIZE);
    let page = paginate(&docs, page, limit);
    ApiResponse::json(
        200,
        json!({ "posts": page.items, "pagination": page.pagination() }),
    )
}

pub fn projects(state: &ServerState, params: &QueryParams) -> ApiResponse {
    if let Some(id) = params.get("id") {
        return match state.projects.by_id(id) {
            Some(project) => ApiResponse::json(200, json!(project)),
            None => ApiResponse::error(404, "Project not found"),
        };
    }

    if params.get("featured") == Some("true") {
        return ApiResponse::json(200, json!({ "projects": state.projects.featured() }));
    }

    let page = positive_param(params, "page", 1);
    let limit = positive_param(params, "limit", DEFAULT_PAGE_SIZE);
    let page = paginate(state.projects.all(), page, limit);
    ApiResponse::json(
        200,
        json!({ "projects": page.items, "pagination": page.pagination() }),
    )
}

pub fn photos(state: &ServerState, params: &QueryParams) -> ApiResponse {
    if let Some(id) = params.get("id") {
        return match state.photos.by_id(id) {
            Some(photo) => ApiResponse::json(200, json!(photo)),
            None => ApiResponse::error(404, "Photo not found"),
        };
    }

    if let Some(alt) = params.get("alt") {
        return match state.photos.by_alt(alt) {
            Some(photo) => ApiResponse::json(200, json!(photo)),
            None => ApiResponse::error(404, "Photo not found"),
        };
    }

    if let Some(category) = params.get("category") {
        return ApiResponse::json(200, json!({ "photos": state.photos.by_category(category) }));
    }

    ApiResponse::json(200, json!({ "photos": state.photos.all() }))
}

pub fn feed(state: &ServerState, name: &str) -> ApiResponse {
    if !state.config.site.feed.enable {
        return ApiResponse::error(404, "Not found");
    }

    let Some(format) = FeedFormat::from_request_name(name, &state.config) else {
        return ApiResponse::error(404, "Unsupported feed format");
    };

    let docs = match state.cache.documents() {
        Ok(docs) => docs,
        Err(error) => return load_failure(error),
    };

    match format.render(&state.config, &docs) {
        Ok(body) => ApiResponse::raw(200, format.content_type(), body),
        Err(error) => {
            log!("error"; "feed render failed: {error:#}");
            ApiResponse::error(500, "Failed to generate feed")
        }
    }
}

pub fn sitemap(state: &ServerState) -> ApiResponse {
    let docs = match state.cache.documents() {
        Ok(docs) => docs,
        Err(error) => return load_failure(error),
    };
    let body = crate::generator::sitemap::render(&state.config, &docs);
    ApiResponse::raw(200, mime::types::XML, body)
}

pub fn send_form(state: &ServerState, body: &str) -> ApiResponse {
    if !state.config.contact.enable {
        return ApiResponse::error(404, "Not found");
    }

    let form: ContactForm = match serde_json::from_str(body) {
        Ok(form) => form,
        Err(_) => return ApiResponse::error(400, "Invalid request body"),
    };

    match state.mailer.send(&form) {
        Ok(data) => ApiResponse::json(200, json!({ "success": true, "data": data })),
        Err(MailError::InvalidForm(message)) => ApiResponse::error(400, &message),
        Err(error) => {
            log!("error"; "contact relay failed: {error}");
            ApiResponse::json(
                500,
                json!({ "success": false, "error": "Failed to send email" }),
            )
        }
    }
}

/// Parse a positive numeric parameter, falling back on absence, garbage or 0.
fn positive_param(params: &QueryParams, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn load_failure(error: ContentError) -> ApiResponse {
    log!("error"; "failed to load documents: {error}");
    ApiResponse::error(500, "Failed to load posts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PhotoEntry, ProjectEntry, SiteConfig};
    use crate::utils::date::DateTimeUtc;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    fn write_note(dir: &Path, name: &str, title: &str, date: &str) {
        let source = format!("---\ntitle: {title}\ndate: {date}\n---\n\n# {title}\n\nBody.\n");
        fs::write(dir.join(name), source).unwrap();
    }

    fn test_state(content_dir: &Path) -> ServerState {
        let mut config = SiteConfig::default();
        config.content.dir = content_dir.to_path_buf();
        config.site.info.title = "Test Site".into();
        config.site.info.description = "A test site".into();
        config.site.info.author = "Test Author".into();
        config.site.info.email = "test@example.com".into();
        config.site.info.url = Some("https://example.com".into());
        config.projects = vec![
            ProjectEntry {
                title: "Alpha Tool".into(),
                description: "First".into(),
                featured: true,
                date: Some(DateTimeUtc::from_ymd(2024, 3, 1)),
                ..ProjectEntry::default()
            },
            ProjectEntry {
                title: "Beta Service".into(),
                description: "Second".into(),
                date: Some(DateTimeUtc::from_ymd(2023, 7, 12)),
                ..ProjectEntry::default()
            },
        ];
        config.photos = vec![
            PhotoEntry {
                src: "/photos/bridge.jpg".into(),
                alt: "Old Bridge".into(),
                category: Some("Architecture".into()),
                ..PhotoEntry::default()
            },
            PhotoEntry {
                src: "/photos/cat.jpg".into(),
                alt: "Street Cat".into(),
                category: Some("Street".into()),
                ..PhotoEntry::default()
            },
        ];
        ServerState::from_config(Arc::new(config))
    }

    fn json_body(response: ApiResponse) -> (u16, Value) {
        match response {
            ApiResponse::Json { status, body } => (status, body),
            ApiResponse::Raw { .. } => panic!("expected json response"),
        }
    }

    fn no_params() -> QueryParams {
        QueryParams::parse("")
    }

    #[test]
    fn test_notes_listing() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "first.md", "First", "2024-05-01");
        write_note(tmp.path(), "second.md", "Second", "2024-06-01");
        let state = test_state(tmp.path());

        let (status, body) = json_body(notes(&state, &no_params()));
        assert_eq!(status, 200);

        let posts = body["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["slug"], "second");
        assert_eq!(posts[1]["slug"], "first");
        assert_eq!(body["pagination"]["total_items"], 2);
        // Listings carry metadata only
        assert!(posts[0].get("content").is_none());
    }

    #[test]
    fn test_notes_pagination_params() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 1..=25 {
            write_note(
                tmp.path(),
                &format!("note-{i:02}.md"),
                &format!("Note {i}"),
                &format!("2024-01-{:02}", (i % 28) + 1),
            );
        }
        let state = test_state(tmp.path());

        let params = QueryParams::parse("page=3&limit=10");
        let (_, body) = json_body(notes(&state, &params));
        assert_eq!(body["posts"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["current_page"], 3);
        assert_eq!(body["pagination"]["total_pages"], 3);

        // Past-the-end pages clamp instead of erroring
        let params = QueryParams::parse("page=99&limit=10");
        let (_, body) = json_body(notes(&state, &params));
        assert_eq!(body["pagination"]["current_page"], 3);
    }

    #[test]
    fn test_notes_single_by_slug() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "hello.md", "Hello", "2024-05-01");
        let state = test_state(tmp.path());

        let (status, body) = json_body(notes(&state, &QueryParams::parse("slug=hello")));
        assert_eq!(status, 200);
        assert_eq!(body["title"], "Hello");
        assert!(body["content"].as_str().unwrap().contains("# Hello"));

        // ?id= works as an alias
        let (status, _) = json_body(notes(&state, &QueryParams::parse("id=hello")));
        assert_eq!(status, 200);
    }

    #[test]
    fn test_notes_single_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (status, body) = json_body(notes(&state, &QueryParams::parse("slug=nope")));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Post not found");
    }

    #[test]
    fn test_notes_broken_document_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "good.md", "Good", "2024-05-01");
        fs::write(tmp.path().join("broken.md"), "no front matter").unwrap();
        let state = test_state(tmp.path());

        let (status, body) = json_body(notes(&state, &no_params()));
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 1);

        let (status, _) = json_body(notes(&state, &QueryParams::parse("slug=broken")));
        assert_eq!(status, 404);
    }

    #[test]
    fn test_notes_load_failure() {
        // A content path that is a file, not a directory, fails the read.
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("content");
        fs::write(&not_a_dir, "plain file").unwrap();
        let state = test_state(&not_a_dir);

        let (status, body) = json_body(notes(&state, &no_params()));
        assert_eq!(status, 500);
        assert_eq!(body["error"], "Failed to load posts");
    }

    #[test]
    fn test_projects_listing_and_featured() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (_, body) = json_body(projects(&state, &no_params()));
        let all = body["projects"].as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["id"], "alpha-tool");
        assert_eq!(body["pagination"]["total_items"], 2);

        let (_, body) = json_body(projects(&state, &QueryParams::parse("featured=true")));
        let featured = body["projects"].as_array().unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0]["id"], "alpha-tool");
        assert!(body.get("pagination").is_none());
    }

    #[test]
    fn test_projects_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (status, body) = json_body(projects(&state, &QueryParams::parse("id=beta-service")));
        assert_eq!(status, 200);
        assert_eq!(body["title"], "Beta Service");

        let (status, body) = json_body(projects(&state, &QueryParams::parse("id=missing")));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Project not found");
    }

    #[test]
    fn test_photos_lookups() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (_, body) = json_body(photos(&state, &no_params()));
        assert_eq!(body["photos"].as_array().unwrap().len(), 2);

        let (status, body) = json_body(photos(&state, &QueryParams::parse("id=old-bridge")));
        assert_eq!(status, 200);
        assert_eq!(body["alt"], "Old Bridge");

        // Alt lookup is case-insensitive
        let (status, _) = json_body(photos(&state, &QueryParams::parse("alt=old+bridge")));
        assert_eq!(status, 200);

        let (_, body) = json_body(photos(&state, &QueryParams::parse("category=street")));
        let filtered = body["photos"].as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["id"], "street-cat");

        let (status, body) = json_body(photos(&state, &QueryParams::parse("id=missing")));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Photo not found");
    }

    #[test]
    fn test_feed_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "hello.md", "Hello", "2024-05-01");
        let state = test_state(tmp.path());

        let ApiResponse::Raw {
            status,
            content_type,
            body,
        } = feed(&state, "rss.xml")
        else {
            panic!("expected raw response");
        };
        assert_eq!(status, 200);
        assert_eq!(content_type, "application/rss+xml");
        assert!(body.contains("<rss"));
        assert!(body.contains("https://example.com/blog/hello"));
    }

    #[test]
    fn test_feed_unknown_name() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (status, body) = json_body(feed(&state, "feed.xml"));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Unsupported feed format");
    }

    #[test]
    fn test_feed_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.content.dir = tmp.path().to_path_buf();
        config.site.feed.enable = false;
        let state = ServerState::from_config(Arc::new(config));

        let (status, body) = json_body(feed(&state, "rss.xml"));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Not found");
    }

    #[test]
    fn test_sitemap_document() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "hello.md", "Hello", "2024-05-01");
        let state = test_state(tmp.path());

        let ApiResponse::Raw {
            status,
            content_type,
            body,
        } = sitemap(&state)
        else {
            panic!("expected raw response");
        };
        assert_eq!(status, 200);
        assert_eq!(content_type, "application/xml");
        assert!(body.contains("<urlset"));
        assert!(body.contains("https://example.com/notes/hello"));
    }

    #[test]
    fn test_send_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let (status, body) = json_body(send_form(&state, "{}"));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Not found");
    }

    #[test]
    fn test_send_invalid_body() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.content.dir = tmp.path().to_path_buf();
        config.contact.enable = true;
        let state = ServerState::from_config(Arc::new(config));

        let (status, body) = json_body(send_form(&state, "not json"));
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[test]
    fn test_send_missing_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.content.dir = tmp.path().to_path_buf();
        config.contact.enable = true;
        let state = ServerState::from_config(Arc::new(config));

        let payload = r#"{"name": "Alice", "email": "", "message": "hi"}"#;
        let (status, body) = json_body(send_form(&state, payload));
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[test]
    fn test_send_without_api_key() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.content.dir = tmp.path().to_path_buf();
        config.contact.enable = true;
        config.contact.api_key_env = "FOLIO_TEST_KEY_THAT_IS_NOT_SET".into();
        let state = ServerState::from_config(Arc::new(config));

        let payload = r#"{"name": "Alice", "email": "a@example.com", "message": "hi"}"#;
        let (status, body) = json_body(send_form(&state, payload));
        assert_eq!(status, 500);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to send email");
    }
}
