//! Config-backed collections (projects, photos).
//!
//! Unlike notes, these live in `folio.toml` rather than on disk as files.
//! Each store derives stable ids at construction so API lookups and sitemap
//! entries never depend on declaration order.

mod photo;
mod project;

pub use photo::{Photo, PhotoStore};
pub use project::{Project, ProjectStore};
