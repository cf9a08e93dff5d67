//! Content loading and ordering.
//!
//! # Structure
//!
//! | Module         | Purpose                                    |
//! |----------------|--------------------------------------------|
//! | `document`     | Canonical document model                   |
//! | `front_matter` | YAML-like / TOML front-matter extraction   |
//! | `loader`       | Filesystem loading, validation, ordering   |
//! | `cache`        | Optional signature-based document cache    |
//! | `paginate`     | Page slicing with clamped page numbers     |

mod document;
mod front_matter;
mod loader;

pub mod cache;
pub mod paginate;

pub use cache::ContentCache;
pub use document::Document;
pub use loader::{ContentError, NoteStore};
