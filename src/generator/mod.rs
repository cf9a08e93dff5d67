//! Output generators for feeds and sitemap.
//!
//! Generates auxiliary files from the loaded document list:
//!
//! - **Feed**: RSS 2.0 (`rss.xml`), Atom 1.0 (`atom.xml`), JSON Feed 1.1
//!   (`feed.json`) for blog readers
//! - **Sitemap**: Search engine indexing (`sitemap.xml`)
//!
//! Each generator renders to a string so the server can serve the exact
//! bytes the build writes to disk.

pub mod feed;
pub mod sitemap;
