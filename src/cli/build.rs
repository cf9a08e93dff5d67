//! `folio build`: generate feeds and the sitemap into the output directory.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::NoteStore;
use crate::generator::{feed, sitemap};
use crate::log;
use crate::utils::plural::plural_count;

/// Load all documents and write the enabled generated outputs.
///
/// Feed and sitemap generation run in parallel; each is skipped when its
/// config section disables it.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let docs = NoteStore::from_config(config).load_all()?;
    log!("build"; "{} loaded", plural_count(docs.len(), "document"));

    if !config.site.feed.enable && !config.site.sitemap.enable {
        log!("build"; "feeds and sitemap disabled, nothing to generate");
        return Ok(());
    }

    let (feeds, sitemap) = rayon::join(
        || feed::write_feeds(config, &docs),
        || sitemap::write_sitemap(config, &docs),
    );
    feeds?;
    sitemap?;

    log!("build"; "done");
    Ok(())
}
