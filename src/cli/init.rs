//! Site initialization: `folio init [name]`.
//!
//! Creates the directory layout, a commented `folio.toml`, ignore files
//! and one sample note.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::SiteConfig;
use crate::log;
use crate::utils::date::DateTimeUtc;

/// Default config filename
const CONFIG_FILE: &str = "folio.toml";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Initialization mode determines validation rules.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `folio init` - initialize in current directory (must be empty)
    CurrentDir,
    /// `folio init <name>` - create new subdirectory (must not exist)
    NewDir,
}

/// Create a new site with default structure.
///
/// # Steps
/// 1. Validate target directory
/// 2. Create directory structure
/// 3. Write configuration and ignore files
/// 4. Write a sample note
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    if let Err(e) = validate_target(root, mode) {
        log!("error"; "{}", e);
        std::process::exit(1);
    }

    create_structure(root)?;
    write_config(root)?;
    write_ignore_files(root, &config.build.output)?;
    write_sample_note(root)?;

    log!("init"; "Site initialized successfully");
    Ok(())
}

/// Validate target directory for initialization.
///
/// # Rules
/// - `CurrentDir`: directory must be empty (or not exist)
/// - `NewDir`: directory must not exist
fn validate_target(root: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::CurrentDir => {
            if !is_empty(root)? {
                bail!(
                    "Current directory is not empty.\n\
                     Use `folio init <name>` to create in a new subdirectory."
                );
            }
        }
        InitMode::NewDir => {
            if root.exists() {
                bail!(
                    "Directory '{}' already exists.\n\
                     Choose a different name or remove the existing directory.",
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// Check if directory is empty or doesn't exist.
fn is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let is_empty = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?
        .next()
        .is_none();
    Ok(is_empty)
}

/// Create the site directory layout at the given root.
fn create_structure(root: &Path) -> Result<()> {
    for dir in ["content", "photos"] {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}

/// Generate folio.toml content with comments
fn generate_config_template() -> String {
    format!(
        "\
# folio configuration file (v{})

[site.info]
title = \"My Portfolio\"
author = \"\"
email = \"\"
description = \"\"
# Public base URL; required when feeds or the sitemap are enabled
# url = \"https://example.com\"

[site.feed]
enable = true
# rss_path = \"rss.xml\"
# atom_path = \"atom.xml\"
# json_path = \"feed.json\"

[site.sitemap]
enable = true
# path = \"sitemap.xml\"

[content]
# dir = \"content\"
# extensions = [\"md\", \"mdx\"]

[build]
# output = \"public\"

[serve]
# interface = \"127.0.0.1\"
# port = 6654
# cache = false

[contact]
enable = false
# from = \"Portfolio <onboarding@resend.dev>\"
# to = \"you@example.com\"
# The api key comes from $RESEND_API_KEY or a key file, never from here
# api_key_file = \"~/.resend-key\"

# [[projects]]
# title = \"Portfolio Website\"
# description = \"Personal portfolio built with folio.\"
# skills = [\"Rust\"]
# github_url = \"https://github.com/you/portfolio\"
# featured = true
# date = \"2024-02-15\"

# [[photos]]
# src = \"/photos/photo1.jpg\"
# alt = \"Urban Architecture\"
# category = \"Architecture\"
# aspect_ratio = \"portrait\"
",
        env!("CARGO_PKG_VERSION")
    )
}

/// Write default folio.toml configuration
fn write_config(root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    fs::write(&path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

/// Write .gitignore and .ignore files with standard patterns
fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_name = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "public".to_string());
    let content = format!("/{output_name}/\n.DS_Store\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

/// Write a dated sample note so the site has something to serve.
fn write_sample_note(root: &Path) -> Result<()> {
    let path = root.join("content").join("hello-world.md");
    let content = format!(
        "---\n\
         title: Hello World\n\
         date: {}\n\
         excerpt: The first note on this site.\n\
         tags: [meta]\n\
         ---\n\
         \n\
         # Hello World\n\
         \n\
         Edit or delete this note, then run `folio serve`.\n",
        DateTimeUtc::now().to_ymd()
    );
    fs::write(&path, content)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}
