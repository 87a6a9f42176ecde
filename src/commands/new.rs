//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `content/blog/<slug>/index.md` for a new post
///
/// `path` overrides the slug derived from the title.
pub fn create_post(site: &Site, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let slug = match path {
        Some(p) => p
            .split('/')
            .map(slug::slugify)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/"),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        bail!("Cannot derive a file name from {:?}", path.unwrap_or(title));
    }

    let post_dir = site.blog_source_dir.join(&slug);
    let file_path = post_dir.join("index.md");
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription:\ntags: []\n---\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::create_dir_all(&post_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a front-matter value when YAML would misread it
fn yaml_string(s: &str) -> String {
    let needs_quotes = s.contains(": ")
        || s.contains(" #")
        || s.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`".contains(c))
        || s.trim() != s;
    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}
