//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# folio configuration

# Site
title: My Portfolio
description: ''
author: John Doe
keywords: []
language: en

# URL
url: http://example.com
path_prefix: ''

# Directory
source_dir: content
blog_source: blog
static_dir: static
public_dir: public
blog_dir: posts

# Writing
render_drafts: false
date_format: MMMM D, YYYY
highlight:
  theme: InspiredGitHub
  line_number: false

# Pagination
per_page: 10

# Navigation (defaults to Home, About, Resume, Blog, Tags)
# menu:
#   Home: /
#   About: /about/

home:
  greeting: Hello.
  intro: Welcome to my website, I hope you enjoy your stay!
  # image: /portrait.svg
  # image_alt: ''
  # caption: ''

resume:
  intro: Click below to download a copy of my resume.
  # url: https://example.com/resume.pdf
  label: Resume
  # updated: 2024-01-01
"#;

const ABOUT_PAGE: &str = r#"---
title: About
---

Tell visitors who you are.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/blog/hello-world"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(target_dir.join("content/about.md"), ABOUT_PAGE)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags: [meta]
---

This is the first post. Everything above the marker below shows up on the
blog listing.

<!-- more -->

## Writing posts

Create a post with `folio new "My Post"`, preview it with `folio server`,
and build the site with `folio generate`.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(
        target_dir.join("content/blog/hello-world/index.md"),
        sample_post,
    )?;

    Ok(())
}
