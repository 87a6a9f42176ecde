//! Content loader - loads posts and pages from the source directory

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Page, Post};
use crate::generator::is_listing_path;
use crate::Site;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    pub fn new(site: &'a Site) -> Self {
        let highlight = &site.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { site, renderer }
    }

    /// Load all posts from the blog source directory, newest first
    ///
    /// Each post path is used once. When several files slugify to the same
    /// path the newest one keeps it, and a post never takes a blog listing
    /// path.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let blog_dir = &self.site.blog_source_dir;
        if !blog_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(blog_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.load_post(path) {
                Ok(post) if post.draft && !self.site.config.render_drafts => {
                    tracing::debug!("Skipping draft {:?}", path);
                }
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));

        let blog_dir = &self.site.config.blog_dir;
        let mut claimed = HashSet::new();
        posts.retain(|post| {
            if is_listing_path(blog_dir, &post.path) {
                tracing::warn!(
                    "Skipping {}: {} is a blog listing page",
                    post.source,
                    post.path
                );
                false
            } else if !claimed.insert(post.path.clone()) {
                tracing::warn!(
                    "Skipping {}: {} belongs to a newer post",
                    post.source,
                    post.path
                );
                false
            } else {
                true
            }
        });

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let file_modified = file_modified(path);
        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));
        let updated = fm.parse_updated().or(file_modified);

        let title = fm.title.clone().unwrap_or_else(|| title_from_path(path));

        let relative = path.strip_prefix(&self.site.blog_source_dir).unwrap_or(path);
        let slug = post_slug(relative).unwrap_or_else(|| slug::slugify(&title));

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content_html = self.renderer.render(&full_md)?;
        let excerpt_html = match excerpt_md {
            Some(excerpt) => Some(self.renderer.render(&excerpt)?),
            None => None,
        };

        let mut post = Post::new(title, date, self.relative_source(path));
        post.updated = updated;
        post.description = fm.description.clone();
        post.raw = body.to_string();
        post.content = content_html;
        post.excerpt = excerpt_html;
        post.tags = fm.tags.clone();
        post.draft = fm.is_draft();
        post.full_source = path.to_path_buf();
        post.path = format!("/{}/{}/", self.site.config.blog_dir, slug);
        post.slug = slug;
        post.extra = fm.extra;

        Ok(post)
    }

    /// Load all standalone pages (markdown outside the blog source)
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                let hidden = e.depth() > 0
                    && e.file_name()
                        .to_str()
                        .map(|s| s.starts_with('_') || s.starts_with('.'))
                        .unwrap_or(false);
                !hidden && e.path() != self.site.blog_source_dir
            })
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.load_page(path) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    tracing::warn!("Failed to load page {:?}: {}", path, e);
                }
            }
        }

        pages.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let date = fm
            .parse_date()
            .or_else(|| file_modified(path))
            .unwrap_or_else(Local::now);
        let title = fm.title.clone().unwrap_or_else(|| title_from_path(path));

        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let page_path = match post_slug(relative) {
            Some(slug) => format!("/{}/", slug),
            None => "/".to_string(),
        };

        let mut page = Page::new(title, date, self.relative_source(path));
        page.raw = body.to_string();
        page.content = self.renderer.render(body)?;
        page.layout = fm.layout.clone().unwrap_or_else(|| "page".to_string());
        page.full_source = path.to_path_buf();
        page.path = page_path;
        page.extra = fm.extra;

        Ok(page)
    }

    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// URL slug for a markdown file, relative to its content root
///
/// `hello.md` becomes `hello`, `2020/02/08/index.md` becomes `2020/02/08`.
/// Returns `None` for an `index.md` at the root.
pub fn post_slug(relative: &Path) -> Option<String> {
    let mut segments: Vec<String> = relative
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| c.as_os_str().to_str())
                .map(slug::slugify)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let stem = relative.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if stem != "index" {
        let stem = slug::slugify(stem);
        if !stem.is_empty() {
            segments.push(stem);
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_modified(path: &Path) -> Option<DateTime<Local>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Local>::from)
}

/// Title fallback: the file stem, or the directory name for `index.md`
fn title_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled");
    if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string()
    } else {
        stem.to_string()
    }
}
