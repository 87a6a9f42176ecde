//! Post, Page and Tag models

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Short summary shown on listing pages
    pub description: Option<String>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Rendered excerpt (before <!-- more -->)
    pub excerpt: Option<String>,

    pub tags: Vec<String>,

    pub draft: bool,

    /// Source file path, relative to the source dir
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Path of the post inside the blog dir (e.g. `2020/02/08`)
    pub slug: String,

    /// URL path without the path prefix (e.g. `/posts/2020/02/08/`)
    pub path: String,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            title,
            date,
            updated: None,
            description: None,
            raw: String::new(),
            content: String::new(),
            excerpt: None,
            tags: Vec::new(),
            draft: false,
            full_source: PathBuf::from(&source),
            source,
            slug,
            path: String::new(),
            extra: HashMap::new(),
        }
    }

    /// Text for listing pages: the description, else the rendered excerpt
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref().or(self.excerpt.as_deref())
    }
}

/// A standalone page (about, or any other markdown outside the blog)
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub date: DateTime<Local>,
    pub raw: String,
    pub content: String,
    pub layout: String,
    pub source: String,
    pub full_source: PathBuf,
    /// URL path without the path prefix (e.g. `/about/`)
    pub path: String,
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Page {
    /// Create a new page with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        Self {
            title,
            date,
            raw: String::new(),
            content: String::new(),
            layout: "page".to_string(),
            full_source: PathBuf::from(&source),
            source,
            path: String::new(),
            extra: HashMap::new(),
        }
    }
}

/// A tag with its post count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    /// URL path without the path prefix
    pub path: String,
    pub count: usize,
}

impl Tag {
    pub fn new(name: &str, tag_dir: &str) -> Self {
        let slug = slug::slugify(name);
        let path = format!("/{}/{}/", tag_dir, slug);
        Self {
            name: name.to_string(),
            slug,
            path,
            count: 0,
        }
    }

    /// Collect every non-empty tag used by `posts`, sorted by name
    ///
    /// Tags whose names slugify to the same value are merged under the first
    /// spelling seen.
    pub fn collect(posts: &[Post], tag_dir: &str) -> Vec<Tag> {
        let mut tags: BTreeMap<String, Tag> = BTreeMap::new();

        for post in posts {
            for name in &post.tags {
                let name = name.trim();
                if name.is_empty() || slug::slugify(name).is_empty() {
                    continue;
                }
                tags.entry(slug::slugify(name))
                    .or_insert_with(|| Tag::new(name, tag_dir))
                    .count += 1;
            }
        }

        let mut tags: Vec<Tag> = tags.into_values().collect();
        tags.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        tags
    }

    /// Whether `post` carries this tag
    pub fn matches(&self, post: &Post) -> bool {
        post.tags.iter().any(|t| slug::slugify(t.trim()) == self.slug)
    }
}
