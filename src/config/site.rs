//! Site configuration (_config.yml)

use anyhow::Result;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::ConfigError;
use crate::route::{PathPrefix, WELL_KNOWN_SECTIONS};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub keywords: Vec<String>,
    pub language: String,

    // URL
    pub url: String,
    pub path_prefix: PathPrefix,

    // Directory
    pub source_dir: String,
    pub blog_source: String,
    pub static_dir: String,
    pub public_dir: String,
    pub blog_dir: String,

    // Writing
    pub render_drafts: bool,
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Pagination
    pub per_page: usize,

    // Navigation menu, in display order
    pub menu: Option<IndexMap<String, String>>,

    // Built-in pages
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub resume: ResumeConfig,
    #[serde(default)]
    pub footer: FooterConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            keywords: Vec::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            path_prefix: PathPrefix::default(),

            source_dir: "content".to_string(),
            blog_source: "blog".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "posts".to_string(),

            render_drafts: false,
            date_format: "MMMM D, YYYY".to_string(),
            highlight: HighlightConfig::default(),

            per_page: 10,

            menu: None,

            home: HomeConfig::default(),
            resume: ResumeConfig::default(),
            footer: FooterConfig::default(),
            extra: HashMap::new(),
        }
    }
}

fn default_menu(blog_dir: &str) -> IndexMap<String, String> {
    let mut menu = IndexMap::new();
    menu.insert("Home".to_string(), "/".to_string());
    menu.insert("About".to_string(), "/about/".to_string());
    menu.insert("Resume".to_string(), "/resume/".to_string());
    menu.insert("Blog".to_string(), format!("/{}/", blog_dir));
    menu.insert("Tags".to_string(), "/tags/".to_string());
    menu
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Navigation menu entries (name -> site-relative path)
    pub fn menu(&self) -> IndexMap<String, String> {
        self.menu
            .clone()
            .unwrap_or_else(|| default_menu(&self.blog_dir))
    }

    /// Tidy up values that are accepted in several spellings
    fn normalize(&mut self) {
        self.blog_dir = self.blog_dir.trim_matches('/').to_string();
    }

    /// Check values the generator relies on
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::ZeroPerPage);
        }
        let blog_dir = self.blog_dir.trim_matches('/');
        if blog_dir.is_empty() {
            return Err(ConfigError::EmptyBlogDir);
        }
        if WELL_KNOWN_SECTIONS.contains(&blog_dir) {
            return Err(ConfigError::ReservedBlogDir(blog_dir.to_string()));
        }
        Ok(())
    }
}

/// Home page content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub greeting: String,
    pub intro: String,
    /// Image path relative to the site root (usually a file in `static/`)
    pub image: Option<String>,
    pub image_alt: String,
    pub caption: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello.".to_string(),
            intro: "Welcome to my website, I hope you enjoy your stay!".to_string(),
            image: None,
            image_alt: String::new(),
            caption: String::new(),
        }
    }
}

/// Resume page content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    pub intro: String,
    /// Where the download button points
    pub url: Option<String>,
    pub label: String,
    pub updated: Option<NaiveDate>,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            intro: "Click below to download a copy of my resume.".to_string(),
            url: None,
            label: "Resume".to_string(),
            updated: None,
        }
    }
}

/// Footer content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub built_with: String,
    pub built_with_url: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            built_with: "folio".to_string(),
            built_with_url: "https://crates.io/crates/folio".to_string(),
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
            line_number: false,
        }
    }
}
