//! Content module - handles posts, pages, and content processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{html_escape, MarkdownRenderer, MORE_MARKER};
pub use post::{Page, Post, Tag};
