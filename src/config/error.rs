//! Configuration validation errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("per_page must be greater than zero")]
    ZeroPerPage,

    #[error("blog_dir must not be empty")]
    EmptyBlogDir,

    #[error("blog_dir `{0}` collides with a built-in section")]
    ReservedBlogDir(String),
}
