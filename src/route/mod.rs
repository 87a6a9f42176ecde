//! Routing - path prefix handling and header selection
//!
//! Every rendered page carries its current path. Pages that are primary
//! navigation destinations get a large title header; content pages get a
//! "Back to Home" link instead.

mod header;
mod prefix;

pub use header::{select_header, well_known_paths, HeaderVariant, NavigationContext};
pub use prefix::PathPrefix;

pub const ABOUT_SECTION: &str = "about";
pub const RESUME_SECTION: &str = "resume";
pub const TAGS_SECTION: &str = "tags";

/// Sections that are always top-level, relative to the path prefix
pub const WELL_KNOWN_SECTIONS: [&str; 3] = [ABOUT_SECTION, RESUME_SECTION, TAGS_SECTION];
