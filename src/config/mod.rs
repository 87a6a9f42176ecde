//! Configuration module

mod error;
mod site;

pub use error::ConfigError;
pub use site::FooterConfig;
pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::ResumeConfig;
pub use site::SiteConfig;
