//! Header selection for the shared page layout

use serde::Serialize;

use super::{PathPrefix, WELL_KNOWN_SECTIONS};

/// Which header the layout renders above a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVariant {
    /// Large site title, used on top-level pages
    Title,
    /// "Back to Home" link, used on content pages such as posts
    BackLink,
}

impl HeaderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderVariant::Title => "title",
            HeaderVariant::BackLink => "back_link",
        }
    }
}

/// Routing data for a single page render
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    /// The route being rendered, prefix included
    pub current_path: &'a str,
    /// Paginated listing paths, supplied by the generator
    pub known_top_level_paths: &'a [String],
}

impl<'a> NavigationContext<'a> {
    pub fn new(current_path: &'a str, known_top_level_paths: &'a [String]) -> Self {
        Self {
            current_path,
            known_top_level_paths,
        }
    }

    /// Select the header for this page
    pub fn header(&self, prefix: &PathPrefix) -> HeaderVariant {
        select_header(self.current_path, self.known_top_level_paths, prefix)
    }
}

/// The root, about, resume and tags paths, qualified by `prefix`
pub fn well_known_paths(prefix: &PathPrefix) -> [String; 4] {
    let [about, resume, tags] = WELL_KNOWN_SECTIONS;
    [
        prefix.root(),
        prefix.qualify(&format!("{}/", about)),
        prefix.qualify(&format!("{}/", resume)),
        prefix.qualify(&format!("{}/", tags)),
    ]
}

/// Choose between the title header and the back link
///
/// Paths are compared verbatim. Anything that is neither a well-known path
/// nor one of `known_top_level_paths` (including an empty path) is treated
/// as a content page.
pub fn select_header(
    current_path: &str,
    known_top_level_paths: &[String],
    prefix: &PathPrefix,
) -> HeaderVariant {
    let is_listing = known_top_level_paths.iter().any(|p| p == current_path);
    let is_well_known = well_known_paths(prefix).iter().any(|p| p == current_path);

    if is_listing || is_well_known {
        HeaderVariant::Title
    } else {
        HeaderVariant::BackLink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_well_known_paths_get_title() {
        let prefix = PathPrefix::default();
        for path in ["/", "/about/", "/resume/", "/tags/"] {
            assert_eq!(select_header(path, &[], &prefix), HeaderVariant::Title);
        }
    }

    #[test]
    fn test_well_known_paths_respect_prefix() {
        let prefix = PathPrefix::new("/blog");
        for path in ["/blog/", "/blog/about/", "/blog/resume/", "/blog/tags/"] {
            assert_eq!(select_header(path, &[], &prefix), HeaderVariant::Title);
        }
        // Unprefixed paths are no longer top-level
        assert_eq!(select_header("/about/", &[], &prefix), HeaderVariant::BackLink);
        assert_eq!(select_header("/", &[], &prefix), HeaderVariant::BackLink);
    }

    #[test]
    fn test_about_with_empty_list() {
        let prefix = PathPrefix::default();
        assert_eq!(select_header("/about/", &[], &prefix), HeaderVariant::Title);
    }

    #[test]
    fn test_post_is_back_link() {
        let prefix = PathPrefix::default();
        let known = paths(&["/posts/page-2/"]);
        assert_eq!(
            select_header("/posts/my-trip/", &known, &prefix),
            HeaderVariant::BackLink
        );
    }

    #[test]
    fn test_listing_page_is_title() {
        let prefix = PathPrefix::default();
        let known = paths(&["/posts/page-2/"]);
        assert_eq!(
            select_header("/posts/page-2/", &known, &prefix),
            HeaderVariant::Title
        );
    }

    #[test]
    fn test_empty_and_malformed_paths() {
        let prefix = PathPrefix::default();
        let known = paths(&["/posts/"]);
        assert_eq!(select_header("", &known, &prefix), HeaderVariant::BackLink);
        assert_eq!(select_header("about", &known, &prefix), HeaderVariant::BackLink);
        assert_eq!(select_header("/about", &known, &prefix), HeaderVariant::BackLink);
        assert_eq!(select_header("//", &known, &prefix), HeaderVariant::BackLink);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let prefix = PathPrefix::new("site");
        let known = paths(&["/site/posts/", "/site/posts/page-2/"]);
        for path in ["/site/", "/site/posts/page-2/", "/site/posts/a/", ""] {
            let first = select_header(path, &known, &prefix);
            let second = select_header(path, &known, &prefix);
            assert_eq!(first, second);
        }
        assert_eq!(known, paths(&["/site/posts/", "/site/posts/page-2/"]));
    }

    #[test]
    fn test_navigation_context() {
        let known = paths(&["/posts/"]);
        let prefix = PathPrefix::default();
        let ctx = NavigationContext::new("/posts/", &known);
        assert_eq!(ctx.header(&prefix), HeaderVariant::Title);
        let ctx = NavigationContext::new("/tags/rust/", &known);
        assert_eq!(ctx.header(&prefix), HeaderVariant::BackLink);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&HeaderVariant::BackLink).unwrap(),
            "\"back_link\""
        );
        assert_eq!(HeaderVariant::Title.as_str(), "title");
    }
}
