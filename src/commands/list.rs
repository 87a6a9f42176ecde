//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::Tag;
use crate::generator::Generator;
use crate::route::TAGS_SECTION;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    for line in render(site, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Build the listing as lines of text
pub fn render(site: &Site, content_type: &str) -> Result<Vec<String>> {
    let loader = ContentLoader::new(site);
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                lines.push(format!(
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source,
                    if post.draft { " (draft)" } else { "" }
                ));
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            lines.push(format!("Pages ({}):", pages.len()));
            for page in pages {
                lines.push(format!("  {} {} [{}]", page.path, page.title, page.source));
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let mut tags = Tag::collect(&posts, TAGS_SECTION);
            tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
            lines.push(format!("Tags ({}):", tags.len()));
            for tag in tags {
                lines.push(format!("  {} ({})", tag.name, tag.count));
            }
        }
        "route" | "routes" => {
            let posts = loader.load_posts()?;
            let pages = loader.load_pages()?;
            let routes = Generator::new(site)?.plan_routes(&posts, &pages);
            lines.push(format!("Routes ({}):", routes.len()));
            for route in routes {
                lines.push(format!("  {:<10} {}", route.header.as_str(), route.path));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, route",
                content_type
            );
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_posts() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(
            blog.join("a.md"),
            "---\ntitle: First\ndate: 2020-02-08\ntags: [python, rust]\n---\nA",
        )
        .unwrap();
        fs::write(
            blog.join("b.md"),
            "---\ntitle: Second\ndate: 2020-02-09\ntags: python\n---\nB",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_list_tags_by_count() {
        let (_dir, site) = site_with_posts();
        let lines = render(&site, "tags").unwrap();
        assert_eq!(lines, vec!["Tags (2):", "  python (2)", "  rust (1)"]);
    }

    #[test]
    fn test_list_routes_with_headers() {
        let (_dir, site) = site_with_posts();
        let lines = render(&site, "route").unwrap();
        assert!(lines.contains(&"  title      /".to_string()));
        assert!(lines.contains(&"  title      /posts/".to_string()));
        assert!(lines.contains(&"  back_link  /posts/a/".to_string()));
        assert!(lines.contains(&"  back_link  /tags/rust/".to_string()));
    }

    #[test]
    fn test_unknown_type() {
        let (_dir, site) = site_with_posts();
        assert!(render(&site, "category").is_err());
    }
}
