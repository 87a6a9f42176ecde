//! Generator module - renders every route of the site into the public directory

use anyhow::{anyhow, bail, Result};
use chrono::Datelike;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;
use walkdir::WalkDir;

use crate::content::loader::is_markdown_file;
use crate::content::{Page, Post, Tag};
use crate::helpers::{date_xml, format_date, format_naive_date, full_url_for, url_for};
use crate::route::{
    HeaderVariant, NavigationContext, ABOUT_SECTION, RESUME_SECTION, TAGS_SECTION,
};
use crate::templates::{
    ConfigData, HeaderData, HomeData, MenuItem, NavPost, PaginationData, PostData, ResumeData,
    TagData, TemplateRenderer, STYLESHEET,
};
use crate::Site;

/// Number of posts included in the Atom feed
const FEED_LIMIT: usize = 20;

/// A page that was written, with the header it was rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoute {
    /// URL path, prefix included
    pub path: String,
    pub header: HeaderVariant,
}

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    ///
    /// `posts` must already be sorted newest first with one post per path,
    /// as [`ContentLoader::load_posts`](crate::content::loader::ContentLoader::load_posts)
    /// returns them. Nothing is written when two routes would share a path.
    pub fn generate(&self, posts: &[Post], pages: &[Page]) -> Result<Vec<RenderedRoute>> {
        let listing_paths = self.listing_paths(posts.len());
        let tags = Tag::collect(posts, TAGS_SECTION);
        let pages = self.routable_pages(pages, posts, &tags, listing_paths.len());

        let planned = self.route_plan(posts, &pages, &tags, &listing_paths);
        let mut seen = HashSet::new();
        if let Some(duplicate) = planned.iter().find(|r| !seen.insert(r.path.as_str())) {
            bail!("Route {} would be written more than once", duplicate.path);
        }

        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_static_files()?;
        self.copy_post_assets()?;
        fs::write(self.site.public_dir.join("style.css"), STYLESHEET)?;

        let mut routes = Vec::new();

        routes.push(self.generate_home(&listing_paths)?);
        routes.push(self.generate_resume(&listing_paths)?);
        routes.extend(self.generate_pages(&pages, &listing_paths)?);
        routes.extend(self.generate_listing_pages(posts, &listing_paths)?);
        routes.extend(self.generate_post_pages(posts, &listing_paths)?);
        routes.push(self.generate_tags_index(&tags, &listing_paths)?);
        routes.extend(self.generate_tag_pages(posts, &tags, &listing_paths)?);

        self.generate_atom_feed(posts)?;

        tracing::info!("Generated {} pages", routes.len());
        Ok(routes)
    }

    /// Paths of every paginated blog listing page, prefix included
    ///
    /// Page 1 is `/{blog_dir}/`, page N is `/{blog_dir}/page-N/`. There is
    /// always at least one listing page.
    pub fn listing_paths(&self, post_count: usize) -> Vec<String> {
        let total = post_count.div_ceil(self.site.config.per_page).max(1);
        (1..=total)
            .map(|n| url_for(&self.site.config, &listing_path(&self.site.config.blog_dir, n)))
            .collect()
    }

    /// Every route `generate` would write, in the same order, without
    /// rendering anything
    pub fn plan_routes(&self, posts: &[Post], pages: &[Page]) -> Vec<RenderedRoute> {
        let listing_paths = self.listing_paths(posts.len());
        let tags = Tag::collect(posts, TAGS_SECTION);
        let pages = self.routable_pages(pages, posts, &tags, listing_paths.len());
        self.route_plan(posts, &pages, &tags, &listing_paths)
    }

    fn route_plan(
        &self,
        posts: &[Post],
        pages: &[&Page],
        tags: &[Tag],
        listing_paths: &[String],
    ) -> Vec<RenderedRoute> {
        let config = &self.site.config;

        let mut site_paths = vec!["/".to_string(), format!("/{}/", RESUME_SECTION)];
        site_paths.extend(pages.iter().map(|p| p.path.clone()));
        site_paths.extend((1..=listing_paths.len()).map(|n| listing_path(&config.blog_dir, n)));
        site_paths.extend(posts.iter().map(|p| p.path.clone()));
        site_paths.push(format!("/{}/", TAGS_SECTION));
        site_paths.extend(tags.iter().map(|t| t.path.clone()));

        site_paths
            .iter()
            .map(|site_path| {
                let path = url_for(config, site_path);
                let header = NavigationContext::new(&path, listing_paths).header(&config.path_prefix);
                RenderedRoute { path, header }
            })
            .collect()
    }

    /// Pages that get a route of their own
    ///
    /// A page loses to any generated route, to a post, and to an earlier
    /// page with the same path.
    fn routable_pages<'p>(
        &self,
        pages: &'p [Page],
        posts: &[Post],
        tags: &[Tag],
        listing_count: usize,
    ) -> Vec<&'p Page> {
        let blog_dir = &self.site.config.blog_dir;
        let mut claimed: HashSet<String> = [
            "/".to_string(),
            format!("/{}/", RESUME_SECTION),
            format!("/{}/", TAGS_SECTION),
        ]
        .into_iter()
        .collect();
        claimed.extend((1..=listing_count).map(|n| listing_path(blog_dir, n)));
        claimed.extend(tags.iter().map(|t| t.path.clone()));
        claimed.extend(posts.iter().map(|p| p.path.clone()));

        pages
            .iter()
            .filter(|page| {
                if claimed.insert(page.path.clone()) {
                    true
                } else {
                    tracing::warn!(
                        "Skipping {}: {} is already generated",
                        page.source,
                        page.path
                    );
                    false
                }
            })
            .collect()
    }

    fn config_data(&self) -> ConfigData {
        let config = &self.site.config;
        ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            keywords: config.keywords.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            built_with: config.footer.built_with.clone(),
            built_with_url: config.footer.built_with_url.clone(),
        }
    }

    fn menu_data(&self, current_path: &str) -> Vec<MenuItem> {
        self.site
            .config
            .menu()
            .into_iter()
            .map(|(name, path)| {
                let path = url_for(&self.site.config, &path);
                MenuItem {
                    active: path == current_path,
                    name,
                    path,
                }
            })
            .collect()
    }

    /// Create the context shared by every page
    ///
    /// `site_path` is the route without the path prefix.
    fn create_base_context(
        &self,
        site_path: &str,
        listing_paths: &[String],
    ) -> (Context, String, HeaderVariant) {
        let config = &self.site.config;
        let current_path = url_for(config, site_path);
        let header = NavigationContext::new(&current_path, listing_paths).header(&config.path_prefix);

        let mut context = Context::new();
        context.insert("config", &self.config_data());
        context.insert(
            "header",
            &HeaderData {
                variant: header,
                title: config.title.clone(),
                home_link: config.path_prefix.root(),
            },
        );
        context.insert("menu", &self.menu_data(&current_path));
        context.insert("current_path", &current_path);
        context.insert("current_year", &chrono::Local::now().year().to_string());
        context.insert("stylesheet", &url_for(config, "style.css"));
        context.insert("feed", &url_for(config, "atom.xml"));
        context.insert("page_title", "");
        context.insert("page_description", &config.description);

        (context, current_path, header)
    }

    /// Render a template and write it to `{public}/{site_path}/index.html`
    fn write_page(
        &self,
        template: &str,
        context: &Context,
        site_path: &str,
        current_path: String,
        header: HeaderVariant,
    ) -> Result<RenderedRoute> {
        let html = self.renderer.render(template, context)?;

        let clean_path = site_path.trim_matches('/');
        let output_path = self.site.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?} ({})", output_path, header.as_str());

        Ok(RenderedRoute {
            path: current_path,
            header,
        })
    }

    fn generate_home(&self, listing_paths: &[String]) -> Result<RenderedRoute> {
        let config = &self.site.config;
        let (mut context, current_path, header) = self.create_base_context("/", listing_paths);

        context.insert("page_title", "Home");
        context.insert(
            "home",
            &HomeData {
                greeting: config.home.greeting.clone(),
                intro: config.home.intro.clone(),
                image: config.home.image.as_deref().map(|i| url_for(config, i)),
                image_alt: config.home.image_alt.clone(),
                caption: config.home.caption.clone(),
            },
        );

        self.write_page("home.html", &context, "/", current_path, header)
    }

    fn generate_resume(&self, listing_paths: &[String]) -> Result<RenderedRoute> {
        let config = &self.site.config;
        let site_path = format!("/{}/", RESUME_SECTION);
        let (mut context, current_path, header) =
            self.create_base_context(&site_path, listing_paths);

        context.insert("page_title", "Resume");
        context.insert(
            "resume",
            &ResumeData {
                intro: config.resume.intro.clone(),
                url: config.resume.url.as_deref().map(|u| url_for(config, u)),
                label: config.resume.label.clone(),
                updated: config
                    .resume
                    .updated
                    .map(|d| format_naive_date(&d, &config.date_format)),
            },
        );

        self.write_page("resume.html", &context, &site_path, current_path, header)
    }

    /// Generate standalone pages (about, and any other markdown page)
    fn generate_pages(
        &self,
        pages: &[&Page],
        listing_paths: &[String],
    ) -> Result<Vec<RenderedRoute>> {
        let mut routes = Vec::new();

        for page in pages {
            let (mut context, current_path, header) =
                self.create_base_context(&page.path, listing_paths);
            context.insert("page_title", &page.title);
            context.insert("page_description", &page.content);
            context.insert("page_content", &page.content);

            routes.push(self.write_page("page.html", &context, &page.path, current_path, header)?);
        }

        let about = format!("/{}/", ABOUT_SECTION);
        if !pages.iter().any(|p| p.path == about) {
            tracing::warn!("No about page found in {:?}", self.site.source_dir);
        }

        Ok(routes)
    }

    /// Generate the paginated blog listing
    fn generate_listing_pages(
        &self,
        posts: &[Post],
        listing_paths: &[String],
    ) -> Result<Vec<RenderedRoute>> {
        let config = &self.site.config;
        let per_page = config.per_page;
        let total_pages = listing_paths.len();
        let mut routes = Vec::new();

        for page_num in 1..=total_pages {
            let start = ((page_num - 1) * per_page).min(posts.len());
            let end = (start + per_page).min(posts.len());
            let page_posts: Vec<PostData> =
                posts[start..end].iter().map(|p| self.post_data(p)).collect();

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                prev_link: if page_num > 1 {
                    listing_paths[page_num - 2].clone()
                } else {
                    String::new()
                },
                next_link: listing_paths.get(page_num).cloned().unwrap_or_default(),
            };

            let site_path = listing_path(&config.blog_dir, page_num);
            let (mut context, current_path, header) =
                self.create_base_context(&site_path, listing_paths);
            context.insert("page_title", "Blog");
            context.insert("posts", &page_posts);
            context.insert("pagination", &pagination);

            routes.push(self.write_page("blog.html", &context, &site_path, current_path, header)?);
        }

        Ok(routes)
    }

    /// Generate individual post pages
    fn generate_post_pages(
        &self,
        posts: &[Post],
        listing_paths: &[String],
    ) -> Result<Vec<RenderedRoute>> {
        let mut routes = Vec::new();

        for (i, post) in posts.iter().enumerate() {
            // Posts are newest first: "previous" is the older one
            let prev_post = posts.get(i + 1).map(|p| self.nav_post(p));
            let next_post = i.checked_sub(1).and_then(|j| posts.get(j)).map(|p| self.nav_post(p));

            let (mut context, current_path, header) =
                self.create_base_context(&post.path, listing_paths);
            context.insert("page_title", &post.title);
            context.insert(
                "page_description",
                post.summary().unwrap_or(post.content.as_str()),
            );
            context.insert("post", &self.post_data(post));
            if let Some(ref prev) = prev_post {
                context.insert("prev_post", prev);
            }
            if let Some(ref next) = next_post {
                context.insert("next_post", next);
            }

            routes.push(self.write_page("post.html", &context, &post.path, current_path, header)?);
        }

        Ok(routes)
    }

    fn generate_tags_index(
        &self,
        tags: &[Tag],
        listing_paths: &[String],
    ) -> Result<RenderedRoute> {
        let site_path = format!("/{}/", TAGS_SECTION);
        let (mut context, current_path, header) =
            self.create_base_context(&site_path, listing_paths);

        let all_tags: Vec<TagData> = tags.iter().map(|t| self.tag_data(t)).collect();
        context.insert("page_title", "Tags");
        context.insert("all_tags", &all_tags);

        self.write_page("tags.html", &context, &site_path, current_path, header)
    }

    fn generate_tag_pages(
        &self,
        posts: &[Post],
        tags: &[Tag],
        listing_paths: &[String],
    ) -> Result<Vec<RenderedRoute>> {
        let tags_index = url_for(&self.site.config, &format!("/{}/", TAGS_SECTION));
        let mut routes = Vec::new();

        for tag in tags {
            let tag_posts: Vec<PostData> = posts
                .iter()
                .filter(|p| tag.matches(p))
                .map(|p| self.post_data(p))
                .collect();

            let (mut context, current_path, header) =
                self.create_base_context(&tag.path, listing_paths);
            context.insert("page_title", &tag.name);
            context.insert("tag", &self.tag_data(tag));
            context.insert("posts", &tag_posts);
            context.insert("tags_index", &tags_index);

            routes.push(self.write_page("tag.html", &context, &tag.path, current_path, header)?);
        }

        tracing::info!("Generated {} tag pages", tags.len());
        Ok(routes)
    }

    fn post_data(&self, post: &Post) -> PostData {
        let config = &self.site.config;
        PostData {
            title: post.title.clone(),
            date: format_date(&post.date, &config.date_format),
            date_iso: date_xml(&post.date),
            path: url_for(config, &post.path),
            description: post.description.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            tags: post
                .tags
                .iter()
                .filter(|t| !slug::slugify(t.trim()).is_empty())
                .map(|t| self.tag_data(&Tag::new(t.trim(), TAGS_SECTION)))
                .collect(),
        }
    }

    fn nav_post(&self, post: &Post) -> NavPost {
        NavPost {
            title: post.title.clone(),
            path: url_for(&self.site.config, &post.path),
        }
    }

    fn tag_data(&self, tag: &Tag) -> TagData {
        TagData {
            name: tag.name.clone(),
            path: url_for(&self.site.config, &tag.path),
            count: tag.count,
        }
    }

    /// Generate the Atom feed of recent posts
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.site.config;
        let home = full_url_for(config, "/");

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", home));
        let updated = posts
            .iter()
            .map(|p| p.updated.unwrap_or(p.date))
            .max()
            .unwrap_or_else(chrono::Local::now);
        feed.push_str(&format!("  <updated>{}</updated>\n", date_xml(&updated)));
        feed.push_str(&format!("  <id>{}</id>\n", home));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts.iter().take(FEED_LIMIT) {
            let link = full_url_for(config, &post.path);
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!("    <published>{}</published>\n", date_xml(&post.date)));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                date_xml(&post.updated.unwrap_or(post.date))
            ));
            let content = post.excerpt.as_ref().unwrap_or(&post.content);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        fs::write(self.site.public_dir.join("atom.xml"), feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Copy the static directory into the public directory as-is
    fn copy_static_files(&self) -> Result<()> {
        copy_tree(&self.site.static_dir, &self.site.public_dir, |relative| {
            Some(relative.to_path_buf())
        })
    }

    /// Copy non-markdown files that live beside posts
    ///
    /// Directories are slugified the same way post paths are, so an asset
    /// ends up next to the page of the post it belongs to.
    fn copy_post_assets(&self) -> Result<()> {
        let dest = self.site.public_dir.join(&self.site.config.blog_dir);
        copy_tree(&self.site.blog_source_dir, &dest, |relative| {
            if is_markdown_file(relative) {
                return None;
            }
            let file_name = relative.file_name()?;
            let mut target: PathBuf = relative
                .parent()
                .map(|p| {
                    p.components()
                        .filter_map(|c| c.as_os_str().to_str())
                        .map(slug::slugify)
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            target.push(file_name);
            Some(target)
        })
    }
}

/// Site-relative path of listing page `n` (1-based)
pub fn listing_path(blog_dir: &str, n: usize) -> String {
    if n <= 1 {
        format!("/{}/", blog_dir)
    } else {
        format!("/{}/page-{}/", blog_dir, n)
    }
}

/// Whether a site path is in the blog listing namespace
///
/// `/{blog_dir}/` and every `/{blog_dir}/page-N/` belong to the listing,
/// however many listing pages the site currently has.
pub fn is_listing_path(blog_dir: &str, path: &str) -> bool {
    let Some(rest) = path
        .strip_prefix('/')
        .and_then(|p| p.strip_prefix(blog_dir))
        .and_then(|p| p.strip_prefix('/'))
    else {
        return false;
    };
    match rest.strip_prefix("page-").and_then(|r| r.strip_suffix('/')) {
        Some(n) => !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()),
        None => rest.is_empty(),
    }
}

/// Copy every file under `from` into `to`
///
/// `relocate` maps a path relative to `from` to its path relative to `to`,
/// or `None` to skip the file.
fn copy_tree(from: &Path, to: &Path, relocate: impl Fn(&Path) -> Option<PathBuf>) -> Result<()> {
    if !from.exists() {
        return Ok(());
    }

    let mut copied = 0;
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(from)?;
        if relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            continue;
        }
        let Some(target) = relocate(relative) else {
            continue;
        };

        let dest = to.join(target);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    tracing::debug!("Copied {} files from {:?}", copied, from);
    Ok(())
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::loader::ContentLoader;
    use crate::route::PathPrefix;
    use std::path::PathBuf;

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_site(dir: &Path, config: &str) -> Site {
        write(dir.join("_config.yml"), config);
        write(
            dir.join("content/about.md"),
            "---\ntitle: About\n---\nI like hiking.",
        );
        write(
            dir.join("content/blog/2020/02/08/index.md"),
            "---\ntitle: Dynamic Arrays\ndate: 2020-02-08\ntags: [Python, Data Structures]\n---\nLists.\n<!-- more -->\nMore.",
        );
        write(
            dir.join("content/blog/2020/02/09/index.md"),
            "---\ntitle: Stacks\ndate: 2020-02-09\ntags: python\n---\nPush and pop.",
        );
        write(
            dir.join("content/blog/2020/02/10/index.md"),
            "---\ntitle: Queues\ndate: 2020-02-10\n---\nFirst in, first out.",
        );
        write(
            dir.join("content/blog/2020/02/09/sample_stack.py"),
            "class Stack:\n    pass\n",
        );
        write(dir.join("static/torres.svg"), "<svg></svg>");
        Site::new(dir).unwrap()
    }

    fn build(site: &Site) -> Vec<RenderedRoute> {
        let loader = ContentLoader::new(site);
        let posts = loader.load_posts().unwrap();
        let pages = loader.load_pages().unwrap();
        Generator::new(site).unwrap().generate(&posts, &pages).unwrap()
    }

    fn header_of(routes: &[RenderedRoute], path: &str) -> HeaderVariant {
        routes
            .iter()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no route {}", path))
            .header
    }

    fn read(site: &Site, path: &str) -> String {
        fs::read_to_string(site.public_dir.join(path)).unwrap()
    }

    #[test]
    fn test_listing_paths() {
        let mut config = SiteConfig::default();
        config.per_page = 2;
        let site = Site::with_config(PathBuf::from("/tmp/site"), config);
        let generator = Generator::new(&site).unwrap();

        assert_eq!(generator.listing_paths(0), vec!["/posts/"]);
        assert_eq!(generator.listing_paths(2), vec!["/posts/"]);
        assert_eq!(
            generator.listing_paths(5),
            vec!["/posts/", "/posts/page-2/", "/posts/page-3/"]
        );
    }

    #[test]
    fn test_listing_paths_with_prefix() {
        let mut config = SiteConfig::default();
        config.per_page = 1;
        config.path_prefix = PathPrefix::new("site");
        let site = Site::with_config(PathBuf::from("/tmp/site"), config);
        let generator = Generator::new(&site).unwrap();
        assert_eq!(
            generator.listing_paths(2),
            vec!["/site/posts/", "/site/posts/page-2/"]
        );
    }

    #[test]
    fn test_generate_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = sample_site(
            dir.path(),
            "title: Federico Ciner\nauthor: Federico Ciner\nper_page: 2\nresume:\n  url: https://example.com/cv.pdf\n  updated: 2020-02-05\nhome:\n  image: /torres.svg\n  image_alt: Hiking in Torres del Paine.\n",
        );
        let routes = build(&site);

        for path in ["/", "/about/", "/resume/", "/tags/", "/posts/", "/posts/page-2/"] {
            assert_eq!(header_of(&routes, path), HeaderVariant::Title, "{}", path);
        }
        for path in ["/posts/2020/02/08/", "/tags/python/", "/tags/data-structures/"] {
            assert_eq!(header_of(&routes, path), HeaderVariant::BackLink, "{}", path);
        }

        let home = read(&site, "index.html");
        assert!(home.contains(r#"<h1 class="site-title"><a href="/">Federico Ciner</a></h1>"#));
        assert!(home.contains("Hello."));
        assert!(home.contains(r#"src="/torres.svg""#));
        assert!(home.contains(r#"<a href="/" aria-current="page">Home</a>"#));

        let resume = read(&site, "resume/index.html");
        assert!(resume.contains("https://example.com/cv.pdf"));
        assert!(resume.contains("Last updated on February 5, 2020."));

        let post = read(&site, "posts/2020/02/08/index.html");
        assert!(post.contains("Back to Home"));
        assert!(post.contains("Dynamic Arrays"));
        assert!(post.contains(r#"href="/tags/python/""#));
        assert!(!post.contains("site-nav"));

        let listing = read(&site, "posts/index.html");
        assert!(listing.contains("Queues"));
        assert!(listing.contains("Stacks"));
        assert!(!listing.contains("Dynamic Arrays"));
        assert!(listing.contains(r#"href="/posts/page-2/""#));

        let tag = read(&site, "tags/python/index.html");
        assert!(tag.contains("2 posts tagged"));

        assert!(site.public_dir.join("posts/2020/02/09/sample_stack.py").exists());
        assert!(site.public_dir.join("torres.svg").exists());
        assert!(site.public_dir.join("style.css").exists());

        let feed = read(&site, "atom.xml");
        assert!(feed.contains("<title>Queues</title>"));
        assert!(feed.contains("http://example.com/posts/2020/02/10/"));

        let loader = ContentLoader::new(&site);
        let planned = Generator::new(&site)
            .unwrap()
            .plan_routes(&loader.load_posts().unwrap(), &loader.load_pages().unwrap());
        assert_eq!(planned, routes);
    }

    #[test]
    fn test_generate_with_path_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let site = sample_site(dir.path(), "path_prefix: /site/\n");
        let routes = build(&site);

        assert_eq!(header_of(&routes, "/site/"), HeaderVariant::Title);
        assert_eq!(header_of(&routes, "/site/about/"), HeaderVariant::Title);
        assert_eq!(header_of(&routes, "/site/posts/"), HeaderVariant::Title);
        assert_eq!(
            header_of(&routes, "/site/posts/2020/02/09/"),
            HeaderVariant::BackLink
        );

        // Output layout does not include the prefix, links do
        let post = read(&site, "posts/2020/02/09/index.html");
        assert!(post.contains(r#"<a href="/site/"><span class="button">Back to Home</span></a>"#));
        assert!(post.contains(r#"href="/site/style.css""#));
    }

    #[test]
    fn test_empty_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let routes = build(&site);

        assert_eq!(header_of(&routes, "/posts/"), HeaderVariant::Title);
        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("tags/index.html").exists());
        assert!(site.public_dir.join("atom.xml").exists());
    }

    #[test]
    fn test_reserved_page_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let site = sample_site(dir.path(), "title: Me\n");
        write(dir.path().join("content/resume.md"), "---\ntitle: Clash\n---\nNope.");
        let routes = build(&site);

        assert_eq!(routes.iter().filter(|r| r.path == "/resume/").count(), 1);
        assert!(!read(&site, "resume/index.html").contains("Nope."));
    }

    #[test]
    fn test_pages_do_not_overwrite_generated_routes() {
        let dir = tempfile::tempdir().unwrap();
        let site = sample_site(dir.path(), "per_page: 1\n");
        write(
            dir.path().join("content/tags/python.md"),
            "---\ntitle: Python notes\n---\nTAG PAGE BODY",
        );
        write(
            dir.path().join("content/posts/page-2.md"),
            "---\ntitle: Second\n---\nLISTING PAGE BODY",
        );
        let routes = build(&site);

        for path in ["/tags/python/", "/posts/page-2/"] {
            assert_eq!(routes.iter().filter(|r| r.path == path).count(), 1, "{}", path);
        }
        assert!(!read(&site, "tags/python/index.html").contains("TAG PAGE BODY"));
        assert!(read(&site, "tags/python/index.html").contains("posts tagged"));
        let listing = read(&site, "posts/page-2/index.html");
        assert!(!listing.contains("LISTING PAGE BODY"));
        assert!(listing.contains("Page 2 of 3"));
        assert_eq!(header_of(&routes, "/posts/page-2/"), HeaderVariant::Title);
    }

    #[test]
    fn test_listing_page_survives_post_named_like_it() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("_config.yml"), "per_page: 1\n");
        let blog = dir.path().join("content/blog");
        write(blog.join("page-2.md"), "---\ntitle: Sneaky\ndate: 2020-01-03\n---\nSNEAKY");
        write(blog.join("one.md"), "---\ntitle: One\ndate: 2020-01-01\n---\nx");
        write(blog.join("two.md"), "---\ntitle: Two\ndate: 2020-01-02\n---\ny");
        let site = Site::new(dir.path()).unwrap();
        let routes = build(&site);

        let at_page_2: Vec<_> = routes.iter().filter(|r| r.path == "/posts/page-2/").collect();
        assert_eq!(at_page_2.len(), 1);
        assert_eq!(at_page_2[0].header, HeaderVariant::Title);
        let listing = read(&site, "posts/page-2/index.html");
        assert!(listing.contains("Page 2 of 2"));
        assert!(!listing.contains("SNEAKY"));
    }

    #[test]
    fn test_duplicate_post_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let site = sample_site(dir.path(), "title: Me\n");
        let loader = ContentLoader::new(&site);
        let mut posts = loader.load_posts().unwrap();
        posts.push(posts[0].clone());

        let err = Generator::new(&site)
            .unwrap()
            .generate(&posts, &loader.load_pages().unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("/posts/2020/02/10/"));
        assert!(!site.public_dir.exists());
    }

    #[test]
    fn test_is_listing_path() {
        assert!(is_listing_path("posts", "/posts/"));
        assert!(is_listing_path("posts", "/posts/page-2/"));
        assert!(is_listing_path("posts", "/posts/page-17/"));
        assert!(!is_listing_path("posts", "/posts/page-/"));
        assert!(!is_listing_path("posts", "/posts/page-two/"));
        assert!(!is_listing_path("posts", "/posts/2020/page-2/"));
        assert!(!is_listing_path("posts", "/postscript/"));
        assert!(!is_listing_path("posts", "/about/"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
    }
}
