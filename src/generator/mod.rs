//! Generator module - renders the listing and post pages to static HTML
//!
//! The build walks the content repository's pagination until it is
//! exhausted, writing one listing page per fetched batch, then renders
//! one page per listed post. Any fetch failure aborts the build; there
//! is no partial-build recovery.

use anyhow::{bail, Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;

use crate::client::ContentApi;
use crate::content::richtext;
use crate::detail::{self, DetailPage};
use crate::helpers::date;
use crate::listing::{self, Listing};
use crate::templates::{PostPageData, SectionData, SiteData, TemplateRenderer};
use crate::Startrail;

/// Output path of the shared "generating" page, relative to public_dir.
/// The preview server returns it for post slugs that have no page yet.
pub const FALLBACK_PAGE: &str = "post/_generating/index.html";

/// Static site generator
pub struct Generator {
    app: Startrail,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Startrail) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self, api: &dyn ContentApi) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;

        let site = self.build_site_data();

        // Listing pages: one per fetched batch, each showing the
        // cumulative display list.
        let mut listing = listing::initial_load(api, &self.app.config)
            .await
            .context("failed to load the post listing")?;
        self.write_listing_page(&listing, &site)?;

        while listing.has_more() {
            listing = listing::load_more(api, &listing, &self.app.config)
                .await
                .context("failed to load the next listing page")?;
            self.write_listing_page(&listing, &site)?;
        }

        tracing::info!(
            "Rendered {} listing page(s) for {} posts",
            listing.page.max(1),
            listing.posts.len()
        );

        // One detail page per listed post.
        for summary in &listing.posts {
            self.generate_post_page(api, &summary.uid, &site).await?;
        }

        // Shared fallback for slugs not generated yet.
        self.write_fallback_page(&site)?;

        Ok(())
    }

    fn build_site_data(&self) -> SiteData {
        SiteData {
            title: self.app.config.title.clone(),
            description: self.app.config.description.clone(),
            root: self.app.config.root.clone(),
        }
    }

    /// Write the listing page for the current cursor position.
    ///
    /// Page 1 is the site index; later pages land under the pagination
    /// directory. The "load more" link is present exactly when a further
    /// page exists.
    fn write_listing_page(&self, listing: &Listing, site: &SiteData) -> Result<()> {
        let page_num = listing.page.max(1);

        let next_link = if listing.has_more() {
            format!(
                "{}{}/{}/",
                self.app.config.root,
                self.app.config.pagination_dir,
                page_num + 1
            )
        } else {
            String::new()
        };

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", &listing.posts);
        context.insert("next_link", &next_link);

        let html = self.renderer.render("index.html", &context)?;

        let output_path = if page_num == 1 {
            self.app.public_dir.join("index.html")
        } else {
            self.app
                .public_dir
                .join(format!("{}/{}/index.html", self.app.config.pagination_dir, page_num))
        };
        write_file(&output_path, &html)?;

        tracing::debug!("Wrote listing page {} ({} posts)", page_num, listing.posts.len());
        Ok(())
    }

    /// Load one post and write its detail page.
    ///
    /// A uid that was just listed must resolve; anything else means the
    /// repository and the listing disagree, which is fatal at build time.
    async fn generate_post_page(
        &self,
        api: &dyn ContentApi,
        uid: &str,
        site: &SiteData,
    ) -> Result<()> {
        let post = match detail::load_by_slug(api, uid)
            .await
            .with_context(|| format!("failed to load post '{}'", uid))?
        {
            DetailPage::Ready(post) => post,
            DetailPage::Generating => bail!("listed post '{}' does not resolve", uid),
        };

        let read_time = detail::reading_time(&post, self.app.config.words_per_minute);

        let data = PostPageData {
            title: post.title.clone(),
            author: post.author.clone(),
            date: post
                .first_publication_date
                .as_deref()
                .map(|raw| date::display_date(raw, &self.app.config.date_format))
                .unwrap_or_default(),
            banner_url: post.banner_url.clone().unwrap_or_default(),
            read_time: format!("{} min", read_time),
            sections: post
                .content
                .iter()
                .map(|section| SectionData {
                    heading: section.heading.clone().unwrap_or_default(),
                    body_html: richtext::render_rich_content(&section.body),
                })
                .collect(),
        };

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", &data);

        let html = self.renderer.render("post.html", &context)?;
        let output_path = self
            .app
            .public_dir
            .join(format!("post/{}/index.html", uid));
        write_file(&output_path, &html)?;

        tracing::debug!("Wrote post page for '{}'", uid);
        Ok(())
    }

    fn write_fallback_page(&self, site: &SiteData) -> Result<()> {
        let mut context = Context::new();
        context.insert("site", site);

        let html = self.renderer.render("fallback.html", &context)?;
        write_file(&self.app.public_dir.join(FALLBACK_PAGE), &html)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

/// Resolve the on-disk page for a post slug
pub fn post_page_path(public_dir: &Path, slug: &str) -> PathBuf {
    public_dir.join("post").join(slug).join("index.html")
}
