//! Generator module - renders the site graph to HTML files and copies assets

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{ContentItem, ContentType};
use crate::graph::{find_main_page_event, resolve_presenters, SiteGraph};
use crate::helpers::{full_url, item_path};
use crate::i18n;
use crate::templates::{ItemView, OgData, TemplateRenderer};
use crate::Site;

/// Content types that get a listing page and one page per item
const LISTED_TYPES: [ContentType; 4] = [
    ContentType::Events,
    ContentType::People,
    ContentType::Projects,
    ContentType::News,
];

/// Detail page template of a listed content type
fn detail_template(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Events => "event_detail.html",
        ContentType::People => "person_detail.html",
        ContentType::Projects => "project_detail.html",
        ContentType::News => "news_detail.html",
        ContentType::Pages => "page_detail.html",
    }
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::new(&site.template_dir)?;
        Ok(Self { site, renderer })
    }

    /// Render every page, then copy static files and resources
    pub fn generate(&self, graph: &SiteGraph) -> Result<()> {
        fs::create_dir_all(&self.site.output_dir)?;

        self.generate_index(graph)?;
        self.generate_pages(graph)?;
        self.generate_list_pages(graph)?;
        self.generate_detail_pages(graph)?;
        tracing::info!("All pages rendered");

        let static_out = self.site.output_dir.join("static");
        if copy_dir(&self.site.static_dir, &static_out)? {
            tracing::info!("Static files copied");
        }
        let resources_out = self
            .site
            .output_dir
            .join(self.site.config.resources_url.trim_matches('/'));
        if copy_dir(&self.site.resources_dir, &resources_out)? {
            tracing::info!("Resource files copied");
        }

        Ok(())
    }

    /// Create a base context with the whole graph as `site`
    fn create_base_context(&self, graph: &SiteGraph) -> Context {
        let mut context = Context::new();
        context.insert("site", graph);
        context
    }

    /// Open Graph data for the home page
    fn index_og_data(&self) -> OgData {
        let config = &self.site.config;
        OgData {
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.base_url.clone(),
            image: full_url(&config.base_url, &config.og_image),
            og_type: "website",
        }
    }

    /// Open Graph data for a page or item detail page
    fn og_data(
        &self,
        item: &ContentItem,
        path: &str,
        untitled: &str,
        og_type: &'static str,
    ) -> OgData {
        let config = &self.site.config;
        OgData {
            title: format!(
                "{} | {}",
                item.title.as_deref().unwrap_or(untitled),
                config.title
            ),
            description: item
                .summary
                .clone()
                .unwrap_or_else(|| config.description.clone()),
            url: full_url(&config.base_url, path),
            image: full_url(
                &config.base_url,
                item.image.as_deref().unwrap_or(&config.og_image),
            ),
            og_type,
        }
    }

    /// Home page with the featured event
    fn generate_index(&self, graph: &SiteGraph) -> Result<()> {
        let main_event = find_main_page_event(&graph.events, self.site.config.now());
        if let Some(event) = main_event {
            tracing::debug!("Featured event: {}", event.slug);
        }

        let mut context = self.create_base_context(graph);
        context.insert("main_event", &main_event.map(ItemView::plain));
        context.insert("og_data", &self.index_og_data());

        let html = self.renderer.render("index.html", &context)?;
        self.write_output("index.html", &html)
    }

    /// Standalone pages at the site root
    fn generate_pages(&self, graph: &SiteGraph) -> Result<()> {
        for page in &graph.pages {
            let path = format!("{}.html", page.slug);

            let mut context = self.create_base_context(graph);
            context.insert("page", &ItemView::plain(page));
            context.insert(
                "og_data",
                &self.og_data(page, &path, i18n::UNTITLED_PAGE, "website"),
            );

            let html = self.renderer.render("page_detail.html", &context)?;
            self.write_output(&path, &html)?;
        }
        Ok(())
    }

    /// `<type>/index.html` listing pages
    fn generate_list_pages(&self, graph: &SiteGraph) -> Result<()> {
        for content_type in LISTED_TYPES {
            let mut context = self.create_base_context(graph);
            context.insert("items", graph.collection(content_type));
            context.insert("title", &i18n::list_title(content_type));
            context.insert("content_type", content_type.as_str());

            let html = self.renderer.render("list_page.html", &context)?;
            self.write_output(&format!("{}/index.html", content_type), &html)?;
        }
        Ok(())
    }

    /// `<type>/<slug>.html` detail pages; events also get their presenters
    fn generate_detail_pages(&self, graph: &SiteGraph) -> Result<()> {
        let people = graph.people_index();

        for content_type in LISTED_TYPES {
            let template = detail_template(content_type);
            for item in graph.collection(content_type) {
                let presenter_details = match content_type {
                    ContentType::Events => resolve_presenters(item, &people),
                    _ => None,
                };
                let view = ItemView {
                    item,
                    presenter_details,
                };
                let path = item_path(content_type.as_str(), &item.slug);

                let mut context = self.create_base_context(graph);
                context.insert("item", &view);
                context.insert(
                    "og_data",
                    &self.og_data(item, &path, i18n::UNTITLED_ITEM, "article"),
                );

                let html = self.renderer.render(template, &context)?;
                self.write_output(&path, &html)?;
            }
            tracing::debug!(
                "Generated {} {} pages",
                graph.collection(content_type).len(),
                content_type
            );
        }
        Ok(())
    }

    /// Write a file under the output directory
    fn write_output(&self, relative: &str, html: &str) -> Result<()> {
        let output_path = self.site.output_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Recursively copy `src` into `dest`. Returns false when `src` does not exist.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<bool> {
    if !src.is_dir() {
        return Ok(false);
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
        }
    }

    Ok(true)
}
