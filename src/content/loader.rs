//! Content loader - loads one content-type directory into items

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{rewrite_resource_links, ContentItem, ContentType, FrontMatter, MarkdownRenderer};
use crate::Site;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::new(&site.config.highlight);
        Self { site, renderer }
    }

    /// Load every `.md` file of a content type.
    ///
    /// A missing directory is an empty collection. Events and news are sorted
    /// newest first; other types keep directory order.
    pub fn load(&self, content_type: ContentType) -> Result<Vec<ContentItem>> {
        let dir = self.site.content_dir.join(content_type.as_str());
        if !dir.is_dir() {
            tracing::debug!("No {} directory at {:?}", content_type, dir);
            return Ok(Vec::new());
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("Failed to read {:?}", dir))?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                items.push(self.load_item(path, content_type)?);
            }
        }

        if content_type.is_dated() {
            // Stable: equal dates keep directory order
            items.sort_by(|a, b| b.date_obj.cmp(&a.date_obj));
        }

        tracing::info!("Loaded {} items from '{}'", items.len(), content_type);
        Ok(items)
    }

    /// Load a single item from a file
    fn load_item(&self, path: &Path, content_type: ContentType) -> Result<ContentItem> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let text = rewrite_resource_links(&text, &self.site.config.resources_url);
        let (fm, body) = FrontMatter::parse(&text);

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let html = self.renderer.render(body)?;

        let mut item = ContentItem::new(slug, html, fm);
        item.source = path.to_path_buf();

        if content_type.is_dated() {
            if let Some(date) = &item.date {
                item.date_obj = Some(parse_date(date).unwrap_or_else(|| {
                    tracing::warn!(
                        "Invalid date format '{}' in {:?}. Use YYYY-MM-DD.",
                        date,
                        path.file_name().unwrap_or_default()
                    );
                    self.site.config.now()
                }));
            }
        }

        Ok(item)
    }
}

/// Parse a `YYYY-MM-DD` front-matter date as midnight
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
