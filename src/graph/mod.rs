//! Site graph - every loaded collection plus the site metadata templates see

mod featured;
mod presenters;

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::{SiteConfig, SocialLink};
use crate::content::loader::ContentLoader;
use crate::content::{ContentItem, ContentType};
use crate::Site;

pub use featured::find_main_page_event;
pub use presenters::{resolve_presenters, PeopleIndex};

/// Site-wide metadata exposed to templates as `site.site_config`
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    pub title: String,
    pub base_url: String,
    pub description: String,
    pub og_image: String,
    /// Unknown `_config.yml` keys, for custom templates
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl From<&SiteConfig> for SiteMeta {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            base_url: config.base_url.clone(),
            description: config.description.clone(),
            og_image: config.og_image.clone(),
            extra: config.extra.clone(),
        }
    }
}

/// All content of one build. Rebuilt from disk on every run.
#[derive(Debug, Clone, Serialize)]
pub struct SiteGraph {
    pub events: Vec<ContentItem>,
    pub people: Vec<ContentItem>,
    pub projects: Vec<ContentItem>,
    pub pages: Vec<ContentItem>,
    pub news: Vec<ContentItem>,
    pub site_config: SiteMeta,
    pub social_links: Vec<SocialLink>,
}

impl SiteGraph {
    /// Load every content type and assemble the graph
    pub fn load(site: &Site) -> Result<Self> {
        let loader = ContentLoader::new(site);
        let mut graph = Self::empty(&site.config);
        for content_type in ContentType::ALL {
            *graph.collection_mut(content_type) = loader.load(content_type)?;
        }
        Ok(graph)
    }

    /// A graph with no content
    pub fn empty(config: &SiteConfig) -> Self {
        Self {
            events: Vec::new(),
            people: Vec::new(),
            projects: Vec::new(),
            pages: Vec::new(),
            news: Vec::new(),
            site_config: SiteMeta::from(config),
            social_links: config.social_links.clone(),
        }
    }

    /// Items of one content type, in load order
    pub fn collection(&self, content_type: ContentType) -> &[ContentItem] {
        match content_type {
            ContentType::Events => &self.events,
            ContentType::People => &self.people,
            ContentType::Projects => &self.projects,
            ContentType::Pages => &self.pages,
            ContentType::News => &self.news,
        }
    }

    fn collection_mut(&mut self, content_type: ContentType) -> &mut Vec<ContentItem> {
        match content_type {
            ContentType::Events => &mut self.events,
            ContentType::People => &mut self.people,
            ContentType::Projects => &mut self.projects,
            ContentType::Pages => &mut self.pages,
            ContentType::News => &mut self.news,
        }
    }

    /// People keyed by slug
    pub fn people_index(&self) -> PeopleIndex<'_> {
        PeopleIndex::new(&self.people)
    }
}
