//! Content item model

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;

/// One loaded content file: an event, person, project, page or news entry.
///
/// Known front-matter fields are typed; every other key is kept in `extra`
/// and flattened back into the item when serialized for templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentItem {
    /// File name without extension
    pub slug: String,

    /// Rendered HTML body
    pub html: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Open Graph image, relative to the site base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Date exactly as written in the front-matter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Parsed `date`; only set for events and news
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_obj: Option<NaiveDateTime>,

    /// Event status: `upcoming`, `held` or `cancelled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Presenter slugs of an event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenters: Option<Vec<String>>,

    /// Source file
    #[serde(skip)]
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ContentItem {
    /// Build an item from its parsed front-matter and rendered body
    pub fn new(slug: String, html: String, fm: FrontMatter) -> Self {
        Self {
            slug,
            html,
            title: fm.title,
            summary: fm.summary,
            image: fm.image,
            date: fm.date,
            date_obj: None,
            status: fm.status,
            presenters: fm.presenters,
            source: PathBuf::new(),
            extra: fm.extra,
        }
    }

    /// Whether the event is marked upcoming
    pub fn is_upcoming(&self) -> bool {
        self.status.as_deref() == Some("upcoming")
    }
}
