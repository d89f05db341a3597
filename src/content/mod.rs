//! Content module - handles content types, front-matter and markdown processing

mod frontmatter;
mod item;
mod links;
pub mod loader;
mod markdown;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub use frontmatter::FrontMatter;
pub use item::ContentItem;
pub use links::rewrite_resource_links;
pub use markdown::MarkdownRenderer;

/// The kinds of content a site is built from; one directory each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Events,
    People,
    Projects,
    Pages,
    News,
}

impl ContentType {
    /// All content types, in load order
    pub const ALL: [ContentType; 5] = [
        ContentType::Events,
        ContentType::People,
        ContentType::Projects,
        ContentType::Pages,
        ContentType::News,
    ];

    /// Directory and collection name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Events => "events",
            ContentType::People => "people",
            ContentType::Projects => "projects",
            ContentType::Pages => "pages",
            ContentType::News => "news",
        }
    }

    /// Dated types get a parsed `date_obj` and are sorted newest first
    pub fn is_dated(&self) -> bool {
        matches!(self, ContentType::Events | ContentType::News)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" | "event" => Ok(ContentType::Events),
            "people" | "person" => Ok(ContentType::People),
            "projects" | "project" => Ok(ContentType::Projects),
            "pages" | "page" => Ok(ContentType::Pages),
            "news" => Ok(ContentType::News),
            other => Err(Error::UnknownContentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("events".parse::<ContentType>().unwrap(), ContentType::Events);
        assert_eq!("person".parse::<ContentType>().unwrap(), ContentType::People);
        assert!(matches!(
            "posts".parse::<ContentType>(),
            Err(Error::UnknownContentType(name)) if name == "posts"
        ));
    }

    #[test]
    fn test_only_events_and_news_are_dated() {
        let dated: Vec<_> = ContentType::ALL.iter().filter(|t| t.is_dated()).collect();
        assert_eq!(dated, vec![&ContentType::Events, &ContentType::News]);
    }
}
