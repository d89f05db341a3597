//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::{ContentItem, ContentType};
use crate::Site;

/// Print the items of one content type
pub fn run(site: &Site, content_type: ContentType) -> Result<()> {
    let items = ContentLoader::new(site).load(content_type)?;
    print!("{}", format_listing(content_type, &items));
    Ok(())
}

fn format_listing(content_type: ContentType, items: &[ContentItem]) -> String {
    let mut out = format!("{} ({}):\n", content_type, items.len());
    for item in items {
        let title = item.title.as_deref().unwrap_or("(untitled)");
        let line = match (&item.date, &item.status) {
            (Some(date), Some(status)) => {
                format!("  {} - {} <{}> [{}]\n", date, title, status, item.slug)
            }
            (Some(date), None) => format!("  {} - {} [{}]\n", date, title, item.slug),
            _ => format!("  {} [{}]\n", title, item.slug),
        };
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listing() {
        let items = vec![
            ContentItem {
                slug: "install-fest".to_string(),
                title: Some("Install Fest".to_string()),
                date: Some("2024-05-01".to_string()),
                status: Some("held".to_string()),
                ..Default::default()
            },
            ContentItem {
                slug: "nameless".to_string(),
                ..Default::default()
            },
        ];

        assert_eq!(
            format_listing(ContentType::Events, &items),
            "events (2):\n  2024-05-01 - Install Fest <held> [install-fest]\n  (untitled) [nameless]\n"
        );
    }
}
