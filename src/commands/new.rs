//! Create a new content file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::ContentType;
use crate::error::Error;
use crate::Site;

/// Create `<content>/<type>/<slug>.md` with meta front-matter and return its path
pub fn run(
    site: &Site,
    content_type: ContentType,
    title: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from '{}'; pass --slug", title);
    }

    let target_dir = site.content_dir.join(content_type.as_str());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        return Err(Error::AlreadyExists(file_path).into());
    }

    let today = site.config.now().format("%Y-%m-%d").to_string();
    fs::write(&file_path, scaffold(content_type, title, &today))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Front-matter and an empty body for a fresh item
fn scaffold(content_type: ContentType, title: &str, today: &str) -> String {
    let mut content = format!("title: {}\n", title);
    if content_type.is_dated() {
        content.push_str(&format!("date: {}\n", today));
    }
    if content_type == ContentType::Events {
        content.push_str("status: upcoming\n");
    }
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_new_event() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = run(&site, ContentType::Events, "Install Fest", None).unwrap();
        assert_eq!(path, site.content_dir.join("events/install-fest.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content);
        assert_eq!(fm.title.as_deref(), Some("Install Fest"));
        assert_eq!(fm.status.as_deref(), Some("upcoming"));
        assert!(fm.date.is_some());
        assert!(body.trim().is_empty());
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site, ContentType::Pages, "About", Some("about")).unwrap();
        let err = run(&site, ContentType::Pages, "About again", Some("about")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_scaffold_by_type() {
        assert_eq!(
            scaffold(ContentType::News, "Release", "2024-01-02"),
            "title: Release\ndate: 2024-01-02\n\n"
        );
        assert_eq!(scaffold(ContentType::Pages, "About", "x"), "title: About\n\n");
    }
}
