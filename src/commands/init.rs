//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::ContentType;
use crate::error::Error;

const CONFIG_TEMPLATE: &str = r#"# Site
title: زنجان‌لاگ
description: گروه کاربران لینوکس زنجان
base_url: https://zanjanlug.ir
og_image: /static/images/zanjanlug_logo_square.png
# IANA name; "now" for the home page event defaults to the local clock
timezone: Asia/Tehran

social_links:
  - name: تلگرام
    url: https://t.me/zanjan_lug
  - name: ماستودون
    url: https://ohai.social/@zanjanlug

# Directories, relative to this file
content_dir: content
template_dir: templates
output_dir: output
static_dir: static
resources_dir: content/resources
# URL prefix that relative image links are rewritten to
resources_url: resources

# Code blocks
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
"#;

const STYLE_TEMPLATE: &str = r#"body {
  font-family: Vazirmatn, Tahoma, sans-serif;
  line-height: 1.8;
  margin: 0 auto;
  max-width: 960px;
  padding: 0 1rem;
}

.site-header nav a {
  margin-inline-start: 1rem;
}

.item-card {
  border-bottom: 1px solid #ddd;
  padding: 1rem 0;
}

.status-upcoming {
  color: #0a7d32;
}
"#;

const ABOUT_TEMPLATE: &str = r#"title: درباره ما
summary: آشنایی با گروه کاربران لینوکس

این صفحه را با معرفی گروه جایگزین کنید.
"#;

/// Create the directory skeleton, a commented `_config.yml` and a sample page
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        return Err(Error::AlreadyExists(config_path).into());
    }

    let content_dir = target_dir.join("content");
    for content_type in ContentType::ALL {
        fs::create_dir_all(content_dir.join(content_type.as_str()))?;
    }
    fs::create_dir_all(content_dir.join("resources"))?;
    fs::create_dir_all(target_dir.join("templates"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(target_dir.join("static/css/style.css"), STYLE_TEMPLATE)?;
    fs::write(content_dir.join("pages/about.md"), ABOUT_TEMPLATE)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        for sub in ["events", "people", "projects", "pages", "news", "resources"] {
            assert!(dir.path().join("content").join(sub).is_dir(), "{}", sub);
        }
        assert!(dir.path().join("static/css/style.css").is_file());

        let config = SiteConfig::load(&dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Asia/Tehran"));
        assert_eq!(config.social_links.len(), 2);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
