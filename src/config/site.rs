//! Site configuration (_config.yml)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Error;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub base_url: String,
    /// Default Open Graph image, relative to `base_url`
    pub og_image: String,
    pub social_links: Vec<SocialLink>,
    /// IANA timezone used to decide which events are still upcoming.
    /// Falls back to the local timezone when unset.
    pub timezone: Option<String>,

    // Directory
    pub content_dir: String,
    pub template_dir: String,
    pub output_dir: String,
    pub static_dir: String,
    pub resources_dir: String,
    /// URL prefix that relative image references are rewritten under
    pub resources_url: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "زنجان‌لاگ".to_string(),
            description: "گروه کاربران لینوکس زنجان (زنجان‌لاگ)، جامعه‌ای برای علاقه‌مندان به نرم‌افزار آزاد و متن‌باز در زنجان.".to_string(),
            base_url: "https://zanjanlug.ir".to_string(),
            og_image: "/static/images/zanjanlug_logo_square.png".to_string(),
            social_links: vec![
                SocialLink::new("تلگرام", "https://t.me/zanjan_lug"),
                SocialLink::new("ماستودون", "https://ohai.social/@zanjanlug"),
                SocialLink::new("وبسایت", "https://zanjanlug.ir"),
            ],
            timezone: None,

            content_dir: "content".to_string(),
            template_dir: "templates".to_string(),
            output_dir: "output".to_string(),
            static_dir: "static".to_string(),
            resources_dir: "content/resources".to_string(),
            resources_url: "resources".to_string(),

            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        // An empty file is a valid config with every default
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, mid-build
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(tz) = &self.timezone {
            tz.parse::<chrono_tz::Tz>()
                .map_err(|_| Error::UnknownTimezone(tz.clone()))?;
        }
        Ok(())
    }

    /// Current wall-clock time in the site's timezone
    pub fn now(&self) -> NaiveDateTime {
        let tz = self
            .timezone
            .as_deref()
            .and_then(|tz| tz.parse::<chrono_tz::Tz>().ok());
        match tz {
            Some(tz) => chrono::Utc::now().with_timezone(&tz).naive_local(),
            None => chrono::Local::now().naive_local(),
        }
    }
}

/// A link rendered in the site footer/header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Fenced code block highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
