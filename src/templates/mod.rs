//! Tera templates: an embedded default theme plus the site's own templates
//!
//! Every `*.html` file under the site's template directory is registered by
//! its path relative to that directory, replacing the embedded template of the
//! same name. Autoescaping is off: item bodies are already HTML.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::content::ContentItem;
use crate::helpers;
use crate::i18n;

/// Built-in templates, used for any name the site does not override
const DEFAULT_TEMPLATES: [(&str, &str); 9] = [
    ("base.html", include_str!("default/base.html")),
    ("index.html", include_str!("default/index.html")),
    ("list_page.html", include_str!("default/list_page.html")),
    ("page_detail.html", include_str!("default/page_detail.html")),
    ("event_detail.html", include_str!("default/event_detail.html")),
    ("person_detail.html", include_str!("default/person_detail.html")),
    ("project_detail.html", include_str!("default/project_detail.html")),
    ("news_detail.html", include_str!("default/news_detail.html")),
    ("partials/item_card.html", include_str!("default/partials/item_card.html")),
];

/// Template renderer
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates and any overrides found
    /// in `template_dir`
    pub fn new(template_dir: &Path) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(DEFAULT_TEMPLATES)
            .context("Failed to load built-in templates")?;

        let overrides = find_templates(template_dir)?;
        if !overrides.is_empty() {
            tracing::debug!(
                "Loading {} templates from {:?}",
                overrides.len(),
                template_dir
            );
            tera.add_template_files(overrides)
                .with_context(|| format!("Failed to load templates from {:?}", template_dir))?;
        }

        tera.register_filter("jalali", jalali_filter);
        tera.register_filter("display_status", display_status_filter);
        tera.register_filter("full_url", full_url_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("Failed to render template '{}'", template_name))
    }
}

/// Collect `(path, name)` pairs for every `.html` file under `dir`
fn find_templates(dir: &Path) -> Result<Vec<(PathBuf, Option<String>)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let name = path
            .strip_prefix(dir)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        templates.push((path.to_path_buf(), Some(name)));
    }
    Ok(templates)
}

/// Tera filter: Gregorian date string to Jalali ("1 فروردین 1403")
fn jalali_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    match value.as_str() {
        Some(s) => Ok(tera::Value::String(helpers::to_jalali(s))),
        None => Ok(value.clone()),
    }
}

/// Tera filter: event status slug to Persian text
fn display_status_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    match value.as_str() {
        Some(s) => Ok(tera::Value::String(i18n::display_status(s).to_string())),
        None => Ok(value.clone()),
    }
}

/// Tera filter: join a path onto a base URL, `{{ path | full_url(base=...) }}`
fn full_url_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let path = tera::try_get_value!("full_url", "value", String, value);
    let base = match args.get("base") {
        Some(val) => tera::try_get_value!("full_url", "base", String, val),
        None => return Err(tera::Error::msg("Filter `full_url` expected an arg called `base`")),
    };
    Ok(tera::Value::String(helpers::full_url(&base, &path)))
}

// Data structures for template context

/// Open Graph metadata of a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    #[serde(rename = "type")]
    pub og_type: &'static str,
}

/// An item as a detail template sees it: every item field plus, for events,
/// the resolved presenters
#[derive(Debug, Serialize)]
pub struct ItemView<'a> {
    #[serde(flatten)]
    pub item: &'a ContentItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenter_details: Option<Vec<&'a ContentItem>>,
}

impl<'a> ItemView<'a> {
    pub fn plain(item: &'a ContentItem) -> Self {
        Self {
            item,
            presenter_details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn render_str(renderer: &mut TemplateRenderer, source: &str, context: &Context) -> String {
        renderer.tera.add_raw_template("__test.html", source).unwrap();
        renderer.render("__test.html", context).unwrap()
    }

    #[test]
    fn test_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = TemplateRenderer::new(dir.path()).unwrap();
        let mut context = Context::new();
        context.insert("date", "2024-03-20");
        context.insert("status", "held");
        context.insert("bad", "someday");

        let out = render_str(
            &mut renderer,
            "{{ date | jalali }}|{{ status | display_status }}|{{ bad | jalali }}|{{ '/a.png' | full_url(base='https://x.ir/') }}",
            &context,
        );
        assert_eq!(out, "1 فروردین 1403|برگزار شده|someday|https://x.ir/a.png");
    }

    #[test]
    fn test_no_autoescape() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = TemplateRenderer::new(dir.path()).unwrap();
        let mut context = Context::new();
        context.insert("html", "<p>hi</p>");
        assert_eq!(render_str(&mut renderer, "{{ html }}", &context), "<p>hi</p>");
    }

    #[test]
    fn test_site_template_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("index.html"), "custom home").unwrap();
        fs::write(dir.path().join("partials/extra.html"), "extra").unwrap();

        let renderer = TemplateRenderer::new(dir.path()).unwrap();
        assert_eq!(renderer.render("index.html", &Context::new()).unwrap(), "custom home");
        assert_eq!(
            renderer.render("partials/extra.html", &Context::new()).unwrap(),
            "extra"
        );
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new(dir.path()).unwrap();
        assert!(renderer.render("nope.html", &Context::new()).is_err());
    }

    #[test]
    fn test_item_view_serialization() {
        let person = ContentItem {
            slug: "jdoe".to_string(),
            title: Some("Jane".to_string()),
            ..Default::default()
        };
        let event = ContentItem {
            slug: "talk".to_string(),
            presenters: Some(vec!["jdoe".to_string()]),
            ..Default::default()
        };

        let view = ItemView {
            item: &event,
            presenter_details: Some(vec![&person]),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["slug"], "talk");
        assert_eq!(value["presenters"][0], "jdoe");
        assert_eq!(value["presenter_details"][0]["title"], "Jane");

        let value = serde_json::to_value(ItemView::plain(&person)).unwrap();
        assert!(value.get("presenter_details").is_none());
    }
}
