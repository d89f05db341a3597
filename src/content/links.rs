//! Resource link rewriting
//!
//! Image references in content files are written relative to the resources
//! directory. They are rooted under the resource URL before markdown
//! conversion; absolute (`/...`) and `http(s)://` targets are left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref MARKDOWN_IMAGE: Regex = Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap();
    static ref HTML_IMG_SRC: Regex = Regex::new(r#"<img(.*?)src="(.*?)""#).unwrap();
}

fn is_rooted(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with('/')
}

/// Rewrite `![alt](path)` and `<img src="path">` so relative paths resolve
/// under `/<resources_url>/`.
pub fn rewrite_resource_links(text: &str, resources_url: &str) -> String {
    let prefix = resources_url.trim_matches('/');

    let text = MARKDOWN_IMAGE.replace_all(text, |caps: &Captures| {
        if is_rooted(&caps[2]) {
            caps[0].to_string()
        } else {
            format!("![{}](/{}/{})", &caps[1], prefix, &caps[2])
        }
    });

    HTML_IMG_SRC
        .replace_all(&text, |caps: &Captures| {
            if is_rooted(&caps[2]) {
                caps[0].to_string()
            } else {
                format!(r#"<img{}src="/{}/{}""#, &caps[1], prefix, &caps[2])
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_markdown_image() {
        assert_eq!(
            rewrite_resource_links("![a](img/x.png)", "resources"),
            "![a](/resources/img/x.png)"
        );
    }

    #[test]
    fn test_rooted_markdown_images_unchanged() {
        for text in [
            "![a](https://ex.com/x.png)",
            "![a](http://ex.com/x.png)",
            "![a](/already/absolute.png)",
        ] {
            assert_eq!(rewrite_resource_links(text, "resources"), text);
        }
    }

    #[test]
    fn test_html_img_src() {
        assert_eq!(
            rewrite_resource_links(r#"<img class="w-50" src="team.jpg" alt="team">"#, "resources"),
            r#"<img class="w-50" src="/resources/team.jpg" alt="team">"#
        );
        let absolute = r#"<img src="https://ex.com/logo.svg">"#;
        assert_eq!(rewrite_resource_links(absolute, "resources"), absolute);
    }

    #[test]
    fn test_mixed_document() {
        let text = "Intro ![logo](https://ex.com/l.png) and ![map](maps/hall.png)\n<img src=\"/static/a.png\"> <img src=\"b.png\">";
        let expected = "Intro ![logo](https://ex.com/l.png) and ![map](/resources/maps/hall.png)\n<img src=\"/static/a.png\"> <img src=\"/resources/b.png\">";
        assert_eq!(rewrite_resource_links(text, "resources"), expected);
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(
            rewrite_resource_links("![a](x.png)", "/media/"),
            "![a](/media/x.png)"
        );
    }

    #[test]
    fn test_plain_links_untouched() {
        let text = "[slides](slides.pdf)";
        assert_eq!(rewrite_resource_links(text, "resources"), text);
    }
}
