//! URL helper functions

/// Join a base URL and a path with exactly one slash between them
///
/// # Examples
/// ```
/// use lugsite::helpers::full_url;
/// assert_eq!(full_url("https://site.ir/", "/events/1.html"), "https://site.ir/events/1.html");
/// ```
pub fn full_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Site-relative URL of an item's detail page
pub fn item_path(content_type: &str, slug: &str) -> String {
    format!("{}/{}.html", content_type, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        assert_eq!(
            full_url("https://site.ir/", "/events/1.html"),
            "https://site.ir/events/1.html"
        );
        assert_eq!(
            full_url("https://site.ir", "events/1.html"),
            "https://site.ir/events/1.html"
        );
        assert_eq!(full_url("https://site.ir//", "//about.html"), "https://site.ir/about.html");
        assert_eq!(full_url("https://site.ir", ""), "https://site.ir/");
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("people", "jdoe"), "people/jdoe.html");
    }
}
