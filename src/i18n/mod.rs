//! Persian labels used by templates and page titles

use crate::content::ContentType;

/// Title fallback for pages without one
pub const UNTITLED_PAGE: &str = "صفحه";

/// Title fallback for items without one
pub const UNTITLED_ITEM: &str = "مورد";

/// Readable text for an event status; unknown statuses pass through
pub fn display_status(status: &str) -> &str {
    match status {
        "held" => "برگزار شده",
        "upcoming" => "در پیش رو",
        "cancelled" => "لغو شده",
        other => other,
    }
}

/// Plural label of a content type
pub fn content_type_label(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Events => "رویدادها",
        ContentType::People => "افراد",
        ContentType::Projects => "پروژه‌ها",
        ContentType::Pages => "صفحه‌ها",
        ContentType::News => "اخبار",
    }
}

/// Heading of a content type's listing page
pub fn list_title(content_type: ContentType) -> String {
    format!("فهرست {}", content_type_label(content_type))
}
