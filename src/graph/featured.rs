//! Home page event selection

use chrono::NaiveDateTime;

use crate::content::ContentItem;

/// Pick the event featured on the home page.
///
/// The nearest event marked `upcoming` that is strictly after `now`; failing
/// that, the first event of the newest-first sequence; `None` when there are
/// no events. Events without a parsed date are never upcoming. Which of
/// several equally-near upcoming events wins is not part of the contract.
pub fn find_main_page_event(events: &[ContentItem], now: NaiveDateTime) -> Option<&ContentItem> {
    events
        .iter()
        .filter(|e| e.is_upcoming())
        .filter_map(|e| e.date_obj.filter(|d| *d > now).map(|d| (d, e)))
        .min_by_key(|(d, _)| *d)
        .map(|(_, e)| e)
        .or_else(|| events.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::parse_date;

    fn event(slug: &str, status: &str, date: &str) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            status: Some(status.to_string()),
            date: Some(date.to_string()),
            date_obj: parse_date(date),
            ..Default::default()
        }
    }

    fn at(date: &str) -> NaiveDateTime {
        parse_date(date).unwrap()
    }

    #[test]
    fn test_nearest_future_upcoming_event() {
        let events = vec![
            event("a", "upcoming", "2099-01-01"),
            event("b", "upcoming", "2001-01-01"),
            event("c", "held", "2001-01-01"),
        ];
        let main = find_main_page_event(&events, at("2024-06-01")).unwrap();
        assert_eq!(main.slug, "a");
    }

    #[test]
    fn test_picks_soonest_of_several_upcoming() {
        let events = vec![
            event("later", "upcoming", "2030-05-01"),
            event("sooner", "upcoming", "2030-01-15"),
            event("past", "held", "2020-01-01"),
        ];
        let main = find_main_page_event(&events, at("2029-12-31")).unwrap();
        assert_eq!(main.slug, "sooner");
    }

    #[test]
    fn test_held_future_event_is_not_featured() {
        let events = vec![
            event("cancelled", "cancelled", "2099-01-01"),
            event("held", "held", "2023-01-01"),
        ];
        let main = find_main_page_event(&events, at("2024-01-01")).unwrap();
        assert_eq!(main.slug, "cancelled");
    }

    #[test]
    fn test_falls_back_to_most_recent() {
        let events = vec![
            event("newest", "held", "2024-03-01"),
            event("older", "upcoming", "2023-03-01"),
        ];
        let main = find_main_page_event(&events, at("2024-06-01")).unwrap();
        assert_eq!(main.slug, "newest");
    }

    #[test]
    fn test_event_today_is_not_future() {
        // Midnight equals now: not strictly after, so the newest item wins
        let events = vec![
            event("newest", "held", "2025-01-01"),
            event("today", "upcoming", "2024-06-01"),
        ];
        let main = find_main_page_event(&events, at("2024-06-01")).unwrap();
        assert_eq!(main.slug, "newest");
    }

    #[test]
    fn test_undated_upcoming_event_is_skipped() {
        let mut undated = event("undated", "upcoming", "soon");
        undated.date_obj = None;
        let events = vec![event("held", "held", "2020-01-01"), undated];
        let main = find_main_page_event(&events, at("2024-01-01")).unwrap();
        assert_eq!(main.slug, "held");
    }

    #[test]
    fn test_no_events() {
        assert!(find_main_page_event(&[], at("2024-01-01")).is_none());
    }
}
