//! Event to presenter cross-references

use std::collections::HashMap;

use crate::content::ContentItem;

/// People looked up by slug. With duplicate slugs the last person wins.
pub struct PeopleIndex<'a> {
    by_slug: HashMap<&'a str, &'a ContentItem>,
}

impl<'a> PeopleIndex<'a> {
    pub fn new(people: &'a [ContentItem]) -> Self {
        let by_slug = people.iter().map(|p| (p.slug.as_str(), p)).collect();
        Self { by_slug }
    }

    pub fn get(&self, slug: &str) -> Option<&'a ContentItem> {
        self.by_slug.get(slug).copied()
    }
}

/// Resolve an event's presenter slugs to people, in the order listed.
///
/// `None` when the event has no `presenters` field; unknown slugs are dropped.
pub fn resolve_presenters<'a>(
    event: &ContentItem,
    people: &PeopleIndex<'a>,
) -> Option<Vec<&'a ContentItem>> {
    let slugs = event.presenters.as_ref()?;
    Some(slugs.iter().filter_map(|slug| people.get(slug)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn person(slug: &str, title: &str) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn event_from(front_matter: &str) -> ContentItem {
        let (fm, _) = FrontMatter::parse(front_matter);
        ContentItem::new("event".to_string(), String::new(), fm)
    }

    fn titles(people: &[&ContentItem]) -> Vec<String> {
        people.iter().filter_map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_scalar_and_list_resolve_identically() {
        let people = vec![person("jdoe", "Jane Doe")];
        let index = PeopleIndex::new(&people);

        let scalar = resolve_presenters(&event_from("presenters: jdoe\n\n"), &index).unwrap();
        let list = resolve_presenters(&event_from("---\npresenters: [jdoe]\n---\n"), &index).unwrap();
        assert_eq!(titles(&scalar), vec!["Jane Doe"]);
        assert_eq!(titles(&scalar), titles(&list));
    }

    #[test]
    fn test_unknown_slugs_dropped() {
        let people = vec![person("jdoe", "Jane Doe"), person("asmith", "Ali Smith")];
        let index = PeopleIndex::new(&people);

        let event = event_from("---\npresenters: [asmith, ghost, jdoe]\n---\n");
        let resolved = resolve_presenters(&event, &index).unwrap();
        assert_eq!(titles(&resolved), vec!["Ali Smith", "Jane Doe"]);
    }

    #[test]
    fn test_no_presenters_field() {
        let people = vec![person("jdoe", "Jane Doe")];
        let index = PeopleIndex::new(&people);
        assert!(resolve_presenters(&event_from("title: Talk\n\n"), &index).is_none());
    }

    #[test]
    fn test_duplicate_slug_last_wins() {
        let people = vec![person("jdoe", "Old Jane"), person("jdoe", "New Jane")];
        let index = PeopleIndex::new(&people);
        assert_eq!(index.get("jdoe").and_then(|p| p.title.as_deref()), Some("New Jane"));
    }
}
