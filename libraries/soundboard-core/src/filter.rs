//! Catalog search
//!
//! Plain substring matching, recomputed on every keystroke. Catalogs hold tens to
//! low hundreds of entries, so there is no index.

use crate::types::{Sound, SoundCatalog};

/// Whether `key` contains `search_term`, ignoring case
///
/// An empty term matches everything.
pub fn matches_search(key: &str, search_term: &str) -> bool {
    contains_lowered(key, &search_term.to_lowercase())
}

/// Entries whose key contains `search_term` case-insensitively, in catalog order
pub fn filter_catalog<'a>(
    catalog: &'a SoundCatalog,
    search_term: &str,
) -> Vec<(&'a str, &'a Sound)> {
    let needle = search_term.to_lowercase();
    catalog
        .iter()
        .filter(|(key, _)| contains_lowered(key, &needle))
        .collect()
}

/// `needle` must already be lowercase
fn contains_lowered(key: &str, needle: &str) -> bool {
    needle.is_empty() || key.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SoundCatalog {
        SoundCatalog::from_json(
            r#"{
                "Air Horn": {"messageId": "m1", "url": "a.mp3", "volume": 0, "channelId": "c1"},
                "Boo":      {"messageId": "m2", "url": "b.mp3", "volume": 5, "channelId": "c1"},
                "HAIRCUT":  {"messageId": "m3", "url": "h.mp3", "channelId": "c1"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_air_matches_case_insensitively() {
        let catalog = catalog();
        let keys: Vec<&str> = filter_catalog(&catalog, "air").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Air Horn", "HAIRCUT"]);
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let catalog = catalog();
        let keys: Vec<&str> = filter_catalog(&catalog, "").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Air Horn", "Boo", "HAIRCUT"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_catalog(&catalog(), "xyz").is_empty());
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Air Horn", "HORN"));
        assert!(matches_search("Air Horn", ""));
        assert!(!matches_search("Boo", "air"));
    }

    #[test]
    fn test_filter_agrees_with_matches_search() {
        let catalog = catalog();
        for term in ["", "AIR", "o", "cut", "zzz"] {
            let filtered: Vec<&str> = filter_catalog(&catalog, term)
                .into_iter()
                .map(|(k, _)| k)
                .collect();
            let expected: Vec<&str> = catalog
                .iter()
                .map(|(k, _)| k)
                .filter(|k| matches_search(k, term))
                .collect();
            assert_eq!(filtered, expected, "term {:?}", term);
        }
    }
}
