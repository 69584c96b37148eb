use serde::Deserialize;

use super::DogId;
use crate::values::Cursor;

/// One page of search results.
///
/// The id sequence carries the server-defined order, which IS the requested
/// sort; it must never be re-sorted locally. Ids are not displayable on
/// their own and have to be resolved through the batch detail fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "resultIds")]
    pub result_ids: Vec<DogId>,
    /// Count of all matches server-side, not just this page
    pub total: u64,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self {
            result_ids: Vec::new(),
            total: 0,
            next: None,
            prev: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.result_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_wire_format() {
        let json = r#"{
            "resultIds": ["a", "b"],
            "total": 42,
            "next": "/dogs/search?size=12&from=12",
            "prev": null
        }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.result_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(page.total, 42);
        assert!(page.next.is_some());
        assert!(page.prev.is_none());
    }
}
