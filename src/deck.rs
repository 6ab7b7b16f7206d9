//! Deck loading.
//!
//! A deck is a JSON array of topic records, read from disk exactly once at
//! startup. There is no watch, reload, or write-back path.

use crate::error::{DeckError, Result};
use crate::model::{Topic, TopicDeck};
use std::path::Path;

/// Load a deck from a JSON file.
///
/// This is the single fallible startup operation; any failure here is fatal
/// to the session and is surfaced by the caller as one error banner.
pub fn load_deck(path: &Path) -> Result<TopicDeck> {
    let content = std::fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
    let deck = parse_deck_str(&content)?;
    tracing::debug!(
        topics = deck.len(),
        path = %path.display(),
        "loaded study deck"
    );
    Ok(deck)
}

/// Parse a deck from a JSON string.
pub fn parse_deck_str(content: &str) -> Result<TopicDeck> {
    let topics: Vec<Topic> = serde_json::from_str(content)?;
    TopicDeck::from_topics(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_deck() {
        let deck = parse_deck_str(
            r#"[
                {"id": "a", "title": "Topic A", "category": "X", "content": "plain text"},
                {"id": "b", "title": "Topic B", "content": "more text"}
            ]"#,
        )
        .unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get("a").unwrap().title, "Topic A");
        // category is optional and defaults to None
        assert!(deck.get("b").unwrap().category.is_none());
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let result = parse_deck_str(
            r#"[
                {"id": "a", "title": "One", "content": ""},
                {"id": "a", "title": "Two", "content": ""}
            ]"#,
        );
        assert!(matches!(result, Err(DeckError::Validation(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_deck_str("{not a deck"),
            Err(DeckError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_deck(Path::new("/nonexistent/topics.json")).unwrap_err();
        assert!(err.to_string().contains("topics.json"));
    }
}
