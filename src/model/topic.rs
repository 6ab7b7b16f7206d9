//! Topic records and the deck collection.

use crate::error::{DeckError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label shown for topics without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A single study topic.
///
/// Topics are read-only once loaded; the deck file is the sole source of
/// truth and is never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Opaque identifier, unique within the deck
    pub id: String,

    /// Display title
    pub title: String,

    /// Optional category; absent or empty renders [`UNCATEGORIZED_LABEL`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Markup fragment, optionally containing memory spans
    pub content: String,
}

impl Topic {
    /// The category label to display for this topic.
    #[must_use]
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED_LABEL,
        }
    }
}

/// An ordered collection of topics keyed by id.
///
/// Insertion order is the list display order. Construction rejects
/// duplicate ids, so lookup-by-id is unambiguous.
#[derive(Debug, Clone, Default)]
pub struct TopicDeck {
    topics: IndexMap<String, Topic>,
}

impl TopicDeck {
    /// Build a deck from topic records, preserving order.
    ///
    /// Fails with a validation error on the first duplicate id.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(topics.len());
        for topic in topics {
            let id = topic.id.clone();
            if map.insert(id.clone(), topic).is_some() {
                return Err(DeckError::duplicate_id(id));
            }
        }
        Ok(Self { topics: map })
    }

    /// Look up a topic by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.get(id)
    }

    /// Whether the deck contains the given id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.topics.contains_key(id)
    }

    /// The position of a topic in deck order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.topics.get_index_of(id)
    }

    /// The topic at a deck-order position.
    #[must_use]
    pub fn by_position(&self, index: usize) -> Option<&Topic> {
        self.topics.get_index(index).map(|(_, t)| t)
    }

    /// Iterate topics in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    /// Number of topics in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, title: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            category: None,
            content: String::new(),
        }
    }

    #[test]
    fn test_deck_preserves_order() {
        let deck = TopicDeck::from_topics(vec![
            topic("b", "Second"),
            topic("a", "First"),
            topic("c", "Third"),
        ])
        .unwrap();

        let titles: Vec<_> = deck.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First", "Third"]);
        assert_eq!(deck.position("a"), Some(1));
    }

    #[test]
    fn test_deck_rejects_duplicate_id() {
        let result = TopicDeck::from_topics(vec![topic("a", "One"), topic("a", "Two")]);
        assert!(matches!(result, Err(DeckError::Validation(_))));
    }

    #[test]
    fn test_category_label_placeholder() {
        let mut t = topic("a", "Topic A");
        assert_eq!(t.category_label(), UNCATEGORIZED_LABEL);

        t.category = Some(String::new());
        assert_eq!(t.category_label(), UNCATEGORIZED_LABEL);

        t.category = Some("  ".to_string());
        assert_eq!(t.category_label(), UNCATEGORIZED_LABEL);

        t.category = Some("Ledger theory".to_string());
        assert_eq!(t.category_label(), "Ledger theory");
    }
}
