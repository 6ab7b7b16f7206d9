//! Route handling.
//!
//! Navigation is driven entirely by route fragments, the terminal analog of
//! a location hash: the empty fragment selects the list, `topic/<id>`
//! selects a detail view, and anything else falls back to the list. A
//! fragment naming an unknown topic id is NOT an error — it silently
//! degrades to the list view.

use crate::model::{Topic, TopicDeck};

/// A parsed route fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The topic list
    List,
    /// A topic detail view, by id
    Topic(String),
}

/// What a route selects once resolved against a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection<'a> {
    List,
    Detail(&'a Topic),
}

impl Route {
    /// Parse a route fragment.
    ///
    /// A leading `#` is tolerated so fragments copied straight from a
    /// browser hash keep working. The id is everything after `topic/` up
    /// to the next `/`; trailing segments are ignored.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        match fragment.strip_prefix("topic/") {
            Some(rest) => {
                let id = rest.split('/').next().unwrap_or_default();
                Self::Topic(id.to_string())
            }
            None => Self::List,
        }
    }

    /// Resolve this route against a deck.
    ///
    /// Unknown ids degrade to the list selection without raising anything
    /// user-visible.
    #[must_use]
    pub fn resolve<'a>(&self, deck: &'a TopicDeck) -> ViewSelection<'a> {
        match self {
            Self::List => ViewSelection::List,
            Self::Topic(id) => match deck.get(id) {
                Some(topic) => ViewSelection::Detail(topic),
                None => {
                    tracing::debug!(id = %id, "route names unknown topic id, falling back to list");
                    ViewSelection::List
                }
            },
        }
    }

    /// The fragment form of this route.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::List => String::new(),
            Self::Topic(id) => format!("topic/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Topic;

    fn deck() -> TopicDeck {
        TopicDeck::from_topics(vec![Topic {
            id: "a".to_string(),
            title: "Topic A".to_string(),
            category: Some("X".to_string()),
            content: "plain text".to_string(),
        }])
        .unwrap()
    }

    #[test]
    fn test_parse_empty_is_list() {
        assert_eq!(Route::parse(""), Route::List);
    }

    #[test]
    fn test_parse_topic_fragment() {
        assert_eq!(Route::parse("topic/a"), Route::Topic("a".to_string()));
        assert_eq!(Route::parse("#topic/a"), Route::Topic("a".to_string()));
    }

    #[test]
    fn test_parse_ignores_trailing_segments() {
        assert_eq!(Route::parse("topic/a/extra"), Route::Topic("a".to_string()));
    }

    #[test]
    fn test_parse_garbage_is_list() {
        assert_eq!(Route::parse("settings"), Route::List);
        assert_eq!(Route::parse("topics/a"), Route::List);
        assert_eq!(Route::parse("#"), Route::List);
    }

    #[test]
    fn test_resolve_known_id() {
        let deck = deck();
        let selection = Route::parse("topic/a").resolve(&deck);
        assert!(matches!(selection, ViewSelection::Detail(t) if t.title == "Topic A"));
    }

    #[test]
    fn test_resolve_unknown_id_falls_back_to_list() {
        let deck = deck();
        assert_eq!(Route::parse("topic/zzz").resolve(&deck), ViewSelection::List);
        // An empty id (`topic/`) behaves like an unknown id.
        assert_eq!(Route::parse("topic/").resolve(&deck), ViewSelection::List);
    }

    #[test]
    fn test_fragment_round_trip() {
        assert_eq!(Route::parse("topic/a").fragment(), "topic/a");
        assert_eq!(Route::List.fragment(), "");
    }
}
