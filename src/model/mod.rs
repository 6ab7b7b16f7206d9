//! Data model for study decks.
//!
//! A deck is an ordered collection of [`Topic`] records with unique ids;
//! each topic carries a markup fragment that [`content`] breaks into plain
//! text and memory spans for the masked detail view.

mod content;
mod topic;

pub use content::{ContentSegment, ParsedContent};
pub use topic::{Topic, TopicDeck, UNCATEGORIZED_LABEL};
