//! **redsheet** — a terminal study aid with red-sheet masking.
//!
//! `redsheet` loads a deck of study topics from a JSON file and lets you
//! browse them in an interactive terminal UI. The detail view hides the
//! marked *memory spans* of a topic behind solid blocks (the digital
//! equivalent of a red transparency sheet over a cram book) until you
//! reveal them one by one, and a *stealth mode* disguises the whole screen
//! as an ordinary monochrome pager.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Topic`] record and the ordered, unique-id
//!   [`TopicDeck`], plus the content parser that turns a topic's markup
//!   fragment into text and memory-span segments.
//! - **[`deck`]**: one-shot deck loading from disk. The deck is immutable
//!   for the rest of the session.
//! - **[`router`]**: maps a route fragment (`""`, `topic/<id>`, anything
//!   else) to a view selection. Unknown ids silently fall back to the list
//!   view.
//! - **[`tui`]**: the ratatui application — [`StudyApp`] owns all view
//!   state (current topic, mask/stealth flags, the per-view reveal set) and
//!   the render loop rebuilds the frame from it on every event.
//! - **[`cli`]**: handlers for the `view`, `list`, and `validate`
//!   commands.
//!
//! ## Deck format
//!
//! A deck is a JSON array of topics:
//!
//! ```json
//! [
//!   {
//!     "id": "equity-theory",
//!     "title": "Nature of equity",
//!     "category": "Financial accounting",
//!     "content": "Equity is <span class=\"span-memory\">residual assets</span>."
//!   }
//! ]
//! ```
//!
//! Everything inside a `span-memory` span is hidden under mask mode.
//!
//! ## Example
//!
//! ```no_run
//! use redsheet::{deck, router::Route, tui::StudyApp};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let deck = deck::load_deck(std::path::Path::new("topics.json"))?;
//!     let mut app = StudyApp::new(deck);
//!     app.apply_route(&Route::parse("topic/equity-theory"));
//!     redsheet::tui::run_study_tui(&mut app)?;
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize↔u16 casts are pervasive in TUI layout math and all
    // values are bounded by the terminal size in practice
    clippy::cast_possible_truncation,
    // TUI render functions are inherently long — splitting hurts readability
    clippy::too_many_lines
)]

pub mod cli;
pub mod config;
pub mod deck;
pub mod error;
pub mod model;
pub mod router;
pub mod tui;

// Re-export main types for convenience
pub use config::ViewerConfig;
pub use deck::{load_deck, parse_deck_str};
pub use error::{DeckError, Result};
pub use model::{ContentSegment, ParsedContent, Topic, TopicDeck, UNCATEGORIZED_LABEL};
pub use router::{Route, ViewSelection};
pub use tui::{run_study_tui, StudyApp, APP_NAME};
