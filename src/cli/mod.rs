//! Command handlers.
//!
//! `main` parses arguments and dispatches here. Every handler returns an
//! exit code; the one user-visible failure is the startup deck load, which
//! is converted into a single error banner and never reaches the TUI.

use crate::config::ViewerConfig;
use crate::deck::load_deck;
use crate::model::{ContentSegment, ParsedContent, Topic, TopicDeck};
use crate::router::{Route, ViewSelection};
use crate::tui::{run_study_tui, StudyApp};
use crate::tui::widgets::pad_to_width;
use anyhow::Result;
use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::Path;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// `validate` found deck invariant violations
    pub const INVALID_DECK: i32 = 1;
    /// The deck could not be loaded at startup
    pub const LOAD_FAILED: i32 = 2;
}

/// Width of the category column in plain list output.
const CATEGORY_COL: usize = 16;

/// Run the `view` command.
///
/// Interactive TUI on a terminal; on a non-terminal stdout the selected
/// view is printed as plain text instead (spans unmasked — masking is
/// meaningless on paper).
pub fn run_view(config: ViewerConfig) -> Result<i32> {
    let deck = match load_or_banner(&config.deck_path) {
        Some(deck) => deck,
        None => return Ok(exit_codes::LOAD_FAILED),
    };

    let route = Route::parse(&config.route);

    if !std::io::stdout().is_terminal() {
        match route.resolve(&deck) {
            ViewSelection::Detail(topic) => print!("{}", detail_text(topic)),
            ViewSelection::List => {
                for row in list_rows(&deck) {
                    println!("{row}");
                }
            }
        }
        return Ok(exit_codes::SUCCESS);
    }

    let mut app = StudyApp::new(deck);
    app.apply_route(&route);
    run_study_tui(&mut app)?;

    Ok(exit_codes::SUCCESS)
}

/// Run the `list` command: print the list view rows to stdout.
pub fn run_list(deck_path: &Path) -> Result<i32> {
    let deck = match load_or_banner(deck_path) {
        Some(deck) => deck,
        None => return Ok(exit_codes::LOAD_FAILED),
    };

    for row in list_rows(&deck) {
        println!("{row}");
    }
    Ok(exit_codes::SUCCESS)
}

/// Run the `validate` command: check deck invariants and report.
pub fn run_validate(deck_path: &Path) -> Result<i32> {
    let content = match std::fs::read_to_string(deck_path) {
        Ok(content) => content,
        Err(e) => {
            print_load_banner(&crate::error::DeckError::io(deck_path, e));
            return Ok(exit_codes::LOAD_FAILED);
        }
    };
    let topics: Vec<Topic> = match serde_json::from_str(&content) {
        Ok(topics) => topics,
        Err(e) => {
            print_load_banner(&e.into());
            return Ok(exit_codes::LOAD_FAILED);
        }
    };

    let issues = deck_issues(&topics);
    let span_total: usize = topics
        .iter()
        .map(|t| ParsedContent::parse(&t.content).span_count())
        .sum();

    if issues.is_empty() {
        println!(
            "deck OK: {} topics, {} memory spans",
            topics.len(),
            span_total
        );
        Ok(exit_codes::SUCCESS)
    } else {
        for issue in &issues {
            println!("issue: {issue}");
        }
        println!(
            "{} issue(s) in {} topics",
            issues.len(),
            topics.len()
        );
        Ok(exit_codes::INVALID_DECK)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load the deck or print the startup failure banner.
///
/// The banner is the single user-visible error presentation in the whole
/// application; on failure the session never becomes interactive.
fn load_or_banner(path: &Path) -> Option<TopicDeck> {
    match load_deck(path) {
        Ok(deck) => Some(deck),
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "deck load failed");
            print_load_banner(&e);
            None
        }
    }
}

fn print_load_banner(err: &crate::error::DeckError) {
    eprintln!("Error: could not load the study deck: {err}");
    eprintln!(
        "Hint: the deck must be a readable JSON file of topic records; \
         pass its path, e.g. `redsheet view topics.json`."
    );
}

/// The list view rows, one per topic in deck order.
///
/// Pure function of the deck, so rendering twice yields identical rows.
pub(crate) fn list_rows(deck: &TopicDeck) -> Vec<String> {
    deck.iter()
        .map(|t| {
            format!(
                "{} │ {}",
                pad_to_width(t.category_label(), CATEGORY_COL),
                t.title
            )
        })
        .collect()
}

/// Plain-text rendition of a topic's detail view.
fn detail_text(topic: &Topic) -> String {
    let parsed = ParsedContent::parse(&topic.content);
    let mut out = format!("{}\n\n", topic.title);
    for line in parsed.lines() {
        for segment in line {
            match segment {
                ContentSegment::Text(text) => out.push_str(text),
                ContentSegment::Memory { text, .. } => out.push_str(text),
            }
        }
        out.push('\n');
    }
    out
}

/// Deck invariant violations, in record order.
fn deck_issues(topics: &[Topic]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, topic) in topics.iter().enumerate() {
        if topic.id.trim().is_empty() {
            issues.push(format!("topic #{index} has an empty id"));
        } else if !seen.insert(topic.id.as_str()) {
            issues.push(format!("duplicate topic id: {}", topic.id));
        }
        if topic.title.trim().is_empty() {
            issues.push(format!("topic {:?} has an empty title", topic.id));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::parse_deck_str;

    fn topic(id: &str, title: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            category: None,
            content: String::new(),
        }
    }

    #[test]
    fn test_list_rows_are_idempotent() {
        let deck = parse_deck_str(
            r#"[
                {"id": "a", "title": "Topic A", "category": "X", "content": ""},
                {"id": "b", "title": "Topic B", "content": ""}
            ]"#,
        )
        .unwrap();

        let first = list_rows(&deck);
        let second = list_rows(&deck);
        assert_eq!(first, second);
        assert!(first[0].contains("X"));
        assert!(first[0].contains("Topic A"));
        assert!(first[1].contains("Uncategorized"));
    }

    #[test]
    fn test_deck_issues_finds_duplicates() {
        let issues = deck_issues(&[topic("a", "One"), topic("a", "Two")]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("duplicate"));
    }

    #[test]
    fn test_deck_issues_finds_empty_fields() {
        let issues = deck_issues(&[topic("", "Ok"), topic("b", " ")]);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_deck_issues_clean_deck() {
        assert!(deck_issues(&[topic("a", "One"), topic("b", "Two")]).is_empty());
    }

    #[test]
    fn test_detail_text_shows_span_content() {
        let t = Topic {
            id: "a".to_string(),
            title: "Topic A".to_string(),
            category: None,
            content: r#"answer: <span class="span-memory">equity</span>"#.to_string(),
        };
        let text = detail_text(&t);
        assert!(text.starts_with("Topic A\n"));
        assert!(text.contains("answer: equity"));
    }
}
