//! Command configuration types.
//!
//! `main` parses arguments into these structs and hands them to the command
//! handlers in [`crate::cli`].

use std::path::PathBuf;

/// Configuration for the `view` command.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Path to the deck JSON file
    pub deck_path: PathBuf,
    /// Initial route fragment ("" = list view)
    pub route: String,
}

impl ViewerConfig {
    /// Viewer config for a deck path, starting at the list view.
    #[must_use]
    pub fn new(deck_path: PathBuf) -> Self {
        Self {
            deck_path,
            route: String::new(),
        }
    }

    /// Set the initial route fragment.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route_is_list() {
        let config = ViewerConfig::new(PathBuf::from("topics.json"));
        assert!(config.route.is_empty());
    }

    #[test]
    fn test_with_route() {
        let config = ViewerConfig::new(PathBuf::from("topics.json")).with_route("topic/a");
        assert_eq!(config.route, "topic/a");
    }
}
