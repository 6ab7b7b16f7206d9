//! `StudyApp` - view state for the deck browser.
//!
//! All view state lives here and is mutated only through these methods: the
//! router applies selections, the event handlers flip modes and move
//! cursors, and the renderer reads the result. Handlers never invoke the
//! router directly — navigation is queued as a route fragment and drained by
//! the main loop, mirroring a location-change signal.

use crate::model::{ParsedContent, Topic, TopicDeck};
use crate::router::{Route, ViewSelection};
use ratatui::layout::Rect;
use std::collections::HashSet;

/// Application name, used for the header and the terminal title.
pub const APP_NAME: &str = "redsheet";

/// Rows moved by a page scroll.
pub(crate) const PAGE_SIZE: usize = 10;

/// What a rendered screen region activates when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A list row, by deck position
    ListRow(usize),
    /// A memory span, by ordinal
    Span(usize),
    /// A back-to-list control
    Back,
    MaskToggle,
    StealthToggle,
}

/// A clickable region recorded during the last draw.
#[derive(Debug, Clone, Copy)]
pub struct Hitbox {
    pub area: Rect,
    pub target: HitTarget,
}

/// Main application state.
pub struct StudyApp {
    /// The loaded deck (immutable after startup)
    deck: TopicDeck,

    /// Current topic id; `None` = list view
    current: Option<String>,

    /// Parsed content of the current topic (empty for the list view)
    content: ParsedContent,

    /// Whether memory spans are hidden by default
    mask_mode: bool,

    /// Whole-screen disguise flag
    stealth_mode: bool,

    /// Ordinals of spans individually revealed in this detail view
    revealed: HashSet<usize>,

    /// Keyboard cursor over memory spans
    span_cursor: usize,

    /// List selection, by deck position
    list_selected: usize,

    /// First visible list row (kept in sync by the renderer)
    pub(crate) list_offset: usize,

    /// Vertical scroll of the detail content
    detail_scroll: u16,

    /// Route queued by a handler, drained by the main loop
    pending_route: Option<Route>,

    /// Clickable regions from the last draw
    hitboxes: Vec<Hitbox>,

    /// Transient status message
    status_message: Option<String>,

    /// Help overlay visibility
    show_help: bool,

    /// Should quit
    should_quit: bool,

    /// Animation tick counter
    pub(crate) tick: u64,
}

impl StudyApp {
    /// Create the app for a loaded deck, at the list view, with mask mode
    /// on and stealth mode off.
    #[must_use]
    pub fn new(deck: TopicDeck) -> Self {
        Self {
            deck,
            current: None,
            content: ParsedContent::default(),
            mask_mode: true,
            stealth_mode: false,
            revealed: HashSet::new(),
            span_cursor: 0,
            list_selected: 0,
            list_offset: 0,
            detail_scroll: 0,
            pending_route: None,
            hitboxes: Vec::new(),
            status_message: None,
            show_help: false,
            should_quit: false,
            tick: 0,
        }
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Apply a route, replacing the current view.
    ///
    /// This is the only entry point for navigation; it is called once at
    /// startup and once per queued route change.
    pub fn apply_route(&mut self, route: &Route) {
        let id = match route.resolve(&self.deck) {
            ViewSelection::Detail(topic) => Some(topic.id.clone()),
            ViewSelection::List => None,
        };
        match id {
            Some(id) => self.enter_detail(&id),
            None => self.enter_list(),
        }
    }

    /// Enter a detail view.
    ///
    /// Invariant: entering a detail view always starts from
    /// `MaskedAllHidden` (or `Unmasked` if mask mode is off) — the reveal
    /// set and span cursor are reset here, not as a side effect of
    /// redrawing.
    fn enter_detail(&mut self, id: &str) {
        let Some(topic) = self.deck.get(id) else {
            self.enter_list();
            return;
        };
        self.content = ParsedContent::parse(&topic.content);
        self.current = Some(id.to_string());
        self.revealed.clear();
        self.span_cursor = 0;
        self.detail_scroll = 0;
        if let Some(pos) = self.deck.position(id) {
            self.list_selected = pos;
        }
    }

    /// Enter the list view, discarding the detail view wholesale.
    fn enter_list(&mut self) {
        self.current = None;
        self.content = ParsedContent::default();
        self.revealed.clear();
        self.span_cursor = 0;
        self.detail_scroll = 0;
    }

    /// Queue a route change for the main loop to apply.
    pub fn queue_route(&mut self, route: Route) {
        self.pending_route = Some(route);
    }

    /// Take the queued route change, if any.
    pub fn take_pending_route(&mut self) -> Option<Route> {
        self.pending_route.take()
    }

    /// Queue navigation back to the list.
    pub fn request_back(&mut self) {
        self.queue_route(Route::List);
    }

    // ========================================================================
    // View accessors
    // ========================================================================

    /// The loaded deck.
    #[must_use]
    pub const fn deck(&self) -> &TopicDeck {
        &self.deck
    }

    /// The currently shown topic, or `None` on the list view.
    #[must_use]
    pub fn current_topic(&self) -> Option<&Topic> {
        self.current.as_deref().and_then(|id| self.deck.get(id))
    }

    /// Parsed content of the current detail view.
    #[must_use]
    pub const fn content(&self) -> &ParsedContent {
        &self.content
    }

    /// The terminal title for the current view.
    #[must_use]
    pub fn title(&self) -> String {
        match self.current_topic() {
            Some(topic) => format!("{} - {APP_NAME}", topic.title),
            None => APP_NAME.to_string(),
        }
    }

    // ========================================================================
    // Mode toggles
    // ========================================================================

    #[must_use]
    pub const fn mask_mode(&self) -> bool {
        self.mask_mode
    }

    #[must_use]
    pub const fn stealth_mode(&self) -> bool {
        self.stealth_mode
    }

    /// Set mask mode.
    ///
    /// Invariant: turning mask mode ON clears the reveal set — every
    /// previously revealed span reverts to hidden. Turning it OFF leaves
    /// the set alone; everything renders visible regardless.
    pub fn set_mask_mode(&mut self, on: bool) {
        self.mask_mode = on;
        if on {
            self.revealed.clear();
        }
    }

    pub fn toggle_mask_mode(&mut self) {
        self.set_mask_mode(!self.mask_mode);
    }

    /// Set stealth mode. Orthogonal to mask state, topic selection, and
    /// the reveal set.
    pub fn set_stealth_mode(&mut self, on: bool) {
        self.stealth_mode = on;
    }

    pub fn toggle_stealth_mode(&mut self) {
        self.set_stealth_mode(!self.stealth_mode);
    }

    // ========================================================================
    // Memory spans
    // ========================================================================

    /// Toggle one span's reveal state.
    ///
    /// A no-op while mask mode is off: all spans are already visible and
    /// clicks must not change reveal membership.
    pub fn toggle_span(&mut self, ordinal: usize) {
        if !self.mask_mode || ordinal >= self.content.span_count() {
            return;
        }
        if !self.revealed.remove(&ordinal) {
            self.revealed.insert(ordinal);
        }
        self.span_cursor = ordinal;
    }

    /// Whether a span is individually revealed.
    #[must_use]
    pub fn is_revealed(&self, ordinal: usize) -> bool {
        self.revealed.contains(&ordinal)
    }

    /// Whether a span currently renders as blocks.
    #[must_use]
    pub fn is_span_hidden(&self, ordinal: usize) -> bool {
        self.mask_mode && !self.revealed.contains(&ordinal)
    }

    /// Number of individually revealed spans.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub const fn span_cursor(&self) -> usize {
        self.span_cursor
    }

    /// Move the span cursor forward, wrapping.
    pub fn next_span(&mut self) {
        let count = self.content.span_count();
        if count > 0 {
            self.span_cursor = (self.span_cursor + 1) % count;
        }
    }

    /// Move the span cursor backward, wrapping.
    pub fn prev_span(&mut self) {
        let count = self.content.span_count();
        if count > 0 {
            self.span_cursor = (self.span_cursor + count - 1) % count;
        }
    }

    /// Toggle the span under the cursor.
    pub fn activate_cursor_span(&mut self) {
        self.toggle_span(self.span_cursor);
    }

    // ========================================================================
    // List navigation
    // ========================================================================

    #[must_use]
    pub const fn list_selected(&self) -> usize {
        self.list_selected
    }

    pub fn list_select(&mut self, index: usize) {
        if index < self.deck.len() {
            self.list_selected = index;
        }
    }

    pub fn list_select_next(&mut self) {
        if self.list_selected + 1 < self.deck.len() {
            self.list_selected += 1;
        }
    }

    pub fn list_select_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_select_first(&mut self) {
        self.list_selected = 0;
    }

    pub fn list_select_last(&mut self) {
        self.list_selected = self.deck.len().saturating_sub(1);
    }

    pub fn list_page_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(PAGE_SIZE);
    }

    pub fn list_page_down(&mut self) {
        if !self.deck.is_empty() {
            self.list_selected = (self.list_selected + PAGE_SIZE).min(self.deck.len() - 1);
        }
    }

    /// Queue navigation to the selected row's topic.
    pub fn activate_list_row(&mut self) {
        if let Some(topic) = self.deck.by_position(self.list_selected) {
            self.queue_route(Route::Topic(topic.id.clone()));
        }
    }

    // ========================================================================
    // Detail scrolling
    // ========================================================================

    #[must_use]
    pub const fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    /// Clamp the scroll to the rendered content height.
    pub(crate) fn clamp_detail_scroll(&mut self, max: u16) {
        if self.detail_scroll > max {
            self.detail_scroll = max;
        }
    }

    // ========================================================================
    // Hitboxes
    // ========================================================================

    /// Forget the previous draw's clickable regions.
    pub fn clear_hitboxes(&mut self) {
        self.hitboxes.clear();
    }

    /// Record a clickable region for the current draw.
    pub fn push_hitbox(&mut self, area: Rect, target: HitTarget) {
        self.hitboxes.push(Hitbox { area, target });
    }

    /// The target under a screen position, if any.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hitboxes
            .iter()
            .find(|h| {
                row == h.area.y
                    && column >= h.area.x
                    && column < h.area.x.saturating_add(h.area.width)
            })
            .map(|h| h.target)
    }

    // ========================================================================
    // Misc
    // ========================================================================

    /// Set a temporary status message.
    pub fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear the status message.
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    #[must_use]
    pub const fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Topic;

    fn sample_deck() -> TopicDeck {
        TopicDeck::from_topics(vec![
            Topic {
                id: "a".to_string(),
                title: "Topic A".to_string(),
                category: Some("X".to_string()),
                content: r#"The answer is <span class="span-memory">equity</span> and <span class="span-memory">assets</span>."#.to_string(),
            },
            Topic {
                id: "b".to_string(),
                title: "Topic B".to_string(),
                category: None,
                content: "plain text".to_string(),
            },
        ])
        .unwrap()
    }

    fn app_at(route: &str) -> StudyApp {
        let mut app = StudyApp::new(sample_deck());
        app.apply_route(&Route::parse(route));
        app
    }

    #[test]
    fn test_starts_masked_at_list() {
        let app = StudyApp::new(sample_deck());
        assert!(app.mask_mode());
        assert!(!app.stealth_mode());
        assert!(app.current_topic().is_none());
        assert_eq!(app.title(), APP_NAME);
    }

    #[test]
    fn test_route_to_detail_sets_title() {
        let app = app_at("topic/a");
        assert_eq!(app.current_topic().unwrap().title, "Topic A");
        assert_eq!(app.title(), "Topic A - redsheet");
        assert_eq!(app.content().span_count(), 2);
    }

    #[test]
    fn test_unknown_route_falls_back_to_list() {
        let app = app_at("topic/zzz");
        assert!(app.current_topic().is_none());
    }

    #[test]
    fn test_detail_entry_is_all_hidden() {
        let app = app_at("topic/a");
        assert!(app.is_span_hidden(0));
        assert!(app.is_span_hidden(1));
        assert_eq!(app.revealed_count(), 0);
    }

    #[test]
    fn test_span_toggle_reveals_and_rehides() {
        let mut app = app_at("topic/a");
        app.toggle_span(0);
        assert!(app.is_revealed(0));
        assert!(!app.is_span_hidden(0));
        assert!(app.is_span_hidden(1));

        app.toggle_span(0);
        assert!(app.is_span_hidden(0));
    }

    #[test]
    fn test_mask_on_clears_reveal_set() {
        let mut app = app_at("topic/a");
        app.toggle_span(0);
        app.toggle_span(1);
        assert_eq!(app.revealed_count(), 2);

        app.set_mask_mode(false);
        // Everything visible, reveal set untouched
        assert!(!app.is_span_hidden(0));
        assert_eq!(app.revealed_count(), 2);

        app.set_mask_mode(true);
        // The one place prior reveal state is discarded
        assert_eq!(app.revealed_count(), 0);
        assert!(app.is_span_hidden(0));
        assert!(app.is_span_hidden(1));
    }

    #[test]
    fn test_span_toggle_is_noop_when_unmasked() {
        let mut app = app_at("topic/a");
        app.set_mask_mode(false);
        app.toggle_span(0);
        assert_eq!(app.revealed_count(), 0);

        // Re-enabling mask shows the default all-hidden state
        app.set_mask_mode(true);
        assert!(app.is_span_hidden(0));
    }

    #[test]
    fn test_stealth_is_orthogonal() {
        let mut app = app_at("topic/a");
        app.toggle_span(1);
        let revealed_before = app.revealed_count();

        app.toggle_stealth_mode();
        assert!(app.stealth_mode());
        assert!(app.mask_mode());
        assert_eq!(app.current_topic().unwrap().id, "a");
        assert_eq!(app.revealed_count(), revealed_before);

        app.toggle_stealth_mode();
        assert!(!app.stealth_mode());
    }

    #[test]
    fn test_reveal_set_reset_on_reentry() {
        let mut app = app_at("topic/a");
        app.toggle_span(0);
        assert_eq!(app.revealed_count(), 1);

        app.apply_route(&Route::List);
        app.apply_route(&Route::parse("topic/a"));
        assert_eq!(app.revealed_count(), 0);
        assert!(app.is_span_hidden(0));
    }

    #[test]
    fn test_span_cursor_wraps() {
        let mut app = app_at("topic/a");
        assert_eq!(app.span_cursor(), 0);
        app.next_span();
        assert_eq!(app.span_cursor(), 1);
        app.next_span();
        assert_eq!(app.span_cursor(), 0);
        app.prev_span();
        assert_eq!(app.span_cursor(), 1);
    }

    #[test]
    fn test_list_activation_queues_topic_route() {
        let mut app = StudyApp::new(sample_deck());
        app.list_select_next();
        app.activate_list_row();
        assert_eq!(app.take_pending_route(), Some(Route::Topic("b".to_string())));
        assert_eq!(app.take_pending_route(), None);
    }

    #[test]
    fn test_back_queues_list_route() {
        let mut app = app_at("topic/a");
        app.request_back();
        let route = app.take_pending_route().unwrap();
        app.apply_route(&route);
        assert!(app.current_topic().is_none());
    }

    #[test]
    fn test_toggle_out_of_range_span_is_noop() {
        let mut app = app_at("topic/b");
        assert_eq!(app.content().span_count(), 0);
        app.toggle_span(0);
        assert_eq!(app.revealed_count(), 0);
    }
}
