//! Event handling for the `StudyApp`.
//!
//! A background thread pumps crossterm events into a channel; all state
//! mutation happens on the main thread, one event at a time, so a draw
//! always completes before the next event is observed.

use super::app::{HitTarget, StudyApp};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind,
};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
pub enum Event {
    Key(KeyEvent),
    Mouse(event::MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Event handler.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl Default for EventHandler {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(100);

        let event_tx = tx.clone();
        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => {
                            if event_tx.send(Event::Mouse(mouse)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }
}

impl EventHandler {
    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Handle key events for `StudyApp`.
pub fn handle_key_event(app: &mut StudyApp, key: KeyEvent) {
    // Clear any status message on key press
    app.clear_status_message();

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The help overlay swallows everything and closes
    if app.show_help() {
        app.close_help();
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {
            if app.current_topic().is_some() {
                handle_detail_key(app, key);
            } else {
                handle_list_key(app, key);
            }
        }
    }
}

fn handle_list_key(app: &mut StudyApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.list_select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.list_select_next(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.list_select_first(),
        KeyCode::End | KeyCode::Char('G') => app.list_select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_list_row(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut StudyApp, key: KeyEvent) {
    match key.code {
        // Back to the list (queued route, applied by the main loop)
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.request_back(),

        // Mode toggles
        KeyCode::Char('m') => app.toggle_mask_mode(),
        KeyCode::Char('s') => app.toggle_stealth_mode(),

        // Span cursor
        KeyCode::Tab | KeyCode::Char('n') => app.next_span(),
        KeyCode::BackTab | KeyCode::Char('p') => app.prev_span(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_cursor_span(),

        // Content scrolling
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::PageUp => {
            for _ in 0..super::app::PAGE_SIZE {
                app.scroll_up();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..super::app::PAGE_SIZE {
                app.scroll_down();
            }
        }

        _ => {}
    }
}

/// Handle mouse events for `StudyApp`.
pub fn handle_mouse_event(app: &mut StudyApp, mouse: event::MouseEvent) {
    app.clear_status_message();

    if app.show_help() {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.close_help();
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match app.hit_test(mouse.column, mouse.row) {
                Some(HitTarget::ListRow(index)) => {
                    app.list_select(index);
                    app.activate_list_row();
                }
                Some(HitTarget::Span(ordinal)) => app.toggle_span(ordinal),
                Some(HitTarget::Back) => app.request_back(),
                Some(HitTarget::MaskToggle) => app.toggle_mask_mode(),
                Some(HitTarget::StealthToggle) => app.toggle_stealth_mode(),
                None => {}
            }
        }
        MouseEventKind::ScrollDown => {
            if app.current_topic().is_some() {
                app.scroll_down();
            } else {
                app.list_select_next();
            }
        }
        MouseEventKind::ScrollUp => {
            if app.current_topic().is_some() {
                app.scroll_up();
            } else {
                app.list_select_prev();
            }
        }
        _ => {}
    }
}
