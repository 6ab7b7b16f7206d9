//! Interactive terminal UI using ratatui.
//!
//! The TUI is a single full-frame application: the router picks the view,
//! [`StudyApp`] owns every piece of view state, and each draw rebuilds the
//! frame from that state. Mouse support works through hitboxes recorded at
//! draw time.

mod app;
mod events;
pub mod theme;
mod ui;
pub(crate) mod widgets;

pub use app::{HitTarget, Hitbox, StudyApp, APP_NAME};
pub use events::Event;
pub use theme::ColorScheme;
pub use ui::run_study_tui;
