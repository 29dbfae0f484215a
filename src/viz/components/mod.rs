pub mod grid;
pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::widgets::WidgetRef;

pub use grid::GridView;
pub use log::Logs;
pub use plot::Plot;

/// A widget that can react to terminal events
pub trait Component: WidgetRef {
    /// **Returns** whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}

/// The key code of a key press event, ignoring releases and repeats
pub(super) fn key_press(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
        _ => None,
    }
}
