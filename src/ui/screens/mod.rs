pub mod explore;
pub mod home;
pub mod messages;
pub mod profile;
pub mod settings;

use crate::config::ScreenKind;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// What the app shell should do after a screen handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Status(String),
    OpenUrl(String),
    /// Switch to the messages screen with this photographer's chat open.
    OpenChat(String),
    /// Switch to the home feed with this photographer's card selected.
    FocusPhotographer(String),
    Quit,
}

pub trait Screen {
    fn kind(&self) -> ScreenKind;

    fn render(&self, frame: &mut Frame, area: Rect);

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction;

    fn scroll_up(&mut self);

    fn scroll_down(&mut self);

    /// True while the screen owns the keyboard (text entry or a modal), so
    /// global shortcuts like `q` and tab switching must not fire.
    fn captures_input(&self) -> bool {
        false
    }
}

/// Moves a list selection by one step, clamped to `len`.
pub(crate) fn step_selection(current: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_selection_clamps() {
        assert_eq!(step_selection(0, 3, false), 0);
        assert_eq!(step_selection(0, 3, true), 1);
        assert_eq!(step_selection(2, 3, true), 2);
        assert_eq!(step_selection(5, 0, true), 0);
    }
}
