use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A piece of the UI that reacts to keys and actions and draws itself
pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    /// Look at an action on its way through the tree; return it (or a
    /// replacement) for the next component
    fn update(&mut self, action: Action) -> Action {
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);

    /// True while a text field or modal owns the keyboard; global keys are
    /// suspended except Ctrl+C
    fn captures_input(&self) -> bool {
        false
    }
}
