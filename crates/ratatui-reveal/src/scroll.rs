use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseEventKind;
use crate::input::key_char;
use crate::input::key_ctrl;
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Keys and wheel steps that move the page.
#[derive(Clone, Debug)]
pub struct ScrollBindings {
    pub line_step: i32,
    pub wheel_step: i32,
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
}

impl Default for ScrollBindings {
    fn default() -> Self {
        let shift = KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        };
        Self {
            line_step: 1,
            wheel_step: 3,
            up: vec![KeyEvent::new(KeyCode::Up), key_char('k')],
            down: vec![KeyEvent::new(KeyCode::Down), key_char('j')],
            page_up: vec![KeyEvent::new(KeyCode::PageUp), key_ctrl('u')],
            page_down: vec![
                KeyEvent::new(KeyCode::PageDown),
                key_ctrl('d'),
                key_char(' '),
            ],
            top: vec![KeyEvent::new(KeyCode::Home), key_char('g')],
            bottom: vec![
                KeyEvent::new(KeyCode::End),
                key_char('G'),
                key_char('G').with_modifiers(shift),
            ],
        }
    }
}

impl ScrollBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<ScrollAction> {
        let table = [
            (&self.up, ScrollAction::Up),
            (&self.down, ScrollAction::Down),
            (&self.page_up, ScrollAction::PageUp),
            (&self.page_down, ScrollAction::PageDown),
            (&self.top, ScrollAction::Top),
            (&self.bottom, ScrollAction::Bottom),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| p.matches(key)))
            .map(|(_, action)| action)
    }

    pub fn apply(&self, state: &mut ViewportState, action: ScrollAction) {
        match action {
            ScrollAction::Up => state.scroll_y_by(-self.line_step),
            ScrollAction::Down => state.scroll_y_by(self.line_step),
            ScrollAction::PageUp => state.page_up(),
            ScrollAction::PageDown => state.page_down(),
            ScrollAction::Top => state.to_top(),
            ScrollAction::Bottom => state.to_bottom(),
        }
    }

    /// Scrolls `state` for a key or wheel event. Returns `true` if the event was consumed.
    pub fn handle_event(&self, state: &mut ViewportState, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => match self.action_for(key) {
                Some(action) => {
                    self.apply(state, action);
                    true
                }
                None => false,
            },
            InputEvent::Mouse(MouseEventKind::ScrollUp) => {
                state.scroll_y_by(-self.wheel_step);
                true
            }
            InputEvent::Mouse(MouseEventKind::ScrollDown) => {
                state.scroll_y_by(self.wheel_step);
                true
            }
            InputEvent::Resize { .. } => false,
        }
    }
}
