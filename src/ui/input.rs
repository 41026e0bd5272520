use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Quit,
    TogglePlayPause,
    Stop,
    ToggleHidesWhenStopped,
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('s'), _) => Some(AppMessage::Stop),
            (KeyCode::Char('h'), _) => Some(AppMessage::ToggleHidesWhenStopped),
            _ => None,
        }
    }
}
