use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::{self, border},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{indicator::PlaybackState, util::colors};

pub struct StatusWidget {
    state: PlaybackState,
    hides_when_stopped: bool,
}

impl StatusWidget {
    pub fn new(state: PlaybackState, hides_when_stopped: bool) -> Self {
        Self {
            state,
            hides_when_stopped,
        }
    }
}

impl Widget for StatusWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.vertical_right,
                top_right: symbols::line::ROUNDED.vertical_left,
                ..symbols::border::ROUNDED
            });
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let (icon, name, style) = match self.state {
            PlaybackState::Playing => ("", "playing", Style::default().fg(colors::PRIMARY)),
            PlaybackState::Paused => ("", "paused", Style::default().fg(colors::ACCENT)),
            PlaybackState::Stopped => ("", "stopped", Style::default().fg(colors::NEUTRAL)),
        };

        let status = format!("{icon}  {name}");
        let x = inner.x + inner.width.saturating_sub(status.width() as u16) / 2;
        buf.set_string(x, inner.y, status, style.add_modifier(Modifier::BOLD));

        if inner.height > 1 {
            let hide = if self.hides_when_stopped { "on" } else { "off" };
            let hints = format!("space play/pause  s stop  h hide on stop: {hide}  q quit");
            let x = inner.x + inner.width.saturating_sub(hints.width() as u16) / 2;
            buf.set_string(
                x,
                inner.y + 1,
                hints,
                Style::default().fg(colors::NEUTRAL),
            );
        }
    }
}
