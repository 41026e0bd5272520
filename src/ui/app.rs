use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
};
use tracing::debug;

use crate::{
    indicator::{AppLifecycle, LifecycleEvent, PlaybackIndicator, PlaybackState},
    ui::{
        components::StatusWidget,
        input::{AppMessage, InputHandler},
        tui::{TerminalEvent, Tui},
    },
    util::colors,
};

pub struct App {
    pub lifecycle: AppLifecycle,
    pub indicator: PlaybackIndicator,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let lifecycle = AppLifecycle::new();
        let indicator = PlaybackIndicator::new(&lifecycle);

        Self {
            lifecycle,
            indicator,
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            if let Some(evt) = tui.next().await {
                self.handle_event(evt, &mut tui)?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, evt: TerminalEvent, tui: &mut Tui) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::FocusGained => {
                self.has_focus = true;
                self.lifecycle
                    .notify(LifecycleEvent::EnteredForeground, Instant::now());
                tui.clear()?;
            }
            TerminalEvent::FocusLost => {
                self.has_focus = false;
                self.lifecycle
                    .notify(LifecycleEvent::EnteredBackground, Instant::now());
            }
            TerminalEvent::Key(key) => {
                if let Some(msg) = InputHandler::handle_key(key) {
                    self.update(msg);
                }
            }
            TerminalEvent::Tick | TerminalEvent::Resize(..) => {}
        }
        Ok(())
    }

    fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::TogglePlayPause => {
                let next = match self.indicator.state() {
                    PlaybackState::Playing => PlaybackState::Paused,
                    PlaybackState::Paused | PlaybackState::Stopped => PlaybackState::Playing,
                };
                debug!(?next, "toggling playback");
                self.indicator.set_state(next, Instant::now());
            }
            AppMessage::Stop => {
                debug!("stopping playback");
                self.indicator.set_state(PlaybackState::Stopped, Instant::now());
            }
            AppMessage::ToggleHidesWhenStopped => {
                let hides = !self.indicator.hides_when_stopped();
                debug!(hides, "toggling hide on stop");
                self.indicator.set_hides_when_stopped(hides);
            }
        }
    }

    fn ui(&self, f: &mut Frame) {
        if !self.has_focus {
            return;
        }

        let area = f.area();
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let frame_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title("eqbar")
            .title_alignment(Alignment::Center);
        let inner = frame_block.inner(area);
        f.render_widget(frame_block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(inner);

        f.render_widget(self.indicator.frame(Instant::now()), chunks[0]);
        f.render_widget(
            StatusWidget::new(self.indicator.state(), self.indicator.hides_when_stopped()),
            chunks[1],
        );
    }
}
