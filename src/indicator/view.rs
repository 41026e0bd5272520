use std::sync::{Arc, RwLock};
use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use tracing::trace;

use crate::util::colors;

use super::{
    bars::BarStack,
    config::{IndicatorConfig, IndicatorConfigError},
    lifecycle::{AppLifecycle, LifecycleEvent, LifecycleObserver, Subscription},
    state::PlaybackState,
};

pub(crate) struct IndicatorCore {
    state: PlaybackState,
    hides_when_stopped: bool,
    hidden: bool,
    bars: BarStack,
    style: Style,
}

impl IndicatorCore {
    fn new(config: &IndicatorConfig) -> Self {
        let mut core = Self {
            state: PlaybackState::default(),
            hides_when_stopped: true,
            hidden: false,
            bars: BarStack::new(config),
            style: Style::new().fg(colors::PRIMARY),
        };
        core.hidden = core.computed_hidden();
        core
    }

    fn set_state(&mut self, state: PlaybackState, now: Instant) {
        self.state = state;
        self.apply_state(now);
    }

    fn apply_state(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => self.start_animating(now),
            PlaybackState::Paused | PlaybackState::Stopped => self.stop_animating(now),
        }
        self.hidden = self.computed_hidden();
    }

    fn set_hides_when_stopped(&mut self, hides: bool) {
        self.hides_when_stopped = hides;
        self.hidden = self.computed_hidden();
    }

    fn computed_hidden(&self) -> bool {
        self.state == PlaybackState::Stopped && self.hides_when_stopped
    }

    fn start_animating(&mut self, now: Instant) {
        if self.bars.is_oscillating() {
            return;
        }
        // a decay finishing late must not override the fresh oscillation
        self.bars.stop_decay(now);
        self.bars.start_oscillation(now);
    }

    fn stop_animating(&mut self, now: Instant) {
        if !self.bars.is_oscillating() {
            return;
        }
        self.bars.stop_oscillation(now);
        self.bars.start_decay(now);
    }
}

impl LifecycleObserver for IndicatorCore {
    fn on_lifecycle(&mut self, event: LifecycleEvent, now: Instant) {
        trace!(?event, state = ?self.state, "indicator lifecycle");
        match event {
            LifecycleEvent::EnteredBackground => self.stop_animating(now),
            LifecycleEvent::EnteredForeground => {
                if self.state == PlaybackState::Playing {
                    self.start_animating(now);
                }
            }
        }
    }
}

pub struct PlaybackIndicator {
    core: Arc<RwLock<IndicatorCore>>,
    _lifecycle: Option<Subscription>,
}

impl PlaybackIndicator {
    pub fn new(lifecycle: &AppLifecycle) -> Self {
        Self::attach(&IndicatorConfig::default(), Some(lifecycle))
    }

    pub fn with_config(
        config: &IndicatorConfig,
        lifecycle: &AppLifecycle,
    ) -> Result<Self, IndicatorConfigError> {
        config.validate()?;
        Ok(Self::attach(config, Some(lifecycle)))
    }

    pub fn detached() -> Self {
        Self::attach(&IndicatorConfig::default(), None)
    }

    fn attach(config: &IndicatorConfig, lifecycle: Option<&AppLifecycle>) -> Self {
        let core = Arc::new(RwLock::new(IndicatorCore::new(config)));
        let subscription = lifecycle.map(|hub| {
            let observer: Arc<RwLock<dyn LifecycleObserver>> = core.clone();
            hub.subscribe(Arc::downgrade(&observer))
        });

        Self {
            core,
            _lifecycle: subscription,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.core.read().unwrap().state
    }

    pub fn set_state(&self, state: PlaybackState, now: Instant) {
        trace!(?state, "indicator state set");
        self.core.write().unwrap().set_state(state, now);
    }

    pub fn hides_when_stopped(&self) -> bool {
        self.core.read().unwrap().hides_when_stopped
    }

    pub fn set_hides_when_stopped(&self, hides: bool) {
        self.core.write().unwrap().set_hides_when_stopped(hides);
    }

    pub fn is_hidden(&self) -> bool {
        self.core.read().unwrap().hidden
    }

    pub fn is_oscillating(&self) -> bool {
        self.core.read().unwrap().bars.is_oscillating()
    }

    pub fn set_style<S: Into<Style>>(&self, style: S) {
        self.core.write().unwrap().style = style.into();
    }

    pub fn intrinsic_size(&self) -> (u16, u16) {
        self.core.read().unwrap().bars.intrinsic_size()
    }

    pub fn size_that_fits(&self, _proposed: (u16, u16)) -> (u16, u16) {
        self.intrinsic_size()
    }

    pub fn frame(&self, now: Instant) -> IndicatorFrame<'_> {
        IndicatorFrame {
            indicator: self,
            now,
        }
    }
}

pub struct IndicatorFrame<'a> {
    indicator: &'a PlaybackIndicator,
    now: Instant,
}

impl Widget for IndicatorFrame<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let core = self.indicator.core.read().unwrap();
        if core.hidden || area.is_empty() {
            return;
        }

        let (width, height) = core.bars.intrinsic_size();
        let width = width.min(area.width);
        let height = height.min(area.height);
        let centered = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        core.bars.render(centered, buf, self.now, core.style);
    }
}

impl Widget for &PlaybackIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.frame(Instant::now()).render(area, buf);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    #[test]
    fn starts_stopped_and_hidden() {
        let indicator = PlaybackIndicator::detached();
        assert_eq!(indicator.state(), PlaybackState::Stopped);
        assert!(indicator.hides_when_stopped());
        assert!(indicator.is_hidden());
        assert!(!indicator.is_oscillating());
    }

    #[test]
    fn visibility_is_a_function_of_state_and_flag() {
        let indicator = PlaybackIndicator::detached();
        let now = Instant::now();

        let cases = [
            (PlaybackState::Playing, true, false),
            (PlaybackState::Paused, true, false),
            (PlaybackState::Stopped, true, true),
            (PlaybackState::Stopped, false, false),
            (PlaybackState::Playing, false, false),
            (PlaybackState::Stopped, true, true),
        ];
        for (state, hides, hidden) in cases {
            indicator.set_hides_when_stopped(hides);
            indicator.set_state(state, now);
            assert_eq!(
                indicator.is_hidden(),
                hidden,
                "state {state:?}, hides_when_stopped {hides}"
            );
        }
    }

    #[test]
    fn unhiding_while_stopped_does_not_animate() {
        let indicator = PlaybackIndicator::detached();
        indicator.set_hides_when_stopped(false);
        assert!(!indicator.is_hidden());
        assert!(!indicator.is_oscillating());

        let values = indicator
            .core
            .read()
            .unwrap()
            .bars
            .values_at(Instant::now());
        assert!(values.iter().all(|value| (value - 0.5).abs() < 1e-9));
    }

    #[test]
    fn playing_twice_does_not_restart_the_oscillation() {
        let indicator = PlaybackIndicator::detached();
        let start = Instant::now();
        indicator.set_state(PlaybackState::Playing, start);

        let probe = start + Duration::from_millis(300);
        let before = indicator.core.read().unwrap().bars.values_at(probe);

        indicator.set_state(PlaybackState::Playing, start + Duration::from_millis(240));
        let after = indicator.core.read().unwrap().bars.values_at(probe);

        assert_eq!(before, after);
        assert!(indicator.is_oscillating());
    }

    #[test]
    fn pausing_stops_oscillation_and_decays_to_idle() {
        let indicator = PlaybackIndicator::detached();
        let start = Instant::now();
        indicator.set_state(PlaybackState::Playing, start);

        let paused_at = start + Duration::from_millis(200);
        indicator.set_state(PlaybackState::Paused, paused_at);
        assert!(!indicator.is_oscillating());
        assert!(!indicator.is_hidden());

        let settled = indicator
            .core
            .read()
            .unwrap()
            .bars
            .values_at(paused_at + Duration::from_millis(300));
        assert!(settled.iter().all(|value| (value - 0.5).abs() < 1e-9));
    }

    #[test]
    fn stopping_hides_and_stops_animation() {
        let indicator = PlaybackIndicator::detached();
        let start = Instant::now();
        indicator.set_state(PlaybackState::Playing, start);
        assert!(!indicator.is_hidden());
        assert!(indicator.is_oscillating());

        indicator.set_state(PlaybackState::Stopped, start + Duration::from_millis(100));
        assert!(indicator.is_hidden());
        assert!(!indicator.is_oscillating());
    }

    #[test]
    fn background_stops_and_foreground_resumes_only_when_playing() {
        let lifecycle = AppLifecycle::new();
        let indicator = PlaybackIndicator::new(&lifecycle);
        let start = Instant::now();

        indicator.set_state(PlaybackState::Playing, start);
        lifecycle.notify(
            LifecycleEvent::EnteredBackground,
            start + Duration::from_millis(100),
        );
        assert!(!indicator.is_oscillating());
        assert_eq!(indicator.state(), PlaybackState::Playing);

        lifecycle.notify(
            LifecycleEvent::EnteredForeground,
            start + Duration::from_millis(200),
        );
        assert!(indicator.is_oscillating());

        indicator.set_state(PlaybackState::Paused, start + Duration::from_millis(300));
        lifecycle.notify(
            LifecycleEvent::EnteredBackground,
            start + Duration::from_millis(400),
        );
        lifecycle.notify(
            LifecycleEvent::EnteredForeground,
            start + Duration::from_millis(500),
        );
        assert!(!indicator.is_oscillating());
        assert_eq!(indicator.state(), PlaybackState::Paused);
    }

    #[test]
    fn intrinsic_size_ignores_proposals() {
        let indicator = PlaybackIndicator::detached();
        assert_eq!(indicator.intrinsic_size(), (11, 6));
        assert_eq!(indicator.size_that_fits((80, 24)), (11, 6));
        assert_eq!(indicator.size_that_fits((1, 1)), (11, 6));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let lifecycle = AppLifecycle::new();
        let config = IndicatorConfig {
            bar_count: 0,
            ..IndicatorConfig::default()
        };
        assert!(PlaybackIndicator::with_config(&config, &lifecycle).is_err());
        assert_eq!(lifecycle.observer_count(), 0);
    }

    #[test]
    fn hidden_indicator_renders_nothing() {
        let indicator = PlaybackIndicator::detached();
        let now = Instant::now();
        let area = Rect::new(0, 0, 20, 8);

        let mut buf = Buffer::empty(area);
        indicator.frame(now).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));

        indicator.set_state(PlaybackState::Playing, now);
        let mut buf = Buffer::empty(area);
        indicator.frame(now).render(area, &mut buf);
        assert_ne!(buf, Buffer::empty(area));
    }

    #[test]
    fn dropped_indicator_leaves_no_observer_behind() {
        let lifecycle = AppLifecycle::new();
        let indicator = PlaybackIndicator::new(&lifecycle);
        assert_eq!(lifecycle.observer_count(), 1);

        drop(indicator);
        assert_eq!(lifecycle.observer_count(), 0);
        lifecycle.notify(LifecycleEvent::EnteredForeground, Instant::now());
    }
}
