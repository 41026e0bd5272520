use std::time::{Duration, Instant};

use super::config::IndicatorConfig;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Idle,
    Oscillating { started: Instant },
    Decaying { from: f64, started: Instant },
}

pub struct BarAnimator {
    phase: Duration,
    period: Duration,
    min_scale: f64,
    idle_scale: f64,
    decay_duration: Duration,
    held: f64,
    mode: Mode,
}

impl BarAnimator {
    pub fn new(phase: Duration, config: &IndicatorConfig) -> Self {
        Self {
            phase,
            period: config.oscillation_period,
            min_scale: config.min_scale,
            idle_scale: config.idle_scale,
            decay_duration: config.decay_duration,
            held: config.idle_scale,
            mode: Mode::Idle,
        }
    }

    pub fn start_oscillation(&mut self, now: Instant) {
        self.mode = Mode::Oscillating { started: now };
    }

    pub fn stop_oscillation(&mut self, now: Instant) {
        if let Mode::Oscillating { .. } = self.mode {
            self.held = self.value_at(now);
            self.mode = Mode::Idle;
        }
    }

    pub fn start_decay(&mut self, now: Instant) {
        self.mode = Mode::Decaying {
            from: self.value_at(now),
            started: now,
        };
    }

    pub fn stop_decay(&mut self, now: Instant) {
        if let Mode::Decaying { .. } = self.mode {
            self.held = self.value_at(now);
            self.mode = Mode::Idle;
        }
    }

    pub fn is_oscillating(&self) -> bool {
        matches!(self.mode, Mode::Oscillating { .. })
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        match self.mode {
            Mode::Idle => self.held,
            Mode::Oscillating { started } => {
                let elapsed = now.saturating_duration_since(started) + self.phase;
                let turns = elapsed.as_secs_f64() / self.period.as_secs_f64();
                self.min_scale + (1.0 - self.min_scale) * raised_cosine(turns.fract())
            }
            Mode::Decaying { from, started } => {
                let elapsed = now.saturating_duration_since(started).as_secs_f64();
                let t = elapsed / self.decay_duration.as_secs_f64();
                if t >= 1.0 {
                    self.idle_scale
                } else {
                    from + (self.idle_scale - from) * ease_out_cubic(t)
                }
            }
        }
    }
}

fn raised_cosine(turns: f64) -> f64 {
    0.5 * (1.0 - (std::f64::consts::TAU * turns).cos())
}

fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
