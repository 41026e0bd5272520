use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, symbols};

use super::{animator::BarAnimator, config::IndicatorConfig};

pub struct BarStack {
    bars: Vec<BarAnimator>,
    bar_width: u16,
    bar_spacing: u16,
    max_bar_height: u16,
}

impl BarStack {
    pub fn new(config: &IndicatorConfig) -> Self {
        let bars = (0..config.bar_count)
            .map(|index| BarAnimator::new(config.phase_delta * index as u32, config))
            .collect();

        Self {
            bars,
            bar_width: config.bar_width,
            bar_spacing: config.bar_spacing,
            max_bar_height: config.max_bar_height,
        }
    }

    pub fn start_oscillation(&mut self, now: Instant) {
        for bar in &mut self.bars {
            bar.start_oscillation(now);
        }
    }

    pub fn stop_oscillation(&mut self, now: Instant) {
        for bar in &mut self.bars {
            bar.stop_oscillation(now);
        }
    }

    pub fn start_decay(&mut self, now: Instant) {
        for bar in &mut self.bars {
            bar.start_decay(now);
        }
    }

    pub fn stop_decay(&mut self, now: Instant) {
        for bar in &mut self.bars {
            bar.stop_decay(now);
        }
    }

    // bars are only ever toggled as a group, so the first one speaks for all
    pub fn is_oscillating(&self) -> bool {
        self.bars.first().is_some_and(BarAnimator::is_oscillating)
    }

    pub fn intrinsic_size(&self) -> (u16, u16) {
        let count = self.bars.len() as u16;
        (
            count * self.bar_width + count.saturating_sub(1) * self.bar_spacing,
            self.max_bar_height,
        )
    }

    pub(crate) fn values_at(&self, now: Instant) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.value_at(now)).collect()
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, now: Instant, style: Style) {
        if area.is_empty() {
            return;
        }

        let height = area.height.min(self.max_bar_height);
        for (index, bar) in self.bars.iter().enumerate() {
            let x0 = area.x + index as u16 * (self.bar_width + self.bar_spacing);
            if x0 >= area.right() {
                break;
            }

            let eighths =
                (bar.value_at(now) * f64::from(self.max_bar_height) * 8.0).round() as u16;
            for row in 0..height {
                let filled = eighths.saturating_sub(row * 8).min(8);
                if filled == 0 {
                    break;
                }

                let y = area.bottom() - 1 - row;
                let symbol = vertical_block(filled);
                for dx in 0..self.bar_width {
                    let x = x0 + dx;
                    if x >= area.right() {
                        break;
                    }
                    buf[(x, y)].set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

fn vertical_block(eighths: u16) -> &'static str {
    match eighths {
        1 => symbols::bar::ONE_EIGHTH,
        2 => symbols::bar::ONE_QUARTER,
        3 => symbols::bar::THREE_EIGHTHS,
        4 => symbols::bar::HALF,
        5 => symbols::bar::FIVE_EIGHTHS,
        6 => symbols::bar::THREE_QUARTERS,
        7 => symbols::bar::SEVEN_EIGHTHS,
        _ => symbols::bar::FULL,
    }
}
