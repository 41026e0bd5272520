use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub bar_count: usize,
    pub bar_width: u16,
    pub bar_spacing: u16,
    pub max_bar_height: u16,
    pub min_scale: f64,
    pub idle_scale: f64,
    pub phase_delta: Duration,
    pub oscillation_period: Duration,
    pub decay_duration: Duration,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bar_count: 4,
            bar_width: 2,
            bar_spacing: 1,
            max_bar_height: 6,
            min_scale: 0.2,
            idle_scale: 0.5,
            phase_delta: Duration::from_millis(120),
            oscillation_period: Duration::from_millis(960),
            decay_duration: Duration::from_millis(300),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorConfigError {
    #[error("indicator needs at least one bar")]
    NoBars,

    #[error("bar width, bar height and animation durations must be non-zero")]
    ZeroDimension,

    #[error("scales must satisfy 0 < min_scale <= idle_scale <= 1, got min={min} idle={idle}")]
    ScaleOutOfRange { min: f64, idle: f64 },
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), IndicatorConfigError> {
        if self.bar_count == 0 {
            return Err(IndicatorConfigError::NoBars);
        }
        if self.bar_width == 0
            || self.max_bar_height == 0
            || self.oscillation_period.is_zero()
            || self.decay_duration.is_zero()
        {
            return Err(IndicatorConfigError::ZeroDimension);
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.idle_scale && self.idle_scale <= 1.0) {
            return Err(IndicatorConfigError::ScaleOutOfRange {
                min: self.min_scale,
                idle: self.idle_scale,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(IndicatorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_bars_are_rejected() {
        let config = IndicatorConfig {
            bar_count: 0,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.validate(), Err(IndicatorConfigError::NoBars));
    }

    #[test]
    fn zero_geometry_is_rejected() {
        let config = IndicatorConfig {
            bar_width: 0,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.validate(), Err(IndicatorConfigError::ZeroDimension));

        let config = IndicatorConfig {
            decay_duration: Duration::ZERO,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.validate(), Err(IndicatorConfigError::ZeroDimension));
    }

    #[test]
    fn inverted_scales_are_rejected() {
        let config = IndicatorConfig {
            min_scale: 0.8,
            idle_scale: 0.3,
            ..IndicatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(IndicatorConfigError::ScaleOutOfRange { .. })
        ));

        let config = IndicatorConfig {
            idle_scale: 1.4,
            ..IndicatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(IndicatorConfigError::ScaleOutOfRange { .. })
        ));
    }
}
