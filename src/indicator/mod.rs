mod animator;
mod bars;
mod config;
mod lifecycle;
mod state;
mod view;

pub use self::animator::BarAnimator;
pub use self::bars::BarStack;
pub use self::config::{IndicatorConfig, IndicatorConfigError};
pub use self::lifecycle::{AppLifecycle, LifecycleEvent, LifecycleObserver, Subscription};
pub use self::state::PlaybackState;
pub use self::view::{IndicatorFrame, PlaybackIndicator};
