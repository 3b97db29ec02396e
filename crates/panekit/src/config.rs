//! panekit Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable defaults for wrappers and transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long a press must be held before a long-click fires
    pub long_press_delay: Duration,

    /// Default duration of `Element::animate`
    pub animation_duration: Duration,

    /// Duration of each half of a view crossfade
    pub fade_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            long_press_delay: Duration::from_millis(500),
            animation_duration: Duration::from_millis(300),
            fade_duration: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.long_press_delay, Duration::from_millis(500));
        assert_eq!(config.animation_duration, Duration::from_millis(300));
        assert_eq!(config.fade_duration, Duration::from_millis(500));
    }
}
