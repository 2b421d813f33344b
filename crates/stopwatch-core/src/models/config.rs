//! Stopwatch configuration

use crate::clock::{Clock, MonotonicClock, WallClock};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StopwatchConfig {
    /// How often the display re-reads the elapsed time
    pub tick_interval_ms: u64,
    /// Animation frame interval for digit transitions
    pub frame_interval_ms: u64,
    /// Frames per digit transition, 0 disables the animation
    pub transition_frames: u16,
    pub clock: ClockKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    #[default]
    Monotonic,
    Wall,
}

impl StopwatchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Validation(
                "Tick interval must be greater than 0".to_string(),
            ));
        }

        // Coarser ticks would skip displayed seconds
        const MAX_TICK_INTERVAL: u64 = 1000;
        if self.tick_interval_ms > MAX_TICK_INTERVAL {
            return Err(Error::Validation(format!(
                "Tick interval too long (max {} ms)",
                MAX_TICK_INTERVAL
            )));
        }

        if self.frame_interval_ms == 0 {
            return Err(Error::Validation(
                "Frame interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn animations_enabled(&self) -> bool {
        self.transition_frames > 0
    }
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            frame_interval_ms: 30,
            transition_frames: 8,
            clock: ClockKind::Monotonic,
        }
    }
}

impl ClockKind {
    pub fn build(&self) -> Box<dyn Clock + Send> {
        match self {
            ClockKind::Monotonic => Box::new(MonotonicClock::new()),
            ClockKind::Wall => Box::new(WallClock),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockKind::Monotonic => "monotonic",
            ClockKind::Wall => "wall",
        }
    }
}
