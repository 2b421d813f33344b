//! Timer events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted when a command changes the timer state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerEvent {
    pub event_type: TimerEventType,
    pub timestamp: DateTime<Utc>,
}

/// Types of timer events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEventType {
    /// Timer started from idle
    Started { accumulated_millis: u64 },
    /// Timer resumed from pause
    Resumed { accumulated_millis: u64 },
    /// Timer paused
    Paused { elapsed_millis: u64 },
    /// Timer stopped and reset
    Stopped { elapsed_millis: u64 },
}

impl TimerEvent {
    pub fn new(event_type: TimerEventType) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
        }
    }

    pub fn started(accumulated_millis: u64) -> Self {
        Self::new(TimerEventType::Started { accumulated_millis })
    }

    pub fn resumed(accumulated_millis: u64) -> Self {
        Self::new(TimerEventType::Resumed { accumulated_millis })
    }

    pub fn paused(elapsed_millis: u64) -> Self {
        Self::new(TimerEventType::Paused { elapsed_millis })
    }

    pub fn stopped(elapsed_millis: u64) -> Self {
        Self::new(TimerEventType::Stopped { elapsed_millis })
    }

    /// Short human readable description for status lines.
    pub fn describe(&self) -> &'static str {
        match self.event_type {
            TimerEventType::Started { .. } => "Timer started",
            TimerEventType::Resumed { .. } => "Timer resumed",
            TimerEventType::Paused { .. } => "Timer paused",
            TimerEventType::Stopped { .. } => "Timer stopped",
        }
    }
}
