use crate::clock::{Clock, MonotonicClock};
use crate::display::{format, TimeDigits};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

use super::TimerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "Idle",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
        }
    }
}

/// Stopwatch state machine.
///
/// Holds the time accrued by finished runs plus the start reading of the
/// open run, if any. The engine never ticks on its own; callers poll
/// [`TimerEngine::current_elapsed_millis`].
pub struct TimerEngine<C: Clock = MonotonicClock> {
    clock: C,
    state: TimerState,
    accumulated_millis: u64,
    run_start: Option<i64>,
    // Longest interval observed for the open run; a clock stepping back
    // never shrinks it
    run_peak: Cell<u64>,
}

impl TimerEngine<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for TimerEngine<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            accumulated_millis: 0,
            run_start: None,
            run_peak: Cell::new(0),
        }
    }

    /// Open a run. No-op while already running.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.state == TimerState::Running {
            tracing::debug!("start ignored, timer already running");
            return None;
        }

        let previous = self.state;
        self.run_start = Some(self.clock.now_millis());
        self.run_peak.set(0);
        self.state = TimerState::Running;

        if previous == TimerState::Paused {
            tracing::info!(accumulated_millis = self.accumulated_millis, "Timer resumed");
            Some(TimerEvent::resumed(self.accumulated_millis))
        } else {
            tracing::info!("Timer started");
            Some(TimerEvent::started(self.accumulated_millis))
        }
    }

    /// Close the open run and fold it into the accumulated time.
    /// No-op unless running.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            tracing::debug!(state = self.state.as_str(), "pause ignored, timer not running");
            return None;
        }

        let run_millis = self
            .run_start
            .take()
            .map(|start| self.run_millis(start))
            .unwrap_or(0);
        self.run_peak.set(0);
        self.accumulated_millis = self.accumulated_millis.saturating_add(run_millis);
        self.state = TimerState::Paused;

        tracing::info!(
            run_millis,
            elapsed_millis = self.accumulated_millis,
            "Timer paused"
        );
        Some(TimerEvent::paused(self.accumulated_millis))
    }

    /// Reset to idle with zero elapsed time. Returns `None` when the timer
    /// was already idle.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        let previous = self.state;
        let elapsed = self.current_elapsed_millis();

        self.accumulated_millis = 0;
        self.run_start = None;
        self.run_peak.set(0);
        self.state = TimerState::Idle;

        if previous == TimerState::Idle {
            tracing::debug!("stop ignored, timer already idle");
            return None;
        }

        tracing::info!(elapsed_millis = elapsed, "Timer stopped");
        Some(TimerEvent::stopped(elapsed))
    }

    /// Pause when running, start otherwise.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        if self.is_playing() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn current_elapsed_millis(&self) -> u64 {
        match (self.state, self.run_start) {
            (TimerState::Running, Some(start)) => self
                .accumulated_millis
                .saturating_add(self.run_millis(start)),
            _ => self.accumulated_millis,
        }
    }

    fn run_millis(&self, start: i64) -> u64 {
        let run = self.clock.millis_since(start).max(self.run_peak.get());
        self.run_peak.set(run);
        run
    }

    pub fn digits(&self) -> TimeDigits {
        format(self.current_elapsed_millis())
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn accumulated_millis(&self) -> u64 {
        self.accumulated_millis
    }

    pub fn is_playing(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn is_idle(&self) -> bool {
        self.state == TimerState::Idle
    }
}

impl<C: Clock> fmt::Debug for TimerEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("accumulated_millis", &self.accumulated_millis)
            .field("run_start", &self.run_start)
            .field("run_peak", &self.run_peak.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::TimerEventType;

    fn engine() -> (TimerEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (TimerEngine::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let (engine, _) = engine();
        assert!(engine.is_idle());
        assert!(!engine.is_playing());
        assert_eq!(engine.current_elapsed_millis(), 0);
    }

    #[test]
    fn test_start_pause_accumulates() {
        let (mut engine, clock) = engine();

        engine.start();
        clock.advance(5000);
        engine.pause();
        assert_eq!(engine.current_elapsed_millis(), 5000);

        clock.advance(10_000);
        assert_eq!(engine.current_elapsed_millis(), 5000);

        engine.start();
        clock.advance(3000);
        engine.pause();
        assert_eq!(engine.current_elapsed_millis(), 8000);

        engine.stop();
        assert_eq!(engine.current_elapsed_millis(), 0);
    }

    #[test]
    fn test_elapsed_grows_while_running() {
        let (mut engine, clock) = engine();
        engine.start();
        clock.advance(250);
        assert_eq!(engine.current_elapsed_millis(), 250);
        clock.advance(750);
        assert_eq!(engine.current_elapsed_millis(), 1000);
        assert_eq!(engine.accumulated_millis(), 0);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let (mut engine, clock) = engine();
        engine.start();
        clock.advance(2000);

        assert!(engine.start().is_none());
        clock.advance(1000);
        assert_eq!(engine.current_elapsed_millis(), 3000);
        assert_eq!(engine.accumulated_millis(), 0);
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let (mut engine, clock) = engine();

        assert!(engine.pause().is_none());
        assert!(engine.is_idle());

        engine.start();
        clock.advance(400);
        engine.pause();
        clock.advance(400);

        assert!(engine.pause().is_none());
        assert!(engine.is_paused());
        assert_eq!(engine.current_elapsed_millis(), 400);
    }

    #[test]
    fn test_stop_twice_matches_stop_once() {
        let (mut engine, clock) = engine();
        engine.start();
        clock.advance(1234);

        assert!(engine.stop().is_some());
        assert!(engine.stop().is_none());
        assert!(engine.is_idle());
        assert_eq!(engine.current_elapsed_millis(), 0);
        assert_eq!(engine.accumulated_millis(), 0);
    }

    #[test]
    fn test_stop_from_paused_resets() {
        let (mut engine, clock) = engine();
        engine.start();
        clock.advance(900);
        engine.pause();

        let event = engine.stop().unwrap();
        assert_eq!(
            event.event_type,
            TimerEventType::Stopped { elapsed_millis: 900 }
        );
        assert_eq!(engine.current_elapsed_millis(), 0);
    }

    #[test]
    fn test_toggle_switches_between_running_and_paused() {
        let (mut engine, clock) = engine();

        engine.toggle();
        assert!(engine.is_playing());
        clock.advance(61_000);

        engine.toggle();
        assert!(engine.is_paused());
        assert_eq!(engine.digits().to_string(), "00:01:01");
    }

    #[test]
    fn test_events_carry_elapsed_time() {
        let (mut engine, clock) = engine();

        let started = engine.start().unwrap();
        assert_eq!(
            started.event_type,
            TimerEventType::Started { accumulated_millis: 0 }
        );

        clock.advance(1500);
        let paused = engine.pause().unwrap();
        assert_eq!(
            paused.event_type,
            TimerEventType::Paused { elapsed_millis: 1500 }
        );

        let resumed = engine.start().unwrap();
        assert_eq!(
            resumed.event_type,
            TimerEventType::Resumed { accumulated_millis: 1500 }
        );
    }

    #[test]
    fn test_resume_after_instant_pause_reports_resumed() {
        let (mut engine, _) = engine();
        engine.start();
        engine.pause();
        assert_eq!(engine.accumulated_millis(), 0);

        let event = engine.start().unwrap();
        assert_eq!(
            event.event_type,
            TimerEventType::Resumed { accumulated_millis: 0 }
        );
        assert_eq!(event.describe(), "Timer resumed");
    }

    #[test]
    fn test_clock_step_back_mid_run_keeps_elapsed() {
        let (mut engine, clock) = engine();
        clock.set(1_700_000_000_000);
        engine.start();
        clock.advance(4000);
        assert_eq!(engine.current_elapsed_millis(), 4000);

        clock.set(1_700_000_001_000);
        assert_eq!(engine.current_elapsed_millis(), 4000);

        clock.advance(5000);
        assert_eq!(engine.current_elapsed_millis(), 6000);

        clock.set(1_700_000_000_000);
        engine.pause();
        assert_eq!(engine.accumulated_millis(), 6000);

        engine.start();
        clock.advance(500);
        assert_eq!(engine.current_elapsed_millis(), 6500);
    }

    #[test]
    fn test_backwards_clock_step_is_clamped() {
        let (mut engine, clock) = engine();
        clock.set(50_000);
        engine.start();

        clock.set(20_000);
        assert_eq!(engine.current_elapsed_millis(), 0);

        engine.pause();
        assert_eq!(engine.accumulated_millis(), 0);
        assert!(engine.is_paused());
    }

    #[test]
    fn test_boxed_clock_engine() {
        let clock = ManualClock::new();
        let mut engine: TimerEngine<Box<dyn Clock>> =
            TimerEngine::with_clock(Box::new(clock.clone()));

        engine.start();
        clock.advance(3_661_000);
        let digits = engine.digits();
        assert_eq!(digits.hours, "01");
        assert_eq!(digits.minutes, "01");
        assert_eq!(digits.seconds, "01");
    }

    #[test]
    fn test_timer_state_strings() {
        assert_eq!(TimerState::Idle.as_str(), "Idle");
        assert_eq!(TimerState::Running.as_str(), "Running");
        assert_eq!(TimerState::Paused.as_str(), "Paused");
        assert_eq!(
            serde_json::to_string(&TimerState::Running).unwrap(),
            "\"running\""
        );
    }
}
