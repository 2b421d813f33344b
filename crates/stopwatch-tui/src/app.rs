//! Application state management

use ratatui::layout::{Position, Rect};
use stopwatch_core::{Clock, StopwatchConfig, TimeDisplay, TimerEngine, TimerEvent};
use tokio::sync::broadcast;

pub type Engine = TimerEngine<Box<dyn Clock + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    PlayPause,
    Stop,
}

pub struct App {
    pub engine: Engine,
    pub display: TimeDisplay,
    pub status_message: String,
    pub should_quit: bool,
    pub hovered_button: Option<ControlButton>,

    // Filled in by the last draw, used for mouse hit testing
    pub play_pause_area: Rect,
    pub stop_area: Rect,

    event_tx: broadcast::Sender<TimerEvent>,
}

impl App {
    pub fn new(config: &StopwatchConfig) -> Self {
        Self::with_engine(
            TimerEngine::with_clock(config.clock.build()),
            config.transition_frames,
        )
    }

    pub fn with_engine(engine: Engine, transition_frames: u16) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let mut app = Self {
            engine,
            display: TimeDisplay::new(transition_frames),
            status_message: "Ready".to_string(),
            should_quit: false,
            hovered_button: None,
            play_pause_area: Rect::default(),
            stop_area: Rect::default(),
            event_tx,
        };
        app.refresh_display();
        app
    }

    /// Subscribe to state changes made through this app
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub fn toggle(&mut self) {
        let event = self.engine.toggle();
        self.dispatch(event);
    }

    pub fn stop(&mut self) {
        let event = self.engine.stop();
        self.dispatch(event);
    }

    pub fn press(&mut self, button: ControlButton) {
        match button {
            ControlButton::PlayPause => self.toggle(),
            ControlButton::Stop => self.stop(),
        }
    }

    fn dispatch(&mut self, event: Option<TimerEvent>) {
        self.refresh_display();

        let Some(event) = event else {
            return;
        };

        if self.event_tx.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }

    /// Periodic tick: re-read the engine and push changed fields to the
    /// display.
    pub fn on_tick(&mut self) {
        self.refresh_display();
    }

    /// Animation frame
    pub fn on_frame(&mut self) {
        self.display.advance();
    }

    pub fn handle_timer_event(&mut self, event: &TimerEvent) {
        tracing::info!(event_type = ?event.event_type, "Timer event");
        self.status_message = format!(
            "{} at {}",
            event.describe(),
            event.timestamp.format("%H:%M:%S")
        );
    }

    fn refresh_display(&mut self) {
        let digits = self.engine.digits();
        if self.display.update(&digits) {
            tracing::trace!(%digits, "Display updated");
        }
    }

    pub fn play_pause_label(&self) -> &'static str {
        if self.engine.is_playing() {
            "Pause"
        } else {
            "Play"
        }
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<ControlButton> {
        let position = Position::new(column, row);
        if self.play_pause_area.contains(position) {
            Some(ControlButton::PlayPause)
        } else if self.stop_area.contains(position) {
            Some(ControlButton::Stop)
        } else {
            None
        }
    }
}
