//! Frame driver
//!
//! Owns the [`GameSession`] and the three collaborators the simulation talks
//! to: a scheduler that calls back once per display refresh, a renderer and a
//! score display. A frame is only simulated while the session is running; the
//! loop stops by simply not requesting another frame.

use crate::sim::{
    self, Activation, Avatar, BackgroundEntity, CrashCause, GameEvent, GamePhase, GameSession,
    Obstacle, TickOutcome,
};

/// Host primitive that invokes [`FrameDriver::on_frame`] on the next refresh
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

/// Draws the current visual state
pub trait Renderer {
    fn draw_frame(
        &mut self,
        avatar: &Avatar,
        obstacles: &[Obstacle],
        background: &[BackgroundEntity],
    );
}

/// Shows the score (and whether the run is over)
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u64, is_game_over: bool);
}

/// Result of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session was not running; nothing simulated, nothing rescheduled
    Stopped,
    /// Frame simulated and the next one requested
    Continued,
    /// Frame simulated, run ended, loop stops
    Ended(CrashCause),
}

/// Scheduler for hosts that pump frames themselves (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requests: u32,
}

impl ManualScheduler {
    /// Consume one outstanding request, if any
    pub fn take_request(&mut self) -> bool {
        if self.requests > 0 {
            self.requests -= 1;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> u32 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_next_frame(&mut self) {
        self.requests += 1;
    }
}

/// Frames-per-second over a sliding 60 frame window
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (milliseconds)
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest slot is the one we write next; the window spans len - 1 intervals
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Drives the session one frame per scheduler callback
pub struct FrameDriver<S, R, D> {
    session: GameSession,
    scheduler: S,
    renderer: R,
    display: D,
    /// A frame has been requested and not yet delivered
    frame_pending: bool,
    fps: FpsCounter,
}

impl<S: FrameScheduler, R: Renderer, D: ScoreDisplay> FrameDriver<S, R, D> {
    pub fn new(session: GameSession, scheduler: S, renderer: R, display: D) -> Self {
        Self {
            session,
            scheduler,
            renderer,
            display,
            frame_pending: false,
            fps: FpsCounter::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Apply an activate input and make sure the loop is running if it should be
    pub fn activate(&mut self) -> Activation {
        let activation = sim::activate(&mut self.session);
        self.flush_events();
        self.ensure_scheduled();
        if activation != Activation::Flapped {
            // Show the reset state right away instead of waiting a frame
            self.present();
        }
        activation
    }

    /// Scheduler callback. `time` is the host timestamp in milliseconds.
    pub fn on_frame(&mut self, time: f64) -> FrameOutcome {
        self.frame_pending = false;
        if self.session.phase != GamePhase::Running {
            return FrameOutcome::Stopped;
        }

        self.fps.record(time);
        let outcome = sim::tick(&mut self.session);
        self.flush_events();
        self.present();

        match outcome {
            TickOutcome::Continue => {
                self.ensure_scheduled();
                FrameOutcome::Continued
            }
            TickOutcome::Over(cause) => FrameOutcome::Ended(cause),
            TickOutcome::Idle => FrameOutcome::Stopped,
        }
    }

    /// Hand the current state to the renderer and display without simulating
    pub fn present(&mut self) {
        let session = &self.session;
        self.renderer
            .draw_frame(&session.avatar, &session.obstacles, &session.background);
        if session.phase != GamePhase::NotStarted {
            self.display
                .show_score(session.score, session.phase == GamePhase::Over);
        }
    }

    fn ensure_scheduled(&mut self) {
        if self.session.phase == GamePhase::Running && !self.frame_pending {
            self.scheduler.request_next_frame();
            self.frame_pending = true;
        }
    }

    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Started => {
                    log::info!("Run started (seed {})", self.session.seed)
                }
                GameEvent::Restarted => log::info!("Run restarted"),
                GameEvent::Flapped => log::trace!("Flap"),
                GameEvent::ObstaclePassed { id, score } => {
                    log::debug!("Passed obstacle {} - score {}", id, score)
                }
                GameEvent::Crashed { cause, score } => {
                    log::info!("Game over ({:?}) with score {}", cause, score)
                }
            }
        }
    }
}
