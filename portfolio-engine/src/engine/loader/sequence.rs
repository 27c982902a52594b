use super::progress::LoadProgress;
use constants::loader::{COMPLETION_DELAY_SECS, LOAD_DURATION_SECS};

/// Lifecycle of one loader run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Initializing,
    ModelPending,
    Animating,
    Completing,
    Disposed,
}

/// Which model ended up in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Loaded,
    Fallback,
}

/// What the caller should do after advancing the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing to animate, the sequence is idle, finished or torn down.
    Idle,
    Animate(LoadProgress),
    /// Progress has reached one and completion is scheduled.
    Hold,
    /// Completion fires now. Returned exactly once per run.
    Complete,
}

/// Time-driven loader state machine.
///
/// The timer runs independently of the model load: `advance` never waits on
/// `attach_model`, and a model that arrives after completion is discarded.
#[derive(Debug, Clone)]
pub struct LoadSequence {
    phase: LoaderPhase,
    duration: f32,
    completion_delay: f32,
    started_at: Option<f32>,
    progress: LoadProgress,
    completing_since: Option<f32>,
    completed: bool,
    alive: bool,
    model: Option<ModelKind>,
}

impl Default for LoadSequence {
    fn default() -> Self {
        Self::with_timing(LOAD_DURATION_SECS, COMPLETION_DELAY_SECS)
    }
}

impl LoadSequence {
    pub fn with_timing(duration: f32, completion_delay: f32) -> Self {
        Self {
            phase: LoaderPhase::Initializing,
            duration,
            completion_delay,
            started_at: None,
            progress: LoadProgress::ZERO,
            completing_since: None,
            completed: false,
            alive: true,
            model: None,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn model(&self) -> Option<ModelKind> {
        self.model
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// False once completion has fired; the overlay hides itself.
    pub fn is_visible(&self) -> bool {
        self.alive && !self.completed
    }

    /// Seconds since the timer started, if it has.
    pub fn elapsed(&self, now: f32) -> f32 {
        self.started_at.map_or(0.0, |start| (now - start).max(0.0))
    }

    /// Mark the model request as issued.
    pub fn request_model(&mut self) {
        if self.phase == LoaderPhase::Initializing {
            self.phase = LoaderPhase::ModelPending;
        }
    }

    /// Start the animation clock. Does not wait for the model.
    pub fn start(&mut self, now: f32) {
        if !self.alive || self.started_at.is_some() {
            return;
        }
        self.started_at = Some(now);
        self.phase = LoaderPhase::Animating;
    }

    /// Accept a model if the sequence is still live and none is attached yet.
    pub fn attach_model(&mut self, kind: ModelKind) -> bool {
        if !self.alive || self.completed || self.model.is_some() {
            return false;
        }
        self.model = Some(kind);
        true
    }

    /// Advance the clock to `now` (seconds since app start).
    pub fn advance(&mut self, now: f32) -> FrameOutcome {
        if !self.alive || self.completed || self.started_at.is_none() {
            return FrameOutcome::Idle;
        }
        let elapsed = self.elapsed(now);

        match self.completing_since {
            None => {
                let progress = LoadProgress::from_elapsed_with(elapsed, self.duration);
                if progress > self.progress {
                    self.progress = progress;
                }
                if self.progress.is_complete() {
                    self.completing_since = Some(elapsed);
                    self.phase = LoaderPhase::Completing;
                }
                FrameOutcome::Animate(self.progress)
            }
            Some(since) if elapsed - since >= self.completion_delay => {
                self.completed = true;
                FrameOutcome::Complete
            }
            Some(_) => FrameOutcome::Hold,
        }
    }

    /// Tear the run down. Returns true only for the first call.
    pub fn dispose(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.phase = LoaderPhase::Disposed;
        true
    }
}
