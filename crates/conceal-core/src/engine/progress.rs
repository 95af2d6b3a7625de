use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ConcealError;
use crate::media::PixelChannelStream;
use crate::Result;

/// Cooperative cancellation flag shared between a job and its owner.
///
/// The engines check it only between two batches, never in the middle of one.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ConcealError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Lifecycle of one conceal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Validating,
    Writing,
    Done,
    Cancelled,
    Failed,
}

impl JobState {
    pub fn is_active(self) -> bool {
        matches!(self, JobState::Validating | JobState::Writing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Cancelled | JobState::Failed)
    }
}

/// Snapshot of a running conceal operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcealProgress {
    /// 0 to 100
    pub percent: f32,
    /// only present once `done` is set
    pub output: Option<Arc<PixelChannelStream>>,
    pub done: bool,
}

impl ConcealProgress {
    /// the empty state, also what a cancelled or failed run resets to
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn writing(written: usize, required: usize) -> Self {
        let percent = if required == 0 {
            100.0
        } else {
            (written as f64 / required as f64 * 100.0).min(100.0) as f32
        };
        Self {
            percent,
            output: None,
            done: false,
        }
    }

    pub fn done(output: Arc<PixelChannelStream>) -> Self {
        Self {
            percent: 100.0,
            output: Some(output),
            done: true,
        }
    }

    pub fn is_initial(&self) -> bool {
        self == &Self::initial()
    }
}

/// Receives state changes and progress snapshots of a conceal run
pub trait ConcealObserver {
    fn on_state(&mut self, _state: JobState) {}

    fn on_progress(&mut self, progress: ConcealProgress);
}

impl<F> ConcealObserver for F
where
    F: FnMut(ConcealProgress),
{
    fn on_progress(&mut self, progress: ConcealProgress) {
        self(progress)
    }
}

/// Observer that drops everything
pub struct NoopObserver;

impl ConcealObserver for NoopObserver {
    fn on_progress(&mut self, _progress: ConcealProgress) {}
}
