use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::warn;

use super::embed::EmbeddingEngine;
use super::progress::{CancellationToken, ConcealObserver, ConcealProgress, JobState};
use crate::error::ConcealError;
use crate::media::{PcmAudio, PixelChannelStream};
use crate::Result;

/// Handle to one conceal run on a worker thread.
///
/// The carrier is moved into the job, so no one else can write to it while
/// the job runs. Progress snapshots arrive in order and end with exactly
/// one terminal snapshot.
pub struct ConcealJob {
    token: CancellationToken,
    state: Arc<Mutex<JobState>>,
    progress: Receiver<ConcealProgress>,
    worker: Option<JoinHandle<Result<Arc<PixelChannelStream>>>>,
}

/// forwards everything the engine reports to the job owner
struct ChannelObserver {
    state: Arc<Mutex<JobState>>,
    sender: Sender<ConcealProgress>,
}

impl ConcealObserver for ChannelObserver {
    fn on_state(&mut self, state: JobState) {
        if let Ok(mut s) = self.state.lock() {
            *s = state;
        }
    }

    fn on_progress(&mut self, progress: ConcealProgress) {
        // the owner might have dropped the receiver already, nothing to report then
        let _ = self.sender.send(progress);
    }
}

impl ConcealJob {
    pub fn spawn(engine: EmbeddingEngine, carrier: PixelChannelStream, audio: PcmAudio) -> Self {
        let token = CancellationToken::new();
        let state = Arc::new(Mutex::new(JobState::Validating));
        let (sender, progress) = channel();

        let worker = {
            let token = token.clone();
            let mut observer = ChannelObserver {
                state: state.clone(),
                sender,
            };
            thread::spawn(move || engine.run(carrier, &audio, &token, &mut observer))
        };

        Self {
            token,
            state,
            progress,
            worker: Some(worker),
        }
    }

    /// requests cancellation, observed by the worker before its next batch
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn state(&self) -> JobState {
        self.state.lock().map(|s| *s).unwrap_or(JobState::Failed)
    }

    /// next snapshot if there is one, never blocks
    pub fn try_progress(&self) -> Option<ConcealProgress> {
        self.progress.try_recv().ok()
    }

    /// blocking iterator over all snapshots, ends after the terminal one
    pub fn progress(&self) -> impl Iterator<Item = ConcealProgress> + '_ {
        self.progress.iter()
    }

    /// blocks until the worker is finished
    pub fn wait(mut self) -> Result<Arc<PixelChannelStream>> {
        self.join()
    }

    fn join(&mut self) -> Result<Arc<PixelChannelStream>> {
        let worker = self.worker.take().ok_or(ConcealError::WorkerPanicked)?;
        worker.join().map_err(|_| {
            warn!("conceal worker panicked");
            ConcealError::WorkerPanicked
        })?
    }
}

impl Drop for ConcealJob {
    /// an abandoned job is cancelled and joined, it never outlives its handle
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel();
            let _ = self.join();
        }
    }
}
