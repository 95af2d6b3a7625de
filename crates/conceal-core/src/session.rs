//! State of an interactive conceal session.
//!
//! A small set of canonical variables (inputs, job state, latest progress) is
//! kept here. Everything a front end displays is derived from them by
//! [`SessionView::derive`], recomputed after every transition.

use std::sync::Arc;

use log::{error, info};

use crate::engine::{ConcealJob, ConcealProgress, EmbeddingEngine, JobState};
use crate::error::ConcealError;
use crate::media::{CodecOptions, PcmAudio, PixelChannelStream};
use crate::Result;

#[derive(Default)]
pub struct ConcealSession {
    options: CodecOptions,
    carrier: Option<PixelChannelStream>,
    audio: Option<PcmAudio>,
    job: Option<ConcealJob>,
    state: JobState,
    progress: ConcealProgress,
    last_error: Option<ConcealError>,
}

impl ConcealSession {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn progress(&self) -> &ConcealProgress {
        &self.progress
    }

    pub fn carrier(&self) -> Option<&PixelChannelStream> {
        self.carrier.as_ref()
    }

    pub fn audio(&self) -> Option<&PcmAudio> {
        self.audio.as_ref()
    }

    /// error of the last run, if it failed
    pub fn last_error(&self) -> Option<&ConcealError> {
        self.last_error.as_ref()
    }

    pub fn output(&self) -> Option<&Arc<PixelChannelStream>> {
        self.progress.output.as_ref()
    }

    pub fn select_image(&mut self, carrier: PixelChannelStream) -> Result<()> {
        self.ensure_idle()?;
        self.carrier = Some(carrier);
        self.reset_run();
        Ok(())
    }

    pub fn select_audio(&mut self, audio: PcmAudio) -> Result<()> {
        self.ensure_idle()?;
        self.audio = Some(audio);
        self.reset_run();
        Ok(())
    }

    /// recording is done elsewhere, the session only decides whether it may start now
    pub fn start_recording(&mut self) -> Result<()> {
        self.ensure_idle()
    }

    /// starts concealing the selected audio in the selected image
    pub fn start(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let carrier = self.carrier.clone().ok_or(ConcealError::MissingCarrier)?;
        let audio = self.audio.clone().ok_or(ConcealError::MissingAudio)?;

        self.reset_run();
        self.state = JobState::Validating;
        self.job = Some(ConcealJob::spawn(
            EmbeddingEngine::new(self.options.clone()),
            carrier,
            audio,
        ));
        info!("conceal job started");
        Ok(())
    }

    /// Requests cancellation. The visible progress resets right away,
    /// the run counts as active until the worker has acknowledged it.
    pub fn cancel(&mut self) {
        if let Some(job) = &self.job {
            job.cancel();
            self.progress = ConcealProgress::initial();
        }
    }

    /// Takes in everything the worker reported so far, never blocks.
    pub fn poll(&mut self) -> JobState {
        let Some(job) = &self.job else {
            return self.state;
        };
        while let Some(p) = job.try_progress() {
            if !job.is_cancel_requested() || p.done || p.is_initial() {
                self.progress = p;
            }
        }
        self.state = job.state();
        if self.state.is_terminal() {
            self.finish_job();
        }
        self.state
    }

    /// Blocks until the current run has ended
    pub fn wait(&mut self) -> JobState {
        if let Some(job) = &self.job {
            for p in job.progress() {
                if !job.is_cancel_requested() || p.done || p.is_initial() {
                    self.progress = p;
                }
            }
            self.state = job.state();
            self.finish_job();
        }
        self.state
    }

    fn finish_job(&mut self) {
        if let Some(job) = self.job.take() {
            // the terminal snapshot may still be on its way
            for p in job.progress() {
                self.progress = p;
            }
            match job.wait() {
                Ok(_) => self.last_error = None,
                Err(e) => {
                    if e.is_recoverable() {
                        info!("conceal job ended: {e}");
                    } else {
                        error!("conceal job hit an internal fault: {e}");
                    }
                    self.progress = ConcealProgress::initial();
                    self.last_error = Some(e);
                }
            }
        }
    }

    fn ensure_idle(&mut self) -> Result<()> {
        if self.poll().is_active() {
            return Err(ConcealError::OperationInProgress);
        }
        Ok(())
    }

    fn reset_run(&mut self) {
        self.state = JobState::Idle;
        self.progress = ConcealProgress::initial();
        self.last_error = None;
    }
}

/// What is still missing before concealing can start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLabel {
    ChooseInputImage,
    ChooseWaveFile,
    Ready,
}

/// Presentation state, a pure function of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub percent: u32,
    pub is_input_hint_visible: bool,
    pub is_output_hint_visible: bool,
    pub is_progress_visible: bool,
    pub is_done_mark_visible: bool,
    pub can_select_inputs: bool,
    pub output_label: OutputLabel,
}

impl SessionView {
    pub fn derive(session: &ConcealSession) -> Self {
        let output_label = match (&session.carrier, &session.audio) {
            (None, _) => OutputLabel::ChooseInputImage,
            (Some(_), None) => OutputLabel::ChooseWaveFile,
            (Some(_), Some(_)) => OutputLabel::Ready,
        };
        let is_output_hint_visible = output_label != OutputLabel::Ready;

        Self {
            percent: session.progress.percent as u32,
            is_input_hint_visible: session.carrier.is_none(),
            is_output_hint_visible,
            is_progress_visible: !is_output_hint_visible && session.state.is_active(),
            is_done_mark_visible: !is_output_hint_visible && session.progress.done,
            can_select_inputs: !session.state.is_active(),
            output_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExtractionEngine;
    use crate::test_utils::{noise_carrier, sine_wave};

    #[test]
    fn should_ask_for_the_missing_inputs() {
        let mut session = ConcealSession::default();
        assert_eq!(
            SessionView::derive(&session).output_label,
            OutputLabel::ChooseInputImage
        );
        assert!(matches!(session.start(), Err(ConcealError::MissingCarrier)));

        session.select_image(noise_carrier(20, 20)).unwrap();
        let view = SessionView::derive(&session);
        assert_eq!(view.output_label, OutputLabel::ChooseWaveFile);
        assert!(!view.is_input_hint_visible);
        assert!(view.is_output_hint_visible);
        assert!(matches!(session.start(), Err(ConcealError::MissingAudio)));

        session.select_audio(sine_wave(8, 1, 10)).unwrap();
        assert_eq!(SessionView::derive(&session).output_label, OutputLabel::Ready);
    }

    #[test]
    fn should_run_to_done_and_show_the_done_mark() {
        let audio = sine_wave(16, 1, 100);
        let mut session = ConcealSession::default();
        session.select_image(noise_carrier(20, 20)).unwrap();
        session.select_audio(audio.clone()).unwrap();
        session.start().unwrap();

        assert_eq!(session.wait(), JobState::Done);
        let view = SessionView::derive(&session);
        assert_eq!(view.percent, 100);
        assert!(view.is_done_mark_visible);
        assert!(!view.is_progress_visible);
        assert!(view.can_select_inputs);

        let output = session.output().expect("Output image missing");
        let (_, given) = ExtractionEngine::default().extract(output).unwrap();
        assert_eq!(given, audio);
    }

    #[test]
    fn should_refuse_new_inputs_while_writing() {
        // one channel per batch over millions of channels, the run cannot end on its own in time
        let mut session = ConcealSession::new(CodecOptions::default().with_batch_size(1));
        session.select_image(noise_carrier(1024, 1024)).unwrap();
        session.select_audio(sine_wave(16, 2, 250_000)).unwrap();
        session.start().unwrap();
        while session.poll() == JobState::Validating {
            std::thread::yield_now();
        }

        assert_eq!(session.state(), JobState::Writing);
        let view = SessionView::derive(&session);
        assert!(view.is_progress_visible);
        assert!(!view.is_done_mark_visible);
        assert!(!view.can_select_inputs);
        assert!(matches!(
            session.select_image(noise_carrier(4, 4)),
            Err(ConcealError::OperationInProgress)
        ));
        assert!(matches!(
            session.select_audio(sine_wave(8, 1, 1)),
            Err(ConcealError::OperationInProgress)
        ));
        assert!(matches!(
            session.start_recording(),
            Err(ConcealError::OperationInProgress)
        ));
        assert!(matches!(
            session.start(),
            Err(ConcealError::OperationInProgress)
        ));

        session.cancel();
        assert_eq!(session.wait(), JobState::Cancelled);
        assert!(!SessionView::derive(&session).is_progress_visible);
        assert_eq!(session.carrier().map(|c| c.dimensions()), Some((1024, 1024)));
    }

    #[test]
    fn should_reset_progress_after_cancel() {
        let mut session = ConcealSession::new(CodecOptions::default().with_batch_size(1));
        session.select_image(noise_carrier(256, 256)).unwrap();
        session.select_audio(sine_wave(16, 2, 10_000)).unwrap();
        session.start().unwrap();
        session.cancel();

        assert_eq!(session.wait(), JobState::Cancelled);
        assert_eq!(session.progress(), &ConcealProgress::initial());
        assert!(matches!(session.last_error(), Some(ConcealError::Cancelled)));
        let view = SessionView::derive(&session);
        assert_eq!(view.percent, 0);
        assert!(!view.is_progress_visible);
        assert!(!view.is_done_mark_visible);

        // and a new run may start right away
        session.select_audio(sine_wave(8, 1, 10)).unwrap();
        session.start().unwrap();
        assert_eq!(session.wait(), JobState::Done);
    }

    #[test]
    fn should_keep_failures_recoverable() {
        let mut session = ConcealSession::default();
        session.select_image(noise_carrier(10, 10)).unwrap();
        session.select_audio(sine_wave(16, 1, 100)).unwrap();
        session.start().unwrap();

        assert_eq!(session.wait(), JobState::Failed);
        assert!(session.progress().is_initial());
        assert!(matches!(
            session.last_error(),
            Some(ConcealError::CapacityOverflow { index: 300, .. })
        ));
        assert!(session.last_error().is_some_and(ConcealError::is_recoverable));
        assert!(session.select_image(noise_carrier(32, 32)).is_ok());
        assert_eq!(session.state(), JobState::Idle);
    }
}
