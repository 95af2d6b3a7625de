//! Persists the result of a finished conceal run.
//!
//! Files are written to temporary siblings of their targets first and only
//! renamed once everything succeeded, so a cancelled or failed run never
//! leaves partial files behind.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use tempfile::{Builder, NamedTempFile};

use crate::engine::{CancellationToken, ExtractionEngine};
use crate::error::ConcealError;
use crate::media::audio::wav;
use crate::media::{open_carrier, write_png, CodecOptions, PixelChannelStream};
use crate::recording::{Recording, RecordingStore};
use crate::Result;

/// Where the result of a conceal run goes
#[derive(Debug, Clone, Default)]
pub struct PersistTargets {
    pub input_image: PathBuf,
    pub input_audio: Option<PathBuf>,
    pub output_image: PathBuf,
    /// the audio is read back from the written image and stored here
    pub recovered_audio: Option<PathBuf>,
}

/// Writes the carrier as PNG, optionally recovers the audio from the written
/// file and finally records the run in `store`.
pub fn persist(
    output: &PixelChannelStream,
    targets: &PersistTargets,
    options: &CodecOptions,
    store: &dyn RecordingStore,
    token: &CancellationToken,
) -> Result<(u64, Recording)> {
    token.check()?;
    let image_file = temp_sibling(&targets.output_image, ".png")?;
    {
        let mut writer = BufWriter::new(image_file.as_file());
        write_png(output, &mut writer)?;
        writer
            .flush()
            .map_err(|source| ConcealError::WriteError { source })?;
    }

    let audio_file = match &targets.recovered_audio {
        Some(target) => {
            token.check()?;
            let written = open_carrier(image_file.path())?;
            let (_, audio) = ExtractionEngine::new(options.clone()).extract_with(&written, token)?;
            let audio_file = temp_sibling(target, ".wav")?;
            wav::write_wav(&audio, BufWriter::new(audio_file.as_file()))?;
            Some((audio_file, target))
        }
        None => None,
    };

    token.check()?;
    move_into_place(image_file, &targets.output_image)?;
    let mut recording = Recording::new(
        targets.input_image.clone(),
        targets.output_image.clone(),
    );
    if let Some((audio_file, target)) = audio_file {
        move_into_place(audio_file, target)?;
        recording = recording.with_recovered_audio(target.clone());
    }
    if let Some(input_audio) = &targets.input_audio {
        recording = recording.with_input_audio(input_audio.clone());
    }

    let id = store.add(recording.clone())?;
    info!("recording {id} persisted as {:?}", targets.output_image);

    Ok((id, recording))
}

pub(crate) fn temp_sibling(target: &Path, suffix: &str) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Builder::new()
        .prefix(".conceal-")
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| {
            error!("Error creating a temporary file in {dir:?}: {e}");
            ConcealError::WriteError { source: e }
        })
}

pub(crate) fn move_into_place(file: NamedTempFile, target: &Path) -> Result<()> {
    file.persist(target).map(|_| ()).map_err(|e| {
        error!("Error moving the result to {target:?}: {}", e.error);
        ConcealError::WriteError { source: e.error }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConcealProgress, EmbeddingEngine};
    use crate::media::open_audio;
    use crate::recording::InMemoryRecordingStore;
    use crate::test_utils::{noise_carrier, sine_wave};
    use tempfile::TempDir;

    fn concealed() -> (PixelChannelStream, crate::media::PcmAudio) {
        let audio = sine_wave(16, 2, 40);
        let output = EmbeddingEngine::default()
            .run(
                noise_carrier(24, 24),
                &audio,
                &CancellationToken::new(),
                &mut |_: ConcealProgress| {},
            )
            .unwrap();
        ((*output).clone(), audio)
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn should_persist_image_recovered_audio_and_recording() {
        let out_dir = TempDir::new().unwrap();
        let (output, audio) = concealed();
        let targets = PersistTargets {
            input_image: "carrier.png".into(),
            input_audio: Some("voice.wav".into()),
            output_image: out_dir.path().join("secret.png"),
            recovered_audio: Some(out_dir.path().join("recovered.wav")),
        };
        let store = InMemoryRecordingStore::new();

        let (id, recording) = persist(
            &output,
            &targets,
            &CodecOptions::default(),
            &store,
            &CancellationToken::new(),
        )
        .expect("Cannot persist the result");

        assert_eq!(open_carrier(&targets.output_image).unwrap(), output);
        assert_eq!(
            open_audio(targets.recovered_audio.as_ref().unwrap()).unwrap(),
            audio
        );
        assert_eq!(store.list().unwrap(), vec![(id, recording.clone())]);
        assert_eq!(recording.input_audio_path, Some(PathBuf::from("voice.wav")));
        assert_eq!(file_count(out_dir.path()), 2, "temporary files were left");
    }

    #[test]
    fn should_leave_nothing_behind_when_cancelled() {
        let out_dir = TempDir::new().unwrap();
        let (output, _) = concealed();
        let targets = PersistTargets {
            output_image: out_dir.path().join("secret.png"),
            recovered_audio: Some(out_dir.path().join("recovered.wav")),
            ..PersistTargets::default()
        };
        let store = InMemoryRecordingStore::new();
        let token = CancellationToken::new();
        token.cancel();

        let result = persist(&output, &targets, &CodecOptions::default(), &store, &token);

        assert!(matches!(result, Err(ConcealError::Cancelled)));
        assert_eq!(file_count(out_dir.path()), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn should_skip_the_recovered_audio_when_not_asked_for() {
        let out_dir = TempDir::new().unwrap();
        let (output, _) = concealed();
        let targets = PersistTargets {
            output_image: out_dir.path().join("secret.png"),
            ..PersistTargets::default()
        };
        let store = InMemoryRecordingStore::new();

        let (_, recording) = persist(
            &output,
            &targets,
            &CodecOptions::default(),
            &store,
            &CancellationToken::new(),
        )
        .unwrap();

        assert!(recording.recovered_audio_path.is_none());
        assert_eq!(file_count(out_dir.path()), 1);
    }
}
