use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Result;

/// One finished conceal run, as it was persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub input_image_path: PathBuf,
    pub output_image_path: PathBuf,
    pub input_audio_path: Option<PathBuf>,
    pub recovered_audio_path: Option<PathBuf>,
    /// milliseconds since the unix epoch
    pub timestamp_millis: u64,
}

impl Recording {
    pub fn new(input_image_path: PathBuf, output_image_path: PathBuf) -> Self {
        Self {
            input_image_path,
            output_image_path,
            input_audio_path: None,
            recovered_audio_path: None,
            timestamp_millis: now_millis(),
        }
    }

    pub fn with_input_audio(mut self, path: PathBuf) -> Self {
        self.input_audio_path = Some(path);
        self
    }

    pub fn with_recovered_audio(mut self, path: PathBuf) -> Self {
        self.recovered_audio_path = Some(path);
        self
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Keeps track of persisted recordings. The codec only ever adds to it.
pub trait RecordingStore {
    /// stores the recording and returns its id
    fn add(&self, recording: Recording) -> Result<u64>;

    fn list(&self) -> Result<Vec<(u64, Recording)>>;

    /// returns whether a recording with this id was present
    fn delete(&self, id: u64) -> Result<bool>;
}

/// a shared store, so the owner can still read what a run recorded
impl<S: RecordingStore + ?Sized> RecordingStore for Arc<S> {
    fn add(&self, recording: Recording) -> Result<u64> {
        (**self).add(recording)
    }

    fn list(&self) -> Result<Vec<(u64, Recording)>> {
        (**self).list()
    }

    fn delete(&self, id: u64) -> Result<bool> {
        (**self).delete(id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRecordingStore {
    inner: Mutex<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    next_id: u64,
    recordings: Vec<(u64, Recording)>,
}

impl InMemoryRecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|e| e.recordings.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordingStore for InMemoryRecordingStore {
    fn add(&self, recording: Recording) -> Result<u64> {
        let mut entries = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        entries.next_id += 1;
        let id = entries.next_id;
        entries.recordings.push((id, recording));
        Ok(id)
    }

    fn list(&self) -> Result<Vec<(u64, Recording)>> {
        let entries = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.recordings.clone())
    }

    fn delete(&self, id: u64) -> Result<bool> {
        let mut entries = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.recordings.len();
        entries.recordings.retain(|(i, _)| *i != id);
        Ok(entries.recordings.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;

    use super::*;

    #[test]
    fn should_add_list_and_delete_recordings() {
        let store = InMemoryRecordingStore::new();
        assert!(store.is_empty());

        let first = store
            .add(Recording::new("a.png".into(), "a-out.png".into()))
            .unwrap();
        let second = store
            .add(
                Recording::new("b.png".into(), "b-out.png".into())
                    .with_input_audio("b.wav".into())
                    .with_recovered_audio("b-out.wav".into()),
            )
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);

        assert!(store.delete(first).unwrap());
        assert!(!store.delete(first).unwrap());

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, second);
        assert_eq!(
            listed[0].1.recovered_audio_path,
            Some(PathBuf::from("b-out.wav"))
        );
    }

    #[test]
    fn should_stamp_recordings_with_the_current_time() {
        let recording = Recording::new("a.png".into(), "b.png".into());
        assert!(recording.timestamp_millis > 0);
    }
}
