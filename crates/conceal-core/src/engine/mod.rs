mod embed;
mod extract;
mod job;
mod progress;

pub use embed::{write_chunks, EmbeddingEngine};
pub use extract::ExtractionEngine;
pub use job::ConcealJob;
pub use progress::{CancellationToken, ConcealObserver, ConcealProgress, JobState, NoopObserver};
