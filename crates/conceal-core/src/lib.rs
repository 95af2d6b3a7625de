//! # Conceal Core API
//!
//! Conceals a PCM recording in the 3 lowest bits of every color channel of an
//! image and recovers it bit-exactly. The main building blocks are
//! - [`EmbeddingEngine`][enc] for writing audio into a carrier image
//! - [`ExtractionEngine`][dec] for reading it back
//! - [`ConcealJob`][job] for running the embedding on a worker thread with
//!   progress reports and cancellation
//! - [`ConcealSession`][session] for front ends that need to know what to display
//!
//! # Usage Examples
//!
//! ## Conceal a recording inside an image
//!
//! ```rust,no_run
//! conceal_core::api::conceal::prepare()
//!     .with_image("carrier.png")
//!     .with_audio("voice.wav")
//!     .with_output("carrier-with-voice.png")
//!     .with_recovered_audio("voice-as-recovered.wav") // proves the round trip
//!     .execute()
//!     .expect("Failed to conceal audio in image");
//! ```
//!
//! ## Reveal a recording from an image
//!
//! ```rust,no_run
//! let header = conceal_core::api::reveal::prepare()
//!     .from_secret_image("carrier-with-voice.png")
//!     .into_audio_file("voice.wav")
//!     .execute()
//!     .expect("Failed to reveal audio from image");
//!
//! println!("{} frames at {} Hz", header.frame_count(), header.sample_rate());
//! ```
//!
//! [enc]: ./engine/struct.EmbeddingEngine.html
//! [dec]: ./engine/struct.ExtractionEngine.html
//! [job]: ./engine/struct.ConcealJob.html
//! [session]: ./session/struct.ConcealSession.html

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
    clippy::redundant_else,
)]

pub mod api;
pub mod capacity;
pub mod commands;
pub mod engine;
pub mod error;
pub mod finalize;
pub mod media;
pub mod recording;
pub mod session;

pub use crate::capacity::Capacity;
pub use crate::engine::{
    CancellationToken, ConcealJob, ConcealProgress, EmbeddingEngine, ExtractionEngine, JobState,
};
pub use crate::error::ConcealError;
pub use crate::media::{CodecOptions, Media, PcmAudio, PcmSpec, PixelChannelStream, WaveHeader};
pub use crate::recording::{InMemoryRecordingStore, Recording, RecordingStore};
pub use crate::session::{ConcealSession, SessionView};

pub type Result<T> = std::result::Result<T, ConcealError>;
