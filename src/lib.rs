//! # clip-sampler
//!
//! Sample short preview clips from a creator's upload feed or a playlist.
//!
//! Given a stream of candidate videos, the pipeline decides which ones to
//! process (in order, or by uniform random draws with replacement), picks a
//! random seek point inside each video's duration, and drives an external
//! transcoding step to produce one short clip per selection. Per-item
//! failures are isolated; one broken video never aborts the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use clip_sampler::{
//!     config::RunContext,
//!     ffmpeg::FfmpegExtractor,
//!     pipeline::{ClipPipeline, QualityPolicy},
//!     source::SelectionMode,
//!     youtube::YtDlpClient,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = Arc::new(YtDlpClient::new()?);
//! let extractor = Arc::new(FfmpegExtractor::new()?);
//! let pipeline = ClipPipeline::new(client.clone(), extractor, QualityPolicy::Highest);
//!
//! let mut ctx = RunContext::new(
//!     "creator".into(),
//!     Duration::from_secs(5),
//!     SelectionMode::All,
//!     None,
//! );
//! let (_cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
//! let report = pipeline
//!     .run_channel(client.as_ref(), "creator", &mut ctx, cancel_rx)
//!     .await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`source`] - Data model and external-collaborator traits
//! - [`pipeline`] - Selection, job building, quality policy, and the driver
//! - [`youtube`] - yt-dlp-backed video source and stream resolver
//! - [`ffmpeg`] - ffmpeg-backed clip extractor
//! - [`sanitize`] - Filename sanitization
//! - [`config`] - Configuration management and the per-run context

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod pipeline;
pub mod sanitize;
pub mod source;
pub mod youtube;

// Re-export commonly used types for convenience
pub use crate::{
    config::{Config, RunContext},
    error::{Result, SamplerError},
    pipeline::{ClipPipeline, QualityPolicy, RunReport},
    sanitize::sanitize,
    source::{ClipExtractor, SelectionMode, StreamResolver, VideoSource},
};
