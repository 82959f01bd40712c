//! The pipeline driver: Selector -> Stream Resolver -> Job Builder -> Extractor.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::RunContext;
use crate::error::{ExtractError, ResolveError, Result};
use crate::pipeline::{job::build_job, quality::QualityPolicy, selector};
use crate::source::{ClipExtractor, StreamResolver, VideoSource, VideoStream};

/// Per-run outcome counters.
///
/// Purely observational; per-item failures are already reported as they
/// happen and never abort the batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Videos pulled from the processing queue
    pub attempted: usize,

    /// Clips successfully written
    pub extracted: usize,

    /// Videos skipped before extraction (no duration, no eligible stream)
    pub skipped: usize,

    /// Videos where resolution or extraction failed
    pub failed: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} extracted, {} skipped, {} failed",
            self.attempted, self.extracted, self.skipped, self.failed
        )
    }
}

/// Orchestrates the end-to-end batch, isolating failures per item.
///
/// Items are processed strictly one at a time: sequential processing keeps
/// console ordering deterministic and avoids hammering the external resolver
/// and extractor. Resolver and extractor failures are caught at the item
/// boundary; only source-not-found and cancellation stop the run.
pub struct ClipPipeline {
    resolver: Arc<dyn StreamResolver>,
    extractor: Arc<dyn ClipExtractor>,
    quality: QualityPolicy,
}

impl ClipPipeline {
    pub fn new(
        resolver: Arc<dyn StreamResolver>,
        extractor: Arc<dyn ClipExtractor>,
        quality: QualityPolicy,
    ) -> Self {
        Self {
            resolver,
            extractor,
            quality,
        }
    }

    /// Resolve a creator handle and clip its upload feed.
    ///
    /// A handle that does not resolve is fatal: no item processing starts.
    pub async fn run_channel(
        &self,
        source: &dyn VideoSource,
        handle: &str,
        ctx: &mut RunContext,
        cancel: watch::Receiver<bool>,
    ) -> Result<RunReport> {
        info!("Fetching ID for {}", handle);
        let channel = source.resolve_channel(handle).await?;

        info!("Fetching uploads for {}...", channel.title);
        let videos = source.list_uploads(&channel.id).await?;
        self.run(videos, ctx, cancel).await
    }

    /// Clip the videos of a playlist.
    pub async fn run_playlist(
        &self,
        source: &dyn VideoSource,
        playlist_id: &str,
        ctx: &mut RunContext,
        cancel: watch::Receiver<bool>,
    ) -> Result<RunReport> {
        info!("Fetching playlist {}...", playlist_id);
        let videos = source.list_playlist(playlist_id).await?;
        self.run(videos, ctx, cancel).await
    }

    /// Work through `source` according to the context's selection mode.
    ///
    /// The output directory is created once up front and never deleted here.
    /// Cancellation is observed between items and inside the extractor; a
    /// cancelled run returns the report accumulated so far.
    pub async fn run(
        &self,
        source: VideoStream,
        ctx: &mut RunContext,
        cancel: watch::Receiver<bool>,
    ) -> Result<RunReport> {
        tokio::fs::create_dir_all(&ctx.output_dir).await?;

        let mode = ctx.mode;
        let mut queue = selector::select(source, mode, &mut ctx.rng).await;
        let mut report = RunReport::default();

        while let Some(video) = queue.next().await {
            if *cancel.borrow() {
                info!("Cancellation requested, stopping after {} items", report.attempted);
                break;
            }

            report.attempted += 1;
            info!("Downloading {}...", video.title);

            if video.eligible_duration().is_none() {
                debug!("Skipping {}: missing or zero duration", video.id);
                report.skipped += 1;
                continue;
            }

            let candidates = match self.resolver.resolve_streams(&video.id).await {
                Ok(candidates) => candidates,
                Err(err) => {
                    warn!("{}", err);
                    report.failed += 1;
                    continue;
                }
            };

            let Some(stream) = self.quality.select(&candidates) else {
                warn!(
                    "{}",
                    ResolveError::NoEligibleStream {
                        video_id: video.id.clone(),
                    }
                );
                report.skipped += 1;
                continue;
            };

            let job = build_job(&video, stream, ctx);
            debug!(
                "Extracting {}s at offset {}s into {}",
                job.clip_length.as_secs(),
                job.seek_offset.as_secs(),
                job.destination.display()
            );

            match self.extractor.extract(&job).await {
                Ok(()) => report.extracted += 1,
                Err(ExtractError::Cancelled) => {
                    info!("Extraction cancelled, stopping");
                    break;
                }
                Err(err) => {
                    warn!("Extraction failed for {}: {}", video.id, err);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
