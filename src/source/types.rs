//! Core data types flowing through the clip pipeline.

use std::path::PathBuf;
use std::time::Duration;

/// A video as reported by the external video source.
///
/// Metadata only; the playable media URL is resolved separately and
/// per-video, since stream URLs are typically short-lived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    /// Opaque video identifier
    pub id: String,

    /// Human-readable title, used for progress reporting
    pub title: String,

    /// Total duration, if the source knows it
    pub duration: Option<Duration>,
}

impl VideoRef {
    /// Returns the duration if the video is eligible for clipping.
    ///
    /// Videos with an unknown or zero duration cannot host a random seek
    /// point and are skipped before stream resolution.
    pub fn eligible_duration(&self) -> Option<Duration> {
        self.duration.filter(|d| !d.is_zero())
    }
}

/// One playable stream candidate for a video.
///
/// Transient: used once to build a [`ClipJob`], then discarded. The URL may
/// be time-limited, so handles are never cached across items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    /// Playable media URL
    pub url: String,

    /// Quality descriptor, e.g. "720p"
    pub quality_label: String,

    /// Horizontal resolution in pixels
    pub width: u32,
}

/// Resolved channel identity for a creator handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: String,
    pub title: String,
}

/// An extraction request, consumed exactly once by the clip extractor.
///
/// `seek_offset + clip_length` may exceed the source duration; the extractor
/// trims best-effort in that case and it is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipJob {
    /// Playable media URL to read from
    pub source_url: String,

    /// Position in the source at which extraction begins
    pub seek_offset: Duration,

    /// Length of the produced clip
    pub clip_length: Duration,

    /// Where the clip is written
    pub destination: PathBuf,
}

/// How candidate videos become a processing queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Process every video in source order, lazily.
    All,

    /// Draw `count` videos uniformly at random, with replacement.
    ///
    /// Requires materializing the full source first. The same video may be
    /// drawn (and clipped) more than once in a run; that is intentional.
    RandomSample { count: usize },
}
