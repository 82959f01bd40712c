//! # External Collaborator Interfaces
//!
//! The pipeline core treats video enumeration, stream resolution, and the
//! actual media trimming as external capabilities behind traits. The shipped
//! implementations live in [`crate::youtube`] (yt-dlp) and [`crate::ffmpeg`]
//! (ffmpeg CLI); tests substitute in-memory stubs.

pub mod types;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::{ExtractError, ResolveError, SourceError};
pub use types::{ChannelRef, ClipJob, SelectionMode, StreamHandle, VideoRef};

/// A lazy, finite, non-restartable sequence of videos.
///
/// `All` mode consumes this without materializing it, so unbounded upload
/// feeds stay cheap; `RandomSample` collects it by definition.
pub type VideoStream = BoxStream<'static, VideoRef>;

/// Enumerates candidate videos from a channel or playlist.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Resolve a creator handle to a channel identity.
    ///
    /// Returns [`SourceError::NotFound`] if the handle does not exist; that
    /// error is fatal to the run.
    async fn resolve_channel(&self, handle: &str) -> std::result::Result<ChannelRef, SourceError>;

    /// List a channel's uploads, newest first, as a lazy sequence.
    async fn list_uploads(&self, channel_id: &str)
        -> std::result::Result<VideoStream, SourceError>;

    /// List a playlist's videos in playlist order, as a lazy sequence.
    async fn list_playlist(
        &self,
        playlist_id: &str,
    ) -> std::result::Result<VideoStream, SourceError>;
}

/// Resolves a video id to the set of playable stream candidates.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Returns every stream candidate for the video, in no particular order.
    ///
    /// An empty set is a valid answer (no muxed stream available); callers
    /// apply a quality policy over the result. Errors here are per-item and
    /// never abort the batch.
    async fn resolve_streams(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<StreamHandle>, ResolveError>;
}

/// Produces one clip file from one [`ClipJob`].
#[async_trait]
pub trait ClipExtractor: Send + Sync {
    /// Extract `job.clip_length` of media starting at `job.seek_offset`,
    /// writing to `job.destination`.
    ///
    /// If the seek window runs past the end of the source the result is a
    /// shorter clip, not an error. [`ExtractError::Cancelled`] stops the
    /// batch cleanly; any other error is per-item.
    async fn extract(&self, job: &ClipJob) -> std::result::Result<(), ExtractError>;
}
