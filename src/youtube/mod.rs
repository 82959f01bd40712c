//! # YouTube Integration
//!
//! [`VideoSource`] and [`StreamResolver`] over the `yt-dlp` CLI. Listing uses
//! `--flat-playlist --dump-single-json`, which returns one JSON document per
//! feed; enumeration is therefore eager inside this client even though the
//! trait surfaces a lazy stream. Stream resolution dumps the full per-video
//! metadata and keeps only muxed formats, since clips are trimmed straight
//! from one playable URL without merging tracks.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{ResolveError, SourceError};
use crate::source::{ChannelRef, StreamHandle, StreamResolver, VideoRef, VideoSource, VideoStream};

/// Flags shared by every metadata invocation.
const COMMON_FLAGS: &[&str] = &["--dump-single-json", "--no-warnings", "--no-progress"];

/// yt-dlp-backed video source and stream resolver.
pub struct YtDlpClient {
    program: PathBuf,
}

impl YtDlpClient {
    /// Locate yt-dlp on PATH.
    pub fn new() -> Result<Self, SourceError> {
        let program =
            which::which("yt-dlp").map_err(|_| SourceError::ToolMissing { tool: "yt-dlp" })?;
        Ok(Self { program })
    }

    /// Run yt-dlp against `url` and return its JSON stdout.
    async fn dump_json(&self, extra_flags: &[&str], url: &str) -> Result<String, String> {
        debug!(
            "Running yt-dlp {} {} {}",
            COMMON_FLAGS.join(" "),
            extra_flags.join(" "),
            url
        );
        let output = Command::new(&self.program)
            .args(COMMON_FLAGS)
            .args(extra_flags)
            .arg(url)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| format!("failed to launch yt-dlp: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr.lines().last().unwrap_or("no error output");
            return Err(format!("yt-dlp exited with {}: {}", output.status, tail));
        }

        String::from_utf8(output.stdout).map_err(|e| format!("yt-dlp emitted invalid UTF-8: {e}"))
    }

    fn channel_url(handle: &str) -> String {
        let handle = handle.trim_start_matches('@');
        format!("https://www.youtube.com/@{handle}")
    }
}

#[async_trait]
impl VideoSource for YtDlpClient {
    async fn resolve_channel(&self, handle: &str) -> Result<ChannelRef, SourceError> {
        let url = Self::channel_url(handle);
        // --playlist-items 0 resolves the channel without touching entries.
        let raw = self
            .dump_json(&["--flat-playlist", "--playlist-items", "0"], &url)
            .await
            .map_err(|_| SourceError::NotFound {
                target: handle.to_string(),
            })?;

        parse_channel(&raw, handle).ok_or_else(|| SourceError::NotFound {
            target: handle.to_string(),
        })
    }

    async fn list_uploads(&self, channel_id: &str) -> Result<VideoStream, SourceError> {
        let url = format!("https://www.youtube.com/channel/{channel_id}/videos");
        let raw = self
            .dump_json(&["--flat-playlist"], &url)
            .await
            .map_err(|reason| SourceError::ListFailed { reason })?;
        let videos = parse_video_entries(&raw)
            .map_err(|reason| SourceError::ListFailed { reason })?;
        Ok(stream::iter(videos).boxed())
    }

    async fn list_playlist(&self, playlist_id: &str) -> Result<VideoStream, SourceError> {
        let url = format!("https://www.youtube.com/playlist?list={playlist_id}");
        let raw = self
            .dump_json(&["--flat-playlist"], &url)
            .await
            .map_err(|_| SourceError::NotFound {
                target: playlist_id.to_string(),
            })?;
        let videos = parse_video_entries(&raw)
            .map_err(|reason| SourceError::ListFailed { reason })?;
        Ok(stream::iter(videos).boxed())
    }
}

#[async_trait]
impl StreamResolver for YtDlpClient {
    async fn resolve_streams(&self, video_id: &str) -> Result<Vec<StreamHandle>, ResolveError> {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        let raw = self
            .dump_json(&[], &url)
            .await
            .map_err(|reason| ResolveError::Failed {
                video_id: video_id.to_string(),
                reason,
            })?;

        parse_stream_candidates(&raw).map_err(|reason| ResolveError::Failed {
            video_id: video_id.to_string(),
            reason,
        })
    }
}

/// Subset of a flat-playlist dump. Everything is optional because older
/// entries may lack metadata.
#[derive(Deserialize)]
struct PlaylistDump {
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    entries: Vec<PlaylistEntry>,
}

#[derive(Deserialize)]
struct PlaylistEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

/// Subset of a full video dump, formats only.
#[derive(Deserialize)]
struct VideoDump {
    #[serde(default)]
    formats: Vec<FormatEntry>,
}

#[derive(Deserialize)]
struct FormatEntry {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    format_note: Option<String>,
    #[serde(default)]
    width: Option<i64>,
    #[serde(default)]
    height: Option<i64>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
}

impl FormatEntry {
    /// A muxed format carries both audio and video tracks.
    fn is_muxed(&self) -> bool {
        let has_codec = |codec: &Option<String>| {
            codec
                .as_deref()
                .is_some_and(|c| !c.eq_ignore_ascii_case("none"))
        };
        has_codec(&self.vcodec) && has_codec(&self.acodec)
    }
}

fn parse_channel(raw: &str, handle: &str) -> Option<ChannelRef> {
    let dump: PlaylistDump = serde_json::from_str(raw).ok()?;
    let id = dump.channel_id?;
    let title = dump
        .channel
        .or(dump.title)
        .unwrap_or_else(|| handle.to_string());
    Some(ChannelRef { id, title })
}

fn parse_video_entries(raw: &str) -> Result<Vec<VideoRef>, String> {
    let dump: PlaylistDump =
        serde_json::from_str(raw).map_err(|e| format!("unexpected playlist JSON: {e}"))?;
    Ok(dump
        .entries
        .into_iter()
        .map(|entry| {
            let duration = entry
                .duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .map(Duration::from_secs_f64);
            VideoRef {
                title: entry.title.unwrap_or_else(|| entry.id.clone()),
                id: entry.id,
                duration,
            }
        })
        .collect())
}

fn parse_stream_candidates(raw: &str) -> Result<Vec<StreamHandle>, String> {
    let dump: VideoDump =
        serde_json::from_str(raw).map_err(|e| format!("unexpected video JSON: {e}"))?;
    Ok(dump
        .formats
        .into_iter()
        .filter(FormatEntry::is_muxed)
        .filter_map(|format| {
            let url = format.url?;
            let quality_label = format
                .format_note
                .or_else(|| format.height.map(|h| format!("{h}p")))
                .unwrap_or_else(|| "unknown".to_string());
            Some(StreamHandle {
                url,
                quality_label,
                width: format.width.unwrap_or(0).max(0) as u32,
            })
        })
        .collect())
}
