//! Clip job construction.

use std::time::Duration;

use rand::Rng;
use uuid::Uuid;

use crate::config::RunContext;
use crate::sanitize::sanitize;
use crate::source::{ClipJob, StreamHandle, VideoRef};

/// Build the extraction request for one selected video.
///
/// The seek offset is drawn uniformly from `[0, floor(duration))` whole
/// seconds using the run-wide RNG (offset 0 when the duration floors to 0).
/// The destination filename embeds a fresh v4 UUID, so repeated draws of the
/// same video under with-replacement sampling never collide within a run.
/// Pure construction: no I/O happens here.
pub fn build_job(video: &VideoRef, stream: &StreamHandle, ctx: &mut RunContext) -> ClipJob {
    let whole_secs = video
        .eligible_duration()
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let seek_secs = if whole_secs == 0 {
        0
    } else {
        ctx.rng.gen_range(0..whole_secs)
    };

    let filename = sanitize(&format!("{}_{}.mp4", video.id, Uuid::new_v4()));

    ClipJob {
        source_url: stream.url.clone(),
        seek_offset: Duration::from_secs(seek_secs),
        clip_length: ctx.clip_length,
        destination: ctx.output_dir.join(filename),
    }
}
