//! Clip extraction by spawning the ffmpeg CLI.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::ffmpeg::command::FfmpegCommand;
use crate::source::{ClipExtractor, ClipJob};

/// [`ClipExtractor`] implementation over an external `ffmpeg` binary.
///
/// Cancellation is observed while ffmpeg runs: the child is killed and
/// [`ExtractError::Cancelled`] is returned. A partially-written destination
/// file may remain; callers accept that and nothing is cleaned up.
pub struct FfmpegExtractor {
    program: PathBuf,
    cancel: Option<watch::Receiver<bool>>,
}

impl FfmpegExtractor {
    /// Locate ffmpeg on PATH.
    pub fn new() -> Result<Self, ExtractError> {
        let program = which::which("ffmpeg").map_err(|_| ExtractError::ToolMissing)?;
        Ok(Self {
            program,
            cancel: None,
        })
    }

    /// Observe a cancellation signal while extracting.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

#[async_trait]
impl ClipExtractor for FfmpegExtractor {
    async fn extract(&self, job: &ClipJob) -> Result<(), ExtractError> {
        let args = FfmpegCommand::new(job.source_url.clone(), &job.destination)
            .seek(job.seek_offset)
            .limit(job.clip_length)
            .build_args();
        debug!("Running ffmpeg {}", args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain stderr concurrently so ffmpeg never blocks on a full pipe.
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        let status = match self.cancel.clone() {
            Some(mut cancel) => loop {
                tokio::select! {
                    status = child.wait() => break status?,
                    changed = cancel.changed() => {
                        match changed {
                            Ok(()) if *cancel.borrow() => {
                                info!("Cancellation requested, killing ffmpeg");
                                let _ = child.kill().await;
                                return Err(ExtractError::Cancelled);
                            }
                            Ok(()) => {}
                            // Sender gone: cancellation can no longer arrive.
                            Err(_) => break child.wait().await?,
                        }
                    }
                }
            },
            None => child.wait().await?,
        };

        if status.success() {
            return Ok(());
        }

        let detail = match stderr_task {
            Some(task) => {
                let output = task.await.unwrap_or_default();
                // Only the tail is useful; ffmpeg repeats context above it.
                output
                    .lines()
                    .rev()
                    .take(5)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            None => String::new(),
        };

        Err(ExtractError::Failed {
            exit_code: status.code(),
            detail,
        })
    }
}
