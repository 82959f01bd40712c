//! ffmpeg argument building.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for the ffmpeg invocation that trims one clip.
///
/// The seek is placed before `-i` so ffmpeg opens the (possibly remote)
/// input at the keyframe nearest the offset instead of decoding up to it.
/// If `seek + limit` runs past the end of the input, ffmpeg writes whatever
/// media exists and exits cleanly, which is exactly the tolerated
/// shorter-clip behavior.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: String,
    output: PathBuf,
    seek: Option<Duration>,
    limit: Option<Duration>,
    overwrite: bool,
    log_level: String,
}

impl FfmpegCommand {
    /// Create a command reading from `input` (a path or URL) and writing `output`.
    pub fn new(input: impl Into<String>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.into(),
            output: output.as_ref().to_path_buf(),
            seek: None,
            limit: None,
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Seek position before the input is opened.
    pub fn seek(mut self, offset: Duration) -> Self {
        self.seek = Some(offset);
        self
    }

    /// Maximum duration of output to write.
    pub fn limit(mut self, length: Duration) -> Self {
        self.limit = Some(length);
        self
    }

    /// Set the ffmpeg log level (default "error").
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the full argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        if let Some(seek) = self.seek {
            args.push("-ss".to_string());
            args.push(format!("{:.3}", seek.as_secs_f64()));
        }

        args.push("-i".to_string());
        args.push(self.input.clone());

        if let Some(limit) = self.limit {
            args.push("-t".to_string());
            args.push(format!("{:.3}", limit.as_secs_f64()));
        }

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = FfmpegCommand::new("https://cdn.test/stream", "out/clip.mp4")
            .seek(Duration::from_secs(10))
            .limit(Duration::from_secs(5));

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-ss".to_string()));
        assert!(args.contains(&"10.000".to_string()));
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"5.000".to_string()));
        assert_eq!(args.last().unwrap(), "out/clip.mp4");

        // The seek precedes the input.
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
    }

    #[test]
    fn test_bare_command_has_no_window_flags() {
        let args = FfmpegCommand::new("in.mp4", "out.mp4").build_args();
        assert!(!args.contains(&"-ss".to_string()));
        assert!(!args.contains(&"-t".to_string()));
    }
}
