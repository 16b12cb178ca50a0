//! Video clip extraction through the ffmpeg command line.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::VideoStrategy;
use crate::constants::ffmpeg;
use crate::error::{Error, Result};

/// Cuts time windows out of video files by spawning ffmpeg.
#[derive(Debug, Clone)]
pub struct VideoClipper {
    program: PathBuf,
    strategy: VideoStrategy,
}

impl VideoClipper {
    /// Create a clipper that runs `program` with the given cut strategy.
    pub fn new(program: PathBuf, strategy: VideoStrategy) -> Self {
        Self { program, strategy }
    }

    /// Write `[start_time, end_time]` seconds of `input` to `output`.
    ///
    /// An existing `output` is overwritten.
    pub fn extract_clip(
        &self,
        input: &Path,
        output: &Path,
        start_time: f64,
        end_time: f64,
    ) -> Result<()> {
        let args = self.clip_args(input, output, start_time, end_time);
        debug!("Running {} {:?}", self.program.display(), args);

        let result = self
            .command()
            .args(&args)
            .output()
            .map_err(|e| Error::FfmpegNotFound {
                program: self.program.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(Error::FfmpegFailed {
                path: output.to_path_buf(),
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    /// Base ffmpeg command with no arguments.
    ///
    /// On Unix the child gets its own process group, so a Ctrl+C at the
    /// terminal reaches only this process and the current clip can finish.
    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.stdin(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command
    }

    /// Build the ffmpeg argument list for one clip.
    pub fn clip_args(
        &self,
        input: &Path,
        output: &Path,
        start_time: f64,
        end_time: f64,
    ) -> Vec<OsString> {
        let duration = (end_time - start_time).max(0.0);

        let mut args: Vec<OsString> = ["-y", "-v", ffmpeg::LOG_LEVEL, "-ss"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(format!("{start_time:.3}").into());
        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
        args.push("-t".into());
        args.push(format!("{duration:.3}").into());

        let codec_args: &[&str] = match self.strategy {
            VideoStrategy::Reencode => &["-c:v", ffmpeg::VIDEO_CODEC, "-c:a", ffmpeg::AUDIO_CODEC],
            VideoStrategy::Copy => &["-c", "copy"],
        };
        args.extend(codec_args.iter().map(OsString::from));
        args.push(output.as_os_str().to_os_string());

        args
    }
}
