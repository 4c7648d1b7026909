//! FFmpeg execution adapter
//!
//! Runs the ffmpeg binary for segment extraction, audio extraction and the
//! final audio/video mux.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::toml_config::EncodingConfig;
use crate::domain::errors::*;
use crate::domain::model::TargetFrame;
use crate::ports::*;
use crate::utils::process::run_tool;
use crate::utils::time::format_seconds_arg;

/// FFmpeg-based execution adapter
pub struct FfmpegCliAdapter {
    program: String,
    encoding: EncodingConfig,
}

fn push_all(args: &mut Vec<String>, items: &[&str]) {
    args.extend(items.iter().map(|s| s.to_string()));
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl FfmpegCliAdapter {
    /// Create new FFmpeg adapter
    pub fn new(program: impl Into<String>, encoding: EncodingConfig) -> Self {
        Self {
            program: program.into(),
            encoding,
        }
    }

    /// Filter that fits the picture inside the frame and pads the remainder black
    pub fn scale_pad_filter(frame: TargetFrame) -> String {
        let (w, h) = (frame.width, frame.height);
        format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease:force_divisible_by=2,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1"
        )
    }

    fn common_args() -> Vec<String> {
        let mut args = Vec::new();
        push_all(&mut args, &["-hide_banner", "-loglevel", "error", "-y"]);
        args
    }

    fn video_codec_args(&self, args: &mut Vec<String>) {
        push_all(args, &["-c:v", "libx264", "-preset"]);
        args.push(self.encoding.preset.clone());
        args.push("-crf".to_string());
        args.push(self.encoding.crf.to_string());
        push_all(args, &["-pix_fmt", "yuv420p"]);
    }

    fn audio_codec_args(&self, args: &mut Vec<String>) {
        push_all(args, &["-c:a", "aac", "-b:a"]);
        args.push(self.encoding.audio_bitrate.clone());
    }

    /// Arguments for cutting one padded segment
    pub fn transcode_args(&self, request: &TranscodeRequest) -> Vec<String> {
        let mut args = Self::common_args();
        args.push("-ss".to_string());
        args.push(format_seconds_arg(request.start));
        args.push("-i".to_string());
        args.push(path_arg(&request.source));
        args.push("-t".to_string());
        args.push(format_seconds_arg(request.duration));
        args.push("-vf".to_string());
        args.push(Self::scale_pad_filter(request.frame));
        self.video_codec_args(&mut args);
        self.audio_codec_args(&mut args);
        args.push(path_arg(&request.output));
        args
    }

    /// Arguments for copying the audio track out of a clip
    pub fn extract_audio_args(clip: &Path, output: &Path) -> Vec<String> {
        let mut args = Self::common_args();
        args.push("-i".to_string());
        args.push(path_arg(clip));
        push_all(&mut args, &["-vn", "-acodec", "copy"]);
        args.push(path_arg(output));
        args
    }

    /// Arguments for the final mux with fast-start layout
    pub fn mux_args(&self, video: &Path, audio: &Path, output: &Path) -> Vec<String> {
        let mut args = Self::common_args();
        args.push("-i".to_string());
        args.push(path_arg(video));
        args.push("-i".to_string());
        args.push(path_arg(audio));
        push_all(&mut args, &["-map", "0:v:0", "-map", "1:a:0"]);
        self.video_codec_args(&mut args);
        self.audio_codec_args(&mut args);
        push_all(&mut args, &["-movflags", "+faststart", "-shortest"]);
        args.push(path_arg(output));
        args
    }

    async fn run(
        &self,
        args: &[String],
        to_error: fn(String) -> DomainError,
    ) -> Result<(), DomainError> {
        let output = run_tool(&self.program, args)
            .await
            .map_err(|e| to_error(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.success() {
            return Err(to_error(output.failure_summary(&self.program)));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaToolPort for FfmpegCliAdapter {
    async fn transcode_segment(&self, request: &TranscodeRequest) -> Result<PathBuf, DomainError> {
        info!(
            "Cutting {}s from {}s into {}",
            format_seconds_arg(request.duration),
            format_seconds_arg(request.start),
            request.output.display()
        );
        self.run(&self.transcode_args(request), DomainError::Transcode)
            .await?;
        Ok(request.output.clone())
    }

    async fn extract_audio(&self, clip: &Path, output: &Path) -> Result<PathBuf, DomainError> {
        debug!("Extracting audio from {}", clip.display());
        self.run(&Self::extract_audio_args(clip, output), DomainError::Mux)
            .await?;
        Ok(output.to_path_buf())
    }

    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<PathBuf, DomainError> {
        debug!(
            "Muxing {} with {} into {}",
            video.display(),
            audio.display(),
            output.display()
        );
        self.run(&self.mux_args(video, audio, output), DomainError::Mux)
            .await?;
        Ok(output.to_path_buf())
    }
}
