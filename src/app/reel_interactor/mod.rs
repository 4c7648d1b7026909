// Reel interactor - Orchestrates the movie-to-reels use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::adapters::toml_config::{DEFAULT_FONT_PATH, FONT_SIZE};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::planner::SegmentPlanner;
use crate::ports::*;
use crate::utils::temp::ScopedArtifact;
use crate::utils::time::format_clock;

/// Caption and frame settings fixed for a whole run
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSettings {
    pub font_path: PathBuf,
    pub font_size: f32,
    pub frame: TargetFrame,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: FONT_SIZE,
            frame: TargetFrame::REEL_720,
        }
    }
}

/// Interactor for splitting a movie into captioned vertical reels
pub struct ReelInteractor {
    probe_port: Arc<dyn ProbePort>,
    tool_port: Arc<dyn MediaToolPort>,
    overlay_port: Arc<dyn OverlayPort>,
    fs_port: Arc<dyn FsPort>,
    planner: SegmentPlanner,
    captions: CaptionSettings,
}

impl ReelInteractor {
    /// Create new reel interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        tool_port: Arc<dyn MediaToolPort>,
        overlay_port: Arc<dyn OverlayPort>,
        fs_port: Arc<dyn FsPort>,
        captions: CaptionSettings,
    ) -> Self {
        Self {
            probe_port,
            tool_port,
            overlay_port,
            fs_port,
            planner: SegmentPlanner::new(),
            captions,
        }
    }

    /// Duration of `input` in seconds
    pub async fn probe(&self, input: &Path) -> Result<f64, DomainError> {
        if !self.fs_port.file_exists(input).await? {
            return Err(DomainError::Probe(format!(
                "Input file not found: {}",
                input.display()
            )));
        }
        self.probe_port.probe_duration(input).await
    }

    /// Probe `input` and plan its segments without transcoding anything
    pub async fn plan(
        &self,
        input: &Path,
        segment_duration: SegmentDuration,
    ) -> Result<SegmentPlan, DomainError> {
        warn_on_extension(input);
        let total = self.probe(input).await?;
        self.planner.plan(total, segment_duration)
    }

    /// Run the whole split.
    ///
    /// Segment-local failures are recorded in the report and the loop moves
    /// on; run-fatal failures are returned as `Err` after the current
    /// segment's intermediates are cleaned up.
    pub async fn execute(&self, request: &ReelRequest) -> Result<RunReport, DomainError> {
        let started_at = Utc::now();
        info!(
            input = %request.input.display(),
            output_dir = %request.output_dir.display(),
            "Splitting '{}' into {} reels",
            request.title,
            request.segment_duration
        );

        self.fs_port.create_directory(&request.output_dir).await?;

        let plan = self.plan(&request.input, request.segment_duration).await?;
        if plan.is_empty() {
            warn!("Source reports zero duration, no reels to generate");
        }

        let total = plan.len();
        let mut outcomes = Vec::with_capacity(total);

        for segment in plan.iter() {
            info!("Generating reel {}/{}", segment.index, total);
            debug!(
                index = segment.index,
                "Window {} - {}",
                format_clock(segment.start),
                format_clock(plan.effective_duration(segment) + segment.start)
            );

            let artifacts = SegmentArtifacts::for_segment(&request.output_dir, segment.index);
            match self.render_segment(request, segment, &artifacts).await {
                Ok(output) => {
                    info!(index = segment.index, "Reel saved to {}", output.display());
                    outcomes.push(SegmentOutcome::succeeded(segment, &output));
                }
                Err(e) if e.is_run_fatal() => {
                    error!(index = segment.index, "Aborting run: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!(index = segment.index, "Reel {} failed: {}", segment.index, e);
                    outcomes.push(SegmentOutcome::failed(segment, &e));
                }
            }
        }

        let report = RunReport::finish(
            request.input.clone(),
            request.output_dir.clone(),
            plan.total_duration,
            started_at,
            outcomes,
        );

        info!(
            "{} of {} reels generated in {}",
            report.succeeded_count(),
            total,
            request.output_dir.display()
        );
        Ok(report)
    }

    /// Transcode, caption and re-attach audio for one segment
    async fn render_segment(
        &self,
        request: &ReelRequest,
        segment: &Segment,
        artifacts: &SegmentArtifacts,
    ) -> Result<PathBuf, DomainError> {
        let clip = ScopedArtifact::claim(artifacts.clip.clone());
        let transcode = TranscodeRequest {
            source: request.input.clone(),
            start: segment.start,
            duration: segment.duration,
            frame: self.captions.frame,
            output: clip.path().to_path_buf(),
        };
        self.tool_port.transcode_segment(&transcode).await?;

        let overlay = ScopedArtifact::claim(artifacts.overlay.clone());
        let spec = CaptionRules::overlay_for(
            &request.title,
            segment,
            self.captions.frame,
            &self.captions.font_path,
            self.captions.font_size,
        );
        let rendered = self
            .overlay_port
            .render_overlay(clip.path(), overlay.path(), &spec)
            .await?;
        debug!(
            index = segment.index,
            frames = rendered.frames,
            fps = rendered.frame_rate,
            "Captions rendered"
        );

        let audio = ScopedArtifact::claim(artifacts.audio.clone());
        self.tool_port.extract_audio(clip.path(), audio.path()).await?;
        match self
            .tool_port
            .mux(overlay.path(), audio.path(), &artifacts.output)
            .await
        {
            Ok(output) => Ok(output),
            Err(e) => {
                // Only the mux writes the final reel
                self.discard_partial(&artifacts.output).await;
                Err(e)
            }
        }
    }

    async fn discard_partial(&self, output: &Path) {
        if let Err(e) = self.fs_port.delete_file(output).await {
            warn!("Could not remove partial reel {}: {}", output.display(), e);
        }
    }
}

fn warn_on_extension(input: &Path) {
    if !has_supported_extension(input) {
        warn!(
            "{} is not one of {}; continuing anyway",
            input.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
}
