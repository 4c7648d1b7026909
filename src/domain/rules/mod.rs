// Domain rules - Naming and caption policies

use std::path::{Path, PathBuf};

use crate::domain::model::*;

/// Video extensions offered by default when picking a source
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "avi"];

/// Caption rules for the two burned-in strings
pub struct CaptionRules;

impl CaptionRules {
    /// Bottom caption for a 1-based segment index
    pub fn part_label(index: u32) -> String {
        format!("Part {}", index)
    }

    /// Build the overlay for one segment; the top text never varies within a run
    pub fn overlay_for(
        title: &str,
        segment: &Segment,
        frame: TargetFrame,
        font_path: &Path,
        font_size: f32,
    ) -> OverlaySpec {
        OverlaySpec {
            top_text: title.to_string(),
            bottom_text: Self::part_label(segment.index),
            frame,
            font_path: font_path.to_path_buf(),
            font_size,
        }
    }
}

/// File names produced for one segment.
///
/// Every intermediate embeds the segment index so no two segments can ever
/// share a temporary path.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentArtifacts {
    /// Trimmed, padded clip with audio
    pub clip: PathBuf,
    /// Captioned clip without audio
    pub overlay: PathBuf,
    /// Audio track pulled out of `clip`
    pub audio: PathBuf,
    /// Final reel
    pub output: PathBuf,
}

impl SegmentArtifacts {
    pub fn for_segment(output_dir: &Path, index: u32) -> Self {
        Self {
            clip: output_dir.join(format!("temp_reel_part_{}.mp4", index)),
            overlay: output_dir.join(format!("overlay_reel_part_{}.mp4", index)),
            audio: output_dir.join(format!("audio_reel_part_{}.m4a", index)),
            output: output_dir.join(format!("reel_part_{}.mp4", index)),
        }
    }
}

/// Whether the source has one of the usual video extensions
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
