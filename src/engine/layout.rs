//! Caption placement
//!
//! Margins are absolute pixel constants chosen for the 720x1280 reel frame.
//! They are not scaled for other frame sizes.

use serde::{Deserialize, Serialize};

use crate::domain::model::OverlaySpec;

/// Distance from the top edge to the title's pen position
pub const TOP_MARGIN: i32 = 300;

/// Distance from the bottom edge to the part label's pen position
pub const BOTTOM_MARGIN: i32 = 300;

/// Diagonal shift of each outline pass
pub const OUTLINE_OFFSET: i32 = 2;

/// Rendered width of a string at a fixed font and size
pub trait TextMeasure {
    /// Horizontal ink extent of `text` in pixels
    fn text_width(&self, text: &str) -> u32;
}

/// Pen position of one caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub x: i32,
    pub y: i32,
}

/// Pen positions of both captions on a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionLayout {
    pub top: TextPlacement,
    pub bottom: TextPlacement,
}

/// Left edge that centers `text_width` in `frame_width` (floor division)
pub fn centered_x(frame_width: u32, text_width: u32) -> i32 {
    (frame_width as i32 - text_width as i32).div_euclid(2)
}

/// Offsets of the four outline passes drawn before the fill
pub fn outline_offsets() -> [(i32, i32); 4] {
    let d = OUTLINE_OFFSET;
    [(-d, -d), (d, -d), (-d, d), (d, d)]
}

impl CaptionLayout {
    /// Place both captions of `spec`, centering each for its own width
    pub fn compute(measure: &dyn TextMeasure, spec: &OverlaySpec) -> Self {
        let width = spec.frame.width;
        let height = spec.frame.height as i32;

        let top = TextPlacement {
            x: centered_x(width, measure.text_width(&spec.top_text)),
            y: TOP_MARGIN,
        };
        let bottom = TextPlacement {
            x: centered_x(width, measure.text_width(&spec.bottom_text)),
            y: height - BOTTOM_MARGIN,
        };

        Self { top, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TargetFrame;
    use std::path::PathBuf;

    /// Every character is 20 px wide
    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str) -> u32 {
            text.chars().count() as u32 * 20
        }
    }

    fn spec(top: &str, bottom: &str) -> OverlaySpec {
        OverlaySpec {
            top_text: top.to_string(),
            bottom_text: bottom.to_string(),
            frame: TargetFrame::REEL_720,
            font_path: PathBuf::from("arial.ttf"),
            font_size: 50.0,
        }
    }

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x(720, 200), 260);
        assert_eq!(centered_x(720, 201), 259);
        assert_eq!(centered_x(720, 720), 0);
    }

    #[test]
    fn test_centered_x_wider_than_frame_floors() {
        assert_eq!(centered_x(720, 801), -41);
    }

    #[test]
    fn test_layout_positions() {
        let layout = CaptionLayout::compute(&FixedWidth, &spec("Inception", "Part 1"));

        assert_eq!(layout.top, TextPlacement { x: (720 - 180) / 2, y: 300 });
        assert_eq!(layout.bottom, TextPlacement { x: (720 - 120) / 2, y: 980 });
    }

    #[test]
    fn test_each_caption_centered_for_own_width() {
        let layout = CaptionLayout::compute(&FixedWidth, &spec("A", "Part 10"));
        let top_center = layout.top.x + 20 / 2;
        let bottom_center = layout.bottom.x + 140 / 2;
        assert_eq!(top_center, 360);
        assert_eq!(bottom_center, 360);
    }

    #[test]
    fn test_top_placement_independent_of_part_number() {
        let first = CaptionLayout::compute(&FixedWidth, &spec("Title", "Part 1"));
        let tenth = CaptionLayout::compute(&FixedWidth, &spec("Title", "Part 10"));
        assert_eq!(first.top, tenth.top);
        assert_ne!(first.bottom.x, tenth.bottom.x);
    }

    #[test]
    fn test_outline_offsets_are_diagonal() {
        let offsets = outline_offsets();
        assert_eq!(offsets.len(), 4);
        assert!(offsets.iter().all(|(dx, dy)| dx.abs() == 2 && dy.abs() == 2));
    }
}
