//! Text rasterization onto packed RGB frames

use std::collections::HashMap;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::engine::layout::{outline_offsets, CaptionLayout, TextMeasure, TextPlacement};

pub type Rgb = [u8; 3];

pub const FILL_COLOR: Rgb = [255, 255, 255];
pub const OUTLINE_COLOR: Rgb = [0, 0, 0];

/// Mutable view of one packed RGB24 plane
pub struct RgbCanvas<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> RgbCanvas<'a> {
    /// `stride` is the byte length of one row, at least `width * 3`
    pub fn new(data: &'a mut [u8], width: u32, height: u32, stride: usize) -> Self {
        Self {
            data,
            width,
            height,
            stride,
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = y as usize * self.stride + x as usize * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Blend a coverage mask at (x, y), clipping at the frame edges
    pub fn blend_mask(&mut self, x: i32, y: i32, mask: &GlyphMask, color: Rgb) {
        for row in 0..mask.height {
            let py = y + row as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for col in 0..mask.width {
                let px = x + col as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let coverage = mask.coverage[row * mask.width + col];
                if coverage == 0 {
                    continue;
                }
                let idx = py as usize * self.stride + px as usize * 3;
                if idx + 2 >= self.data.len() {
                    continue;
                }
                blend_pixel(&mut self.data[idx..idx + 3], color, coverage);
            }
        }
    }
}

fn blend_pixel(dst: &mut [u8], color: Rgb, alpha: u8) {
    let a = u16::from(alpha);
    let inv = 255 - a;
    for (channel, value) in dst.iter_mut().zip(color) {
        *channel = ((u16::from(*channel) * inv + u16::from(value) * a + 127) / 255) as u8;
    }
}

/// Rasterized coverage of a single glyph
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
struct PlacedGlyph {
    key: GlyphRasterConfig,
    dx: i32,
    dy: i32,
}

/// Glyph positions of a string relative to its pen position
#[derive(Debug, Clone)]
pub struct PreparedText {
    glyphs: Vec<PlacedGlyph>,
}

/// Font-backed caption painter
pub struct TextPainter {
    font: Font,
    font_size: f32,
    glyph_cache: HashMap<GlyphRasterConfig, GlyphMask>,
}

impl TextPainter {
    /// Open the font at `font_path`
    pub fn load(font_path: &Path, font_size: f32) -> Result<Self, DomainError> {
        let bytes = std::fs::read(font_path).map_err(|e| {
            DomainError::FontLoad(format!("Font file not found: {}: {}", font_path.display(), e))
        })?;
        let painter = Self::from_bytes(bytes, font_size).map_err(|e| match e {
            DomainError::FontLoad(msg) => {
                DomainError::FontLoad(format!("{}: {}", font_path.display(), msg))
            }
            other => other,
        })?;
        debug!("Loaded caption font {}", font_path.display());
        Ok(painter)
    }

    /// Parse a font from raw TrueType/OpenType bytes
    pub fn from_bytes(bytes: Vec<u8>, font_size: f32) -> Result<Self, DomainError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| DomainError::FontLoad(format!("failed to parse font: {}", e)))?;
        Ok(Self {
            font,
            font_size,
            glyph_cache: HashMap::new(),
        })
    }

    fn layout(&self, text: &str) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x: 0.0,
            y: 0.0,
            ..LayoutSettings::default()
        });
        layout.append(&[&self.font], &TextStyle::new(text, self.font_size, 0));
        layout
    }

    /// Lay out `text` and rasterize any glyphs not seen before
    pub fn prepare(&mut self, text: &str) -> PreparedText {
        let layout = self.layout(text);
        let mut glyphs = Vec::new();

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let font = &self.font;
            self.glyph_cache.entry(glyph.key).or_insert_with(|| {
                let (_, coverage) = font.rasterize_config(glyph.key);
                GlyphMask {
                    width: glyph.width,
                    height: glyph.height,
                    coverage,
                }
            });
            glyphs.push(PlacedGlyph {
                key: glyph.key,
                dx: glyph.x.round() as i32,
                dy: glyph.y.round() as i32,
            });
        }

        PreparedText { glyphs }
    }

    /// Draw prepared text with its pen at `at`
    pub fn draw(&self, canvas: &mut RgbCanvas<'_>, text: &PreparedText, at: TextPlacement, color: Rgb) {
        for glyph in &text.glyphs {
            if let Some(mask) = self.glyph_cache.get(&glyph.key) {
                canvas.blend_mask(at.x + glyph.dx, at.y + glyph.dy, mask, color);
            }
        }
    }

    /// Four diagonal outline passes, then the fill at the exact position
    pub fn draw_outlined(&self, canvas: &mut RgbCanvas<'_>, text: &PreparedText, at: TextPlacement) {
        for (dx, dy) in outline_offsets() {
            let shifted = TextPlacement {
                x: at.x + dx,
                y: at.y + dy,
            };
            self.draw(canvas, text, shifted, OUTLINE_COLOR);
        }
        self.draw(canvas, text, at, FILL_COLOR);
    }
}

impl TextMeasure for TextPainter {
    fn text_width(&self, text: &str) -> u32 {
        let layout = self.layout(text);
        let mut left = f32::MAX;
        let mut right = f32::MIN;
        for glyph in layout.glyphs() {
            if glyph.width == 0 {
                continue;
            }
            left = left.min(glyph.x);
            right = right.max(glyph.x + glyph.width as f32);
        }
        if right <= left {
            return 0;
        }
        (right - left).round() as u32
    }
}

/// Captions prepared once per segment and stamped on every frame
pub struct CaptionStamp {
    top: PreparedText,
    bottom: PreparedText,
    layout: CaptionLayout,
}

impl CaptionStamp {
    pub fn new(painter: &mut TextPainter, top_text: &str, bottom_text: &str, layout: CaptionLayout) -> Self {
        Self {
            top: painter.prepare(top_text),
            bottom: painter.prepare(bottom_text),
            layout,
        }
    }

    pub fn layout(&self) -> &CaptionLayout {
        &self.layout
    }

    pub fn apply(&self, painter: &TextPainter, canvas: &mut RgbCanvas<'_>) {
        painter.draw_outlined(canvas, &self.top, self.layout.top);
        painter.draw_outlined(canvas, &self.bottom, self.layout.bottom);
    }
}
