//! Player sprite sheet
//!
//! A horizontal strip of equally sized frames. The sheet is generated from
//! pixel-art strings at startup, so there is no image to load. Frame slicing
//! follows the usual rule: frame width = sheet width / frame count.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

/// Pixel rows for each running frame (8x12 each)
const RUNNER_FRAMES: [[&str; 12]; 4] = [
    [
        "..HHHH..", ".HHHHHH.", "..SSSS..", "..SSSS..", "BBBBBBBB", "SBBBBBBS",
        "SBBBBBBS", "..BBBB..", "..PPPP..", "..P..P..", "..P..P..", ".FF..FF.",
    ],
    [
        "..HHHH..", ".HHHHHH.", "..SSSS..", "..SSSS..", "BBBBBBBB", "SBBBBBBS",
        "SBBBBBBS", "..BBBB..", "..PPPP..", ".P....P.", "P......P", "F......F",
    ],
    [
        "..HHHH..", ".HHHHHH.", "..SSSS..", "..SSSS..", "BBBBBBBB", "SBBBBBBS",
        "SBBBBBBS", "..BBBB..", "..PPPP..", "...PP...", "...PP...", "..FFFF..",
    ],
    [
        "..HHHH..", ".HHHHHH.", "..SSSS..", "..SSSS..", "BBBBBBBB", "SBBBBBBS",
        "SBBBBBBS", "..BBBB..", "..PPPP..", ".P....P.", ".P....P.", "FF....FF",
    ],
];

fn palette(c: char) -> Option<[f32; 4]> {
    match c {
        'H' => Some([0.35, 0.2, 0.1, 1.0]),  // hair
        'S' => Some([1.0, 0.8, 0.6, 1.0]),   // skin
        'B' => Some([0.2, 0.5, 0.95, 1.0]),  // shirt
        'P' => Some([0.15, 0.15, 0.35, 1.0]), // trousers
        'F' => Some([0.1, 0.1, 0.1, 1.0]),   // shoes
        _ => None,
    }
}

/// Source rectangle of one frame within the sheet (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A strip of animation frames; `None` pixels are transparent
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    pixels: Vec<Option<[f32; 4]>>,
}

impl SpriteSheet {
    /// Assemble a sheet from per-frame pixel rows.
    ///
    /// Returns `None` if the frames are empty or not all the same size.
    pub fn from_frames(
        frames: &[&[&str]],
        palette: impl Fn(char) -> Option<[f32; 4]>,
    ) -> Option<Self> {
        let first = frames.first()?;
        let frame_h = first.len();
        let frame_w = first.first()?.chars().count();
        if frame_w == 0 {
            return None;
        }

        let consistent = frames.iter().all(|rows| {
            rows.len() == frame_h && rows.iter().all(|row| row.chars().count() == frame_w)
        });
        if !consistent {
            return None;
        }

        let width = frame_w * frames.len();
        let mut pixels = vec![None; width * frame_h];
        for (f, rows) in frames.iter().enumerate() {
            for (y, row) in rows.iter().enumerate() {
                for (x, c) in row.chars().enumerate() {
                    pixels[y * width + f * frame_w + x] = palette(c);
                }
            }
        }

        Some(Self {
            width: width as u32,
            height: frame_h as u32,
            frame_count: frames.len() as u32,
            pixels,
        })
    }

    /// The built-in running character
    pub fn runner() -> Option<Self> {
        let frames: Vec<&[&str]> = RUNNER_FRAMES.iter().map(|f| &f[..]).collect();
        Self::from_frames(&frames, palette)
    }

    #[inline]
    pub fn frame_width(&self) -> u32 {
        self.width / self.frame_count.max(1)
    }

    /// Where frame `index` sits in the sheet (wraps past the last frame)
    pub fn frame_rect(&self, index: u32) -> FrameRect {
        let index = index % self.frame_count.max(1);
        let width = self.frame_width();
        FrameRect {
            x: index * width,
            y: 0,
            width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Draw frame `index` stretched over the destination rectangle
    pub fn draw_frame(&self, out: &mut Vec<Vertex>, index: u32, pos: Vec2, size: Vec2) {
        let src = self.frame_rect(index);
        let scale = Vec2::new(size.x / src.width as f32, size.y / src.height as f32);

        for y in 0..src.height {
            for x in 0..src.width {
                if let Some(color) = self.pixel(src.x + x, src.y + y) {
                    let px = pos + Vec2::new(x as f32, y as f32) * scale;
                    shapes::rect(out, px, scale, color);
                }
            }
        }
    }
}
