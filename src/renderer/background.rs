//! Sky, stars and parallax hills

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::settings::Settings;

/// Hills scroll at this fraction of the camera speed
pub const HILL_PARALLAX: f32 = 0.3;
/// Stars drift slower than the hills
pub const STAR_PARALLAX: f32 = 0.1;
pub const HILL_RADIUS: f32 = 150.0;

const STAR_SEED: u64 = 0x5eed_57a2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    pos: Vec2,
    size: f32,
}

/// Pre-generated backdrop; only the scroll offset changes per frame
#[derive(Debug, Clone)]
pub struct Background {
    stars: Vec<Star>,
    hill_segments: usize,
}

impl Background {
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(STAR_SEED);
        let stars = (0..settings.quality.star_count())
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..CANVAS_WIDTH),
                    // Keep stars above the hills
                    rng.random_range(0.0..CANVAS_HEIGHT - HILL_RADIUS),
                ),
                size: rng.random_range(1.0..2.5),
            })
            .collect();

        Self {
            stars,
            hill_segments: settings.quality.hill_segments(),
        }
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Horizontal offset of the hill pair for a camera position
    pub fn hill_offset(camera_x: f32) -> f32 {
        (camera_x * HILL_PARALLAX).rem_euclid(CANVAS_WIDTH)
    }

    pub fn draw(&self, out: &mut Vec<Vertex>, camera_x: f32, settings: &Settings) {
        shapes::gradient_rect(
            out,
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            colors::SKY_TOP,
            colors::SKY_BOTTOM,
        );

        let parallax = settings.effective_parallax();
        let star_shift = if parallax {
            (camera_x * STAR_PARALLAX).rem_euclid(CANVAS_WIDTH)
        } else {
            0.0
        };
        for star in &self.stars {
            let x = (star.pos.x - star_shift).rem_euclid(CANVAS_WIDTH);
            shapes::rect(
                out,
                Vec2::new(x, star.pos.y),
                Vec2::splat(star.size),
                colors::STAR,
            );
        }

        if parallax {
            let offset = Self::hill_offset(camera_x);
            for base_x in [-offset, CANVAS_WIDTH - offset] {
                shapes::half_disc(
                    out,
                    Vec2::new(base_x, CANVAS_HEIGHT),
                    HILL_RADIUS,
                    colors::HILLS,
                    self.hill_segments,
                );
            }
        }
    }
}
