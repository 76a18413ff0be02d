//! Frame geometry
//!
//! Turns a read-only snapshot into a screen-space vertex list. World
//! entities are shifted left by the camera offset; the background scrolls
//! on its own.

use glam::Vec2;

use super::background::Background;
use super::shapes;
use super::sprite::SpriteSheet;
use super::vertex::{Vertex, colors};
use crate::consts::CANVAS_HEIGHT;
use crate::settings::Settings;
use crate::sim::{Player, RenderSnapshot};
use crate::world_to_screen_x;

pub const FINISH_LINE_WIDTH: f32 = 4.0;
/// Ticks per on/off half-cycle while the player is invulnerable
const BLINK_TICKS: u32 = 4;

/// Everything the scene needs besides the snapshot
pub struct SceneAssets<'a> {
    pub background: &'a Background,
    pub sprite: Option<&'a SpriteSheet>,
    pub settings: &'a Settings,
}

fn to_screen(pos: Vec2, camera_x: f32) -> Vec2 {
    Vec2::new(world_to_screen_x(pos.x, camera_x), pos.y)
}

fn player_visible(player: &Player) -> bool {
    player.invulnerable_ticks == 0 || (player.invulnerable_ticks / BLINK_TICKS) % 2 == 0
}

pub fn draw_player(out: &mut Vec<Vertex>, player: &Player, camera_x: f32, assets: &SceneAssets) {
    if !player_visible(player) {
        return;
    }

    let pos = to_screen(player.pos, camera_x);
    match assets.sprite.filter(|_| assets.settings.sprites) {
        Some(sheet) => sheet.draw_frame(out, player.frame_index, pos, player.size),
        None => shapes::rect(out, pos, player.size, colors::PLAYER_PLACEHOLDER),
    }
}

/// Build the full frame, back to front
pub fn build_scene(snapshot: &RenderSnapshot, assets: &SceneAssets) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);
    let camera_x = snapshot.camera_x;
    let settings = assets.settings;

    assets.background.draw(&mut out, camera_x, settings);

    let (platform_color, enemy_color) = if settings.high_contrast {
        (colors::HC_PLATFORM, colors::HC_ENEMY)
    } else {
        (colors::PLATFORM, colors::ENEMY)
    };

    for platform in snapshot.platforms {
        shapes::rect(&mut out, to_screen(platform.pos, camera_x), platform.size, platform_color);
    }

    if settings.finish_line {
        shapes::vertical_line(
            &mut out,
            world_to_screen_x(snapshot.level_end, camera_x),
            0.0,
            CANVAS_HEIGHT,
            FINISH_LINE_WIDTH,
            colors::FINISH_LINE,
        );
    }

    for enemy in snapshot.enemies {
        shapes::rect(&mut out, to_screen(enemy.pos, camera_x), enemy.size, enemy_color);
    }

    for bullet in snapshot.bullets {
        shapes::rect(&mut out, to_screen(bullet.pos, camera_x), bullet.size, colors::BULLET);
    }

    draw_player(&mut out, snapshot.player, camera_x, assets);

    out
}
