//! Collision detection and response
//!
//! Platforms are landing surfaces only: a player is snapped onto a platform
//! when falling into it, never pushed out sideways or from below.

use super::state::{Bullet, Enemy, Platform, Player};

/// Land the player on any platform it is falling into.
///
/// Clears `grounded` first so walking off a ledge starts a fall. Returns the
/// index of the last platform landed on, if any.
pub fn resolve_platform_landing(player: &mut Player, platforms: &[Platform]) -> Option<usize> {
    player.grounded = false;
    let mut landed = None;

    for (i, platform) in platforms.iter().enumerate() {
        if player.aabb().overlaps(&platform.aabb()) && player.vel.y > 0.0 {
            player.pos.y = platform.pos.y - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
            landed = Some(i);
        }
    }

    landed
}

/// Player dropped below the bottom of the play area
#[inline]
pub fn fell_off(player: &Player, floor_y: f32) -> bool {
    player.pos.y > floor_y
}

/// Bullet has scrolled past the right edge of the screen
#[inline]
pub fn bullet_offscreen(bullet: &Bullet, visible_right: f32) -> bool {
    bullet.pos.x > visible_right
}

/// Index of the enemy a bullet hits, scanning last-to-first
pub fn bullet_enemy_hit(bullet: &Bullet, enemies: &[Enemy]) -> Option<usize> {
    let bullet_box = bullet.aabb();
    enemies
        .iter()
        .rposition(|enemy| bullet_box.overlaps(&enemy.aabb()))
}

/// Player is touching an enemy
#[inline]
pub fn player_enemy_contact(player: &Player, enemy: &Enemy) -> bool {
    player.aabb().overlaps(&enemy.aabb())
}
