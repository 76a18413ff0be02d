//! Simulation step
//!
//! Advances the world by one step in a fixed order: animation, input,
//! gravity, integration, platform landing, fall-off, bullets, enemies,
//! level goal, camera.

use super::collision::{
    bullet_enemy_hit, bullet_offscreen, fell_off, player_enemy_contact, resolve_platform_landing,
};
use super::progression::{complete_level, lose_life};
use super::state::{GameEvent, GameState};
use crate::consts::CANVAS_HEIGHT;

/// Player intent for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Shots requested; a step fires at most one
    pub fire: u32,
}

/// Advance the game state by one step.
///
/// `elapsed_ms` only drives the sprite animation; movement is in per-step
/// units. Negative or non-finite elapsed time is treated as zero. Does
/// nothing while the game is paused on a notification.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) {
    if !state.phase.is_running() {
        return;
    }

    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };

    state.time_ticks += 1;
    state.player.advance_animation(elapsed_ms);
    if state.player.invulnerable_ticks > 0 {
        state.player.invulnerable_ticks -= 1;
    }

    apply_input(state, input);

    // Semi-implicit Euler: velocity first, then position
    let player = &mut state.player;
    player.vel.y += state.tuning.gravity;
    player.pos += player.vel;

    resolve_platform_landing(&mut state.player, &state.platforms);

    if fell_off(&state.player, CANVAS_HEIGHT) {
        lose_life(state);
    }

    // The world stops the moment the last life is gone
    if state.phase.is_running() {
        update_bullets(state);
        update_enemies(state);
    }

    if state.phase.is_running() && state.player.pos.x >= state.level_end {
        complete_level(state);
    }

    state.update_camera();
}

/// Map input intent onto player velocity, jump and fire
fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    // Instant acceleration; left wins if both are held
    player.vel.x = if input.move_left {
        -player.speed
    } else if input.move_right {
        player.speed
    } else {
        0.0
    };

    if input.jump && player.grounded {
        player.vel.y = player.jump_strength;
        player.grounded = false;
    }

    if input.fire > 0 {
        let bullet = player.fire(state.tuning.bullet_speed);
        state.bullets.push(bullet);
        state.events.push(GameEvent::BulletFired);
    }
}

/// Move bullets, drop the ones off screen and resolve enemy hits.
///
/// Iterates last-to-first so removal never skips an entry; each bullet
/// removes at most one enemy.
fn update_bullets(state: &mut GameState) {
    let visible_right = state.visible_right();

    for i in (0..state.bullets.len()).rev() {
        let bullet = &mut state.bullets[i];
        bullet.pos.x += bullet.vel_x;

        if bullet_offscreen(bullet, visible_right) {
            state.bullets.remove(i);
        } else if let Some(j) = bullet_enemy_hit(&state.bullets[i], &state.enemies) {
            state.enemies.remove(j);
            state.bullets.remove(i);
            state.player.score += state.tuning.kill_score;
            state.events.push(GameEvent::EnemyKilled {
                score: state.player.score,
            });
        }
    }
}

/// Patrol enemies and take a life on contact
fn update_enemies(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        state.enemies[i].patrol();

        let touching = player_enemy_contact(&state.player, &state.enemies[i]);
        if touching && state.player.invulnerable_ticks == 0 {
            lose_life(state);
            if !state.phase.is_running() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::progression::acknowledge;
    use crate::sim::state::{Bullet, Enemy, GamePhase};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const STEP_MS: f64 = 1000.0 / 60.0;

    /// Player standing on the ground at `x`, no enemies
    fn grounded_state(x: f32) -> GameState {
        let mut state = GameState::default();
        state.enemies.clear();
        state.player.pos = Vec2::new(x, 502.0);
        state.player.grounded = true;
        state.update_camera();
        state
    }

    fn enemy_at(x: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, 510.0),
            size: Vec2::splat(32.0),
            vel_x: 1.2,
            min_x: x - 50.0,
            max_x: x + 50.0,
        }
    }

    #[test]
    fn test_settles_on_ground() {
        let mut state = GameState::default();
        state.enemies.clear();
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), STEP_MS);
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y + state.player.size.y, 550.0);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_move_right() {
        let mut state = grounded_state(200.0);
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, STEP_MS);
        assert_eq!(state.player.pos.x, 203.0);
        assert_eq!(state.player.vel.x, 3.0);
        assert!(state.player.grounded);
        assert_eq!(state.camera_x, 103.0);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut state = grounded_state(200.0);
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, STEP_MS);
        assert_eq!(state.player.vel.x, -3.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = grounded_state(150.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, STEP_MS);
        // -10 impulse, then gravity
        assert_eq!(state.player.vel.y, -9.5);
        assert!(!state.player.grounded);

        // Holding jump mid-air does nothing
        tick(&mut state, &jump, STEP_MS);
        assert_eq!(state.player.vel.y, -9.0);
    }

    #[test]
    fn test_fall_off_costs_life() {
        let mut state = GameState::default();
        state.enemies.clear();
        state.player.pos = Vec2::new(1500.0, 590.0);
        state.player.vel.y = 12.0;

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_last_life_fall_resets_after_acknowledge() {
        let mut state = GameState::default();
        state.enemies.clear();
        state.player.lives = 1;
        state.player.score = 300;
        state.player.pos = Vec2::new(1500.0, 599.0);
        state.player.vel.y = 5.0;

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // World is frozen until acknowledged
        let frozen_ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.time_ticks, frozen_ticks);

        acknowledge(&mut state);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_reaching_goal_completes_level() {
        let mut state = grounded_state(998.0);
        state.level_end = 1000.0;
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };

        tick(&mut state, &input, STEP_MS);
        assert_eq!(state.level, 2);
        assert_eq!(state.level_end, 1500.0);
        assert_eq!(state.player.pos, Vec2::new(100.0, 500.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.enemies.len(), 4);
        assert_eq!(state.phase, GamePhase::LevelTransition { completed_level: 1 });
        assert!(state.drain_events().contains(&GameEvent::LevelComplete { level: 1 }));
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut state = grounded_state(100.0);
        state.enemies = vec![enemy_at(305.0)];
        state.bullets.push(Bullet {
            pos: Vec2::new(300.0, 520.0),
            size: Vec2::new(8.0, 4.0),
            vel_x: 6.0,
        });

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.score, 100);
        assert!(state.drain_events().contains(&GameEvent::EnemyKilled { score: 100 }));
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut state = grounded_state(100.0);
        state.enemies = vec![enemy_at(300.0), enemy_at(304.0)];
        state.bullets.push(Bullet {
            pos: Vec2::new(300.0, 520.0),
            size: Vec2::new(8.0, 4.0),
            vel_x: 6.0,
        });

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].min_x, 250.0);
        assert_eq!(state.player.score, 100);
    }

    #[test]
    fn test_bullet_removed_past_screen_edge() {
        let mut state = grounded_state(100.0);
        // camera_x = 0, visible right edge at 800
        state.bullets.push(Bullet {
            pos: Vec2::new(788.0, 100.0),
            size: Vec2::new(8.0, 4.0),
            vel_x: 6.0,
        });

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 794.0);

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.bullets.len(), 1); // 800 is not past 800

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_cutoff_follows_camera() {
        let mut state = grounded_state(500.0);
        assert_eq!(state.camera_x, 400.0);
        state.bullets.push(Bullet {
            pos: Vec2::new(1194.0, 100.0),
            size: Vec2::new(8.0, 4.0),
            vel_x: 6.0,
        });

        // 1200 is exactly the visible right edge
        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 1200.0);

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_one_bullet_per_step() {
        let mut state = grounded_state(100.0);
        let input = TickInput {
            fire: 3,
            ..Default::default()
        };
        tick(&mut state, &input, STEP_MS);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemies_stop_on_game_over() {
        let mut state = grounded_state(100.0);
        state.player.lives = 1;
        let mut touching = enemy_at(110.0);
        touching.vel_x = 0.0;
        state.enemies = vec![touching, enemy_at(600.0)];

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemies[1].pos.x, 600.0);
    }

    #[test]
    fn test_fire_spawns_bullet() {
        let mut state = grounded_state(100.0);
        let input = TickInput {
            fire: 1,
            ..Default::default()
        };
        tick(&mut state, &input, STEP_MS);
        assert_eq!(state.bullets.len(), 1);
        // Spawned at x=132 then moved once
        assert_eq!(state.bullets[0].pos.x, 138.0);
        assert!(state.drain_events().contains(&GameEvent::BulletFired));
    }

    #[test]
    fn test_enemy_contact_repeats_without_grace() {
        let mut state = grounded_state(100.0);
        // Enemy parked on the spawn point keeps hitting the respawned player
        let mut enemy = enemy_at(110.0);
        enemy.vel_x = 0.0;
        state.enemies = vec![enemy];

        tick(&mut state, &TickInput::default(), STEP_MS);
        assert_eq!(state.player.lives, 2);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), STEP_MS);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
    }

    #[test]
    fn test_invulnerability_window() {
        let tuning = Tuning {
            invulnerability_ticks: 60,
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        state.player.pos = Vec2::new(100.0, 502.0);
        let mut enemy = enemy_at(110.0);
        enemy.vel_x = 0.0;
        state.enemies = vec![enemy];

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), STEP_MS);
        }
        assert_eq!(state.player.lives, 2);
    }

    #[test]
    fn test_negative_elapsed_is_clamped() {
        let mut state = grounded_state(100.0);
        tick(&mut state, &TickInput::default(), -500.0);
        tick(&mut state, &TickInput::default(), f64::NAN);
        assert_eq!(state.player.frame_timer_ms, 0.0);
        assert_eq!(state.player.frame_index, 0);
    }

    #[test]
    fn test_level_transition_freezes_world() {
        let mut state = grounded_state(999.0);
        state.level_end = 1000.0;
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, STEP_MS);
        let enemies = state.enemies.clone();

        tick(&mut state, &right, STEP_MS);
        assert_eq!(state.enemies, enemies);
        assert_eq!(state.player.pos, Vec2::new(100.0, 500.0));

        acknowledge(&mut state);
        tick(&mut state, &right, STEP_MS);
        assert_eq!(state.player.pos.x, 103.0);
    }

    proptest! {
        #[test]
        fn gravity_adds_constant_midair(vy in -9.0f32..5.0, y in 100.0f32..200.0, x in 0.0f32..900.0) {
            // High enough above every platform that nothing lands this step
            let mut state = GameState::default();
            state.enemies.clear();
            state.player.pos = Vec2::new(x, y);
            state.player.vel.y = vy;

            tick(&mut state, &TickInput::default(), STEP_MS);
            prop_assert_eq!(state.player.vel.y, vy + 0.5);
            prop_assert_eq!(state.player.pos.y, y + (vy + 0.5));
        }

        #[test]
        fn grounded_means_resting_on_platform(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..200)
        ) {
            let mut state = GameState::default();
            state.enemies.clear();
            for (left, right, jump) in moves {
                let input = TickInput { move_left: left, move_right: right, jump, fire: 0 };
                tick(&mut state, &input, STEP_MS);
                acknowledge(&mut state);

                if state.player.grounded {
                    let bottom = state.player.pos.y + state.player.size.y;
                    prop_assert!(state.platforms.iter().any(|p| p.pos.y == bottom));
                    prop_assert_eq!(state.player.vel.y, 0.0);
                }
            }
        }
    }
}
