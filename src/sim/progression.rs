//! Life, level and run progression
//!
//! Phases: `Playing` -> `LevelTransition` -> `Playing` on a cleared level,
//! `Playing` -> `GameOver` -> (reset) `Playing` when the last life is lost.
//! The paused phases wait for [`acknowledge`] from the presentation layer.

use super::state::{GameEvent, GamePhase, GameState, spawn_enemies};

/// Take a life from the player.
///
/// Ignored outside `Playing`, so several hazards in one step can never push
/// the run past game over.
pub fn lose_life(state: &mut GameState) {
    if !state.phase.is_running() {
        return;
    }

    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: player.lives,
    });

    if player.lives == 0 {
        log::info!(
            "Game over on level {} with score {}",
            state.level,
            player.score
        );
        state.events.push(GameEvent::GameOver {
            score: player.score,
            level: state.level,
        });
        state.phase = GamePhase::GameOver;
    } else {
        log::debug!("Life lost, {} left", player.lives);
        player.respawn();
        player.invulnerable_ticks = state.tuning.invulnerability_ticks;
    }
}

/// Advance to the next level and pause for the "level complete" notice
pub fn complete_level(state: &mut GameState) {
    if !state.phase.is_running() {
        return;
    }

    let completed = state.level;
    state.events.push(GameEvent::LevelComplete { level: completed });

    state.level += 1;
    state.level_end += state.tuning.level_end_step;
    state.enemies = spawn_enemies(&state.tuning, state.level, state.level_end);
    state.player.respawn();
    state.update_camera();

    log::info!(
        "Level {} complete, level {} goal at x={} with {} enemies",
        completed,
        state.level,
        state.level_end,
        state.enemies.len()
    );

    state.phase = GamePhase::LevelTransition {
        completed_level: completed,
    };
}

/// Start a new run: first level, full lives, zero score
pub fn reset(state: &mut GameState) {
    let tuning = &state.tuning;
    state.level = 1;
    state.level_end = tuning.level_end_start;
    state.enemies = spawn_enemies(tuning, state.level, state.level_end);
    state.bullets.clear();

    let player = &mut state.player;
    player.lives = tuning.start_lives;
    player.score = 0;
    player.grounded = false;
    player.invulnerable_ticks = 0;
    player.respawn();

    state.update_camera();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Reset);
    log::info!("New game started");
}

/// Dismiss the current notification and resume play.
///
/// Returns `true` if the phase changed.
pub fn acknowledge(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => false,
        GamePhase::LevelTransition { .. } => {
            state.phase = GamePhase::Playing;
            true
        }
        GamePhase::GameOver => {
            reset(state);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_lose_life_respawns() {
        let mut state = GameState::default();
        state.player.pos = Vec2::new(640.0, 300.0);
        state.player.vel = Vec2::new(3.0, 7.0);

        lose_life(&mut state);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.pos, state.player.spawn);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::LifeLost { lives_left: 2 }]);
    }

    #[test]
    fn test_last_life_enters_game_over() {
        let mut state = GameState::default();
        state.player.lives = 1;
        state.player.score = 700;
        state.level = 3;

        lose_life(&mut state);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 700, level: 3 }));

        // Further hazards while game over are ignored
        lose_life(&mut state);
        assert_eq!(state.player.lives, 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_acknowledge_game_over_resets() {
        let mut state = GameState::default();
        state.player.lives = 1;
        state.player.score = 1200;
        state.level = 4;
        state.level_end = 2500.0;
        lose_life(&mut state);

        assert!(acknowledge(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.level_end, 1000.0);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_complete_level() {
        let mut state = GameState::default();
        state.player.pos.x = 1001.0;

        complete_level(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.level_end, 1500.0);
        assert_eq!(state.enemies.len(), 4);
        assert_eq!(state.player.pos, state.player.spawn);
        assert_eq!(state.phase, GamePhase::LevelTransition { completed_level: 1 });
        assert_eq!(state.drain_events(), vec![GameEvent::LevelComplete { level: 1 }]);

        assert!(acknowledge(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!acknowledge(&mut state));
    }

    #[test]
    fn test_enemy_speed_after_level_up() {
        let mut state = GameState::default();
        complete_level(&mut state);
        acknowledge(&mut state);
        complete_level(&mut state);
        assert_eq!(state.level, 3);
        assert!(state.enemies.iter().all(|e| (e.vel_x - 1.6).abs() < 1e-6));
    }

    #[test]
    fn test_reset_clears_bullets() {
        let mut state = GameState::default();
        let bullet = state.player.fire(6.0);
        state.bullets.push(bullet);
        reset(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_invulnerability_granted_on_respawn() {
        let tuning = Tuning {
            invulnerability_ticks: 30,
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        lose_life(&mut state);
        assert_eq!(state.player.invulnerable_ticks, 30);
    }

    proptest! {
        #[test]
        fn lives_never_negative(start in 1u32..6, hits in 0usize..12) {
            let tuning = Tuning { start_lives: start, ..Default::default() };
            let mut state = GameState::new(tuning);
            for _ in 0..hits {
                let before = state.player.lives;
                let was_playing = state.phase.is_running();
                lose_life(&mut state);
                if was_playing {
                    prop_assert_eq!(state.player.lives, before.saturating_sub(1));
                }
            }
            prop_assert_eq!(
                state.phase == GamePhase::GameOver,
                hits >= start as usize
            );
        }

        #[test]
        fn level_up_invariants(levels in 1u32..10) {
            let mut state = GameState::default();
            for _ in 0..levels {
                let old_end = state.level_end;
                let old_level = state.level;
                complete_level(&mut state);
                acknowledge(&mut state);
                prop_assert_eq!(state.level_end, old_end + 500.0);
                prop_assert_eq!(state.level, old_level + 1);
                prop_assert_eq!(state.enemies.len() as u32, (2 + state.level).min(6));
            }
        }
    }
}
