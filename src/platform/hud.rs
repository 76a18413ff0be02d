//! HUD and notification data
//!
//! The DOM side only copies these values into elements.

use crate::sim::{GamePhase, GameState};

/// Values shown in the score/lives/level display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudStats {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
}

impl HudStats {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.player.score,
            lives: state.player.lives,
            level: state.level,
        }
    }
}

/// A message the player must acknowledge before play continues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    GameOver,
    LevelComplete { level: u32 },
}

impl Notification {
    /// Notification owed for the current phase, if any
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Playing => None,
            GamePhase::LevelTransition { completed_level } => Some(Notification::LevelComplete {
                level: completed_level,
            }),
            GamePhase::GameOver => Some(Notification::GameOver),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::GameOver => "Game Over!".to_string(),
            Notification::LevelComplete { level } => format!("Level {} Complete!", level),
        }
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms)
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest entry is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_from_state() {
        let mut state = GameState::default();
        state.player.score = 400;
        state.level = 2;
        assert_eq!(
            HudStats::from_state(&state),
            HudStats {
                score: 400,
                lives: 3,
                level: 2
            }
        );
    }

    #[test]
    fn test_notification_text() {
        assert_eq!(Notification::GameOver.message(), "Game Over!");
        assert_eq!(
            Notification::LevelComplete { level: 3 }.message(),
            "Level 3 Complete!"
        );
    }

    #[test]
    fn test_notification_for_phase() {
        assert_eq!(Notification::for_phase(GamePhase::Playing), None);
        assert_eq!(
            Notification::for_phase(GamePhase::LevelTransition { completed_level: 1 }),
            Some(Notification::LevelComplete { level: 1 })
        );
        assert_eq!(
            Notification::for_phase(GamePhase::GameOver),
            Some(Notification::GameOver)
        );
    }

    #[test]
    fn test_fps_counter_steady_60() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
