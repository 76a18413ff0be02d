//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a page can
//! override them with a JSON blob without a rebuild. Values are in the
//! simulation's per-step units (one step = one 60 Hz frame).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vy every step
    pub gravity: f32,
    /// Horizontal speed while a move key is held
    pub player_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_strength: f32,
    /// Lives at the start of a run
    pub start_lives: u32,
    /// Horizontal bullet velocity
    pub bullet_speed: f32,
    /// Score awarded per enemy shot
    pub kill_score: u64,
    /// x-coordinate to reach on level 1
    pub level_end_start: f32,
    /// How much further the goal moves each level
    pub level_end_step: f32,
    /// Enemy count is `enemy_base_count + level`, capped at `max_enemies`
    pub enemy_base_count: u32,
    pub max_enemies: u32,
    /// Enemy speed is `enemy_base_speed + enemy_speed_per_level * level`
    pub enemy_base_speed: f32,
    pub enemy_speed_per_level: f32,
    /// Half-width of each enemy's patrol range around its spawn x
    pub enemy_patrol_range: f32,
    /// x of the first enemy
    pub enemy_first_x: f32,
    /// Distance before the goal kept free of enemy spawns
    pub enemy_goal_margin: f32,
    /// Steps after a hit during which enemy contact is ignored.
    /// Zero keeps the classic behaviour: every overlapping step costs a life.
    pub invulnerability_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            player_speed: 3.0,
            jump_strength: -10.0,
            start_lives: 3,
            bullet_speed: 6.0,
            kill_score: 100,
            level_end_start: 1000.0,
            level_end_step: 500.0,
            enemy_base_count: 2,
            max_enemies: 6,
            enemy_base_speed: 1.0,
            enemy_speed_per_level: 0.2,
            enemy_patrol_range: 50.0,
            enemy_first_x: 250.0,
            enemy_goal_margin: 350.0,
            invulnerability_ticks: 0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning blob (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning blob if one was supplied, falling back to defaults
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: "must be positive",
            });
        }
        if !self.jump_strength.is_finite() || self.jump_strength >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_strength",
                reason: "must be negative (upward)",
            });
        }
        if self.start_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "start_lives",
                reason: "must be at least 1",
            });
        }
        if self.max_enemies == 0 {
            return Err(ConfigError::Invalid {
                field: "max_enemies",
                reason: "must be at least 1",
            });
        }
        if !self.level_end_step.is_finite() || self.level_end_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "level_end_step",
                reason: "must be positive",
            });
        }
        if self.level_end_start - self.enemy_goal_margin <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "enemy_goal_margin",
                reason: "must be smaller than level_end_start",
            });
        }
        Ok(())
    }

    /// Number of enemies spawned for a level
    pub fn enemy_count(&self, level: u32) -> u32 {
        self.enemy_base_count
            .saturating_add(level)
            .min(self.max_enemies)
    }

    /// Patrol speed for a level
    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.enemy_base_speed + self.enemy_speed_per_level * level as f32
    }
}
