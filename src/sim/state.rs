//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`].

use glam::Vec2;

use super::aabb::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level finished, waiting for the player to acknowledge
    LevelTransition { completed_level: u32 },
    /// Out of lives, waiting for acknowledgement before the reset
    GameOver,
}

impl GamePhase {
    /// Whether the world advances in this phase
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Something that happened during a step, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired,
    EnemyKilled { score: u64 },
    LifeLost { lives_left: u32 },
    GameOver { score: u64, level: u32 },
    LevelComplete { level: u32 },
    Reset,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal speed while moving
    pub speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_strength: f32,
    /// Resting on top of a platform
    pub grounded: bool,
    pub lives: u32,
    pub score: u64,
    /// Where the player reappears after death or a level change
    pub spawn: Vec2,
    /// Current sprite frame
    pub frame_index: u32,
    pub frame_count: u32,
    /// Time per sprite frame (ms)
    pub frame_duration_ms: f64,
    /// Time accumulated on the current frame (ms)
    pub frame_timer_ms: f64,
    /// Steps left during which enemy contact is ignored
    pub invulnerable_ticks: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let spawn = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: tuning.player_speed,
            jump_strength: tuning.jump_strength,
            grounded: false,
            lives: tuning.start_lives,
            score: 0,
            spawn,
            frame_index: 0,
            frame_count: PLAYER_FRAME_COUNT,
            frame_duration_ms: PLAYER_FRAME_DURATION_MS,
            frame_timer_ms: 0.0,
            invulnerable_ticks: 0,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Put the player back at the spawn point, at rest
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
    }

    /// Advance the sprite animation by `elapsed_ms`
    pub fn advance_animation(&mut self, elapsed_ms: f64) {
        self.frame_timer_ms += elapsed_ms;
        if self.frame_timer_ms >= self.frame_duration_ms {
            self.frame_index = (self.frame_index + 1) % self.frame_count.max(1);
            self.frame_timer_ms = 0.0;
        }
    }

    /// Spawn a bullet from the player's right edge, vertically centred
    pub fn fire(&self, speed: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_x: speed,
        }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_x: f32,
    /// Patrol bounds
    pub min_x: f32,
    pub max_x: f32,
}

impl Enemy {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move one step and turn around at the patrol bounds
    pub fn patrol(&mut self) {
        self.pos.x += self.vel_x;
        if self.pos.x < self.min_x || self.pos.x + self.size.x > self.max_x {
            self.vel_x = -self.vel_x;
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_x: f32,
}

impl Bullet {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A static landing surface
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Layout shared by every level
    pub fn default_layout() -> Vec<Platform> {
        vec![
            Platform::new(0.0, 550.0, 1200.0, 50.0), // ground
            Platform::new(200.0, 450.0, 100.0, 10.0),
            Platform::new(400.0, 400.0, 150.0, 10.0),
            Platform::new(700.0, 350.0, 100.0, 10.0),
        ]
    }
}

/// Build the enemy set for a level, spread evenly up to the goal
pub fn spawn_enemies(tuning: &Tuning, level: u32, level_end: f32) -> Vec<Enemy> {
    let count = tuning.enemy_count(level);
    let spacing = (level_end - tuning.enemy_goal_margin) / count as f32;
    let speed = tuning.enemy_speed(level);

    (0..count)
        .map(|i| {
            let x = tuning.enemy_first_x + i as f32 * spacing;
            Enemy {
                pos: Vec2::new(x, ENEMY_Y),
                size: Vec2::splat(ENEMY_SIZE),
                vel_x: speed,
                min_x: x - tuning.enemy_patrol_range,
                max_x: x + tuning.enemy_patrol_range,
            }
        })
        .collect()
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance knobs this run was started with
    pub tuning: Tuning,
    pub player: Player,
    /// Enemies in array order (iteration order matters for hit resolution)
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub platforms: Vec<Platform>,
    /// Current level (1-based)
    pub level: u32,
    /// x-coordinate the player must reach to finish the level
    pub level_end: f32,
    /// Horizontal scroll offset
    pub camera_x: f32,
    pub phase: GamePhase,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run on level 1
    pub fn new(tuning: Tuning) -> Self {
        let level = 1;
        let level_end = tuning.level_end_start;
        let enemies = spawn_enemies(&tuning, level, level_end);
        let player = Player::new(&tuning);
        let camera_x = player.pos.x - CAMERA_ANCHOR_X;

        Self {
            tuning,
            player,
            enemies,
            bullets: Vec::new(),
            platforms: Platform::default_layout(),
            level,
            level_end,
            camera_x,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Keep the player at a fixed screen column
    pub fn update_camera(&mut self) {
        self.camera_x = self.player.pos.x - CAMERA_ANCHOR_X;
    }

    /// Right edge of the visible play area in world coordinates
    pub fn visible_right(&self) -> f32 {
        CANVAS_WIDTH + self.camera_x
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
