//! Ledge Runner - A side-scrolling platform shooter
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, level/life progression)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input and HUD adapters between the browser and the sim
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Visible play area (canvas) size in world units
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Fixed simulation step in milliseconds (one step per 60 Hz frame)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_LIVES: u32 = 3;
    /// Sprite sheet frames and time per frame (ms)
    pub const PLAYER_FRAME_COUNT: u32 = 4;
    pub const PLAYER_FRAME_DURATION_MS: f64 = 200.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 32.0;
    /// Enemies stand on the ground platform
    pub const ENEMY_Y: f32 = 510.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 4.0;

    /// Player is kept this far from the left edge of the screen
    pub const CAMERA_ANCHOR_X: f32 = 100.0;
}

/// Convert a world-space x coordinate to a screen column given the camera offset
#[inline]
pub fn world_to_screen_x(x: f32, camera_x: f32) -> f32 {
    x - camera_x
}
