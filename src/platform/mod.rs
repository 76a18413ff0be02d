//! Platform adapters
//!
//! Pure halves of the browser glue:
//! - Input events -> per-frame simulation input
//! - Game state -> HUD values and notification text
//!
//! The DOM wiring itself lives in the wasm entry point.

pub mod hud;
pub mod input;

pub use hud::{FpsCounter, HudStats, Notification};
pub use input::{Action, Command, InputState};
