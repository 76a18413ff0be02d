//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Fixed step only (time only drives sprite animation)
//! - Stable iteration order (array order, removal last-to-first)
//! - No I/O; notifications surface as phases and events

pub mod aabb;
pub mod collision;
pub mod driver;
pub mod progression;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use driver::{RenderSnapshot, Simulation};
pub use progression::{acknowledge, complete_level, lose_life, reset};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Platform, Player, spawn_enemies,
};
pub use tick::{TickInput, tick};
