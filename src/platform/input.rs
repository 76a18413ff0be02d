//! Keyboard input adapter
//!
//! Browser key events arrive asynchronously; the simulation polls the
//! resulting held-key state once per frame through [`InputState::tick_input`].

use crate::sim::TickInput;

/// Logical gameplay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Fire,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Fire,
    ];

    /// Map a `KeyboardEvent.code` to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
            "KeyZ" => Some(Action::Fire),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Jump => 2,
            Action::Fire => 3,
        }
    }
}

/// Out-of-game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Dismiss the current notification
    Acknowledge,
    /// Abandon the run and start over
    Reset,
}

impl Command {
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Enter" | "NumpadEnter" => Some(Command::Acknowledge),
            "KeyR" => Some(Command::Reset),
            _ => None,
        }
    }
}

/// Held keys plus queued one-shot actions
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 4],
    fire_queued: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Every press of the fire key (auto-repeat
    /// included) queues one shot for the next frame.
    pub fn key_down(&mut self, code: &str) -> Option<Command> {
        if let Some(action) = Action::from_key_code(code) {
            self.held[action.index()] = true;
            if action == Action::Fire {
                self.fire_queued = self.fire_queued.saturating_add(1);
            }
            return None;
        }
        Command::from_key_code(code)
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = Action::from_key_code(code) {
            self.held[action.index()] = false;
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Drop everything (window lost focus, keyups will never arrive)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for this frame; consumes the queued shots
    pub fn tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.is_held(Action::MoveLeft),
            move_right: self.is_held(Action::MoveRight),
            jump: self.is_held(Action::Jump),
            fire: self.fire_queued,
        };
        self.fire_queued = 0;
        input
    }
}
