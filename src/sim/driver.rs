//! Frame driver
//!
//! Owns the game state and turns wall-clock frames into fixed simulation
//! steps. Adapters only ever see the state through `&` borrows.

use super::progression;
use super::state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Platform, Player};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use crate::tuning::Tuning;

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub platforms: &'a [Platform],
    pub camera_x: f32,
    pub level_end: f32,
    pub level: u32,
    pub phase: GamePhase,
}

/// The running game: state plus frame clock
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
    /// Shots requested but not yet fired, one per step
    pending_shots: u32,
}

impl Simulation {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            accumulator_ms: 0.0,
            last_time_ms: None,
            pending_shots: 0,
        }
    }

    /// Wrap an existing state (tests, scripted runs)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            accumulator_ms: 0.0,
            last_time_ms: None,
            pending_shots: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Advance by however many fixed steps fit in the time since the last frame.
    ///
    /// `now_ms` is a monotonic timestamp (e.g. `requestAnimationFrame` time).
    /// The first frame runs exactly one step. A clock that goes backwards
    /// counts as zero elapsed time. Requested shots fire one per step; any
    /// left over wait for the next frame. Returns the events produced this
    /// frame.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Vec<GameEvent> {
        let elapsed = match self.last_time_ms {
            Some(last) => now_ms - last,
            None => SIM_DT_MS,
        };
        self.last_time_ms = Some(now_ms);

        if !self.state.phase.is_running() {
            self.accumulator_ms = 0.0;
            self.pending_shots = 0;
            return self.state.drain_events();
        }

        // One step of slack over the substep cap so a capped frame always
        // gets its full MAX_SUBSTEPS despite rounding
        let max_elapsed = SIM_DT_MS * (MAX_SUBSTEPS + 1) as f64;
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, max_elapsed)
        } else {
            0.0
        };
        self.accumulator_ms += elapsed;

        let mut shots = self.pending_shots.saturating_add(input.fire);
        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let step_input = TickInput {
                fire: shots.min(1),
                ..*input
            };
            tick(&mut self.state, &step_input, SIM_DT_MS);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
            shots -= step_input.fire;

            if !self.state.phase.is_running() {
                self.accumulator_ms = 0.0;
                shots = 0;
                break;
            }
        }
        self.pending_shots = shots;

        self.state.drain_events()
    }

    /// Run exactly one fixed step regardless of the clock
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input, SIM_DT_MS);
        self.state.drain_events()
    }

    /// Dismiss the pending notification; a game over restarts the run
    pub fn acknowledge(&mut self) -> bool {
        let changed = progression::acknowledge(&mut self.state);
        if changed {
            // Don't replay the time spent looking at the notification
            self.last_time_ms = None;
            self.accumulator_ms = 0.0;
            self.pending_shots = 0;
        }
        changed
    }

    /// Start over from level 1
    pub fn reset(&mut self) {
        progression::reset(&mut self.state);
        self.last_time_ms = None;
        self.accumulator_ms = 0.0;
        self.pending_shots = 0;
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let state = &self.state;
        RenderSnapshot {
            player: &state.player,
            enemies: &state.enemies,
            bullets: &state.bullets,
            platforms: &state.platforms,
            camera_x: state.camera_x,
            level_end: state.level_end,
            level: state.level,
            phase: state.phase,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
