//! Simulation tick
//!
//! One call advances the game by one frame: spawner, motion, collision passes,
//! then evaluation, always in that order. The caller supplies the elapsed time;
//! the core never reads a clock or ends the process itself.

use serde::{Deserialize, Serialize};

use super::collision::{catch_pass, hit_pass, reflect_pass};
use super::error::SimError;
use super::evaluate::evaluate;
use super::motion::{advance_projectiles, drop_blocks};
use super::spawner::spawn_step;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire request (rate-limited by the core)
    pub fire: bool,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    Running,
    GameOver { score: i32 },
    Won { score: i32 },
}

impl TickStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickStatus::Running)
    }
}

impl GameState {
    pub fn status(&self) -> TickStatus {
        match self.phase {
            GamePhase::Playing => TickStatus::Running,
            GamePhase::GameOver => TickStatus::GameOver { score: self.score },
            GamePhase::Won => TickStatus::Won { score: self.score },
        }
    }
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    elapsed_ms: u64,
) -> Result<TickStatus, SimError> {
    // Terminal states latch
    if state.is_over() {
        return Ok(state.status());
    }

    state.events.clear();
    state.time_ticks += 1;
    state.clock_ms = state.clock_ms.saturating_add(elapsed_ms);

    if input.fire {
        state.fire()?;
    }

    spawn_step(state)?;

    advance_projectiles(state);
    drop_blocks(state);

    reflect_pass(state);
    hit_pass(state);
    catch_pass(state);

    evaluate(state);

    Ok(state.status())
}
