//! Time-gated block spawner
//!
//! Once per cadence interval (1000 ms divided by the speed multiplier) the
//! spawner rolls the spawn table: most outcomes introduce one block of a
//! category at a random integer column, the rest introduce nothing. The same
//! interval also drives the block fall step in `motion`.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::state::{Block, BlockKind, GameEvent, GameState};
use crate::consts::{BLOCK_SPAWN_X_MAX, BLOCK_SPAWN_X_MIN};

/// Relative weights for one spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTable {
    pub red: u32,
    pub black: u32,
    pub green: u32,
    /// Weight of rolling nothing
    pub none: u32,
}

impl Default for SpawnTable {
    /// Five equal outcomes, three of which spawn
    fn default() -> Self {
        Self {
            red: 1,
            black: 1,
            green: 1,
            none: 2,
        }
    }
}

impl SpawnTable {
    pub fn total(&self) -> u32 {
        self.red
            .saturating_add(self.black)
            .saturating_add(self.green)
            .saturating_add(self.none)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let total = self
            .red
            .checked_add(self.black)
            .and_then(|t| t.checked_add(self.green))
            .and_then(|t| t.checked_add(self.none));
        if total.is_none() {
            return Err(SimError::InvalidConfig(
                "spawn table weights overflow".to_string(),
            ));
        }
        if self.red == 0 && self.black == 0 && self.green == 0 {
            return Err(SimError::InvalidConfig(
                "spawn table never spawns a block".to_string(),
            ));
        }
        Ok(())
    }

    /// Map a roll in `0..total()` to an outcome
    pub fn pick(&self, roll: u32) -> Option<BlockKind> {
        let mut edge = self.red;
        if roll < edge {
            return Some(BlockKind::Red);
        }
        edge = edge.saturating_add(self.black);
        if roll < edge {
            return Some(BlockKind::Black);
        }
        edge = edge.saturating_add(self.green);
        if roll < edge {
            return Some(BlockKind::Green);
        }
        None
    }
}

/// Cadence bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    /// Clock time the current interval started
    pub last_cadence_ms: u64,
    /// Set when the interval elapsed on the current tick
    pub cadence_fired: bool,
}

impl Spawner {
    /// Check the cadence gate against the clock, restarting the interval if it elapsed
    pub fn poll(&mut self, clock_ms: u64, cadence_ms: f64) -> bool {
        let elapsed = clock_ms.saturating_sub(self.last_cadence_ms) as f64;
        self.cadence_fired = elapsed >= cadence_ms;
        if self.cadence_fired {
            self.last_cadence_ms = clock_ms;
        }
        self.cadence_fired
    }
}

/// Run the spawner for this tick
pub fn spawn_step(state: &mut GameState) -> Result<(), SimError> {
    let cadence = state.controls.cadence_ms();
    if !state.spawner.poll(state.clock_ms, cadence) {
        return Ok(());
    }

    let table = state.rules.spawn_table;
    let roll = state.rng.random_range(0..table.total());
    let column = state.rng.random_range(BLOCK_SPAWN_X_MIN..=BLOCK_SPAWN_X_MAX);

    let Some(kind) = table.pick(roll) else {
        return Ok(());
    };

    let x = column as f32;
    let block = state
        .blocks
        .get_mut(kind)
        .push(Block::new(x, state.time_ticks))?;
    debug!("spawned {} block {block} at x={x}", kind.as_str());
    state.events.push(GameEvent::Spawned { kind, block, x });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Rules;
    use proptest::prelude::*;

    #[test]
    fn test_default_table_outcomes() {
        let table = SpawnTable::default();
        assert_eq!(table.total(), 5);
        let outcomes: Vec<_> = (0..5).map(|r| table.pick(r)).collect();
        assert_eq!(
            outcomes,
            vec![
                Some(BlockKind::Red),
                Some(BlockKind::Black),
                Some(BlockKind::Green),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_table_rejects_no_spawns() {
        let table = SpawnTable {
            red: 0,
            black: 0,
            green: 0,
            none: 3,
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_table_rejects_overflowing_weights() {
        let table = SpawnTable {
            red: u32::MAX,
            black: 0,
            green: 0,
            none: 2,
        };
        assert!(matches!(table.validate(), Err(SimError::InvalidConfig(_))));
        // Unvalidated tables still never wrap
        assert_eq!(table.total(), u32::MAX);
        assert_eq!(table.pick(u32::MAX - 1), Some(BlockKind::Red));
    }

    #[test]
    fn test_cadence_gate() {
        let mut spawner = Spawner::default();
        assert!(!spawner.poll(999, 1000.0));
        assert!(spawner.poll(1000, 1000.0));
        assert!(!spawner.poll(1400, 1000.0));
        // Speed 4 shortens the interval
        assert!(spawner.poll(1250, 250.0));
    }

    #[test]
    fn test_spawn_step_once_per_interval() {
        let rules = Rules {
            spawn_table: SpawnTable {
                red: 0,
                black: 0,
                green: 1,
                none: 0,
            },
            ..Rules::default()
        };
        let mut state = GameState::with_rules(7, rules).unwrap();

        state.clock_ms = 500;
        spawn_step(&mut state).unwrap();
        assert_eq!(state.blocks.green.len(), 0);

        state.clock_ms = 1000;
        spawn_step(&mut state).unwrap();
        assert_eq!(state.blocks.green.len(), 1);

        state.clock_ms = 1500;
        spawn_step(&mut state).unwrap();
        assert_eq!(state.blocks.green.len(), 1);

        let block = state.blocks.green.get(0).unwrap();
        assert!(block.x >= BLOCK_SPAWN_X_MIN as f32 && block.x <= BLOCK_SPAWN_X_MAX as f32);
        assert_eq!(block.x.fract(), 0.0);
        assert_eq!(block.y, crate::consts::BLOCK_SPAWN_Y);
    }

    #[test]
    fn test_spawn_capacity_exceeded() {
        let rules = Rules {
            capacity: 1,
            spawn_table: SpawnTable {
                red: 1,
                black: 0,
                green: 0,
                none: 0,
            },
            ..Rules::default()
        };
        let mut state = GameState::with_rules(7, rules).unwrap();
        state.clock_ms = 1000;
        spawn_step(&mut state).unwrap();
        state.clock_ms = 2000;
        assert!(matches!(
            spawn_step(&mut state),
            Err(SimError::CapacityExceeded { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_pick_covers_roll_range(
            red in 0u32..5,
            black in 0u32..5,
            green in 1u32..5,
            none in 0u32..5,
            roll in 0u32..20,
        ) {
            let table = SpawnTable { red, black, green, none };
            prop_assume!(roll < table.total());
            let spawns = red + black + green;
            prop_assert_eq!(table.pick(roll).is_some(), roll < spawns);
        }
    }
}
