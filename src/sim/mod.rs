//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (by store index, fixed category order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod evaluate;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{BlackCatchRule, CatchOutcome, judge_catch};
pub use error::SimError;
pub use spawner::SpawnTable;
pub use state::{
    Basket, Block, BlockKind, Controls, GameEvent, GamePhase, GameState, MIRROR_COUNT, MIRRORS,
    Mirror, Projectile, Rules,
};
pub use store::{Entity, EntityStore, Lifecycle};
pub use tick::{TickInput, TickStatus, tick};
