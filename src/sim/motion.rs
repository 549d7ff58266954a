//! Motion integrator
//!
//! Projectiles move every tick at a constant step along their travel angle.
//! Blocks fall only on ticks where the spawner's cadence interval elapsed.

use glam::Vec2;
use log::debug;

use super::state::{BlockKind, GameEvent, GameState};
use super::store::Entity;
use crate::consts::*;
use crate::direction;

/// Whether an absolute position is inside the projectile play area
#[inline]
pub fn in_play_area(pos: Vec2) -> bool {
    pos.cmpge(PLAY_MIN).all() && pos.cmple(PLAY_MAX).all()
}

/// Advance all active projectiles by one step
pub fn advance_projectiles(state: &mut GameState) {
    for (id, projectile) in state.projectiles.active_mut() {
        let step = direction(projectile.angle) * PROJECTILE_SPEED;
        let next = projectile.position() + step;
        if in_play_area(next) {
            projectile.traveled += step;
        } else {
            // Despawn in place; position stays at the last in-bounds point
            projectile.consume();
            debug!("projectile {id} left the play area");
            state.events.push(GameEvent::Escaped { projectile: id });
        }
    }
}

/// Drop all active blocks by one fall step, skipping blocks born this tick
pub fn drop_blocks(state: &mut GameState) {
    if !state.spawner.cadence_fired {
        return;
    }
    let fall = BLOCK_FALL_STEP * state.controls.speed as f32;
    let tick = state.time_ticks;
    for kind in BlockKind::ALL {
        for (_, block) in state.blocks.get_mut(kind).active_mut() {
            if block.born_tick != tick {
                block.y -= fall;
            }
        }
    }
}
