//! Demo autopilot
//!
//! Plays the game headless: aims the cannon at the lowest black block and
//! keeps the baskets under the lowest catchable blocks. The green basket is
//! the left one, red blocks go right.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{BlockKind, Controls, Entity, GameState, TickInput};

/// Lowest active block of a category, as its center
fn lowest(state: &GameState, kind: BlockKind) -> Option<Vec2> {
    state
        .blocks
        .get(kind)
        .active()
        .map(|(_, b)| b.position() + Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT) / 2.0)
        .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}

/// Cannon angle in degrees that points the muzzle at `target`
pub fn aim_angle(controls: &Controls, target: Vec2) -> f32 {
    let delta = target - Vec2::new(CANNON_X, controls.cannon_y);
    delta
        .y
        .atan2(delta.x)
        .to_degrees()
        .clamp(-CANNON_MAX_ANGLE, CANNON_MAX_ANGLE)
}

/// Basket offsets that center each basket under `center_x`
fn left_offset_for(center_x: f32) -> f32 {
    let span_center = (LEFT_BASKET_SPAN.0 + LEFT_BASKET_SPAN.1) / 2.0;
    (center_x - span_center).clamp(LEFT_BASKET_RANGE.0, LEFT_BASKET_RANGE.1)
}

fn right_offset_for(center_x: f32) -> f32 {
    let span_center = (RIGHT_BASKET_SPAN.0 + RIGHT_BASKET_SPAN.1) / 2.0;
    (center_x - span_center).clamp(RIGHT_BASKET_RANGE.0, RIGHT_BASKET_RANGE.1)
}

/// Adjust controls for this frame and decide whether to fire
pub fn drive(state: &mut GameState) -> TickInput {
    let black = lowest(state, BlockKind::Black);
    let red = lowest(state, BlockKind::Red);
    let green = lowest(state, BlockKind::Green);

    if let Some(target) = black {
        state.controls.cannon_angle = aim_angle(&state.controls, target);
    }

    if let Some(target) = green.or(red) {
        state.controls.left_basket = left_offset_for(target.x);
    }
    if let Some(target) = red {
        state.controls.right_basket = right_offset_for(target.x);
    }

    // Only black blocks are worth shooting
    TickInput {
        fire: black.is_some() && !state.projectiles.iter().any(|p| p.is_active()),
    }
}
