//! Collision detection and scoring
//!
//! All tests are axis-aligned box overlaps. Three passes run each tick, in
//! order: mirror reflection, projectile-vs-block, and the catch line.

use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::state::{
    Basket, BlockKind, Controls, GameEvent, GamePhase, GameState, MIRRORS, Mirror,
};
use super::store::Entity;
use crate::consts::*;
use crate::reflect_angle;

/// When a black block ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackCatchRule {
    /// Fatal as soon as it crosses the catch line, wherever it lands
    #[default]
    AnyCrossing,
    /// Fatal only if it lands in a basket; otherwise it is discarded
    InBasket,
}

/// What happens to a block that crossed the catch line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    Caught { basket: Basket, delta: i32 },
    Missed,
    Fatal,
}

/// Box overlap: `|a - b| <= half` on both axes
#[inline]
pub fn aabb_overlap(a: Vec2, b: Vec2, half: Vec2) -> bool {
    (a - b).abs().cmple(half).all()
}

/// Check a projectile position against a mirror's box
#[inline]
pub fn projectile_mirror_overlap(pos: Vec2, mirror: &Mirror) -> bool {
    aabb_overlap(
        pos,
        mirror.pos,
        mirror.half_extents + Vec2::splat(PROJECTILE_HALF_SIZE),
    )
}

/// Check a projectile position against a block's lower-left corner
#[inline]
pub fn projectile_block_overlap(pos: Vec2, block_pos: Vec2) -> bool {
    aabb_overlap(pos, block_pos, HIT_TOLERANCE)
}

/// Whether a block at `x` overlaps the span `[lo, hi]`
#[inline]
pub fn block_in_span(x: f32, (lo, hi): (f32, f32)) -> bool {
    x <= hi && x + BLOCK_WIDTH >= lo
}

/// Decide the fate of a block that reached the catch line
pub fn judge_catch(
    kind: BlockKind,
    x: f32,
    controls: &Controls,
    rule: BlackCatchRule,
) -> CatchOutcome {
    let in_left = block_in_span(x, controls.basket_span(Basket::Left));
    let in_right = block_in_span(x, controls.basket_span(Basket::Right));

    match kind {
        BlockKind::Red if in_left => CatchOutcome::Caught {
            basket: Basket::Left,
            delta: SCORE_CATCH_RED,
        },
        BlockKind::Red if in_right => CatchOutcome::Caught {
            basket: Basket::Right,
            delta: SCORE_CATCH_RED,
        },
        BlockKind::Green if in_left => CatchOutcome::Caught {
            basket: Basket::Left,
            delta: SCORE_CATCH_GREEN,
        },
        BlockKind::Black => match rule {
            BlackCatchRule::AnyCrossing => CatchOutcome::Fatal,
            BlackCatchRule::InBasket if in_left || in_right => CatchOutcome::Fatal,
            BlackCatchRule::InBasket => CatchOutcome::Missed,
        },
        _ => CatchOutcome::Missed,
    }
}

/// Pass 1: reflect projectiles off mirrors, at most one mirror per projectile per tick
pub fn reflect_pass(state: &mut GameState) {
    for (id, projectile) in state.projectiles.active_mut() {
        let pos = projectile.position();
        for (index, mirror) in MIRRORS.iter().enumerate() {
            if projectile.mirror_hit[index] || !projectile_mirror_overlap(pos, mirror) {
                continue;
            }
            projectile.mirror_hit[index] = true;
            projectile.angle = reflect_angle(mirror.angle, projectile.angle);
            debug!(
                "projectile {id} reflected off mirror {index}, now {} deg",
                projectile.angle
            );
            state.events.push(GameEvent::Reflected {
                projectile: id,
                mirror: index,
                angle: projectile.angle,
            });
            break;
        }
    }
}

/// Pass 2: projectiles against blocks, first match wins
pub fn hit_pass(state: &mut GameState) {
    for (id, projectile) in state.projectiles.active_mut() {
        let pos = projectile.position();

        'kinds: for kind in BlockKind::HIT_ORDER {
            for (block_id, block) in state.blocks.get_mut(kind).active_mut() {
                if !projectile_block_overlap(pos, block.position()) {
                    continue;
                }
                block.consume();
                projectile.consume();
                let delta = kind.shot_delta();
                state.score += delta;
                debug!(
                    "projectile {id} hit {} block {block_id} ({delta:+}), score {}",
                    kind.as_str(),
                    state.score
                );
                state.events.push(GameEvent::Shot {
                    projectile: id,
                    kind,
                    block: block_id,
                    delta,
                });
                break 'kinds;
            }
        }
    }
}

/// Pass 3: blocks at the catch line. Returns true if the game ended.
pub fn catch_pass(state: &mut GameState) -> bool {
    let rule = state.rules.black_catch;

    for kind in BlockKind::ALL {
        for (block_id, block) in state.blocks.get_mut(kind).active_mut() {
            if block.y > CATCH_LINE_Y {
                continue;
            }
            block.consume();

            match judge_catch(kind, block.x, &state.controls, rule) {
                CatchOutcome::Caught { basket, delta } => {
                    state.score += delta;
                    debug!(
                        "{} block {block_id} caught in {basket:?} basket, score {}",
                        kind.as_str(),
                        state.score
                    );
                    state.events.push(GameEvent::Caught {
                        kind,
                        block: block_id,
                        basket,
                        delta,
                    });
                }
                CatchOutcome::Missed => {
                    state.events.push(GameEvent::Missed {
                        kind,
                        block: block_id,
                    });
                }
                CatchOutcome::Fatal => {
                    info!("black block {block_id} reached the floor, game over");
                    state.phase = GamePhase::GameOver;
                    state.events.push(GameEvent::GameOver { score: state.score });
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(left: f32, right: f32) -> Controls {
        Controls {
            left_basket: left,
            right_basket: right,
            ..Controls::default()
        }
    }

    #[test]
    fn test_aabb_overlap_inclusive() {
        let half = Vec2::new(0.1, 0.2);
        assert!(aabb_overlap(Vec2::ZERO, Vec2::new(0.1, 0.2), half));
        assert!(!aabb_overlap(Vec2::ZERO, Vec2::new(0.11, 0.0), half));
        assert!(!aabb_overlap(Vec2::ZERO, Vec2::new(0.0, -0.21), half));
    }

    #[test]
    fn test_mirror_box() {
        let m1 = &MIRRORS[0];
        assert!(projectile_mirror_overlap(Vec2::new(2.95, 0.0), m1));
        assert!(projectile_mirror_overlap(Vec2::new(3.0, 0.44), m1));
        assert!(!projectile_mirror_overlap(Vec2::new(2.9, 0.0), m1));
        assert!(!projectile_mirror_overlap(Vec2::new(3.0, 0.5), m1));
    }

    #[test]
    fn test_block_in_span_edges() {
        // Block [x, x + 0.2] touching either end counts
        assert!(block_in_span(-0.5, (-2.5, -0.5)));
        assert!(block_in_span(-2.65, (-2.5, -0.5)));
        assert!(!block_in_span(-0.4, (-2.5, -0.5)));
        assert!(!block_in_span(-2.8, (-2.5, -0.5)));
    }

    #[test]
    fn test_judge_red_either_basket() {
        let c = controls(0.0, 0.0);
        assert_eq!(
            judge_catch(BlockKind::Red, -1.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Caught {
                basket: Basket::Left,
                delta: 1
            }
        );
        assert_eq!(
            judge_catch(BlockKind::Red, 1.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Caught {
                basket: Basket::Right,
                delta: 1
            }
        );
        assert_eq!(
            judge_catch(BlockKind::Red, 0.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Missed
        );
    }

    #[test]
    fn test_judge_green_left_only() {
        let c = controls(0.0, 0.0);
        assert_eq!(
            judge_catch(BlockKind::Green, -2.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Caught {
                basket: Basket::Left,
                delta: 1
            }
        );
        assert_eq!(
            judge_catch(BlockKind::Green, 2.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Missed
        );
    }

    #[test]
    fn test_judge_black_rules() {
        let c = controls(0.0, 0.0);
        // x = 0 lies between the baskets
        assert_eq!(
            judge_catch(BlockKind::Black, 0.0, &c, BlackCatchRule::AnyCrossing),
            CatchOutcome::Fatal
        );
        assert_eq!(
            judge_catch(BlockKind::Black, 0.0, &c, BlackCatchRule::InBasket),
            CatchOutcome::Missed
        );
        assert_eq!(
            judge_catch(BlockKind::Black, 1.0, &c, BlackCatchRule::InBasket),
            CatchOutcome::Fatal
        );
    }

    #[test]
    fn test_reflect_once_per_mirror() {
        let mut state = GameState::new(5);
        state.fire().unwrap();
        state.projectiles.get_mut(0).unwrap().traveled = Vec2::new(6.7, 0.0);

        reflect_pass(&mut state);
        let p = state.projectiles.get(0).unwrap();
        assert_eq!(p.angle, 180.0);
        assert_eq!(p.mirror_hit, [true, false, false]);

        // Still inside the box next tick: no second reflection
        reflect_pass(&mut state);
        assert_eq!(state.projectiles.get(0).unwrap().angle, 180.0);
    }

    #[test]
    fn test_hit_pass_first_match_wins() {
        let mut state = GameState::new(5);
        state.fire().unwrap();
        let pos = state.projectiles.get(0).unwrap().position();
        state.insert_block(BlockKind::Red, pos.x, pos.y).unwrap();
        state.insert_block(BlockKind::Black, pos.x, pos.y).unwrap();

        hit_pass(&mut state);

        // Black is scanned before red
        assert_eq!(state.score, 2);
        assert!(!state.blocks.black.get(0).unwrap().is_active());
        assert!(state.blocks.red.get(0).unwrap().is_active());
        assert!(!state.projectiles.get(0).unwrap().is_active());

        // A consumed projectile never scores again
        hit_pass(&mut state);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_hit_deltas() {
        for (kind, expected) in [
            (BlockKind::Black, 2),
            (BlockKind::Red, -2),
            (BlockKind::Green, -2),
        ] {
            let mut state = GameState::new(5);
            state.fire().unwrap();
            let pos = state.projectiles.get(0).unwrap().position();
            state.insert_block(kind, pos.x + 0.05, pos.y - 0.25).unwrap();
            hit_pass(&mut state);
            assert_eq!(state.score, expected, "{kind:?}");
        }
    }

    #[test]
    fn test_consumed_block_not_hit() {
        let mut state = GameState::new(5);
        state.fire().unwrap();
        let pos = state.projectiles.get(0).unwrap().position();
        state.insert_block(BlockKind::Black, pos.x, pos.y).unwrap();
        state.blocks.black.get_mut(0).unwrap().consume();

        hit_pass(&mut state);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.get(0).unwrap().is_active());
    }

    #[test]
    fn test_catch_pass_scores_and_consumes() {
        let mut state = GameState::new(5);
        state.insert_block(BlockKind::Red, 1.0, -3.0).unwrap();
        state.insert_block(BlockKind::Green, -1.0, -3.1).unwrap();
        state.insert_block(BlockKind::Green, 1.0, -3.1).unwrap();
        state.insert_block(BlockKind::Red, 0.0, -2.9).unwrap();

        assert!(!catch_pass(&mut state));
        assert_eq!(state.score, 2);
        assert!(!state.blocks.red.get(0).unwrap().is_active());
        assert!(state.blocks.red.get(1).unwrap().is_active());
        assert!(!state.blocks.green.get(1).unwrap().is_active());
        assert!(state.events.contains(&GameEvent::Missed {
            kind: BlockKind::Green,
            block: 1
        }));

        // Already consumed: no double scoring
        assert!(!catch_pass(&mut state));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_catch_pass_black_is_fatal() {
        let mut state = GameState::new(5);
        state.score = 7;
        state.insert_block(BlockKind::Black, 0.0, -3.2).unwrap();

        assert!(catch_pass(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 7 }));
    }
}
