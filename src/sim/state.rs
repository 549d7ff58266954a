//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; there is no global
//! state. Control scalars are written by the input layer and only read here.

use glam::Vec2;
use log::debug;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::BlackCatchRule;
use super::error::SimError;
use super::spawner::{SpawnTable, Spawner};
use super::store::{Entity, EntityStore, Lifecycle};
use crate::consts::*;
use crate::hud::ScoreDisplay;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// A black block got through
    GameOver,
    /// Score reached the win threshold
    Won,
}

/// Falling block categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Red,
    Black,
    Green,
}

impl BlockKind {
    /// Motion and catch order
    pub const ALL: [BlockKind; 3] = [BlockKind::Red, BlockKind::Black, BlockKind::Green];
    /// Projectile hit scan order
    pub const HIT_ORDER: [BlockKind; 3] = [BlockKind::Black, BlockKind::Red, BlockKind::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Red => "red",
            BlockKind::Black => "black",
            BlockKind::Green => "green",
        }
    }

    /// Score change when a projectile hits this kind
    pub fn shot_delta(&self) -> i32 {
        match self {
            BlockKind::Black => SCORE_SHOT_BLACK,
            BlockKind::Red => SCORE_SHOT_RED,
            BlockKind::Green => SCORE_SHOT_GREEN,
        }
    }
}

/// Catcher baskets along the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basket {
    Left,
    Right,
}

/// A fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Cannon height when fired
    pub origin_height: f32,
    /// Travel angle in degrees; changes once per mirror bounce
    pub angle: f32,
    /// Displacement since firing
    pub traveled: Vec2,
    pub lifecycle: Lifecycle,
    /// One-shot reflection flags, indexed like `MIRRORS`
    pub mirror_hit: [bool; MIRROR_COUNT],
}

impl Projectile {
    pub fn new(origin_height: f32, angle: f32) -> Self {
        Self {
            origin_height,
            angle,
            traveled: Vec2::ZERO,
            lifecycle: Lifecycle::Active,
            mirror_hit: [false; MIRROR_COUNT],
        }
    }

    /// Absolute world position
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(CANNON_X, self.origin_height) + self.traveled
    }
}

impl Entity for Projectile {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

/// A falling block. `x`/`y` is the lower-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    /// Tick the block was spawned on
    pub born_tick: u64,
    pub lifecycle: Lifecycle,
}

impl Block {
    pub fn new(x: f32, born_tick: u64) -> Self {
        Self {
            x,
            y: BLOCK_SPAWN_Y,
            born_tick,
            lifecycle: Lifecycle::Active,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Entity for Block {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

/// A static mirror segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub pos: Vec2,
    /// Orientation in degrees
    pub angle: f32,
    /// Collision half extents, grown by the projectile half size when tested
    pub half_extents: Vec2,
}

pub const MIRROR_COUNT: usize = 3;

pub const MIRRORS: [Mirror; MIRROR_COUNT] = [
    Mirror {
        pos: Vec2::new(3.0, 0.0),
        angle: 90.0,
        half_extents: Vec2::new(0.025, 0.4),
    },
    Mirror {
        pos: Vec2::new(2.0, 3.0),
        angle: 120.0,
        half_extents: Vec2::new(0.0, 0.3),
    },
    Mirror {
        pos: Vec2::new(1.0, -2.0),
        angle: 60.0,
        half_extents: Vec2::new(0.0, 0.3),
    },
];

/// Player-controlled scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Cannon vertical offset
    pub cannon_y: f32,
    /// Cannon angle in degrees, [-90, 90]
    pub cannon_angle: f32,
    /// Fall/spawn speed multiplier, >= 1
    pub speed: u32,
    /// Left basket offset
    pub left_basket: f32,
    /// Right basket offset
    pub right_basket: f32,
    /// Camera zoom (>= 0.2)
    pub zoom: f32,
    /// Camera pan
    pub pan: Vec2,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            cannon_y: 0.0,
            cannon_angle: 0.0,
            speed: 1,
            left_basket: 0.0,
            right_basket: 0.0,
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Controls {
    /// Horizontal span (lo, hi) of a basket
    pub fn basket_span(&self, basket: Basket) -> (f32, f32) {
        match basket {
            Basket::Left => (
                LEFT_BASKET_SPAN.0 + self.left_basket,
                LEFT_BASKET_SPAN.1 + self.left_basket,
            ),
            Basket::Right => (
                RIGHT_BASKET_SPAN.0 + self.right_basket,
                RIGHT_BASKET_SPAN.1 + self.right_basket,
            ),
        }
    }

    /// Cadence interval in ms for the current speed
    pub fn cadence_ms(&self) -> f64 {
        BASE_CADENCE_MS / self.speed.max(1) as f64
    }
}

/// Gameplay events recorded during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile: usize, height: f32, angle: f32 },
    Spawned { kind: BlockKind, block: usize, x: f32 },
    /// Projectile left the play area
    Escaped { projectile: usize },
    Reflected { projectile: usize, mirror: usize, angle: f32 },
    Shot { projectile: usize, kind: BlockKind, block: usize, delta: i32 },
    Caught { kind: BlockKind, block: usize, basket: Basket, delta: i32 },
    /// Crossed the catch line outside both baskets
    Missed { kind: BlockKind, block: usize },
    GameOver { score: i32 },
    Won { score: i32 },
}

/// Gameplay rules that do not change during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    /// Slots per entity store
    pub capacity: usize,
    pub win_score: i32,
    pub spawn_table: SpawnTable,
    pub black_catch: BlackCatchRule,
    pub fire_cooldown_ms: u64,
    pub initial_speed: u32,
    pub max_speed: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            win_score: DEFAULT_WIN_SCORE,
            spawn_table: SpawnTable::default(),
            black_catch: BlackCatchRule::default(),
            fire_cooldown_ms: DEFAULT_FIRE_COOLDOWN_MS,
            initial_speed: 1,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(SimError::InvalidConfig(format!(
                "capacity must be in 1..={MAX_CAPACITY}, got {}",
                self.capacity
            )));
        }
        if self.win_score <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "win score must be positive, got {}",
                self.win_score
            )));
        }
        if self.max_speed == 0 || !(1..=self.max_speed).contains(&self.initial_speed) {
            return Err(SimError::InvalidConfig(format!(
                "initial speed {} outside 1..={}",
                self.initial_speed, self.max_speed
            )));
        }
        self.spawn_table.validate()
    }
}

/// One store per block category
#[derive(Debug, Clone)]
pub struct BlockStores {
    pub red: EntityStore<Block>,
    pub black: EntityStore<Block>,
    pub green: EntityStore<Block>,
}

impl BlockStores {
    pub fn new(capacity: usize) -> Self {
        Self {
            red: EntityStore::new("red block", capacity),
            black: EntityStore::new("black block", capacity),
            green: EntityStore::new("green block", capacity),
        }
    }

    pub fn get(&self, kind: BlockKind) -> &EntityStore<Block> {
        match kind {
            BlockKind::Red => &self.red,
            BlockKind::Black => &self.black,
            BlockKind::Green => &self.green,
        }
    }

    pub fn get_mut(&mut self, kind: BlockKind) -> &mut EntityStore<Block> {
        match kind {
            BlockKind::Red => &mut self.red,
            BlockKind::Black => &mut self.black,
            BlockKind::Green => &mut self.green,
        }
    }

    pub fn active_count(&self) -> usize {
        BlockKind::ALL
            .iter()
            .map(|&kind| self.get(kind).active_count())
            .sum()
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: Rules,
    pub score: i32,
    /// Simulated clock (sum of elapsed time handed to `tick`)
    pub clock_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub controls: Controls,
    pub projectiles: EntityStore<Projectile>,
    pub blocks: BlockStores,
    pub spawner: Spawner,
    /// Clock time of the last accepted shot
    pub last_fire_ms: Option<u64>,
    /// Score display, recomputed once per tick
    pub display: ScoreDisplay,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default rules
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Rules::default())
    }

    /// Create a game state with custom rules
    pub fn with_rules(seed: u64, rules: Rules) -> Result<Self, SimError> {
        rules.validate()?;
        Ok(Self::build(seed, rules))
    }

    fn build(seed: u64, rules: Rules) -> Self {
        let controls = Controls {
            speed: rules.initial_speed,
            ..Controls::default()
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            clock_ms: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            controls,
            projectiles: EntityStore::new("projectile", rules.capacity),
            blocks: BlockStores::new(rules.capacity),
            spawner: Spawner::default(),
            last_fire_ms: None,
            display: ScoreDisplay::from_score(0),
            events: Vec::new(),
            rules,
        }
    }

    /// Fire from the cannon if the cooldown allows it.
    ///
    /// Returns the new projectile's index, or `None` when rate-limited.
    pub fn fire(&mut self) -> Result<Option<usize>, SimError> {
        if let Some(last) = self.last_fire_ms
            && self.clock_ms.saturating_sub(last) < self.rules.fire_cooldown_ms
        {
            return Ok(None);
        }

        let height = self.controls.cannon_y;
        let angle = self.controls.cannon_angle;
        let id = self.projectiles.push(Projectile::new(height, angle))?;
        self.last_fire_ms = Some(self.clock_ms);
        debug!("fired projectile {id} at {angle} deg from height {height}");
        self.events.push(GameEvent::Fired {
            projectile: id,
            height,
            angle,
        });
        Ok(Some(id))
    }

    /// Place a block directly (tests and scripted setups)
    pub fn insert_block(&mut self, kind: BlockKind, x: f32, y: f32) -> Result<usize, SimError> {
        let mut block = Block::new(x, self.time_ticks);
        block.y = y;
        self.blocks.get_mut(kind).push(block)
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_cooldown() {
        let mut state = GameState::new(1);
        assert_eq!(state.fire(), Ok(Some(0)));

        state.clock_ms = 999;
        assert_eq!(state.fire(), Ok(None));

        state.clock_ms = 1000;
        assert_eq!(state.fire(), Ok(Some(1)));
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_records_controls() {
        let mut state = GameState::new(1);
        state.controls.cannon_y = 1.4;
        state.controls.cannon_angle = 30.0;
        state.fire().unwrap();

        let p = state.projectiles.get(0).unwrap();
        assert_eq!(p.origin_height, 1.4);
        assert_eq!(p.angle, 30.0);
        assert_eq!(p.position(), Vec2::new(CANNON_X, 1.4));
    }

    #[test]
    fn test_fire_capacity() {
        let rules = Rules {
            capacity: 1,
            fire_cooldown_ms: 0,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(1, rules).unwrap();
        state.fire().unwrap();
        assert!(matches!(
            state.fire(),
            Err(SimError::CapacityExceeded { capacity: 1, .. })
        ));
    }

    #[test]
    fn test_rules_validation() {
        let bad = Rules {
            capacity: 0,
            ..Rules::default()
        };
        assert!(GameState::with_rules(1, bad).is_err());

        let bad = Rules {
            initial_speed: 20,
            ..Rules::default()
        };
        assert!(GameState::with_rules(1, bad).is_err());
    }

    #[test]
    fn test_basket_spans() {
        let controls = Controls {
            left_basket: 1.0,
            right_basket: -1.0,
            ..Controls::default()
        };
        assert_eq!(controls.basket_span(Basket::Left), (-1.5, 0.5));
        assert_eq!(controls.basket_span(Basket::Right), (-0.5, 1.5));
    }
}
