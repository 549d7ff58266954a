//! Input handling
//!
//! Translates raw window-system events into control changes. The window layer
//! delivers events between ticks on the same thread, so controls are mutated
//! directly. Out-of-range requests are dropped.

use log::debug;

use crate::consts::*;
use crate::sim::{Basket, Controls};

/// Window size the pixel bounds below are expressed in
pub const WINDOW_SIZE: f32 = 800.0;
/// World units to pixels at zoom 1
pub const PIXELS_PER_UNIT: f32 = 100.0;

pub const ZOOM_STEP: f32 = 0.2;
pub const MIN_ZOOM: f32 = 0.2;
pub const PAN_STEP: f32 = 0.2;

/// Non-character keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Left,
    Up,
    Right,
    Down,
    CtrlLeft,
    CtrlRight,
    AltLeft,
    AltRight,
    Other(i32),
}

impl SpecialKey {
    /// Map a GLUT special key code
    pub fn from_glut(code: i32) -> Self {
        match code {
            100 => SpecialKey::Left,
            101 => SpecialKey::Up,
            102 => SpecialKey::Right,
            103 => SpecialKey::Down,
            114 => SpecialKey::CtrlLeft,
            115 => SpecialKey::CtrlRight,
            116 => SpecialKey::AltLeft,
            117 => SpecialKey::AltRight,
            other => SpecialKey::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Down,
    Up,
}

/// Entries of the context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Nothing,
    Quit,
}

/// A raw event from the window layer. Pixel coordinates have the origin at the
/// top-left corner of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(char),
    KeyUp(char),
    Special(SpecialKey),
    Mouse {
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    },
    /// Pointer moved with a button held
    Drag { x: f32, y: f32 },
    Menu(MenuItem),
}

/// A typed character as a press followed by a release
pub fn key_press(key: char) -> [InputEvent; 2] {
    [InputEvent::KeyDown(key), InputEvent::KeyUp(key)]
}

/// What the driver must do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Request a shot on the next tick
    Fire,
    Quit,
}

/// Stateful event handler (modifier arming, button tracking)
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    /// Basket selected by a Ctrl/Alt press for the next Left/Right
    pub armed: Option<Basket>,
    pub fire_held: bool,
    max_speed: u32,
}

impl InputHandler {
    pub fn new(max_speed: u32) -> Self {
        Self {
            armed: None,
            fire_held: false,
            max_speed: max_speed.max(1),
        }
    }

    pub fn handle(&mut self, event: &InputEvent, controls: &mut Controls) -> InputAction {
        match *event {
            InputEvent::KeyDown(key) => match key {
                'q' | 'Q' | '\u{1b}' => InputAction::Quit,
                _ => InputAction::None,
            },
            InputEvent::KeyUp(key) => self.key_up(key, controls),
            InputEvent::Special(key) => {
                self.special(key, controls);
                InputAction::None
            }
            InputEvent::Mouse {
                button: MouseButton::Right,
                state,
                ..
            } => match state {
                ButtonState::Down => {
                    self.armed = None;
                    self.fire_held = true;
                    InputAction::Fire
                }
                ButtonState::Up => {
                    self.fire_held = false;
                    InputAction::None
                }
            },
            InputEvent::Mouse { .. } => InputAction::None,
            InputEvent::Drag { x, y } => {
                drag(x, y, controls);
                InputAction::None
            }
            InputEvent::Menu(MenuItem::Quit) => InputAction::Quit,
            InputEvent::Menu(MenuItem::Nothing) => InputAction::None,
        }
    }

    fn key_up(&mut self, key: char, controls: &mut Controls) -> InputAction {
        match key {
            'n' => controls.speed = (controls.speed + 1).min(self.max_speed),
            'm' => controls.speed = controls.speed.saturating_sub(1).max(1),
            'a' => {
                controls.cannon_angle = (controls.cannon_angle + CANNON_ANGLE_STEP)
                    .clamp(-CANNON_MAX_ANGLE, CANNON_MAX_ANGLE)
            }
            'd' => {
                controls.cannon_angle = (controls.cannon_angle - CANNON_ANGLE_STEP)
                    .clamp(-CANNON_MAX_ANGLE, CANNON_MAX_ANGLE)
            }
            's' => move_cannon(controls, controls.cannon_y + CANNON_MOVE_STEP),
            'f' => move_cannon(controls, controls.cannon_y - CANNON_MOVE_STEP),
            ' ' => {
                self.armed = None;
                return InputAction::Fire;
            }
            _ => {}
        }
        InputAction::None
    }

    fn special(&mut self, key: SpecialKey, controls: &mut Controls) {
        match key {
            SpecialKey::Up => controls.zoom += ZOOM_STEP,
            SpecialKey::Down => {
                if controls.zoom - ZOOM_STEP >= MIN_ZOOM - 1e-4 {
                    controls.zoom -= ZOOM_STEP;
                }
            }
            SpecialKey::CtrlLeft | SpecialKey::CtrlRight => self.armed = Some(Basket::Left),
            SpecialKey::AltLeft | SpecialKey::AltRight => self.armed = Some(Basket::Right),
            SpecialKey::Left | SpecialKey::Right => {
                let dir = if key == SpecialKey::Right { 1.0 } else { -1.0 };
                match self.armed.take() {
                    Some(basket) => nudge_basket(controls, basket, dir * BASKET_STEP),
                    // Panning moves the view, so the world scrolls the other way
                    None => controls.pan.x -= dir * PAN_STEP,
                }
            }
            SpecialKey::Other(_) => self.armed = None,
        }
    }
}

fn move_cannon(controls: &mut Controls, y: f32) {
    if (CANNON_MIN_Y..=CANNON_MAX_Y).contains(&y) {
        controls.cannon_y = y;
    } else {
        debug!("ignored cannon move to {y}");
    }
}

/// Move a basket one step if it is still strictly inside its range
fn nudge_basket(controls: &mut Controls, basket: Basket, delta: f32) {
    let ((lo, hi), offset) = match basket {
        Basket::Left => (LEFT_BASKET_RANGE, &mut controls.left_basket),
        Basket::Right => (RIGHT_BASKET_RANGE, &mut controls.right_basket),
    };
    if (delta < 0.0 && *offset > lo) || (delta > 0.0 && *offset < hi) {
        *offset += delta;
    }
}

/// Mouse drag: baskets along the bottom band, cannon along the left edge
fn drag(x: f32, y: f32, controls: &mut Controls) {
    let half = WINDOW_SIZE / 2.0;
    // Pixel offsets from the window center, y up
    let x1 = x - half;
    let y1 = half - y;
    let world_x = x1 / PIXELS_PER_UNIT;
    let world_y = y1 / PIXELS_PER_UNIT;

    if y >= 600.0 {
        let (left_lo, left_hi) = controls.basket_span(Basket::Left);
        let (right_lo, right_hi) = controls.basket_span(Basket::Right);
        if (left_lo..=left_hi).contains(&world_x) {
            if (250.0..=750.0).contains(&x) {
                controls.left_basket = world_x + 1.0;
            }
        } else if (right_lo..=right_hi).contains(&world_x) && (250.0..=650.0).contains(&x) {
            controls.right_basket = world_x - 2.0;
        }
    }

    if x <= 50.0 {
        let near_cannon = (world_y - controls.cannon_y).abs() <= 0.5;
        if near_cannon && (100.0..=700.0).contains(&y) {
            controls.cannon_y = world_y;
        }
    }
}
