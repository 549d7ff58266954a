//! Scene assembly
//!
//! Turns a `GameState` into a `Frame`: a camera matrix plus one draw command
//! per visible object. The GPU layer consumes frames through `Presenter`.

use glam::{Mat4, Quat, Vec2, Vec3};
use log::trace;

use super::shapes::MeshId;
use super::vertex::colors;
use crate::consts::*;
use crate::deg_to_rad;
use crate::sim::{BlockKind, Controls, GameState, MIRRORS, TickStatus};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 500.0;
/// Fixed eye position of the 2D camera
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// Projection times view for the current zoom and pan
pub fn view_projection(controls: &Controls) -> Mat4 {
    let half = VIEW_HALF_EXTENT / controls.zoom;
    let pan = controls.pan;
    let projection = Mat4::orthographic_rh_gl(
        -half + pan.x,
        half + pan.x,
        -half + pan.y,
        half + pan.y,
        NEAR_PLANE,
        FAR_PLANE,
    );
    let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
    projection * view
}

/// Translate then rotate about z by `degrees`
fn placed(pos: Vec2, degrees: f32) -> Mat4 {
    Mat4::from_rotation_translation(
        Quat::from_rotation_z(deg_to_rad(degrees)),
        pos.extend(0.0),
    )
}

fn at(pos: Vec2) -> Mat4 {
    Mat4::from_translation(pos.extend(0.0))
}

/// One mesh drawn with one model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshId,
    pub model: Mat4,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub view_projection: Mat4,
    pub commands: Vec<DrawCommand>,
    pub status: TickStatus,
    pub score: i32,
}

impl Frame {
    pub fn count(&self, mesh: MeshId) -> usize {
        self.commands.iter().filter(|c| c.mesh == mesh).count()
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let controls = &state.controls;
    let mut commands = Vec::new();
    let mut draw = |mesh, model| commands.push(DrawCommand { mesh, model });

    for mirror in &MIRRORS {
        draw(MeshId::Mirror, placed(mirror.pos, mirror.angle));
    }

    for (bar, pos) in state.display.bars() {
        draw(MeshId::for_bar(bar), at(pos));
    }

    draw(MeshId::LeftBasket, at(Vec2::new(controls.left_basket, BASKET_Y)));
    draw(MeshId::RightBasket, at(Vec2::new(controls.right_basket, BASKET_Y)));
    draw(MeshId::CannonBase, at(Vec2::new(CANNON_BASE_X, controls.cannon_y)));
    draw(
        MeshId::CannonFace,
        placed(Vec2::new(CANNON_X, controls.cannon_y), controls.cannon_angle),
    );
    draw(MeshId::CatchLine, at(Vec2::new(0.0, CATCH_LINE_Y)));

    for (_, projectile) in state.projectiles.active() {
        draw(
            MeshId::Projectile,
            placed(projectile.position(), projectile.angle),
        );
    }

    for kind in BlockKind::ALL {
        for (_, block) in state.blocks.get(kind).active() {
            draw(MeshId::for_block(kind), at(block.position()));
        }
    }

    trace!("frame at tick {}: {} draws", state.time_ticks, commands.len());

    Frame {
        clear_color: colors::BACKGROUND,
        view_projection: view_projection(controls),
        commands,
        status: state.status(),
        score: state.score,
    }
}

/// Seam for whatever draws frames
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}

/// Headless presenter that only records what it was given
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub frames: u64,
    pub draws: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        self.draws += frame.commands.len() as u64;
        trace!(
            "presented frame {} ({} draws, score {})",
            self.frames,
            frame.commands.len(),
            frame.score
        );
    }
}
