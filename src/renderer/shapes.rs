//! Static meshes for every drawable
//!
//! Each mesh is a triangle list in its own model space. Positions are placed
//! in the world by the model matrices built in `scene`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::{Vertex, colors};
use crate::consts::{BLOCK_HEIGHT, BLOCK_WIDTH, LEFT_BASKET_SPAN, RIGHT_BASKET_SPAN};
use crate::hud::Bar;
use crate::sim::BlockKind;

/// Identifies one static mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshId {
    LeftBasket,
    RightBasket,
    CannonBase,
    CannonFace,
    CatchLine,
    HorizontalBar,
    VerticalBar,
    RedBlock,
    BlackBlock,
    GreenBlock,
    Projectile,
    Mirror,
}

impl MeshId {
    pub const ALL: [MeshId; 12] = [
        MeshId::LeftBasket,
        MeshId::RightBasket,
        MeshId::CannonBase,
        MeshId::CannonFace,
        MeshId::CatchLine,
        MeshId::HorizontalBar,
        MeshId::VerticalBar,
        MeshId::RedBlock,
        MeshId::BlackBlock,
        MeshId::GreenBlock,
        MeshId::Projectile,
        MeshId::Mirror,
    ];

    pub fn for_block(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Red => MeshId::RedBlock,
            BlockKind::Black => MeshId::BlackBlock,
            BlockKind::Green => MeshId::GreenBlock,
        }
    }

    pub fn for_bar(bar: Bar) -> Self {
        match bar {
            Bar::Horizontal => MeshId::HorizontalBar,
            Bar::Vertical => MeshId::VerticalBar,
        }
    }
}

/// Generate vertices for an axis-aligned rectangle
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    trapezoid(min.y, max.y, (min.x, max.x), (min.x, max.x), color)
}

/// Generate vertices for a trapezoid with horizontal top and bottom edges
pub fn trapezoid(
    bottom_y: f32,
    top_y: f32,
    bottom: (f32, f32),
    top: (f32, f32),
    color: [f32; 4],
) -> Vec<Vertex> {
    let v1 = Vertex::new(bottom.0, bottom_y, color);
    let v2 = Vertex::new(bottom.1, bottom_y, color);
    let v3 = Vertex::new(top.1, top_y, color);
    let v4 = Vertex::new(top.0, top_y, color);

    // Two triangles
    vec![v1, v2, v3, v3, v4, v1]
}

/// Vertex data for a mesh
pub fn mesh(id: MeshId) -> Vec<Vertex> {
    let block = |color| quad(Vec2::ZERO, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT), color);
    match id {
        // Baskets are wider at the rim
        MeshId::LeftBasket => trapezoid(
            0.0,
            1.0,
            (LEFT_BASKET_SPAN.0 + 0.5, LEFT_BASKET_SPAN.1 - 0.5),
            LEFT_BASKET_SPAN,
            colors::GREEN_BASKET,
        ),
        MeshId::RightBasket => trapezoid(
            0.0,
            1.0,
            (RIGHT_BASKET_SPAN.0 + 0.5, RIGHT_BASKET_SPAN.1 - 0.5),
            RIGHT_BASKET_SPAN,
            colors::RED_BASKET,
        ),
        MeshId::CannonBase => quad(Vec2::new(0.0, -0.5), Vec2::new(0.5, 0.5), colors::CANNON),
        MeshId::CannonFace => quad(Vec2::new(0.0, -0.2), Vec2::new(1.0, 0.2), colors::CANNON),
        MeshId::CatchLine => quad(Vec2::new(-3.5, 0.0), Vec2::new(3.5, 0.025), colors::CATCH_LINE),
        MeshId::HorizontalBar => quad(Vec2::ZERO, Vec2::new(0.3, 0.1), colors::SEGMENT),
        MeshId::VerticalBar => quad(Vec2::ZERO, Vec2::new(0.05, 0.3), colors::SEGMENT),
        MeshId::RedBlock => block(colors::RED_BLOCK),
        MeshId::BlackBlock => block(colors::BLACK_BLOCK),
        MeshId::GreenBlock => block(colors::GREEN_BLOCK),
        MeshId::Projectile => quad(Vec2::ZERO, Vec2::new(0.1, 0.05), colors::PROJECTILE),
        MeshId::Mirror => quad(Vec2::new(-0.4, -0.025), Vec2::new(0.4, 0.025), colors::MIRROR),
    }
}

/// All meshes, generated once for upload by the GPU layer
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    meshes: Vec<Vec<Vertex>>,
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self {
            meshes: MeshId::ALL.iter().map(|&id| mesh(id)).collect(),
        }
    }

    pub fn vertices(&self, id: MeshId) -> &[Vertex] {
        // ALL lists the variants in declaration order
        &self.meshes[id as usize]
    }

    /// Raw vertex bytes for a GPU buffer
    pub fn as_bytes(&self, id: MeshId) -> &[u8] {
        bytemuck::cast_slice(self.vertices(id))
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_meshes_are_triangle_lists() {
        let library = MeshLibrary::new();
        for id in MeshId::ALL {
            assert_eq!(library.vertices(id).len(), 6, "{id:?}");
            assert_eq!(library.as_bytes(id).len(), 6 * Vertex::STRIDE);
        }
        assert_eq!(library.total_vertices(), 72);
    }

    #[test]
    fn test_library_indexing_matches_ids() {
        let library = MeshLibrary::new();
        for id in MeshId::ALL {
            assert_eq!(library.vertices(id), mesh(id).as_slice());
        }
    }

    #[test]
    fn test_block_mesh_matches_collision_size() {
        let (lo, hi) = bounds(&mesh(MeshId::BlackBlock));
        assert_eq!(lo, Vec2::ZERO);
        assert_eq!(hi, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT));
    }

    #[test]
    fn test_basket_rim_matches_catch_span() {
        let (lo, hi) = bounds(&mesh(MeshId::LeftBasket));
        assert_eq!((lo.x, hi.x), LEFT_BASKET_SPAN);
        let (lo, hi) = bounds(&mesh(MeshId::RightBasket));
        assert_eq!((lo.x, hi.x), RIGHT_BASKET_SPAN);
        assert_eq!(mesh(MeshId::RightBasket)[0].color, colors::RED_BASKET);
    }

    #[test]
    fn test_mesh_lookup_by_kind() {
        assert_eq!(MeshId::for_block(BlockKind::Green), MeshId::GreenBlock);
        assert_eq!(MeshId::for_bar(Bar::Vertical), MeshId::VerticalBar);
    }
}
