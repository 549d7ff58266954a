//! Presentation layer
//!
//! Builds GPU-ready mesh data and per-frame draw lists. The window and GPU
//! backend plug in through `Presenter`.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{DrawCommand, Frame, LogPresenter, Presenter, build_frame, view_projection};
pub use shapes::{MeshId, MeshLibrary};
pub use vertex::Vertex;
