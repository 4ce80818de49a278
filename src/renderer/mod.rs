//! Rendering module
//!
//! The simulation never draws itself. Entities implement [`Draw`] against a
//! [`Surface`], and [`shapes::VertexBatch`] is the stock surface that turns
//! the calls into a triangle list for upload.

pub mod draw;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::geom::Rect;

pub use draw::draw_state;
pub use shapes::VertexBatch;
pub use vertex::{Color, Vertex, colors};

/// Immediate-mode 2D drawing target
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    /// Convex polygon, points in winding order
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color);
    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color);
}

/// Something that knows how to put itself on a [`Surface`]
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}
