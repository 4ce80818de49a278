//! Shape generation for 2D primitives
//!
//! [`VertexBatch`] implements [`Surface`] by tessellating every call into
//! triangles, ready to upload as a single vertex buffer.

use glam::Vec2;
use std::f32::consts::PI;

use super::Surface;
use super::vertex::{Color, Vertex};
use crate::sim::geom::Rect;

/// Segments used for circles and rings
const CIRCLE_SEGMENTS: u32 = 16;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(theta.cos(), theta.sin()) * r;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        quad_into(
            &mut vertices,
            [
                at(inner_radius, theta1),
                at(outer_radius, theta1),
                at(outer_radius, theta2),
                at(inner_radius, theta2),
            ],
            color,
        );
    }

    vertices
}

/// Two triangles for a convex quad given in winding order
fn quad_into(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

pub fn rect(r: &Rect, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad_into(
        &mut vertices,
        [
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ],
        color,
    );
    vertices
}

/// Thick line segment as a quad
pub fn line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    quad_into(&mut vertices, [a + perp, b + perp, b - perp, a - perp], color);
    vertices
}

/// Triangle fan over a convex polygon
pub fn polygon(points: &[Vec2], color: Color) -> Vec<Vertex> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };
    rest.windows(2)
        .flat_map(|w| [first, w[0], w[1]])
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// A frame's worth of triangles
#[derive(Debug, Default, Clone)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Surface for VertexBatch {
    fn fill_rect(&mut self, r: Rect, color: Color) {
        self.vertices.extend(rect(&r, color));
    }

    fn stroke_rect(&mut self, r: Rect, width: f32, color: Color) {
        let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
        let corners = [
            Vec2::new(l, t),
            Vec2::new(rt, t),
            Vec2::new(rt, b),
            Vec2::new(l, b),
        ];
        self.stroke_polygon(&corners, width, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let inner = (radius - width).max(0.0);
        self.vertices
            .extend(ring(center, inner, radius, color, CIRCLE_SEGMENTS));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.vertices.extend(polygon(points, color));
    }

    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color) {
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.line(a, b, width, color);
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.vertices.extend(line(a, b, width, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_primitive_vertex_counts() {
        assert_eq!(circle(Vec2::ZERO, 5.0, colors::WHITE, 8).len(), 24);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, colors::WHITE, 8).len(), 48);
        assert_eq!(rect(&Rect::new(0.0, 0.0, 4.0, 4.0), colors::WHITE).len(), 6);
        let tri = [Vec2::ZERO, Vec2::X, Vec2::Y];
        assert_eq!(polygon(&tri, colors::WHITE).len(), 3);
        assert!(polygon(&[], colors::WHITE).is_empty());
    }

    #[test]
    fn test_batch_accumulates_and_clears() {
        let mut batch = VertexBatch::new();
        batch.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), colors::RED);
        batch.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, colors::WHITE);
        assert_eq!(batch.len(), 6 + 4 * 6);
        assert_eq!(batch.as_bytes().len(), batch.len() * std::mem::size_of::<Vertex>());
        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let verts = circle(Vec2::new(10.0, 10.0), 3.0, colors::WHITE, 12);
        for v in verts.iter().skip(1).step_by(3) {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!((d - 3.0).abs() < 1e-4);
        }
    }
}
