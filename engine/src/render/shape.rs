//! Drawable primitives.
//!
//! Shapes are plain values: a fill colour plus their extent in world units.
//! They know how to turn themselves into a triangle list around a centre
//! point; placement is the job of [`Renderable`](super::Renderable).

use glam::Vec2;

use crate::color::Color;

/// Edge length used by [`Square::new`] and [`Triangle::new`].
pub const DEFAULT_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    color: Color,
    size: f32,
}

impl Square {
    pub fn new(color: Color) -> Self {
        Self::with_size(color, DEFAULT_SIZE)
    }

    pub fn with_size(color: Color, size: f32) -> Self {
        Self { color, size }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    color: Color,
    width: f32,
    height: f32,
}

impl Rectangle {
    pub fn new(color: Color, width: f32, height: f32) -> Self {
        Self {
            color,
            width,
            height,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Isosceles triangle, apex up, with base and height equal to `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    color: Color,
    size: f32,
}

impl Triangle {
    pub fn new(color: Color) -> Self {
        Self::with_size(color, DEFAULT_SIZE)
    }

    pub fn with_size(color: Color, size: f32) -> Self {
        Self { color, size }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Square(Square),
    Rectangle(Rectangle),
    Triangle(Triangle),
}

impl Shape {
    pub fn color(&self) -> Color {
        match self {
            Shape::Square(s) => s.color(),
            Shape::Rectangle(r) => r.color(),
            Shape::Triangle(t) => t.color(),
        }
    }

    /// Number of vertices [`tessellate`](Self::tessellate) appends.
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Square(_) | Shape::Rectangle(_) => 6,
            Shape::Triangle(_) => 3,
        }
    }

    /// Appends a counter-clockwise triangle list centred on `center`.
    pub fn tessellate(&self, center: Vec2, out: &mut Vec<Vec2>) {
        match self {
            Shape::Square(s) => push_quad(center, Vec2::splat(s.size() * 0.5), out),
            Shape::Rectangle(r) => push_quad(center, r.extent() * 0.5, out),
            Shape::Triangle(t) => {
                let h = t.size() * 0.5;
                out.extend_from_slice(&[
                    center + Vec2::new(-h, -h),
                    center + Vec2::new(h, -h),
                    center + Vec2::new(0.0, h),
                ]);
            }
        }
    }
}

fn push_quad(center: Vec2, half: Vec2, out: &mut Vec<Vec2>) {
    let bl = center + Vec2::new(-half.x, -half.y);
    let br = center + Vec2::new(half.x, -half.y);
    let tr = center + Vec2::new(half.x, half.y);
    let tl = center + Vec2::new(-half.x, half.y);
    out.extend_from_slice(&[bl, br, tr, bl, tr, tl]);
}

impl From<Square> for Shape {
    fn from(s: Square) -> Self {
        Shape::Square(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Shape::Triangle(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_tessellates_into_two_triangles() {
        let mut out = Vec::new();
        let shape = Shape::from(Square::new(Color::BLUE));
        shape.tessellate(Vec2::new(50.0, -50.0), &mut out);

        assert_eq!(out.len(), shape.vertex_count());
        assert_eq!(out[0], Vec2::new(0.0, -100.0));
        assert_eq!(out[2], Vec2::new(100.0, 0.0));
        assert_eq!(out[5], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn rectangle_uses_its_own_extent() {
        let mut out = Vec::new();
        Shape::from(Rectangle::new(Color::RED, 40.0, 10.0)).tessellate(Vec2::ZERO, &mut out);

        let min = out.iter().copied().fold(Vec2::MAX, Vec2::min);
        let max = out.iter().copied().fold(Vec2::MIN, Vec2::max);
        assert_eq!(min, Vec2::new(-20.0, -5.0));
        assert_eq!(max, Vec2::new(20.0, 5.0));
    }

    #[test]
    fn triangle_apex_points_up() {
        let mut out = Vec::new();
        Shape::from(Triangle::with_size(Color::GREEN, 10.0)).tessellate(Vec2::ZERO, &mut out);
        assert_eq!(out, vec![
            Vec2::new(-5.0, -5.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(0.0, 5.0)
        ]);
    }

    #[test]
    fn shape_reports_preset_color() {
        assert_eq!(Shape::from(Square::new(Color::CYAN)).color(), Color::CYAN);
    }
}
