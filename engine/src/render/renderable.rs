use glam::Vec2;

use super::shape::Shape;
use crate::color::Color;
use crate::ecs::{Component, Entity};

/// Draws a shape at an offset from the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    shape: Shape,
    color_override: Option<Color>,
    x: f32,
    y: f32,
    visible: bool,
}

impl Renderable {
    pub fn new(shape: impl Into<Shape>, x: f32, y: f32) -> Self {
        Self {
            shape: shape.into(),
            color_override: None,
            x,
            y,
            visible: true,
        }
    }

    /// Draws with `color` instead of the shape's own fill.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color_override = Some(color);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color_override(&self) -> Option<Color> {
        self.color_override
    }

    /// The colour actually drawn: the override if set, otherwise the shape's.
    pub fn color(&self) -> Color {
        self.color_override.unwrap_or_else(|| self.shape.color())
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Component for Renderable {}

impl From<Renderable> for Entity {
    fn from(renderable: Renderable) -> Self {
        Entity::new().with(renderable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Square;

    #[test]
    fn color_falls_back_to_shape() {
        let r = Renderable::new(Square::new(Color::BLUE), 50.0, -50.0);
        assert_eq!(r.color(), Color::BLUE);
        assert_eq!(r.color_override(), None);
        assert_eq!(r.position(), Vec2::new(50.0, -50.0));

        let tinted = r.with_color(Color::PINK);
        assert_eq!(tinted.color(), Color::PINK);
        assert_eq!(tinted.shape().color(), Color::BLUE);
    }

    #[test]
    fn translate_moves_offset() {
        let mut r = Renderable::new(Square::new(Color::RED), 0.0, 50.0);
        r.translate(Vec2::new(5.0, -10.0));
        assert_eq!((r.x(), r.y()), (5.0, 40.0));
    }

    #[test]
    fn entity_from_renderable_has_one_component() {
        let entity = Entity::from(Renderable::new(Square::new(Color::GREEN), -50.0, -50.0));
        assert_eq!(entity.component_count(), 1);
    }
}
