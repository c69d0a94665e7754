//! Per-frame draw lists.

use glam::Vec2;

use super::renderable::Renderable;
use super::shape::Shape;
use crate::color::Color;
use crate::ecs::{Components, Entities, EntityId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub shape: Shape,
    pub color: Color,
    pub position: Vec2,
}

/// GPU vertex: position in normalised device coordinates plus RGBA colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Draw commands for one frame, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderList {
    commands: Vec<DrawCommand>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the list from every visible [`Renderable`], following entity
    /// insertion order so later entities draw on top.
    pub fn collect(&mut self, entities: &Entities, components: &Components) {
        self.commands.clear();
        for id in entities.iter() {
            let Some(renderable) = components.get::<Renderable>(id) else {
                continue;
            };
            if !renderable.is_visible() {
                continue;
            }
            self.commands.push(DrawCommand {
                entity: id,
                shape: *renderable.shape(),
                color: renderable.color(),
                position: renderable.position(),
            });
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.commands.iter().map(|c| c.shape.vertex_count()).sum()
    }

    /// Tessellates every command into `out` for a viewport of `viewport`
    /// world units, origin at the centre and +y up. `linear` converts colours
    /// for sRGB render targets.
    pub fn write_vertices(&self, viewport: Vec2, linear: bool, out: &mut Vec<Vertex>) {
        out.clear();
        out.reserve(self.vertex_count());

        let half = (viewport * 0.5).max(Vec2::splat(0.5));
        let mut corners = Vec::with_capacity(6);
        for command in &self.commands {
            let color = if linear {
                command.color.to_linear()
            } else {
                command.color
            }
            .to_array();

            corners.clear();
            command.shape.tessellate(command.position, &mut corners);
            out.extend(corners.iter().map(|p| Vertex {
                position: (*p / half).to_array(),
                color,
            }));
        }
    }
}
