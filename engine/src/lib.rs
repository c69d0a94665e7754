//! A small 2D runtime: entities with components, systems on a fixed
//! timestep, and coloured shapes drawn through a pluggable platform.

pub mod color;
pub mod config;
pub mod ecs;
pub mod error;
mod game;
pub mod logging;
pub mod platform;
pub mod render;
mod runtime;

pub use color::Color;
pub use config::EngineConfig;
pub use ecs::{Component, Components, Entities, Entity, EntityId, System, SystemContext, Systems};
pub use error::{EngineError, Result};
pub use game::Game;
pub use platform::{DesktopPlatform, HeadlessPlatform, Platform};
pub use render::{Rectangle, RenderList, Renderable, Shape, Square, Triangle};
pub use runtime::Runtime;

pub mod prelude {
    pub use crate::{
        Color, Component, Components, DesktopPlatform, Entities, Entity, EntityId, Game,
        HeadlessPlatform, Rectangle, Renderable, Shape, Square, System, SystemContext, Systems,
        Triangle,
    };
}
