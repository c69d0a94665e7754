//! Entity, component and system registries.

mod component;
mod entity;
mod system;

pub use component::{Component, Components};
pub use entity::{Entities, Entity, EntityId};
pub use system::{System, SystemContext, Systems};
