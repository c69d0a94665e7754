//! Entity handles and the entity registry.

use std::fmt;

use super::component::{BoxedComponent, Component, Components};

/// Generational handle to an entity.
///
/// Slots are reused after a despawn with a bumped generation, so a handle kept
/// past its entity's lifetime never resolves to the newcomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// An entity that has not been registered yet: a bag of components.
#[derive(Default)]
pub struct Entity {
    components: Vec<Box<dyn BoxedComponent>>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Component>(mut self, component: T) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("components", &self.components.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Registry of live entities, kept in insertion order.
///
/// Additions get an id immediately; their components are attached to the
/// [`Components`] tables on the next flush. Removals are deferred to the
/// flush as well, so systems can despawn while iterating.
#[derive(Debug, Default)]
pub struct Entities {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: Vec<EntityId>,
    pending: Vec<(EntityId, Entity)>,
    doomed: Vec<EntityId>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.alive = true;
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    alive: true,
                });
                EntityId {
                    index,
                    generation: 0,
                }
            }
        };
        self.live.push(id);
        self.pending.push((id, entity));
        log::trace!("entity {id} queued for spawn");
        id
    }

    /// Queues `id` for despawn. Returns false if it is not alive or already queued.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.contains(id) || self.doomed.contains(&id) {
            return false;
        }
        self.doomed.push(id);
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.alive && slot.generation == id.generation)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.live.iter().copied()
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.live
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty() || !self.doomed.is_empty()
    }

    /// Attaches queued components, then applies queued despawns.
    pub(crate) fn flush(&mut self, components: &mut Components) {
        for (id, entity) in self.pending.drain(..) {
            for component in entity.components {
                component.attach(id, components);
            }
        }

        for id in std::mem::take(&mut self.doomed) {
            components.remove_entity(id);
            let slot = &mut self.slots[id.index as usize];
            slot.alive = false;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            self.live.retain(|live| *live != id);
            log::trace!("entity {id} despawned");
        }
    }
}
