//! Component storage.
//!
//! Each component type lives in its own sparse-set table: a dense vector of
//! values plus a sparse index from entity slot to dense position. Tables are
//! type-erased behind [`AnyTable`] and keyed by `TypeId`.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use super::entity::EntityId;

/// Marker for data that can be attached to an entity.
pub trait Component: Send + Sync + 'static {}

/// A component moved out of an [`Entity`](super::Entity) bundle.
pub(crate) trait BoxedComponent: Send + Sync {
    fn attach(self: Box<Self>, id: EntityId, components: &mut Components);
}

impl<T: Component> BoxedComponent for T {
    fn attach(self: Box<Self>, id: EntityId, components: &mut Components) {
        components.insert(id, *self);
    }
}

struct ComponentTable<T> {
    sparse: Vec<Option<usize>>,
    owners: Vec<EntityId>,
    values: Vec<T>,
}

impl<T> ComponentTable<T> {
    fn new() -> Self {
        Self {
            sparse: Vec::new(),
            owners: Vec::new(),
            values: Vec::new(),
        }
    }

    fn slot(&self, id: EntityId) -> Option<usize> {
        let dense = (*self.sparse.get(id.index() as usize)?)?;
        (self.owners[dense] == id).then_some(dense)
    }

    fn insert(&mut self, id: EntityId, value: T) -> Result<Option<T>, T> {
        let index = id.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        if let Some(dense) = self.sparse[index] {
            let occupant = self.owners[dense];
            if occupant == id {
                return Ok(Some(std::mem::replace(&mut self.values[dense], value)));
            }
            if occupant.generation() > id.generation() {
                return Err(value);
            }
            // Slot still held by an older generation of this index.
            self.take(occupant);
        }
        self.sparse[index] = Some(self.values.len());
        self.owners.push(id);
        self.values.push(value);
        Ok(None)
    }

    fn take(&mut self, id: EntityId) -> Option<T> {
        let dense = self.slot(id)?;
        self.sparse[id.index() as usize] = None;
        self.owners.swap_remove(dense);
        let value = self.values.swap_remove(dense);
        if let Some(moved) = self.owners.get(dense) {
            self.sparse[moved.index() as usize] = Some(dense);
        }
        Some(value)
    }
}

trait AnyTable: Send + Sync {
    fn remove_entity(&mut self, id: EntityId);
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyTable for ComponentTable<T> {
    fn remove_entity(&mut self, id: EntityId) {
        self.take(id);
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry of component tables.
#[derive(Default)]
pub struct Components {
    tables: HashMap<TypeId, Box<dyn AnyTable>>,
    names: HashMap<TypeId, &'static str>,
    /// Lowest generation still allowed per entity slot; bumped on despawn.
    live_generation: Vec<u32>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table for `T`. Returns false if it already existed.
    pub fn register<T: Component>(&mut self) -> bool {
        let key = TypeId::of::<T>();
        if self.tables.contains_key(&key) {
            return false;
        }
        self.tables.insert(key, Box::new(ComponentTable::<T>::new()));
        self.names.insert(key, type_name::<T>());
        log::debug!("registered component {}", type_name::<T>());
        true
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    /// Names of registered component types, sorted.
    pub fn registered_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.names.values().copied().collect();
        names.sort_unstable();
        names
    }

    /// Attaches `component` to `id`, returning the value it replaced.
    /// Registers the table on first use.
    ///
    /// A stale `id` (its entity was despawned) is rejected and `component`
    /// is handed back unchanged.
    pub fn insert<T: Component>(&mut self, id: EntityId, component: T) -> Option<T> {
        if self.is_stale(id) {
            log::debug!("dropped {} insert for stale entity {id}", type_name::<T>());
            return Some(component);
        }
        self.register::<T>();
        let table = self.table_mut::<T>()?;
        match table.insert(id, component) {
            Ok(previous) => previous,
            Err(rejected) => {
                log::debug!("dropped {} insert for stale entity {id}", type_name::<T>());
                Some(rejected)
            }
        }
    }

    fn is_stale(&self, id: EntityId) -> bool {
        self.live_generation
            .get(id.index() as usize)
            .is_some_and(|floor| id.generation() < *floor)
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        let table = self.table::<T>()?;
        table.slot(id).map(|dense| &table.values[dense])
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let table = self.table_mut::<T>()?;
        table.slot(id).map(|dense| &mut table.values[dense])
    }

    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        self.table_mut::<T>()?.take(id)
    }

    pub fn contains<T: Component>(&self, id: EntityId) -> bool {
        self.get::<T>(id).is_some()
    }

    pub fn len<T: Component>(&self) -> usize {
        self.table::<T>().map_or(0, |t| t.values.len())
    }

    /// Total number of components across every table.
    pub fn total(&self) -> usize {
        self.tables.values().map(|t| t.len()).sum()
    }

    /// Iterates `T` components in storage order, which is not insertion order
    /// once removals have happened.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.table::<T>()
            .into_iter()
            .flat_map(|t| t.owners.iter().copied().zip(t.values.iter()))
    }

    pub fn iter_mut<T: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> + '_ {
        self.table_mut::<T>().into_iter().flat_map(|t| {
            let ComponentTable { owners, values, .. } = t;
            owners.iter().copied().zip(values.iter_mut())
        })
    }

    /// Drops every component of `id` and retires its generation, so later
    /// inserts through the same id are refused.
    pub fn remove_entity(&mut self, id: EntityId) {
        for table in self.tables.values_mut() {
            table.remove_entity(id);
        }
        let index = id.index() as usize;
        if index >= self.live_generation.len() {
            self.live_generation.resize(index + 1, 0);
        }
        let next = id.generation().wrapping_add(1);
        self.live_generation[index] = self.live_generation[index].max(next);
    }

    fn table<T: Component>(&self) -> Option<&ComponentTable<T>> {
        self.tables
            .get(&TypeId::of::<T>())
            .and_then(|t| t.as_any().downcast_ref())
    }

    fn table_mut<T: Component>(&mut self) -> Option<&mut ComponentTable<T>> {
        self.tables
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.as_any_mut().downcast_mut())
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Components")
            .field("types", &self.registered_names())
            .field("total", &self.total())
            .finish()
    }
}
