use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use parking_lot::RwLock;

use crate::component::{Component, ComponentRef, ComponentTypeId};
use crate::entity::EntityId;

mod table;

use table::ComponentTable;

/// Default slot count of a freshly created per-entity table.
pub const DEFAULT_TABLE_CAPACITY: usize = 4;

/// Thread-safe storage of every entity's components.
///
/// Each entity owns a sparse table indexed by component type id, which keeps
/// single lookups O(1) no matter how many component types exist. Next to the
/// tables sits a reverse index from component type to the entities holding it,
/// which [`ComponentStore::entities_with_all`] uses to answer multi-component
/// queries without scanning every entity.
///
/// Tables and index live behind one reader/writer lock. Nothing caller-supplied
/// ever runs while that lock is held.
///
/// # Example
/// ```
/// use tickwork_ecs::{Component, ComponentStore, ComponentTypeId, Entity};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Health { value: u32 }
/// impl Component for Health {}
///
/// let store = ComponentStore::new();
/// let entity = Entity::new().id();
///
/// store.add_component(entity, Health { value: 10 });
/// let health = ComponentTypeId::of::<Health>();
///
/// assert!(store.has_component(entity, health));
/// assert_eq!(store.entities_with_all(&[health]), vec![entity]);
/// ```
pub struct ComponentStore {
    table_capacity: usize,
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    tables: HashMap<EntityId, ComponentTable>,
    index: HashMap<ComponentTypeId, HashSet<EntityId>>,
}

impl StoreInner {
    fn unindex(&mut self, entity: EntityId, id: ComponentTypeId) {
        if let Some(bucket) = self.index.get_mut(&id) {
            bucket.remove(&entity);
            if bucket.is_empty() {
                self.index.remove(&id);
            }
        }
    }
}

impl ComponentStore {
    /// Creates an empty store with the default per-entity table capacity.
    pub fn new() -> Self {
        Self::with_table_capacity(DEFAULT_TABLE_CAPACITY)
    }

    /// Creates an empty store whose per-entity tables start with `capacity` slots.
    pub fn with_table_capacity(capacity: usize) -> Self {
        Self {
            table_capacity: capacity.max(1),
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Attaches `component` to `entity`, replacing any component of the same type.
    ///
    /// Always succeeds. The store does not know which entities are alive; see
    /// [`World::add_component`](crate::World::add_component) for the checked variant.
    pub fn add_component<T: Component>(&self, entity: EntityId, component: T) {
        self.add_component_ref(entity, ComponentTypeId::of::<T>(), ComponentRef::new(component));
    }

    pub(crate) fn add_component_ref(&self, entity: EntityId, id: ComponentTypeId, component: ComponentRef) {
        let mut inner = self.inner.write();
        let capacity = self.table_capacity;
        inner
            .tables
            .entry(entity)
            .or_insert_with(|| ComponentTable::with_capacity(capacity))
            .insert(id, component);
        inner.index.entry(id).or_default().insert(entity);
    }

    /// Returns a handle to the component of type `id` on `entity`, if present.
    pub fn get_component(&self, entity: EntityId, id: ComponentTypeId) -> Option<ComponentRef> {
        self.inner.read().tables.get(&entity)?.get(id).cloned()
    }

    /// Returns `true` if `entity` holds a component of type `id`.
    pub fn has_component(&self, entity: EntityId, id: ComponentTypeId) -> bool {
        self.inner
            .read()
            .tables
            .get(&entity)
            .is_some_and(|table| table.contains(id))
    }

    /// Returns `true` if `entity` holds every component type in `ids`.
    ///
    /// An empty `ids` is satisfied by any entity, including ones with no table.
    pub fn has_all(&self, entity: EntityId, ids: &[ComponentTypeId]) -> bool {
        if ids.is_empty() {
            return true;
        }
        self.inner
            .read()
            .tables
            .get(&entity)
            .is_some_and(|table| table.contains_all(ids))
    }

    /// Detaches the component of type `id` from `entity` and returns it.
    ///
    /// Does nothing if the entity never had it. Dropping an entity's last
    /// component discards its table entirely.
    pub fn remove_component(&self, entity: EntityId, id: ComponentTypeId) -> Option<ComponentRef> {
        let mut inner = self.inner.write();
        let table = inner.tables.get_mut(&entity)?;
        let removed = table.remove(id)?;
        if table.is_empty() {
            inner.tables.remove(&entity);
        }
        inner.unindex(entity, id);
        Some(removed)
    }

    /// Detaches every component of `entity` and discards its table.
    ///
    /// Table and index are cleaned under a single write lock, so no reader
    /// sees the entity half removed.
    pub fn remove_all_components(&self, entity: EntityId) {
        let mut inner = self.inner.write();
        let Some(table) = inner.tables.remove(&entity) else {
            return;
        };
        for (id, _) in table.iter() {
            inner.unindex(entity, id);
        }
    }

    /// Returns a point-in-time copy of every component on `entity`.
    pub fn entity_components(&self, entity: EntityId) -> HashMap<ComponentTypeId, ComponentRef> {
        self.inner
            .read()
            .tables
            .get(&entity)
            .map(|table| table.iter().map(|(id, component)| (id, component.clone())).collect())
            .unwrap_or_default()
    }

    /// Visits every component of `entity` in ascending type-id order.
    ///
    /// The pairs are copied out before `visit` runs, so `visit` may call back
    /// into the store freely. Returning [`ControlFlow::Break`] stops early.
    ///
    /// # Example
    /// ```
    /// use std::ops::ControlFlow;
    /// use tickwork_ecs::{Component, ComponentStore, Entity};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Tag;
    /// impl Component for Tag {}
    ///
    /// let store = ComponentStore::new();
    /// let entity = Entity::new().id();
    /// store.add_component(entity, Tag);
    ///
    /// store.iterate_entity_components(entity, |id, _| {
    ///     // Mutating the store from inside the visitor is fine.
    ///     store.remove_component(entity, id);
    ///     ControlFlow::Continue(())
    /// });
    /// assert!(store.entity_components(entity).is_empty());
    /// ```
    pub fn iterate_entity_components<F>(&self, entity: EntityId, mut visit: F)
    where
        F: FnMut(ComponentTypeId, &ComponentRef) -> ControlFlow<()>,
    {
        let snapshot: Vec<(ComponentTypeId, ComponentRef)> = {
            let inner = self.inner.read();
            match inner.tables.get(&entity) {
                Some(table) => table.iter().map(|(id, component)| (id, component.clone())).collect(),
                None => return,
            }
        };

        for (id, component) in &snapshot {
            if visit(*id, component).is_break() {
                break;
            }
        }
    }

    /// Returns the entities holding every component type in `ids`.
    ///
    /// Only the smallest matching bucket of the reverse index is walked; each
    /// candidate is then checked against its own table. An empty `ids` yields
    /// no entities. Result order is unspecified.
    pub fn entities_with_all(&self, ids: &[ComponentTypeId]) -> Vec<EntityId> {
        if ids.is_empty() {
            return Vec::new();
        }

        let inner = self.inner.read();
        let mut driver: Option<&HashSet<EntityId>> = None;
        for id in ids {
            match inner.index.get(id) {
                Some(bucket) if !bucket.is_empty() => {
                    if driver.map_or(true, |current| bucket.len() < current.len()) {
                        driver = Some(bucket);
                    }
                }
                _ => return Vec::new(),
            }
        }
        let Some(driver) = driver else {
            return Vec::new();
        };

        driver
            .iter()
            .filter(|entity| {
                inner
                    .tables
                    .get(*entity)
                    .is_some_and(|table| table.contains_all(ids))
            })
            .copied()
            .collect()
    }

    /// Number of entities currently holding a component of type `id`.
    pub fn count_with(&self, id: ComponentTypeId) -> usize {
        self.inner.read().index.get(&id).map_or(0, HashSet::len)
    }

    /// Number of entities that currently own a component table.
    pub fn entity_count(&self) -> usize {
        self.inner.read().tables.len()
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}
