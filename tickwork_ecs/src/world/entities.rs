use std::collections::HashMap;

use crate::entity::{Entity, EntityId};

use super::World;

/// Dense list of live entities plus each one's position in it.
///
/// The two containers are kept in step so membership, lookup and
/// swap-with-last removal are all O(1).
pub(super) struct EntityList {
    dense: Vec<Entity>,
    positions: HashMap<EntityId, usize>,
}

impl EntityList {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    fn push(&mut self, entity: Entity) {
        self.positions.insert(entity.id(), self.dense.len());
        self.dense.push(entity);
    }

    /// Removes `id` by moving the last entity into its slot.
    fn swap_remove(&mut self, id: EntityId) -> bool {
        let Some(position) = self.positions.remove(&id) else {
            return false;
        };
        self.dense.swap_remove(position);
        if let Some(moved) = self.dense.get(position) {
            self.positions.insert(moved.id(), position);
        }
        true
    }

    pub(super) fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    pub(super) fn get(&self, id: EntityId) -> Option<Entity> {
        self.positions.get(&id).map(|&position| self.dense[position])
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn as_slice(&self) -> &[Entity] {
        &self.dense
    }
}

impl World {
    /// Creates a new entity in the world.
    ///
    /// Each entity is guaranteed to have a unique identifier, never reused
    /// even after the entity is destroyed.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::World;
    ///
    /// let world = World::new();
    /// let entity1 = world.create_entity();
    /// let entity2 = world.create_entity();
    ///
    /// assert_ne!(entity1, entity2);
    /// assert_eq!(world.entity_count(), 2);
    /// ```
    pub fn create_entity(&self) -> Entity {
        let entity = Entity::new();
        self.entities.write().push(entity);
        log::trace!("created {entity}");
        entity
    }

    /// Destroys an entity and drops all of its components.
    ///
    /// Unknown or already destroyed entities are ignored. The last entity in
    /// the list takes the destroyed one's place, so enumeration order is not
    /// stable across destroys.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Position { x: f32, y: f32 }
    /// impl Component for Position {}
    ///
    /// let world = World::new();
    /// let entity = world.create_entity();
    ///
    /// world.add_component(entity, Position { x: 1.0, y: 2.0 }).unwrap();
    /// world.destroy_entity(entity);
    ///
    /// assert!(!world.contains_entity(entity));
    /// assert!(!world.has_component::<Position>(entity));
    ///
    /// // Destroying twice is harmless.
    /// world.destroy_entity(entity);
    /// ```
    pub fn destroy_entity(&self, entity: Entity) {
        // The list lock must be released before the store is touched.
        let removed = self.entities.write().swap_remove(entity.id());
        if !removed {
            return;
        }
        self.components.remove_all_components(entity.id());
        log::trace!("destroyed {entity}");
    }

    /// Returns a copy of every live entity, in dense-list order.
    pub fn get_entities(&self) -> Vec<Entity> {
        self.entities.read().as_slice().to_vec()
    }

    /// Returns `true` if `entity` was created by this world and not destroyed.
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.entities.read().contains(entity.id())
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.read().len()
    }
}
