use std::collections::HashMap;
use std::ops::ControlFlow;

use crate::component::{Component, ComponentRef, ComponentTypeId};
use crate::{EcsError, Entity};

use super::World;

impl World {
    /// Attaches a component to an entity, replacing any of the same type.
    ///
    /// With strict liveness (the default) the entity must be alive in this
    /// world. The check and the write happen under the entity-list lock, so a
    /// concurrent [`destroy_entity`](World::destroy_entity) can never leave the
    /// new component behind. With strict liveness disabled the component is
    /// stored regardless, which can orphan it.
    ///
    /// # Returns
    /// * `Ok(())` if the component was stored
    /// * `Err(EcsError::EntityNotAlive)` if strict liveness rejected it
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::{EcsError, World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Position { x: f32, y: f32 }
    /// impl Component for Position {}
    ///
    /// let world = World::new();
    /// let entity = world.create_entity();
    ///
    /// world.add_component(entity, Position { x: 10.0, y: 20.0 }).unwrap();
    ///
    /// // Adding again overwrites.
    /// world.add_component(entity, Position { x: 5.0, y: 5.0 }).unwrap();
    /// assert_eq!(world.get_component::<Position>(entity).unwrap().x, 5.0);
    ///
    /// world.destroy_entity(entity);
    /// assert_eq!(
    ///     world.add_component(entity, Position { x: 0.0, y: 0.0 }),
    ///     Err(EcsError::EntityNotAlive(entity))
    /// );
    /// ```
    pub fn add_component<T: Component>(&self, entity: Entity, component: T) -> Result<(), EcsError> {
        let id = ComponentTypeId::of::<T>();
        let component = ComponentRef::new(component);

        if !self.config.strict_entity_liveness {
            self.components.add_component_ref(entity.id(), id, component);
            return Ok(());
        }

        let entities = self.entities.read();
        if !entities.contains(entity.id()) {
            log::debug!("rejected {id} for {entity}: not alive");
            return Err(EcsError::EntityNotAlive(entity));
        }
        self.components.add_component_ref(entity.id(), id, component);
        Ok(())
    }

    /// Returns a clone of the entity's component of type `T`, if present.
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
    /// assert_eq!(world.get_component::<Position>(entity), None);
    ///
    /// world.add_component(entity, Position { x: 10.0, y: 20.0 }).unwrap();
    /// assert_eq!(world.get_component::<Position>(entity).unwrap().x, 10.0);
    /// ```
    pub fn get_component<T: Component + Clone>(&self, entity: Entity) -> Option<T> {
        self.get_component_by_id(entity, ComponentTypeId::of::<T>())?
            .cloned()
    }

    /// Returns a handle to the entity's component with type id `id`, if present.
    pub fn get_component_by_id(&self, entity: Entity, id: ComponentTypeId) -> Option<ComponentRef> {
        self.components.get_component(entity.id(), id)
    }

    /// Returns `true` if the entity holds a component of type `T`.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.has_component_by_id(entity, ComponentTypeId::of::<T>())
    }

    /// Returns `true` if the entity holds a component with type id `id`.
    pub fn has_component_by_id(&self, entity: Entity, id: ComponentTypeId) -> bool {
        self.components.has_component(entity.id(), id)
    }

    /// Removes the entity's component of type `T` and returns it.
    ///
    /// Returns `None`, and changes nothing, if there was no such component.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Health { value: u32 }
    /// impl Component for Health {}
    ///
    /// let world = World::new();
    /// let entity = world.create_entity();
    /// world.add_component(entity, Health { value: 3 }).unwrap();
    ///
    /// assert_eq!(world.remove_component::<Health>(entity), Some(Health { value: 3 }));
    /// assert_eq!(world.remove_component::<Health>(entity), None);
    /// ```
    pub fn remove_component<T: Component + Clone>(&self, entity: Entity) -> Option<T> {
        self.remove_component_by_id(entity, ComponentTypeId::of::<T>())?
            .into_inner()
    }

    /// Removes the entity's component with type id `id` and returns it.
    pub fn remove_component_by_id(&self, entity: Entity, id: ComponentTypeId) -> Option<ComponentRef> {
        self.components.remove_component(entity.id(), id)
    }

    /// Replaces the entity's `T` with `f` applied to a copy of it.
    ///
    /// `f` runs with no lock held, so a concurrent writer of the same
    /// component may be overwritten. Returns the new value, or `None` if the
    /// entity has no `T` or is no longer alive.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Health { value: u32 }
    /// impl Component for Health {}
    ///
    /// let world = World::new();
    /// let entity = world.create_entity();
    /// world.add_component(entity, Health { value: 100 }).unwrap();
    ///
    /// let new_health = world.update_component::<Health, _>(entity, |mut health| {
    ///     health.value = health.value.saturating_sub(25);
    ///     health
    /// });
    ///
    /// assert_eq!(new_health, Some(Health { value: 75 }));
    /// ```
    pub fn update_component<T, F>(&self, entity: Entity, f: F) -> Option<T>
    where
        T: Component + Clone,
        F: FnOnce(T) -> T,
    {
        let updated = f(self.get_component::<T>(entity)?);
        self.add_component(entity, updated.clone()).ok()?;
        Some(updated)
    }

    /// Returns a point-in-time copy of every component on the entity.
    pub fn entity_components(&self, entity: Entity) -> HashMap<ComponentTypeId, ComponentRef> {
        self.components.entity_components(entity.id())
    }

    /// Visits every component on the entity; see
    /// [`ComponentStore::iterate_entity_components`](crate::ComponentStore::iterate_entity_components).
    pub fn iterate_entity_components<F>(&self, entity: Entity, visit: F)
    where
        F: FnMut(ComponentTypeId, &ComponentRef) -> ControlFlow<()>,
    {
        self.components.iterate_entity_components(entity.id(), visit)
    }
}
