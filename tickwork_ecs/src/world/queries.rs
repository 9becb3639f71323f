use crate::component::{ComponentSet, ComponentTypeId};
use crate::query::Filter;
use crate::Entity;

use super::World;

impl World {
    /// Returns the live entities holding every component type in `S`.
    ///
    /// Result order is unspecified.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Position { x: f32, y: f32 }
    /// impl Component for Position {}
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Velocity { x: f32, y: f32 }
    /// impl Component for Velocity {}
    ///
    /// let world = World::new();
    /// let e1 = world.create_entity();
    /// world.add_component(e1, Position { x: 0.0, y: 0.0 }).unwrap();
    /// world.add_component(e1, Velocity { x: 1.0, y: 1.0 }).unwrap();
    /// let e2 = world.create_entity();
    /// world.add_component(e2, Position { x: 0.0, y: 0.0 }).unwrap();
    ///
    /// assert_eq!(world.query::<(Position, Velocity)>(), vec![e1]);
    /// assert_eq!(world.query::<(Position,)>().len(), 2);
    /// ```
    pub fn query<S: ComponentSet>(&self) -> Vec<Entity> {
        self.filter_entities(&Filter::of::<S>())
    }

    /// Returns the live entities holding every component type in `ids`.
    ///
    /// An empty `ids` returns every live entity.
    pub fn query_entities(&self, ids: &[ComponentTypeId]) -> Vec<Entity> {
        self.filter_entities(&Filter::from_ids(ids.iter().copied()))
    }

    /// Returns the live entities matching `filter`.
    ///
    /// An empty filter copies the whole entity list in its current order.
    /// Otherwise the component store's reverse index picks the candidates,
    /// and any candidate destroyed in the meantime is skipped.
    pub fn filter_entities(&self, filter: &Filter) -> Vec<Entity> {
        if filter.is_empty() {
            return self.get_entities();
        }

        let ids = self.components.entities_with_all(filter.required());
        if ids.is_empty() {
            return Vec::new();
        }

        let entities = self.entities.read();
        ids.into_iter().filter_map(|id| entities.get(id)).collect()
    }
}
