use crate::component::{Component, ComponentSet, ComponentTypeId};
use crate::store::ComponentStore;
use crate::Entity;

/// A compiled set of required component types for selecting entities.
///
/// Filters are cheap to keep around, so systems usually build theirs once
/// and reuse it every tick. A filter with no required types matches every
/// entity.
///
/// # Basic Usage
/// ```
/// use tickwork_ecs::{Component, Filter, World};
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
/// let moving = world.create_entity();
/// world.add_component(moving, Position { x: 0.0, y: 0.0 }).unwrap();
/// world.add_component(moving, Velocity { x: 1.0, y: 0.0 }).unwrap();
///
/// let still = world.create_entity();
/// world.add_component(still, Position { x: 5.0, y: 5.0 }).unwrap();
///
/// let movement = Filter::new().with::<Position>().with::<Velocity>();
/// assert_eq!(world.filter_entities(&movement), vec![moving]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    required: Vec<ComponentTypeId>,
}

impl Filter {
    /// Creates a filter that matches every entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter requiring every component type in the tuple `S`.
    ///
    /// ```
    /// use tickwork_ecs::{Component, ComponentTypeId, Filter};
    ///
    /// struct Health;
    /// impl Component for Health {}
    ///
    /// let filter = Filter::of::<(Health,)>();
    /// assert_eq!(filter.required(), &[ComponentTypeId::of::<Health>()]);
    /// ```
    pub fn of<S: ComponentSet>() -> Self {
        Self::from_ids(S::type_ids())
    }

    /// Creates a filter from raw component type ids. Duplicates are dropped.
    pub fn from_ids(ids: impl IntoIterator<Item = ComponentTypeId>) -> Self {
        ids.into_iter().fold(Self::new(), Self::with_id)
    }

    /// Adds a required component type.
    pub fn with<C: Component>(self) -> Self {
        self.with_id(ComponentTypeId::of::<C>())
    }

    /// Adds a required component type by id.
    pub fn with_id(mut self, id: ComponentTypeId) -> Self {
        if !self.required.contains(&id) {
            self.required.push(id);
        }
        self
    }

    /// Component types an entity must hold to match.
    pub fn required(&self) -> &[ComponentTypeId] {
        &self.required
    }

    /// Returns `true` if the filter requires nothing.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Returns `true` if `entity` holds every required component in `store`.
    pub fn matches(&self, entity: Entity, store: &ComponentStore) -> bool {
        store.has_all(entity.id(), &self.required)
    }

    /// Keeps the entities of `entities` that match, preserving their order.
    pub fn filter_entities(&self, entities: &[Entity], store: &ComponentStore) -> Vec<Entity> {
        entities
            .iter()
            .copied()
            .filter(|entity| self.matches(*entity, store))
            .collect()
    }
}
