use parking_lot::RwLock;

use crate::store::ComponentStore;
use crate::system::SystemList;
use crate::WorldConfig;

mod components;
mod entities;
mod queries;
mod systems;

use entities::EntityList;

/// The central World container that manages entities, components and systems.
///
/// Every method takes `&self`: the entity list, the component store and the
/// system list each sit behind their own lock, so a `World` can be shared
/// through an `Arc` and mutated from several threads while another thread
/// runs [`World::update`]. When one operation needs both the entity list and
/// the component store it always locks them in that order.
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
/// world.add_component(entity, Position { x: 10.0, y: 20.0 }).unwrap();
/// assert!(world.has_component::<Position>(entity));
///
/// world.destroy_entity(entity);
/// assert!(!world.has_component::<Position>(entity));
/// ```
pub struct World {
    config: WorldConfig,
    entities: RwLock<EntityList>,
    components: ComponentStore,
    systems: SystemList,
}

impl World {
    /// Creates a new empty World with the default configuration.
    ///
    /// # Example
    /// ```
    /// use tickwork_ecs::World;
    ///
    /// let world = World::new();
    /// assert_eq!(world.entity_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new empty World using `config`.
    pub fn with_config(config: WorldConfig) -> Self {
        log::debug!("creating world with {config:?}");
        Self {
            entities: RwLock::new(EntityList::with_capacity(config.initial_entity_capacity)),
            components: ComponentStore::with_table_capacity(config.initial_table_capacity),
            systems: SystemList::default(),
            config,
        }
    }

    /// Returns the configuration this world was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Gives direct access to the component store backing this world.
    ///
    /// Useful for id-level work such as
    /// [`entities_with_all`](ComponentStore::entities_with_all). Writes made
    /// through the store bypass the world's liveness check.
    pub fn component_store(&self) -> &ComponentStore {
        &self.components
    }
}

impl Default for World {
    /// Creates a new empty World using the default constructor.
    ///
    /// This is equivalent to calling `World::new()`.
    fn default() -> Self {
        Self::new()
    }
}
