use crate::store::DEFAULT_TABLE_CAPACITY;

/// Construction-time settings for a [`World`](crate::World).
///
/// # Example
/// ```
/// use tickwork_ecs::{World, WorldConfig};
///
/// let config = WorldConfig::default()
///     .with_initial_entity_capacity(1024)
///     .with_strict_entity_liveness(false);
///
/// let world = World::with_config(config);
/// assert!(!world.config().strict_entity_liveness);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Entities to reserve room for in the dense entity list.
    pub initial_entity_capacity: usize,
    /// Initial slot count of each entity's sparse component table.
    pub initial_table_capacity: usize,
    /// Reject component attachment to entities that are not alive.
    ///
    /// When `false`, such attachments succeed and leave an orphaned entry
    /// in the component store that world enumeration never reaches.
    pub strict_entity_liveness: bool,
}

impl WorldConfig {
    /// Sets [`initial_entity_capacity`](Self::initial_entity_capacity).
    pub fn with_initial_entity_capacity(mut self, capacity: usize) -> Self {
        self.initial_entity_capacity = capacity;
        self
    }

    /// Sets [`initial_table_capacity`](Self::initial_table_capacity).
    pub fn with_initial_table_capacity(mut self, capacity: usize) -> Self {
        self.initial_table_capacity = capacity;
        self
    }

    /// Sets [`strict_entity_liveness`](Self::strict_entity_liveness).
    pub fn with_strict_entity_liveness(mut self, strict: bool) -> Self {
        self.strict_entity_liveness = strict;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_entity_capacity: 0,
            initial_table_capacity: DEFAULT_TABLE_CAPACITY,
            strict_entity_liveness: true,
        }
    }
}
