use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide identifier of an entity.
///
/// Ids are handed out in strictly increasing order starting at 1 and are never
/// reused, even after the entity they named has been destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Returns the raw numeric value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for entities in the ECS system.
///
/// Entities carry no data of their own. They are only a key into component
/// storage, so copying one around is as cheap as copying a `u64`.
///
/// # Examples
///
/// ```
/// use tickwork_ecs::Entity;
///
/// let player = Entity::new();
/// let monster = Entity::new();
///
/// assert_ne!(player, monster);
/// assert!(monster.id() > player.id());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl Entity {
    /// Allocates a new unique entity.
    ///
    /// This only issues an identity. Use [`World::create_entity`](crate::World::create_entity)
    /// to get an entity that a world knows about.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Entity {
        Entity {
            id: EntityId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
        }
    }

    /// Returns the identifier of this entity.
    pub fn id(self) -> EntityId {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}
