use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::component::ComponentTypeId;
use crate::World;

/// A per-tick behaviour unit driven by [`World::update`].
///
/// Systems receive a shared reference to the world and query it themselves.
/// The world uses interior locking, so a system can create and destroy
/// entities or add and remove components while it runs.
///
/// # Example
/// ```
/// use tickwork_ecs::{Component, System, World};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Position { x: f64, y: f64 }
/// impl Component for Position {}
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Velocity { x: f64, y: f64 }
/// impl Component for Velocity {}
///
/// struct MovementSystem;
///
/// impl System for MovementSystem {
///     fn update(&self, world: &World, delta_time: f64) {
///         for entity in world.query::<(Position, Velocity)>() {
///             let (Some(pos), Some(vel)) = (
///                 world.get_component::<Position>(entity),
///                 world.get_component::<Velocity>(entity),
///             ) else {
///                 continue;
///             };
///             let moved = Position {
///                 x: pos.x + vel.x * delta_time,
///                 y: pos.y + vel.y * delta_time,
///             };
///             world.add_component(entity, moved).unwrap();
///         }
///     }
/// }
///
/// let world = World::new();
/// let entity = world.create_entity();
/// world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();
/// world.add_component(entity, Velocity { x: 2.0, y: 0.0 }).unwrap();
///
/// world.add_system(MovementSystem);
/// world.update(0.5);
///
/// assert_eq!(world.get_component::<Position>(entity), Some(Position { x: 1.0, y: 0.0 }));
/// ```
pub trait System: Send + Sync {
    /// Runs one tick of this system.
    fn update(&self, world: &World, delta_time: f64);

    /// Component types this system works on.
    ///
    /// Purely descriptive: the world never uses it to decide whether to run
    /// the system.
    fn required_components(&self) -> Vec<ComponentTypeId> {
        Vec::new()
    }

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a closure into a [`System`].
///
/// ```
/// use tickwork_ecs::{FnSystem, System, World};
///
/// let system = FnSystem::new("noop", |_world: &World, _dt: f64| {});
/// assert_eq!(system.name(), "noop");
/// ```
pub struct FnSystem<F> {
    name: String,
    required: Vec<ComponentTypeId>,
    run: F,
}

impl<F> FnSystem<F>
where
    F: Fn(&World, f64) + Send + Sync,
{
    /// Wraps `run` under the given name.
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            run,
        }
    }

    /// Declares the component types this system works on.
    pub fn requiring(mut self, required: Vec<ComponentTypeId>) -> Self {
        self.required = required;
        self
    }
}

impl<F> System for FnSystem<F>
where
    F: Fn(&World, f64) + Send + Sync,
{
    fn update(&self, world: &World, delta_time: f64) {
        (self.run)(world, delta_time)
    }

    fn required_components(&self) -> Vec<ComponentTypeId> {
        self.required.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable list of systems as of one publication.
pub(crate) type SystemSnapshot = Arc<[Arc<dyn System>]>;

/// Append-only list of systems, read through copy-on-write snapshots.
///
/// Writers serialise on `pending` and publish a fresh snapshot; readers only
/// clone the published `Arc`, so an update pass never waits for a registration
/// and never sees one that happened after it started.
#[derive(Default)]
pub(crate) struct SystemList {
    pending: Mutex<Vec<Arc<dyn System>>>,
    published: RwLock<Option<SystemSnapshot>>,
}

impl SystemList {
    pub(crate) fn push(&self, system: Arc<dyn System>) -> usize {
        let mut pending = self.pending.lock();
        pending.push(system);
        let snapshot: SystemSnapshot = pending.iter().cloned().collect();
        let len = snapshot.len();
        *self.published.write() = Some(snapshot);
        len
    }

    pub(crate) fn snapshot(&self) -> Option<SystemSnapshot> {
        self.published.read().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.published.read().as_ref().map_or(0, |snapshot| snapshot.len())
    }
}
