use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// A marker trait for component types in the ECS system.
///
/// Components are pure data structures that represent different aspects
/// of entities, such as position, health, inventory, etc. An entity holds at
/// most one component of each type.
///
/// # Examples
///
/// ```
/// use tickwork_ecs::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: u32,
///     max: u32,
/// }
///
/// impl Component for Health {}
/// ```
pub trait Component: Any + Send + Sync {}

/// Small numeric tag standing in for a component's Rust type.
///
/// Ids are assigned on first observation of a type, starting at 1, and stay
/// fixed for the life of the process. Zero is reserved and never issued.
///
/// # Examples
///
/// ```
/// use tickwork_ecs::{Component, ComponentTypeId};
///
/// struct Position;
/// impl Component for Position {}
///
/// struct Velocity;
/// impl Component for Velocity {}
///
/// let position = ComponentTypeId::of::<Position>();
/// assert_eq!(position, ComponentTypeId::of::<Position>());
/// assert_ne!(position, ComponentTypeId::of::<Velocity>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeId(NonZeroU32);

impl ComponentTypeId {
    /// Returns the id of `T`, registering the type if this is its first use.
    pub fn of<T: Component>() -> Self {
        REGISTRY.id_for(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Returns the id of `T` if it has already been registered.
    ///
    /// Unlike [`ComponentTypeId::of`], this never allocates a new id.
    pub fn lookup<T: Component>() -> Option<Self> {
        REGISTRY.lookup(TypeId::of::<T>())
    }

    /// Rebuilds an id from its raw value. Returns `None` for the reserved 0.
    ///
    /// The result need not name a registered type. Store and world lookups
    /// with such an id report the component as absent.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Returns the raw numeric value of this id.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Slot of this id in a per-entity sparse table.
    pub(crate) fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Returns the Rust type name registered under this id, if any.
    pub fn type_name(self) -> Option<&'static str> {
        REGISTRY.name_of(self)
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "#{} ({})", self.0, name),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Returns how many distinct component types have been registered so far.
pub fn registered_component_types() -> usize {
    REGISTRY.inner.read().names.len()
}

static REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::default);

#[derive(Default)]
struct TypeRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    ids: HashMap<TypeId, ComponentTypeId>,
    // Indexed by `ComponentTypeId::index`.
    names: Vec<&'static str>,
}

impl TypeRegistry {
    fn lookup(&self, type_id: TypeId) -> Option<ComponentTypeId> {
        self.inner.read().ids.get(&type_id).copied()
    }

    fn id_for(&self, type_id: TypeId, name: &'static str) -> ComponentTypeId {
        if let Some(id) = self.lookup(type_id) {
            return id;
        }

        let mut inner = self.inner.write();
        // Another thread may have registered the type between the two locks.
        if let Some(id) = inner.ids.get(&type_id) {
            return *id;
        }

        inner.names.push(name);
        let raw = u32::try_from(inner.names.len()).expect("component type ids exhausted");
        let id = ComponentTypeId(NonZeroU32::new(raw).expect("registry ids start at 1"));
        inner.ids.insert(type_id, id);
        log::trace!("registered component type {name} as #{raw}");
        id
    }

    fn name_of(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.inner.read().names.get(id.index()).copied()
    }
}

/// Shared, type-erased handle to a stored component value.
///
/// Snapshots and id-keyed lookups hand these out instead of borrowing from
/// the store, so no lock has to outlive the call that produced them.
#[derive(Clone)]
pub struct ComponentRef(Arc<dyn Any + Send + Sync>);

impl ComponentRef {
    pub(crate) fn new<T: Component>(component: T) -> Self {
        Self(Arc::new(component))
    }

    /// Returns `true` if the payload is a `T`.
    pub fn is<T: Component>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Borrows the payload as a `T`, or `None` if it has another type.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Clones the payload out as a `T`, or `None` if it has another type.
    pub fn cloned<T: Component + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Takes the payload out as a `T`, cloning only if the handle is shared.
    pub(crate) fn into_inner<T: Component + Clone>(self) -> Option<T> {
        let typed = self.0.downcast::<T>().ok()?;
        Some(Arc::try_unwrap(typed).unwrap_or_else(|shared| (*shared).clone()))
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef").finish_non_exhaustive()
    }
}

/// A statically known set of component types, used to build queries.
///
/// Implemented for tuples of up to eight [`Component`] types, including the
/// empty tuple which matches every entity.
///
/// # Examples
///
/// ```
/// use tickwork_ecs::{Component, ComponentSet, ComponentTypeId};
///
/// struct Position;
/// impl Component for Position {}
///
/// struct Velocity;
/// impl Component for Velocity {}
///
/// let ids = <(Position, Velocity)>::type_ids();
/// assert_eq!(ids, vec![ComponentTypeId::of::<Position>(), ComponentTypeId::of::<Velocity>()]);
/// ```
pub trait ComponentSet {
    /// Component ids of every type in the set, in declaration order.
    fn type_ids() -> Vec<ComponentTypeId>;
}

macro_rules! impl_component_set {
    ($($name:ident),*) => {
        impl<$($name: Component),*> ComponentSet for ($($name,)*) {
            fn type_ids() -> Vec<ComponentTypeId> {
                vec![$(ComponentTypeId::of::<$name>()),*]
            }
        }
    };
}

impl_component_set!();
impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
