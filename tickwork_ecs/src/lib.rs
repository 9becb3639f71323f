pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod query;
pub mod store;
pub mod system;
pub mod world;

// Re-export commonly used types
pub use component::{registered_component_types, Component, ComponentRef, ComponentSet, ComponentTypeId};
pub use config::WorldConfig;
pub use entity::{Entity, EntityId};
pub use error::EcsError;
pub use query::Filter;
pub use store::ComponentStore;
pub use system::{FnSystem, System};
pub use world::World;
