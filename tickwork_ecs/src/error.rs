use thiserror::Error;

use crate::Entity;

/// Errors reported by [`World`](crate::World) operations.
///
/// Absence is never an error: lookups return `Option`/`bool` and removals of
/// missing data are no-ops. Only attaching data to an entity the world does
/// not know about is rejected, and only under strict liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity was never created by this world or has been destroyed.
    #[error("{0} is not alive in this world")]
    EntityNotAlive(Entity),
}
