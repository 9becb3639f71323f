use std::sync::Arc;

use crate::system::{FnSystem, System};

use super::World;

impl World {
    /// Registers a system to run on every subsequent [`update`](World::update).
    ///
    /// Systems run in registration order. Registering while another thread is
    /// inside `update` is safe; the new system joins from the next pass.
    pub fn add_system<S: System + 'static>(&self, system: S) {
        let name = system.name().to_string();
        let count = self.systems.push(Arc::new(system));
        log::debug!("registered system {name} ({count} total)");
    }

    /// Registers a closure as a system.
    ///
    /// # Example
    /// ```
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    /// use tickwork_ecs::World;
    ///
    /// let ticks = Arc::new(AtomicU32::new(0));
    /// let counter = ticks.clone();
    ///
    /// let world = World::new();
    /// world.add_system_fn("tick_counter", move |_world: &World, _dt: f64| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// world.update(0.016);
    /// world.update(0.016);
    /// assert_eq!(ticks.load(Ordering::SeqCst), 2);
    /// ```
    pub fn add_system_fn<F>(&self, name: &str, run: F)
    where
        F: Fn(&World, f64) + Send + Sync + 'static,
    {
        self.add_system(FnSystem::new(name, run));
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Runs every registered system once, in registration order.
    ///
    /// The pass iterates a snapshot of the system list taken on entry, and no
    /// world lock is held while a system runs. Does nothing if no system has
    /// ever been registered.
    pub fn update(&self, delta_time: f64) {
        let Some(systems) = self.systems.snapshot() else {
            return;
        };

        log::trace!("update pass over {} systems, dt={delta_time}", systems.len());
        for system in systems.iter() {
            system.update(self, delta_time);
        }
    }
}
