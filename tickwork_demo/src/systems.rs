use log::*;
use tickwork_ecs::{ComponentTypeId, Filter, System, World};

use crate::components::{Health, Position, Velocity};

/// Moves every entity with a velocity.
pub struct MovementSystem {
    filter: Filter,
    position: ComponentTypeId,
    velocity: ComponentTypeId,
}

impl MovementSystem {
    pub fn new() -> Self {
        Self {
            filter: Filter::of::<(Position, Velocity)>(),
            position: ComponentTypeId::of::<Position>(),
            velocity: ComponentTypeId::of::<Velocity>(),
        }
    }
}

impl System for MovementSystem {
    fn update(&self, world: &World, delta_time: f64) {
        for entity in world.filter_entities(&self.filter) {
            let (Some(pos), Some(vel)) = (
                world
                    .get_component_by_id(entity, self.position)
                    .and_then(|c| c.cloned::<Position>()),
                world
                    .get_component_by_id(entity, self.velocity)
                    .and_then(|c| c.cloned::<Velocity>()),
            ) else {
                continue;
            };

            let moved = Position {
                x: pos.x + vel.x * delta_time,
                y: pos.y + vel.y * delta_time,
            };
            // The entity may have died since the query; nothing to move then.
            let _ = world.add_component(entity, moved);
        }
    }

    fn required_components(&self) -> Vec<ComponentTypeId> {
        self.filter.required().to_vec()
    }

    fn name(&self) -> &str {
        "movement"
    }
}

/// Destroys every entity whose health has run out.
pub struct HealthSystem {
    health: ComponentTypeId,
}

impl HealthSystem {
    pub fn new() -> Self {
        Self {
            health: ComponentTypeId::of::<Health>(),
        }
    }
}

impl System for HealthSystem {
    fn update(&self, world: &World, _delta_time: f64) {
        for entity in world.query_entities(&[self.health]) {
            let dead = world
                .get_component_by_id(entity, self.health)
                .and_then(|c| c.downcast_ref::<Health>().map(|health| health.current <= 0))
                .unwrap_or(false);
            if dead {
                info!("{entity} has died!");
                world.destroy_entity(entity);
            }
        }
    }

    fn required_components(&self) -> Vec<ComponentTypeId> {
        vec![self.health]
    }

    fn name(&self) -> &str {
        "health"
    }
}
