use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::*;
use tickwork_ecs::{World, WorldConfig};

mod cli;
mod components;
mod systems;

use components::{Health, Position, Velocity};
use systems::{HealthSystem, MovementSystem};

/// Fixed simulation step handed to every system, in seconds.
const DELTA_TIME: f64 = 0.016;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    pretty_env_logger::formatted_builder()
        .format_timestamp(None)
        .filter_level(args.log_level)
        .init();

    let config = WorldConfig::default().with_strict_entity_liveness(!args.lenient);
    let world = Arc::new(World::with_config(config));

    world.add_system(MovementSystem::new());
    world.add_system(HealthSystem::new());

    spawn_actor(&world, (0.0, 0.0), (10.0, 5.0), (100, 100))?;
    spawn_actor(&world, (50.0, 50.0), (-5.0, -2.0), (0, 50))?;

    info!("Starting game loop ({} ticks every {}ms)", args.ticks, args.tick_ms);

    // Reinforcements arrive from another task while the loop is running.
    let reinforcements = {
        let world = world.clone();
        let delay = Duration::from_millis(args.tick_ms * args.spawn_at);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let entity = spawn_actor(&world, (0.0, 0.0), (0.0, 20.0), (100, 100))?;
            info!("{entity} joined the game");
            anyhow::Ok(())
        })
    };

    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms));
    for frame in 1..=args.ticks {
        interval.tick().await;
        info!("--- Frame {frame} ---");
        report_positions(&world);
        world.update(DELTA_TIME);
    }

    reinforcements.abort();
    match reinforcements.await {
        Ok(spawned) => spawned?,
        Err(err) if err.is_cancelled() => warn!("reinforcements never arrived"),
        Err(err) => return Err(err.into()),
    }

    info!("Game loop finished with {} entities alive", world.entity_count());
    Ok(())
}

fn spawn_actor(
    world: &World,
    (x, y): (f64, f64),
    (vx, vy): (f64, f64),
    (current, max): (i32, i32),
) -> anyhow::Result<tickwork_ecs::Entity> {
    let entity = world.create_entity();
    world.add_component(entity, Position { x, y })?;
    world.add_component(entity, Velocity { x: vx, y: vy })?;
    world.add_component(entity, Health { current, max })?;
    Ok(entity)
}

fn report_positions(world: &World) {
    for entity in world.get_entities() {
        if let Some(position) = world.get_component::<Position>(entity) {
            info!("{entity} position: ({:.2}, {:.2})", position.x, position.y);
        }
    }
}
