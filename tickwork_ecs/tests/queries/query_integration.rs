//! Query system integration tests
//!
//! These tests check that reverse-index queries agree with per-entity
//! presence checks for any population and insertion order.

use std::collections::HashSet;

use tickwork_ecs::{Component, ComponentTypeId, Entity, Filter, World};

#[derive(Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Debug, Clone, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}
impl Component for Velocity {}

#[derive(Debug, Clone, PartialEq)]
struct Health {
    value: u32,
}
impl Component for Health {}

#[derive(Debug, Clone, PartialEq)]
struct Dead;
impl Component for Dead {}

fn as_set(entities: Vec<Entity>) -> HashSet<Entity> {
    entities.into_iter().collect()
}

/// Small deterministic generator so populations vary without extra crates.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn test_position_velocity_scenario() {
    let world = World::new();
    let e1 = world.create_entity();
    world.add_component(e1, Position { x: 0.0, y: 0.0 }).unwrap();
    world.add_component(e1, Velocity { x: 1.0, y: 1.0 }).unwrap();
    let e2 = world.create_entity();
    world.add_component(e2, Position { x: 5.0, y: 5.0 }).unwrap();

    assert_eq!(as_set(world.query::<(Position, Velocity)>()), as_set(vec![e1]));
    assert_eq!(as_set(world.query::<(Position,)>()), as_set(vec![e1, e2]));
}

#[test]
fn test_intersection_matches_presence_checks() {
    for seed in 1..=8u64 {
        let world = World::new();
        let mut rng = Lcg(seed);

        let entities: Vec<_> = (0..200).map(|_| world.create_entity()).collect();
        for entity in &entities {
            let roll = rng.next();
            if roll % 2 == 0 {
                world.add_component(*entity, Position { x: 0.0, y: 0.0 }).unwrap();
            }
            if roll % 3 == 0 {
                world.add_component(*entity, Velocity { x: 0.0, y: 0.0 }).unwrap();
            }
            if roll % 5 == 0 {
                world.add_component(*entity, Health { value: 1 }).unwrap();
            }
        }
        // Shuffle the population a little with removals and destroys.
        for entity in &entities {
            match rng.next() % 10 {
                0 => world.destroy_entity(*entity),
                1 => {
                    world.remove_component::<Position>(*entity);
                }
                _ => {}
            }
        }

        let expected: HashSet<_> = world
            .get_entities()
            .into_iter()
            .filter(|e| world.has_component::<Position>(*e) && world.has_component::<Velocity>(*e))
            .collect();
        assert_eq!(as_set(world.query::<(Position, Velocity)>()), expected, "seed {seed}");

        let store_ids: HashSet<_> = world
            .component_store()
            .entities_with_all(&[ComponentTypeId::of::<Velocity>(), ComponentTypeId::of::<Position>()])
            .into_iter()
            .collect();
        let expected_ids: HashSet<_> = expected.iter().map(|e| e.id()).collect();
        assert_eq!(store_ids, expected_ids, "seed {seed}");
    }
}

#[test]
fn test_query_with_unused_component_is_empty() {
    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();

    assert!(world.query::<(Position, Dead)>().is_empty());
    assert!(world.query::<(Dead,)>().is_empty());
}

#[test]
fn test_query_updates_after_component_changes() {
    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Health { value: 10 }).unwrap();
    assert_eq!(world.query::<(Health, Dead)>(), Vec::<Entity>::new());

    world.add_component(entity, Dead).unwrap();
    assert_eq!(world.query::<(Health, Dead)>(), vec![entity]);

    world.remove_component::<Health>(entity);
    assert!(world.query::<(Health, Dead)>().is_empty());
    assert_eq!(world.query::<(Dead,)>(), vec![entity]);
}

#[test]
fn test_reusable_filter() {
    let world = World::new();
    let movement = Filter::new().with::<Position>().with::<Velocity>();

    let e1 = world.create_entity();
    world.add_component(e1, Position { x: 0.0, y: 0.0 }).unwrap();
    assert!(world.filter_entities(&movement).is_empty());

    world.add_component(e1, Velocity { x: 1.0, y: 0.0 }).unwrap();
    assert_eq!(world.filter_entities(&movement), vec![e1]);

    // The same filter works against an explicit entity list.
    let e2 = world.create_entity();
    let all = world.get_entities();
    assert_eq!(movement.filter_entities(&all, world.component_store()), vec![e1]);
    assert!(!movement.matches(e2, world.component_store()));
}

#[test]
fn test_destroyed_entities_leave_every_query() {
    let world = World::new();
    let entities: Vec<_> = (0..10).map(|_| world.create_entity()).collect();
    for entity in &entities {
        world.add_component(*entity, Position { x: 0.0, y: 0.0 }).unwrap();
        world.add_component(*entity, Health { value: 1 }).unwrap();
    }

    let victim = entities[3];
    assert!(world.query::<(Position, Health)>().contains(&victim));

    world.destroy_entity(victim);

    assert!(!world.query::<(Position, Health)>().contains(&victim));
    assert!(!world.query::<(Position,)>().contains(&victim));
    assert!(!world.query::<(Health,)>().contains(&victim));
    assert!(!world.get_entities().contains(&victim));
    assert_eq!(world.query::<(Position, Health)>().len(), 9);
}
