//! Component Lifecycle Integration Tests
//!
//! Tests focused on attaching, overwriting, reading and removing
//! components, and on the consistency of the reverse index.

use std::ops::ControlFlow;

use tickwork_ecs::{Component, ComponentTypeId, EcsError, Entity, World, WorldConfig};

#[derive(Clone, Debug, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Clone, Debug, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}
impl Component for Velocity {}

#[derive(Clone, Debug, PartialEq)]
struct Name {
    value: String,
}
impl Component for Name {}

#[test]
fn test_component_visible_until_removed() {
    let world = World::new();
    let entity = world.create_entity();

    world.add_component(entity, Position { x: 1.0, y: 2.0 }).unwrap();

    for _ in 0..3 {
        assert_eq!(
            world.get_component::<Position>(entity),
            Some(Position { x: 1.0, y: 2.0 })
        );
    }

    world.remove_component::<Position>(entity);
    assert_eq!(world.get_component::<Position>(entity), None);
}

#[test]
fn test_repeated_add_keeps_single_index_entry() {
    let world = World::new();
    let entity = world.create_entity();

    for i in 0..10 {
        world
            .add_component(
                entity,
                Name {
                    value: format!("name-{i}"),
                },
            )
            .unwrap();
    }

    let name = ComponentTypeId::of::<Name>();
    assert_eq!(world.component_store().count_with(name), 1);
    assert_eq!(world.query::<(Name,)>(), vec![entity]);
    assert_eq!(
        world.get_component::<Name>(entity).unwrap().value,
        "name-9"
    );
}

#[test]
fn test_remove_is_idempotent() {
    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Velocity { x: 1.0, y: 0.0 }).unwrap();

    assert!(world.remove_component::<Velocity>(entity).is_some());
    assert!(world.remove_component::<Velocity>(entity).is_none());
    assert!(world.remove_component::<Position>(entity).is_none());
    assert!(world.contains_entity(entity));
}

#[test]
fn test_removing_last_component_keeps_entity_alive() {
    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();

    world.remove_component::<Position>(entity);

    assert!(world.contains_entity(entity));
    assert_eq!(world.component_store().entity_count(), 0);

    // The entity can still receive components afterwards.
    world.add_component(entity, Velocity { x: 1.0, y: 1.0 }).unwrap();
    assert!(world.has_component::<Velocity>(entity));
}

#[test]
fn test_many_component_types_on_one_entity() {
    macro_rules! marker_components {
        ($($name:ident),*) => {
            $(
                #[derive(Clone, Debug, PartialEq)]
                struct $name(u8);
                impl Component for $name {}
            )*
        };
    }
    marker_components!(M0, M1, M2, M3, M4, M5, M6, M7, M8, M9);

    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, M0(0)).unwrap();
    world.add_component(entity, M1(1)).unwrap();
    world.add_component(entity, M2(2)).unwrap();
    world.add_component(entity, M3(3)).unwrap();
    world.add_component(entity, M4(4)).unwrap();
    world.add_component(entity, M5(5)).unwrap();
    world.add_component(entity, M6(6)).unwrap();
    world.add_component(entity, M7(7)).unwrap();
    world.add_component(entity, M8(8)).unwrap();
    world.add_component(entity, M9(9)).unwrap();

    assert_eq!(world.entity_components(entity).len(), 10);
    assert_eq!(world.get_component::<M0>(entity), Some(M0(0)));
    assert_eq!(world.get_component::<M9>(entity), Some(M9(9)));

    world.remove_component::<M5>(entity);
    assert_eq!(world.entity_components(entity).len(), 9);
    assert_eq!(world.query::<(M0, M9)>(), vec![entity]);
    assert!(world.query::<(M0, M5)>().is_empty());
}

#[test]
fn test_iterate_sees_every_component_once() {
    let world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();
    world.add_component(entity, Velocity { x: 0.0, y: 0.0 }).unwrap();
    world
        .add_component(
            entity,
            Name {
                value: "probe".to_string(),
            },
        )
        .unwrap();

    let mut ids = Vec::new();
    world.iterate_entity_components(entity, |id, component| {
        if id == ComponentTypeId::of::<Name>() {
            assert_eq!(component.downcast_ref::<Name>().unwrap().value, "probe");
        }
        ids.push(id);
        ControlFlow::Continue(())
    });

    let mut expected = vec![
        ComponentTypeId::of::<Position>(),
        ComponentTypeId::of::<Velocity>(),
        ComponentTypeId::of::<Name>(),
    ];
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn test_unknown_entity_handling_by_mode() {
    let strict = World::new();
    let stranger = Entity::new();
    assert_eq!(
        strict.add_component(stranger, Position { x: 0.0, y: 0.0 }),
        Err(EcsError::EntityNotAlive(stranger))
    );
    assert!(!strict.has_component::<Position>(stranger));

    let lenient = World::with_config(WorldConfig::default().with_strict_entity_liveness(false));
    lenient.add_component(stranger, Position { x: 0.0, y: 0.0 }).unwrap();
    assert!(lenient.has_component::<Position>(stranger));
    assert!(lenient.get_entities().is_empty());
}

#[test]
fn test_components_are_isolated_between_worlds() {
    let world1 = World::new();
    let world2 = World::new();

    let entity1 = world1.create_entity();
    let entity2 = world2.create_entity();

    world1.add_component(entity1, Position { x: 1.0, y: 1.0 }).unwrap();
    world2.add_component(entity2, Position { x: 2.0, y: 2.0 }).unwrap();

    assert!(world1.has_component::<Position>(entity1));
    assert!(!world1.has_component::<Position>(entity2));
    assert!(!world2.has_component::<Position>(entity1));
    assert_eq!(world1.query::<(Position,)>(), vec![entity1]);
    assert_eq!(world2.query::<(Position,)>(), vec![entity2]);

    // Entities of one world are not alive in another.
    assert!(world1.add_component(entity2, Velocity { x: 0.0, y: 0.0 }).is_err());
}
