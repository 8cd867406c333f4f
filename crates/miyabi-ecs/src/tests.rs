use miyabi_math::{Vec2, Vec3};

use crate::{
    component::{
        filter::{audit, Access},
        Column,
    },
    prelude::*,
};

fn pos(x: f32) -> Position {
    Position(Vec3::new(x, 0.0, 0.0))
}

fn vel(x: f32) -> Velocity {
    Velocity(Vec3::new(x, 0.0, 0.0))
}

fn button(text: &str) -> Button {
    Button {
        rect: Rect {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 40.0,
        },
        text: text.into(),
        action: ButtonAction::StartGame,
    }
}

/// Every archetype is dense and every row agrees with the location index.
fn assert_consistent(world: &World) {
    let mut rows = 0;
    for archetype in world.archetypes().archetypes() {
        assert!(archetype.is_dense(), "archetype {} is not dense", archetype.id());
        for (index, entity) in archetype.entities().iter().enumerate() {
            let location = world.location(*entity).unwrap();
            assert_eq!(location.archetype(), archetype.id());
            assert_eq!(location.index(), index);
        }
        rows += archetype.len();
    }
    assert_eq!(rows, world.len());
}

/// Entity handles count up from zero and are never reused.
#[test]
fn entity_ids_are_monotonic() {
    let mut world = World::new();

    let e0 = world.spawn((pos(0.0),)).unwrap();
    let e1 = world.spawn((pos(1.0),)).unwrap();
    assert_eq!(e0.id(), 0);
    assert_eq!(e1.id(), 1);

    world.despawn(e0).unwrap();
    let e2 = world.spawn((pos(2.0),)).unwrap();
    assert_eq!(e2.id(), 2);
    assert!(!world.contains(e0));
}

/// Spawned components can be read back unchanged.
#[test]
fn spawn_then_get() {
    let mut world = World::new();

    let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
    let entity = world
        .spawn((transform, Material { texture_handle: 7 }, Sprite))
        .unwrap();

    assert_eq!(*world.get::<Transform>(entity).unwrap(), transform);
    assert_eq!(world.get::<Material>(entity).unwrap().texture_handle, 7);
    assert_eq!(*world.get::<Sprite>(entity).unwrap(), Sprite);
    assert_eq!(world.len(), 1);
    assert_consistent(&world);
}

/// Pack order does not matter. Equal sets of components share one archetype.
#[test]
fn signature_is_order_independent() {
    let mut world = World::new();

    let a = world.spawn((pos(1.0), vel(2.0))).unwrap();
    let b = world.spawn((vel(3.0), pos(4.0))).unwrap();

    assert_eq!(world.archetypes().len(), 1);
    assert_eq!(
        world.location(a).unwrap().archetype(),
        world.location(b).unwrap().archetype()
    );
    assert_eq!(*world.get::<Velocity>(b).unwrap(), vel(3.0));
    assert_eq!(*world.get::<Position>(b).unwrap(), pos(4.0));
    assert_consistent(&world);
}

/// An entity without components is still alive.
#[test]
fn spawn_empty() {
    let mut world = World::new();

    let entity = world.spawn(()).unwrap();
    assert!(world.contains(entity));
    assert!(world.signature_of(entity).unwrap().is_empty());
    assert_eq!(
        world.get::<Position>(entity),
        Err(EcsError::MissingComponent {
            entity,
            component: ComponentType::Position
        })
    );

    world.despawn(entity).unwrap();
    assert!(world.is_empty());
}

/// Packs built at runtime land in the same archetype as the equivalent static pack.
#[test]
fn spawn_dynamic_pack() {
    let mut world = World::new();

    let a = world.spawn((pos(1.0), Material { texture_handle: 2 })).unwrap();
    let b = world
        .spawn(vec![
            ComponentValue::from(Material { texture_handle: 5 }),
            pos(6.0).into_value(),
        ])
        .unwrap();

    assert_eq!(world.archetypes().len(), 1);
    assert_eq!(world.signature_of(a), world.signature_of(b));
    assert_eq!(world.get::<Material>(b).unwrap().texture_handle, 5);
    assert_eq!(*world.get::<Position>(b).unwrap(), pos(6.0));
    assert_consistent(&world);
}

/// A pack naming a component twice is rejected without consuming an identifier.
#[test]
fn duplicate_pack_rejected() {
    let mut world = World::new();

    assert_eq!(
        world.spawn((pos(1.0), vel(1.0), pos(2.0))),
        Err(EcsError::DuplicateComponent(ComponentType::Position))
    );
    assert_eq!(
        world.spawn(vec![ComponentValue::from(Sprite), Sprite.into()]),
        Err(EcsError::DuplicateComponent(ComponentType::Sprite))
    );
    assert!(world.is_empty());
    assert!(world.archetypes().is_empty());

    let entity = world.spawn((pos(1.0),)).unwrap();
    assert_eq!(entity.id(), 0);
}

/// Batches are validated up front.
#[test]
fn spawn_batch() {
    let mut world = World::new();

    let entities = world
        .spawn_batch((0..100).map(|i| (pos(i as f32), vel(1.0))))
        .unwrap();
    assert_eq!(entities.len(), 100);
    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(entity.id(), i as u64);
        assert_eq!(*world.get::<Position>(*entity).unwrap(), pos(i as f32));
    }

    let packs = vec![
        vec![ComponentValue::from(pos(0.0))],
        vec![ComponentValue::from(vel(0.0)), vel(1.0).into()],
    ];
    assert_eq!(
        world.spawn_batch(packs),
        Err(EcsError::DuplicateComponent(ComponentType::Velocity))
    );
    assert_eq!(world.len(), 100);
    assert_consistent(&world);
}

/// Destroying an entity moves the last row of its archetype into the hole.
#[test]
fn despawn_swaps_last_row() {
    let mut world = World::new();

    let e1 = world.spawn((pos(1.0), vel(1.0))).unwrap();
    let e2 = world.spawn((pos(2.0), vel(2.0))).unwrap();
    let e3 = world.spawn((pos(3.0), vel(3.0))).unwrap();

    world.despawn(e1).unwrap();

    let location = world.location(e3).unwrap();
    assert_eq!(location.index(), 0);
    assert_eq!(world.location(e2).unwrap().index(), 1);

    let archetype = world.archetypes().get(location.archetype());
    assert_eq!(archetype.entities(), &[e3, e2]);
    assert_eq!(
        archetype.components::<Position>().unwrap(),
        &[pos(3.0), pos(2.0)]
    );
    assert_eq!(
        archetype.components::<Velocity>().unwrap(),
        &[vel(3.0), vel(2.0)]
    );

    assert_eq!(world.location(e1), Err(EcsError::UnknownEntity(e1)));
    assert_consistent(&world);
}

/// Destroying the last row moves nothing.
#[test]
fn despawn_last_row() {
    let mut world = World::new();

    let e1 = world.spawn((pos(1.0),)).unwrap();
    let e2 = world.spawn((pos(2.0),)).unwrap();

    world.despawn(e2).unwrap();
    assert_eq!(world.location(e1).unwrap().index(), 0);
    assert_eq!(*world.get::<Position>(e1).unwrap(), pos(1.0));
    assert_consistent(&world);
}

/// Destroying an unknown or already destroyed entity fails and changes nothing.
#[test]
fn despawn_unknown_entity() {
    let mut world = World::new();

    let entity = world.spawn((pos(1.0),)).unwrap();
    let bogus = Entity::from_raw(1234);

    assert_eq!(world.despawn(bogus), Err(EcsError::UnknownEntity(bogus)));
    world.despawn(entity).unwrap();
    assert_eq!(world.despawn(entity), Err(EcsError::UnknownEntity(entity)));
    assert!(world.is_empty());
    assert_consistent(&world);
}

/// Adding components at runtime moves the entity and keeps its existing data.
#[test]
fn add_components() {
    let mut world = World::new();

    let entities = world.spawn_batch((0..4).map(|i| (pos(i as f32),))).unwrap();

    world.add_component(entities[1], vel(1.0)).unwrap();
    world.add_component(entities[2], Sprite).unwrap();
    world.add_component(entities[3], vel(3.0)).unwrap();
    world.add_component(entities[3], Sprite).unwrap();

    assert_eq!(world.view::<&Position>().unwrap().count(), 4);
    assert_eq!(world.view::<&Velocity>().unwrap().count(), 2);
    assert_eq!(world.view::<&Sprite>().unwrap().count(), 2);
    assert_eq!(world.view::<(&Position, &Velocity)>().unwrap().count(), 2);
    assert_eq!(world.view::<(&Position, &Sprite)>().unwrap().count(), 2);
    assert_eq!(
        world
            .view::<(&Position, &Velocity, &Sprite)>()
            .unwrap()
            .count(),
        1
    );

    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(*world.get::<Position>(*entity).unwrap(), pos(i as f32));
    }
    assert_eq!(*world.get::<Velocity>(entities[3]).unwrap(), vel(3.0));
    assert_eq!(
        world.signature_of(entities[3]).unwrap(),
        &[
            ComponentType::Position,
            ComponentType::Velocity,
            ComponentType::Sprite
        ]
        .into_iter()
        .collect::<Signature>()
    );
    assert_consistent(&world);
}

/// Adding a component the entity already has fails and keeps the old value.
#[test]
fn add_existing_component() {
    let mut world = World::new();

    let entity = world.spawn((pos(1.0), vel(1.0))).unwrap();
    let before = world.location(entity).unwrap();

    assert_eq!(
        world.add_component(entity, pos(9.0)),
        Err(EcsError::InvalidComponentOperation {
            entity,
            component: ComponentType::Position,
            reason: "entity already has this component",
        })
    );
    assert_eq!(*world.get::<Position>(entity).unwrap(), pos(1.0));
    assert_eq!(world.location(entity).unwrap(), before);
    assert_eq!(world.archetypes().len(), 1);

    let bogus = Entity::from_raw(99);
    assert_eq!(
        world.add_component(bogus, Sprite),
        Err(EcsError::UnknownEntity(bogus))
    );
}

/// Removing components at runtime moves the entity and drops only the removed data.
#[test]
fn remove_components() {
    let mut world = World::new();

    let entities = world
        .spawn_batch((0..4).map(|i| (pos(i as f32), vel(i as f32), Sprite)))
        .unwrap();

    world.remove_component::<Velocity>(entities[1]).unwrap();
    world.remove_component::<Sprite>(entities[2]).unwrap();
    world
        .remove_component_by_type(entities[3], ComponentType::Velocity)
        .unwrap();
    world.remove_component::<Sprite>(entities[3]).unwrap();

    assert_eq!(world.view::<&Position>().unwrap().count(), 4);
    assert_eq!(world.view::<&Velocity>().unwrap().count(), 2);
    assert_eq!(world.view::<&Sprite>().unwrap().count(), 2);
    assert_eq!(
        world
            .view::<(&Position, &Velocity, &Sprite)>()
            .unwrap()
            .count(),
        1
    );

    assert_eq!(*world.get::<Velocity>(entities[2]).unwrap(), vel(2.0));
    assert_eq!(
        world.get::<Velocity>(entities[1]),
        Err(EcsError::MissingComponent {
            entity: entities[1],
            component: ComponentType::Velocity
        })
    );
    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(*world.get::<Position>(*entity).unwrap(), pos(i as f32));
    }
    assert_consistent(&world);
}

/// Removing a component the entity lacks fails and changes nothing.
#[test]
fn remove_missing_component() {
    let mut world = World::new();

    let entity = world.spawn((pos(1.0),)).unwrap();
    let before = world.location(entity).unwrap();

    assert_eq!(
        world.remove_component::<Velocity>(entity),
        Err(EcsError::InvalidComponentOperation {
            entity,
            component: ComponentType::Velocity,
            reason: "entity does not have this component",
        })
    );
    assert_eq!(world.location(entity).unwrap(), before);
    assert_eq!(world.archetypes().len(), 1);

    // Removing the only component leaves a live entity with nothing attached
    world.remove_component::<Position>(entity).unwrap();
    assert!(world.contains(entity));
    assert!(world.signature_of(entity).unwrap().is_empty());
    assert_consistent(&world);
}

/// Migrating out of the middle of an archetype fixes up the entity that fills the hole.
#[test]
fn migration_updates_moved_entity() {
    let mut world = World::new();

    let e1 = world.spawn((pos(1.0),)).unwrap();
    let e2 = world.spawn((pos(2.0),)).unwrap();
    let e3 = world.spawn((pos(3.0),)).unwrap();

    world.add_component(e1, vel(1.0)).unwrap();

    assert_eq!(world.location(e3).unwrap().index(), 0);
    assert_eq!(world.location(e2).unwrap().index(), 1);
    assert_eq!(world.location(e1).unwrap().index(), 0);
    assert_eq!(*world.get::<Position>(e3).unwrap(), pos(3.0));
    assert_consistent(&world);
}

/// Components can be modified in place.
#[test]
fn get_mut() {
    let mut world = World::new();

    let entity = world.spawn((button("Start"),)).unwrap();
    world.get_mut::<Button>(entity).unwrap().text.push_str(" Game");
    assert_eq!(world.get::<Button>(entity).unwrap().text, "Start Game");

    assert_eq!(
        world.get_mut::<Sprite>(entity).err(),
        Some(EcsError::MissingComponent {
            entity,
            component: ComponentType::Sprite
        })
    );
}

/// Only matching archetypes are visited and writes are visible afterwards.
#[test]
fn query_three_archetypes() {
    let mut world = World::new();

    let a = world.spawn((pos(0.0), vel(1.0))).unwrap();
    let b = world.spawn((pos(0.0),)).unwrap();
    let c = world.spawn((pos(0.0), vel(2.0), Sprite)).unwrap();

    let mut visited = Vec::default();
    for (entity, (position, velocity)) in world.query::<(&mut Position, &Velocity)>().unwrap() {
        position.0 += velocity.0;
        visited.push(entity);
    }

    assert_eq!(visited, vec![a, c]);
    assert_eq!(*world.get::<Position>(a).unwrap(), pos(1.0));
    assert_eq!(*world.get::<Position>(b).unwrap(), pos(0.0));
    assert_eq!(*world.get::<Position>(c).unwrap(), pos(2.0));
}

/// Only the archetype holding both requested components is visited.
#[test]
fn query_skips_partial_matches() {
    let mut world = World::new();

    world.spawn((pos(0.0),)).unwrap();
    let moving = world
        .spawn_batch((0..3).map(|i| (pos(i as f32), vel(10.0))))
        .unwrap();
    world.spawn((vel(5.0),)).unwrap();
    assert_eq!(world.archetypes().len(), 3);

    let mut visited = Vec::default();
    for (entity, (position, velocity)) in world.query::<(&mut Position, &Velocity)>().unwrap() {
        position.0 += velocity.0;
        visited.push(entity);
    }
    assert_eq!(visited, moving);

    let positions: Vec<_> = world
        .query::<(&mut Position, &Velocity)>()
        .unwrap()
        .map(|(_, (position, _))| *position)
        .collect();
    assert_eq!(positions, vec![pos(10.0), pos(11.0), pos(12.0)]);
}

/// Destroying one entity leaves another's data untouched.
#[test]
fn despawn_leaves_others_intact() {
    let mut world = World::new();

    let f = world.spawn((pos(7.0), vel(8.0))).unwrap();
    let e = world.spawn((pos(1.0), vel(2.0))).unwrap();

    world.despawn(f).unwrap();
    assert_eq!(*world.get::<Position>(e).unwrap(), pos(1.0));
    assert_eq!(*world.get::<Velocity>(e).unwrap(), vel(2.0));
    assert_consistent(&world);
}

/// Archetypes are visited in creation order and rows in storage order.
#[test]
fn query_order() {
    let mut world = World::new();

    let a0 = world.spawn((pos(0.0), Sprite)).unwrap();
    let b0 = world.spawn((pos(1.0),)).unwrap();
    let a1 = world.spawn((pos(2.0), Sprite)).unwrap();
    let b1 = world.spawn((pos(3.0),)).unwrap();

    let order: Vec<_> = world.view::<&Position>().unwrap().map(|(e, _)| e).collect();
    assert_eq!(order, vec![a0, a1, b0, b1]);
}

/// A query's length is exact and shrinks as it is consumed.
#[test]
fn query_len() {
    let mut world = World::new();

    world
        .spawn_batch((0..10).map(|i| (pos(i as f32),)))
        .unwrap();
    world
        .spawn_batch((0..5).map(|i| (pos(i as f32), Sprite)))
        .unwrap();

    let mut query = world.query::<&mut Position>().unwrap();
    assert_eq!(query.len(), 15);
    query.next();
    query.next();
    assert_eq!(query.len(), 13);
    assert_eq!(query.size_hint(), (13, Some(13)));
    assert_eq!(query.count(), 13);
}

/// Queries matching nothing yield nothing.
#[test]
fn empty_query() {
    let mut world = World::new();
    assert!(world.query::<&mut Position>().unwrap().is_empty());

    let entity = world.spawn((pos(1.0), vel(1.0))).unwrap();
    assert_eq!(world.query::<(&Position, &Sprite)>().unwrap().next(), None);

    // Empty archetypes are skipped
    world.despawn(entity).unwrap();
    let query = world.query::<(&mut Position, &Velocity)>().unwrap();
    assert_eq!(query.len(), 0);
    assert_eq!(query.count(), 0);
}

/// Filters that would alias a mutable reference are rejected before iteration.
#[test]
fn query_borrow_conflict() {
    let mut world = World::new();
    world.spawn((pos(1.0), vel(1.0))).unwrap();

    assert_eq!(
        world.query::<(&mut Position, &Position)>().err(),
        Some(EcsError::BorrowConflict(ComponentType::Position))
    );
    assert_eq!(
        world.query::<(&Velocity, &mut Position, &mut Position)>().err(),
        Some(EcsError::BorrowConflict(ComponentType::Position))
    );

    // Shared reads of the same component are fine
    assert_eq!(world.view::<(&Position, &Position)>().unwrap().count(), 1);
}

/// The aliasing audit on raw access lists.
#[test]
fn access_audit() {
    let read = Access {
        component: ComponentType::Transform,
        mutable: false,
    };
    let write = Access {
        component: ComponentType::Transform,
        mutable: true,
    };
    let other = Access {
        component: ComponentType::Material,
        mutable: true,
    };

    assert_eq!(audit(&[read, read, other]), Ok(()));
    assert_eq!(
        audit(&[write, other, read]),
        Err(EcsError::BorrowConflict(ComponentType::Transform))
    );
    assert_eq!(
        audit(&[write, write]),
        Err(EcsError::BorrowConflict(ComponentType::Transform))
    );
    assert_eq!(Access::of::<&mut Material>(), other);
}

/// Any number of read only views may be alive at once.
#[test]
fn simultaneous_views() {
    let mut world = World::new();
    world
        .spawn_batch((0..3).map(|i| (Transform::from_position(Vec3::splat(i as f32)), Sprite)))
        .unwrap();

    let transforms = world.view::<&Transform>().unwrap();
    let sprites = world.view::<(&Sprite, &Transform)>().unwrap();
    for ((e1, transform), (e2, (_, other))) in transforms.zip(sprites) {
        assert_eq!(e1, e2);
        assert_eq!(transform, other);
    }
}

/// Clearing by component removes exactly the entities holding it.
#[test]
fn clear_entities_of_component() {
    let mut world = World::new();

    let keep = world
        .spawn_batch((0..3).map(|i| (pos(i as f32),)))
        .unwrap();
    let removed = world
        .spawn_batch((0..4).map(|_| (Transform::default(), Material::default(), Sprite)))
        .unwrap();
    let drop_too = world.spawn((pos(9.0), Sprite)).unwrap();

    assert_eq!(world.clear_entities_of_component(ComponentType::Sprite), 5);
    assert_eq!(world.len(), 3);
    for entity in removed.iter().chain([&drop_too]) {
        assert!(!world.contains(*entity));
    }
    for (i, entity) in keep.iter().enumerate() {
        assert_eq!(*world.get::<Position>(*entity).unwrap(), pos(i as f32));
    }
    assert_eq!(world.clear_entities_of_component(ComponentType::Button), 0);
    assert_consistent(&world);

    let next = world.spawn((Sprite,)).unwrap();
    assert_eq!(next.id(), 8);
}

/// Clearing the world keeps the identifier counter going.
#[test]
fn clear_keeps_counter() {
    let mut world = World::new();

    world.spawn_batch((0..5).map(|i| (pos(i as f32),))).unwrap();
    world.clear();

    assert!(world.is_empty());
    assert_eq!(world.view::<&Position>().unwrap().count(), 0);
    assert_eq!(world.spawn((pos(0.0),)).unwrap().id(), 5);
    assert_consistent(&world);
}

/// Interleaved structural changes never break density or the location index.
#[test]
fn structural_stress() {
    let mut world = World::with_capacity(64);
    let mut alive = Vec::default();
    let mut seed: u32 = 0x1234_5678;
    let mut next = || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        seed >> 8
    };

    for step in 0..2000 {
        match next() % 6 {
            0 | 1 => alive.push(world.spawn((pos(step as f32),)).unwrap()),
            2 if !alive.is_empty() => {
                let entity = alive.swap_remove(next() as usize % alive.len());
                world.despawn(entity).unwrap();
            }
            3 if !alive.is_empty() => {
                let entity = alive[next() as usize % alive.len()];
                let _ = world.add_component(entity, vel(1.0));
            }
            4 if !alive.is_empty() => {
                let entity = alive[next() as usize % alive.len()];
                let _ = world.remove_component::<Velocity>(entity);
            }
            5 if !alive.is_empty() => {
                let entity = alive[next() as usize % alive.len()];
                let _ = world.add_component(entity, Sprite);
            }
            _ => {}
        }
    }

    assert_eq!(world.len(), alive.len());
    assert_consistent(&world);
}

/// A snapshot survives a trip through bincode.
#[test]
fn snapshot_bincode_round_trip() {
    let mut world = World::new();

    let player = world.spawn((pos(1.5), vel(-0.5))).unwrap();
    let menu = world.spawn((button("Quit"),)).unwrap();
    let gone = world.spawn((Sprite,)).unwrap();
    world.despawn(gone).unwrap();

    let snapshot = world.export();
    assert_eq!(snapshot.next_entity, 3);
    // The sprite archetype is empty and left out
    assert_eq!(snapshot.archetypes.len(), 2);

    let bytes = bincode::serialize(&snapshot).unwrap();
    let decoded: WorldSnapshot = bincode::deserialize(&bytes).unwrap();
    let mut imported = World::import(decoded).unwrap();

    assert_eq!(imported.len(), 2);
    assert_eq!(*imported.get::<Velocity>(player).unwrap(), vel(-0.5));
    assert_eq!(imported.get::<Button>(menu).unwrap().text, "Quit");
    assert!(!imported.contains(gone));
    assert_eq!(imported.export(), snapshot);
    assert_consistent(&imported);

    assert_eq!(imported.spawn(()).unwrap().id(), 3);
}

/// A snapshot survives a trip through RON.
#[test]
fn snapshot_ron_round_trip() {
    let mut world = World::new();

    world
        .spawn_batch((0..3).map(|i| {
            (
                Transform::from_position(Vec3::new(i as f32, 2.0, 0.5)),
                Material { texture_handle: i },
            )
        }))
        .unwrap();
    world.spawn((button("Start"), Sprite)).unwrap();

    let snapshot = world.export();
    let text = ron::to_string(&snapshot).unwrap();
    let decoded: WorldSnapshot = ron::from_str(&text).unwrap();
    assert_eq!(decoded, snapshot);

    let imported = World::import(decoded).unwrap();
    assert_eq!(imported.view::<&Material>().unwrap().count(), 3);
    assert_consistent(&imported);
}

/// Moving a world into a snapshot gives the same result as copying it.
#[test]
fn into_snapshot_matches_export() {
    let mut world = World::new();
    world.spawn((pos(1.0), vel(2.0))).unwrap();
    world.spawn((Material { texture_handle: 4 },)).unwrap();

    let exported = world.export();
    assert_eq!(world.into_snapshot(), exported);
}

/// Column order within an archetype snapshot does not matter, and the counter is moved past the
/// highest imported entity.
#[test]
fn import_normalizes() {
    let snapshot = WorldSnapshot {
        next_entity: 0,
        archetypes: vec![ArchetypeSnapshot {
            entities: vec![Entity::from_raw(4), Entity::from_raw(10)],
            columns: vec![
                Column::Velocity(vec![vel(1.0), vel(2.0)]),
                Column::Position(vec![pos(1.0), pos(2.0)]),
            ],
        }],
    };

    let mut world = World::import(snapshot).unwrap();
    assert_eq!(
        *world.get::<Velocity>(Entity::from_raw(10)).unwrap(),
        vel(2.0)
    );
    assert_consistent(&world);
    assert_eq!(world.spawn(()).unwrap().id(), 11);
}

/// Malformed snapshots are rejected.
#[test]
fn import_rejects_corrupt() {
    fn reject(archetypes: Vec<ArchetypeSnapshot>) {
        let snapshot = WorldSnapshot {
            next_entity: 100,
            archetypes,
        };
        assert!(matches!(
            World::import(snapshot),
            Err(EcsError::CorruptSnapshot { .. })
        ));
    }

    let e = Entity::from_raw;

    // Column shorter than the entity list
    reject(vec![ArchetypeSnapshot {
        entities: vec![e(0), e(1)],
        columns: vec![Column::Position(vec![pos(0.0)])],
    }]);

    // Same column type twice
    reject(vec![ArchetypeSnapshot {
        entities: vec![e(0)],
        columns: vec![
            Column::Sprite(vec![Sprite]),
            Column::Sprite(vec![Sprite]),
        ],
    }]);

    // Entity in two archetypes
    reject(vec![
        ArchetypeSnapshot {
            entities: vec![e(0)],
            columns: vec![Column::Sprite(vec![Sprite])],
        },
        ArchetypeSnapshot {
            entities: vec![e(0)],
            columns: vec![Column::Position(vec![pos(0.0)])],
        },
    ]);

    // Two archetypes with one signature
    reject(vec![
        ArchetypeSnapshot {
            entities: vec![e(0)],
            columns: vec![Column::Sprite(vec![Sprite])],
        },
        ArchetypeSnapshot {
            entities: vec![e(1)],
            columns: vec![Column::Sprite(vec![Sprite])],
        },
    ]);
}

/// Signatures behave as sorted sets.
#[test]
fn signature_set_operations() {
    let mut signature = Signature::new();
    assert!(!signature.add(ComponentType::Sprite));
    assert!(!signature.add(ComponentType::Position));
    assert!(signature.add(ComponentType::Sprite));
    assert_eq!(
        signature.as_slice(),
        &[ComponentType::Position, ComponentType::Sprite]
    );
    assert_eq!(signature.to_string(), "{Position, Sprite}");

    let position: Signature = [ComponentType::Position].into_iter().collect();
    let button: Signature = [ComponentType::Button].into_iter().collect();
    assert!(position.subset_of(&signature));
    assert!(signature.superset_of(&position));
    assert!(button.disjoint(&signature));
    assert!(Signature::new().subset_of(&button));

    assert!(signature.remove(ComponentType::Sprite));
    assert!(!signature.remove(ComponentType::Sprite));
    assert_eq!(signature, position);
}

/// Menu buttons hit-test their rectangle.
#[test]
fn button_hit_test() {
    let start = button("Start");
    assert!(start.rect.contains(Vec2::new(10.0, 10.0)));
    assert!(start.rect.contains(Vec2::new(60.0, 30.0)));
    assert!(!start.rect.contains(Vec2::new(111.0, 30.0)));
}

/// The registry maps every tag to a column of the matching kind.
#[test]
fn registry_columns() {
    for ty in ComponentType::ALL {
        let column = Column::new(*ty);
        assert_eq!(column.component_type(), *ty);
        assert!(column.is_empty());
        assert_eq!(column.value(0), None);
    }

    let mut world = World::new();
    let entity = world.spawn((Material { texture_handle: 3 },)).unwrap();
    let location = world.location(entity).unwrap();
    let column = world
        .archetypes()
        .get(location.archetype())
        .column(ComponentType::Material)
        .unwrap();
    assert_eq!(
        column.value(location.index()),
        Some(ComponentValue::Material(Material { texture_handle: 3 }))
    );
    assert_eq!(ComponentType::Button.to_string(), "Button");
}
