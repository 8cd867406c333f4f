use std::time::{Duration, Instant};

use miyabi_ecs::prelude::*;
use miyabi_math::Vec3;

const WARMUP_COUNT: usize = 5;
const ITER_COUNT: usize = 30;
const SPRITE_COUNT: usize = 10_000;
const SCENE_ENTITY_COUNT: usize = 5_000;

/// What the renderer needs per drawn sprite.
#[allow(dead_code)]
struct Renderable {
    transform: Transform,
    texture_id: u32,
}

fn main() -> Result<(), EcsError> {
    let world = sprite_world(SPRITE_COUNT)?;
    let extract = run(|| {
        let renderables = extract_renderables(&world).expect("read only filter");
        assert_eq!(renderables.len(), SPRITE_COUNT);
    });

    let cycle = run(|| {
        let removed = construct_destruct(SCENE_ENTITY_COUNT).expect("valid packs");
        assert_eq!(removed, SCENE_ENTITY_COUNT);
    });

    let mut world = sprite_world(SPRITE_COUNT)?;
    let update = run(|| {
        for (_, transform) in world.query::<&mut Transform>().expect("single access") {
            transform.rotation.z += 0.01;
        }
    });

    println!("sprite extraction        : {} ns", extract.as_nanos());
    println!("scene construct/destruct : {} ns", cycle.as_nanos());
    println!("transform update         : {} ns", update.as_nanos());

    Ok(())
}

/// Average duration of `f` over `ITER_COUNT` runs after warming up.
fn run(mut f: impl FnMut()) -> Duration {
    for _ in 0..WARMUP_COUNT {
        f();
    }

    let mut dur = Duration::default();
    for _ in 0..ITER_COUNT {
        let start = Instant::now();
        f();
        dur += Instant::now().duration_since(start);
    }

    dur.div_f64(ITER_COUNT as f64)
}

fn sprite(i: usize, columns: usize, spacing: f32) -> (Transform, Material, Sprite) {
    let x = (i % columns) as f32 * spacing;
    let y = (i / columns) as f32 * spacing;
    (
        Transform {
            position: Vec3::new(x, y, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(10.0, 10.0, 1.0),
        },
        Material { texture_handle: 1 },
        Sprite,
    )
}

fn sprite_world(count: usize) -> Result<World, EcsError> {
    let mut world = World::with_capacity(count);
    world.spawn_batch((0..count).map(|i| sprite(i, 200, 4.0)))?;
    Ok(world)
}

fn extract_renderables(world: &World) -> Result<Vec<Renderable>, EcsError> {
    Ok(world
        .view::<(&Transform, &Material)>()?
        .map(|(_, (transform, material))| Renderable {
            transform: *transform,
            texture_id: material.texture_handle,
        })
        .collect())
}

fn construct_destruct(count: usize) -> Result<usize, EcsError> {
    let mut world = World::new();
    for i in 0..count {
        world.spawn(sprite(i, 100, 8.0))?;
    }
    Ok(world.clear_entities_of_component(ComponentType::Sprite))
}
