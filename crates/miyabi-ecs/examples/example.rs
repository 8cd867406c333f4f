use miyabi_ecs::prelude::*;
use miyabi_log::{LevelFilter, LogSettings};
use miyabi_math::Vec3;

const PHYSICS_STEP: f32 = 1.0 / 30.0;

fn physics(world: &mut World, delta: f32) -> Result<(), EcsError> {
    for (entity, (position, velocity)) in world.query::<(&mut Position, &Velocity)>()? {
        position.0 += velocity.0 * delta;
        println!("{}: {}", entity, position.0);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    miyabi_log::try_init(LogSettings {
        filter: LevelFilter::Debug,
        directory: None,
    })?;

    let mut world = World::new();

    let player = world.spawn((
        Position(Vec3::ZERO),
        Velocity(Vec3::new(1.0, -1.0, 0.0)),
    ))?;
    let rock = world.spawn((Position(Vec3::new(5.0, 0.0, 0.0)),))?;

    for _ in 0..3 {
        physics(&mut world, PHYSICS_STEP)?;
    }

    // Stop the player and start the rock
    world.remove_component::<Velocity>(player)?;
    world.add_component(rock, Velocity(Vec3::X))?;
    physics(&mut world, PHYSICS_STEP)?;

    for (entity, position) in world.view::<&Position>()? {
        println!("final {}: {}", entity, position.0);
    }

    Ok(())
}
