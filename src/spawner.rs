//! Timer-driven entity spawning.
//!
//! Both countdowns run on raw wall-clock milliseconds, not on the normalized
//! frame delta the rest of the physics uses.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind, World};

/// Count both timers down by `dt_ms` and append whatever came due.
///
/// At most one enemy and one pickup per call; an overdue timer is reset to a
/// fresh delay, not carried over.
pub fn spawn_entities(world: &mut World, config: &GameConfig, dt_ms: f64, rng: &mut impl Rng) {
    let cfg = &config.spawner;
    let spawn_x = world.width + cfg.spawn_offset;

    world.spawn_timer -= dt_ms;
    world.candy_timer -= dt_ms;

    if world.spawn_timer <= 0.0 {
        let roll: f64 = rng.gen();
        let (entity, delay) = if roll < cfg.ground_enemy_chance {
            (
                Entity::ground_enemy(spawn_x, world.ground_y),
                cfg.ground_enemy_delay.sample(rng),
            )
        } else {
            (
                Entity::flying_enemy(spawn_x),
                cfg.flying_enemy_delay.sample(rng),
            )
        };
        tracing::debug!(kind = ?entity.kind, next_in_ms = delay, "spawned enemy");
        world.entities.push(entity);
        world.spawn_timer = delay;
    }

    if world.candy_timer <= 0.0 {
        let delay = cfg.pickup_delay.sample(rng);
        world.entities.push(Entity::pickup(spawn_x, world.ground_y));
        world.candy_timer = delay;
        tracing::debug!(kind = ?EntityKind::Pickup, next_in_ms = delay, "spawned pickup");
    }
}
