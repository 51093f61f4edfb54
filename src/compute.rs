//! The per-frame update step.
//!
//! `update` advances a `World` by one frame of real elapsed time.  Physics is
//! expressed in 60 Hz reference frames: `dt = dt_ms / frame_ms`.  Only some
//! quantities scale by `dt`:
//!
//! * player velocity, position and gravity apply once per tick, unscaled;
//! * entity motion, the invulnerability countdown and time score scale by `dt`;
//! * spawn timers count raw milliseconds.
//!
//! All randomness comes through the injected `rng` so callers control
//! determinism.

use rand::Rng;

use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::entities::{EntityKind, GameStatus, World};
use crate::input::InputLatch;
use crate::spawner::spawn_entities;

/// Advance the simulation by one frame.  Does nothing unless `Playing` when
/// called.
///
/// `dt_ms` that is negative or not finite is treated as zero.
pub fn update(
    world: &mut World,
    input: &InputLatch,
    config: &GameConfig,
    dt_ms: f64,
    rng: &mut impl Rng,
) {
    if world.status != GameStatus::Playing {
        return;
    }
    let dt_ms = sanitize_ms(dt_ms);
    let dt = dt_ms / config.physics.frame_ms;

    step_player(world, input, config);
    advance_entities(world, dt);
    purge_offscreen(world, config.physics.despawn_x);

    resolve_collisions(world, config);

    // Runs to completion even on the tick that ended the run.
    tick_invulnerability(world, dt);
    let score = world.score + config.rules.score_per_frame * dt;
    if score.is_finite() {
        world.score = score;
    }

    spawn_entities(world, config, dt_ms, rng);
}

fn sanitize_ms(dt_ms: f64) -> f64 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms
    } else {
        0.0
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Latch-driven movement, jump, gravity, integration, bounds and ground snap.
///
/// Runs once per tick regardless of `dt`.
pub fn step_player(world: &mut World, input: &InputLatch, config: &GameConfig) {
    let phys = &config.physics;
    let ground_y = world.ground_y;
    let width = world.width;
    let p = &mut world.player;

    p.vx = input.direction() * phys.move_speed;

    if input.jump_held && p.on_ground {
        p.vy = phys.jump_velocity;
        p.on_ground = false;
    }

    p.vy += phys.gravity;
    p.x += p.vx;
    p.y += p.vy;

    if p.x < phys.bound_margin {
        p.x = phys.bound_margin;
    }
    if p.x + p.w > width - phys.bound_margin {
        p.x = width - phys.bound_margin - p.w;
    }

    if p.y + p.h >= ground_y {
        p.y = ground_y - p.h;
        p.vy = 0.0;
        p.on_ground = true;
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Vertical bob applied to a flying enemy this tick.
///
/// A pure function of the session clock and the enemy's current x, so no
/// phase is stored on the entity.
pub fn flying_bob(clock_ms: f64, x: f64, dt: f64) -> f64 {
    (clock_ms / 200.0 + x * 0.02).sin() * 1.8 * dt
}

pub fn advance_entities(world: &mut World, dt: f64) {
    let clock_ms = world.clock_ms;
    for e in &mut world.entities {
        e.x += e.vx * dt;
        if e.kind == EntityKind::FlyingEnemy {
            e.y += flying_bob(clock_ms, e.x, dt);
        }
    }
}

/// Drop everything at or past the left despawn line.
pub fn purge_offscreen(world: &mut World, despawn_x: f64) {
    world.entities.retain(|e| e.x > despawn_x);
}

pub fn tick_invulnerability(world: &mut World, dt: f64) {
    let p = &mut world.player;
    if p.invuln_timer > 0.0 {
        p.invuln_timer = (p.invuln_timer - dt).max(0.0);
    }
}
