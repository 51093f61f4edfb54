//! Player ↔ entity collision resolution.

use crate::config::GameConfig;
use crate::entities::{EntityKind, GameStatus, World};

/// What one resolver pass did, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub pickups: u32,
    /// Enemy contacts that cost a life.
    pub hits: u32,
    /// Enemy contacts absorbed by the invulnerability window.
    pub blocked: u32,
    pub game_over: bool,
}

/// Test every entity's hitbox against the player's full box and apply effects.
///
/// Walks the list back to front so consumed pickups can be removed in place.
/// Enemies are never removed by a hit.  Losing the last life finalizes
/// `best` and switches to `GameOver`; the rest of the list is still walked,
/// so pickups further down the list are collected.
pub fn resolve_collisions(world: &mut World, config: &GameConfig) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player_box = world.player.bounds();

    for i in (0..world.entities.len()).rev() {
        let entity = &world.entities[i];
        if !player_box.overlaps(&entity.hitbox()) {
            continue;
        }

        if entity.kind == EntityKind::Pickup {
            world.entities.remove(i);
            world.score += config.rules.pickup_bonus;
            report.pickups += 1;
            tracing::trace!(score = world.score, "picked up candy");
            continue;
        }

        if world.player.is_invulnerable() {
            report.blocked += 1;
            continue;
        }

        world.lives = world.lives.saturating_sub(1);
        world.player.invuln_timer = config.rules.invuln_frames;
        report.hits += 1;
        tracing::debug!(lives = world.lives, kind = ?entity.kind, "player hit");

        if world.lives == 0 && !report.game_over {
            finish_run(world);
            report.game_over = true;
        }
    }

    report
}

/// Fold the run's score into `best` and stop play.
pub fn finish_run(world: &mut World) {
    if world.score.is_finite() {
        world.best = world.best.max(world.score);
    }
    world.status = GameStatus::GameOver;
    tracing::info!(score = world.score.floor(), best = world.best.floor(), "game over");
}
