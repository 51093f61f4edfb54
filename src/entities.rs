//! All game entity types — plain data plus a few geometric helpers.
//!
//! Nothing here draws.  The renderer dispatches on `EntityKind` itself.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first run; the start prompt is showing.
    Idle,
    Playing,
    GameOver,
}

// ── Moving objects ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    /// Walks along the ground.  `hitbox_y_offset` trims the top of its
    /// collision box so the player can clip the skull without a hit.
    GroundEnemy { hitbox_y_offset: f64 },
    /// Bobs vertically as a function of the session clock and its own x.
    FlyingEnemy,
    Pickup,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Horizontal speed in world units per reference frame.
    pub vx: f64,
    pub kind: EntityKind,
}

impl Entity {
    pub fn ground_enemy(x: f64, ground_y: f64) -> Self {
        Self {
            x,
            y: ground_y - 24.0,
            w: 28.0,
            h: 28.0,
            vx: -4.5,
            kind: EntityKind::GroundEnemy { hitbox_y_offset: 6.0 },
        }
    }

    /// Base height is fixed at creation; only the per-tick bob moves it later.
    pub fn flying_enemy(x: f64) -> Self {
        Self {
            x,
            y: 240.0 + (x * 0.02).sin() * 40.0,
            w: 32.0,
            h: 18.0,
            vx: -6.0,
            kind: EntityKind::FlyingEnemy,
        }
    }

    pub fn pickup(x: f64, ground_y: f64) -> Self {
        Self {
            x,
            y: ground_y - 40.0,
            w: 16.0,
            h: 16.0,
            vx: -4.5,
            kind: EntityKind::Pickup,
        }
    }

    pub fn is_enemy(&self) -> bool {
        !matches!(self.kind, EntityKind::Pickup)
    }

    pub fn hitbox_y_offset(&self) -> f64 {
        match self.kind {
            EntityKind::GroundEnemy { hitbox_y_offset } => hitbox_y_offset,
            _ => 0.0,
        }
    }

    /// Collision box, shrunk from the top by the kind's hitbox offset.
    pub fn hitbox(&self) -> Rect {
        let offset = self.hitbox_y_offset();
        Rect {
            x: self.x,
            y: self.y + offset,
            w: self.w,
            h: self.h - offset,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vx: f64,
    pub vy: f64,
    pub on_ground: bool,
    /// Reference frames of damage immunity left.
    pub invuln_timer: f64,
}

impl Player {
    /// Standing on the ground near the left edge.
    pub fn new(ground_y: f64) -> Self {
        let h = 48.0;
        Self {
            x: 120.0,
            y: ground_y - h,
            w: 36.0,
            h,
            vx: 0.0,
            vy: 0.0,
            on_ground: true,
            invuln_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the update step mutates and the renderer reads.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    /// Spawn order.
    pub entities: Vec<Entity>,
    /// Raw accumulator; displays floor it.
    pub score: f64,
    /// Highest score finalized at a game over this session.
    pub best: f64,
    pub lives: u32,
    /// Milliseconds until the next enemy.
    pub spawn_timer: f64,
    /// Milliseconds until the next pickup.
    pub candy_timer: f64,
    pub status: GameStatus,
    /// Session time in ms; keeps running across restarts.
    pub clock_ms: f64,
    pub width: f64,
    pub height: f64,
    pub ground_y: f64,
}

impl World {
    /// A fresh session waiting on the start prompt.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config.world.ground_y),
            entities: Vec::new(),
            score: 0.0,
            best: 0.0,
            lives: config.rules.starting_lives,
            spawn_timer: config.spawner.initial_enemy_timer,
            candy_timer: config.spawner.initial_pickup_timer,
            status: GameStatus::Idle,
            clock_ms: 0.0,
            width: config.world.width,
            height: config.world.height,
            ground_y: config.world.ground_y,
        }
    }

    /// Rebuild for a new run.  Only `best` and the session clock survive.
    pub fn start_run(&mut self, config: &GameConfig) {
        *self = World {
            best: self.best,
            clock_ms: self.clock_ms,
            status: GameStatus::Playing,
            ..World::new(config)
        };
    }
}
