//! Game state machine: Idle → Playing → GameOver → Playing …
//!
//! `Game` owns the world, the input latch and the config.  The driver feeds it
//! key events and elapsed time; the renderer reads `world()` afterwards.

use rand::Rng;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{GameStatus, World};
use crate::input::{InputLatch, Key};

/// Values a HUD shows.  Scores are floored here; the world keeps raw floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub best: u64,
    pub lives: u32,
    pub status: GameStatus,
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    world: World,
    input: InputLatch,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let world = World::new(&config);
        Self {
            config,
            world,
            input: InputLatch::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for tests and tooling that need to stage a situation.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.world.status
    }

    /// Record a press or release.  Pressing a confirm key outside of play
    /// also starts a run.
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.input.set_key(key, pressed);
        if pressed && key.is_confirm() && self.world.status != GameStatus::Playing {
            self.on_start_requested();
        }
    }

    /// Start (or restart) a run.  Ignored while a run is in progress.
    pub fn on_start_requested(&mut self) {
        if self.world.status == GameStatus::Playing {
            return;
        }
        let from = self.world.status;
        self.world.start_run(&self.config);
        tracing::info!(?from, best = self.world.best.floor(), "run started");
    }

    /// One tick of the loop: advance the session clock, then the simulation.
    pub fn frame(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.world.clock_ms += dt_ms;
        }
        compute::update(&mut self.world, &self.input, &self.config, dt_ms, rng);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: floor_u64(self.world.score),
            best: floor_u64(self.world.best),
            lives: self.world.lives,
            status: self.world.status,
        }
    }
}

fn floor_u64(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}
