//! Tunable game configuration, optionally loaded from a TOML file.
//!
//! Every table and key is optional.  Missing values fall back to the
//! reference constants below, so an empty file plays exactly like no file.
//!
//! ```toml
//! [physics]
//! gravity = 0.8
//!
//! [rules]
//! starting_lives = 5
//! ```

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

// ── Reference constants ───────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 900.0;
pub const WORLD_HEIGHT: f64 = 520.0;
pub const GROUND_Y: f64 = 420.0;

pub const GRAVITY: f64 = 0.9;
pub const JUMP_VELOCITY: f64 = -16.5;
pub const MOVE_SPEED: f64 = 6.5;
/// One reference frame at 60 Hz, in milliseconds.
pub const FRAME_MS: f64 = 16.6667;

pub const STARTING_LIVES: u32 = 3;
pub const PICKUP_BONUS: f64 = 5.0;
/// ≈1.2 s of damage immunity, in reference frames.
pub const INVULN_FRAMES: f64 = 60.0 * 1.2;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub ground_y: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_y: GROUND_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to the player's vertical velocity once per tick.
    pub gravity: f64,
    pub jump_velocity: f64,
    pub move_speed: f64,
    pub frame_ms: f64,
    /// Gap kept between the player and either side of the world.
    pub bound_margin: f64,
    /// Entities at or left of this x are dropped.
    pub despawn_x: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            move_speed: MOVE_SPEED,
            frame_ms: FRAME_MS,
            bound_margin: 20.0,
            despawn_x: -80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_lives: u32,
    pub pickup_bonus: f64,
    pub invuln_frames: f64,
    pub score_per_frame: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            pickup_bonus: PICKUP_BONUS,
            invuln_frames: INVULN_FRAMES,
            score_per_frame: 1.0,
        }
    }
}

/// Half-open `[min, max)` range of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a delay from the band.  A zero-width band always yields `min`.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// New entities appear this far past the right edge.
    pub spawn_offset: f64,
    pub ground_enemy_chance: f64,
    pub ground_enemy_delay: Band,
    pub flying_enemy_delay: Band,
    pub pickup_delay: Band,
    pub initial_enemy_timer: f64,
    pub initial_pickup_timer: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_offset: 40.0,
            ground_enemy_chance: 0.55,
            ground_enemy_delay: Band::new(900.0, 1600.0),
            flying_enemy_delay: Band::new(750.0, 1450.0),
            pickup_delay: Band::new(4000.0, 6000.0),
            initial_enemy_timer: 0.0,
            initial_pickup_timer: 120.0,
        }
    }
}

/// Settings for the terminal driver; the core never reads these.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub target_fps: u32,
    /// Upper bound on one frame's elapsed time (e.g. after a suspend).
    pub max_frame_ms: f64,
    /// A key with no press/repeat for this long counts as released.
    pub hold_window_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_ms: 250.0,
            hold_window_ms: 150,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub rules: RulesConfig,
    pub spawner: SpawnerConfig,
    pub runtime: RuntimeConfig,
}

impl GameConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::parse(&contents, path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text that did not come from a file.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let w = &self.world;
        positive("world.width", w.width)?;
        positive("world.height", w.height)?;
        finite("world.ground_y", w.ground_y)?;
        if w.ground_y <= 0.0 || w.ground_y > w.height {
            return Err(ConfigError::Invalid {
                name: "world.ground_y",
                value: w.ground_y,
                expected: "a value in (0, world.height]",
            });
        }

        let p = &self.physics;
        finite("physics.gravity", p.gravity)?;
        finite("physics.jump_velocity", p.jump_velocity)?;
        finite("physics.move_speed", p.move_speed)?;
        positive("physics.frame_ms", p.frame_ms)?;
        finite("physics.bound_margin", p.bound_margin)?;
        finite("physics.despawn_x", p.despawn_x)?;

        let r = &self.rules;
        if r.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                name: "rules.starting_lives",
                value: 0.0,
                expected: "at least 1",
            });
        }
        finite("rules.pickup_bonus", r.pickup_bonus)?;
        finite("rules.invuln_frames", r.invuln_frames)?;
        finite("rules.score_per_frame", r.score_per_frame)?;

        let s = &self.spawner;
        finite("spawner.spawn_offset", s.spawn_offset)?;
        if !(0.0..=1.0).contains(&s.ground_enemy_chance) {
            return Err(ConfigError::Invalid {
                name: "spawner.ground_enemy_chance",
                value: s.ground_enemy_chance,
                expected: "a probability in [0, 1]",
            });
        }
        band("spawner.ground_enemy_delay", s.ground_enemy_delay)?;
        band("spawner.flying_enemy_delay", s.flying_enemy_delay)?;
        band("spawner.pickup_delay", s.pickup_delay)?;
        finite("spawner.initial_enemy_timer", s.initial_enemy_timer)?;
        finite("spawner.initial_pickup_timer", s.initial_pickup_timer)?;

        let rt = &self.runtime;
        if rt.target_fps == 0 {
            return Err(ConfigError::Invalid {
                name: "runtime.target_fps",
                value: 0.0,
                expected: "at least 1",
            });
        }
        positive("runtime.max_frame_ms", rt.max_frame_ms)?;
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value,
            expected: "a finite number",
        })
    }
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value,
            expected: "a finite number > 0",
        })
    }
}

fn band(name: &'static str, band: Band) -> ConfigResult<()> {
    if !band.min.is_finite() || !band.max.is_finite() || band.min < 0.0 {
        return Err(ConfigError::Invalid {
            name,
            value: band.min,
            expected: "finite bounds with min >= 0",
        });
    }
    if band.min > band.max {
        return Err(ConfigError::Invalid {
            name,
            value: band.max,
            expected: "max >= min",
        });
    }
    Ok(())
}
