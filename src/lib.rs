//! Halloween Run — a side-scrolling arcade runner.
//!
//! The library is the simulation core only: world data, input latch, the
//! per-frame update step, spawning, collisions and the start/game-over state
//! machine.  Drawing lives in the binary and only ever reads a `&World`.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod spawner;

pub use config::GameConfig;
pub use entities::{Entity, EntityKind, GameStatus, Player, Rect, World};
pub use error::ConfigError;
pub use game::{Game, HudSnapshot};
pub use input::{InputLatch, Key};
