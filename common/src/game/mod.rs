mod entities;
mod grid;
mod session;
mod settings;
mod snake;

pub use entities::{
    ActiveEffect, FRUIT_SKIN_COUNT, Food, Obstacle, POWERUP_DURATION_SECS, Powerup, PowerupKind,
    SNAKE_SKIN_COUNT,
};
pub use grid::{FieldSize, Point, first_free_position, random_free_position};
pub use session::{EndReason, GameSession, Phase, SnapshotError, TickReport};
pub use settings::SessionSettings;
pub use snake::{Direction, Snake};
