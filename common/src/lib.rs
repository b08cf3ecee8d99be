pub mod config;
pub mod game;
pub mod logger;
pub mod persistence;
pub mod session_rng;

pub use game::{
    Direction, EndReason, FieldSize, GameSession, Phase, Point, Powerup, PowerupKind,
    SessionSettings, Snake, TickReport,
};
pub use session_rng::SessionRng;
