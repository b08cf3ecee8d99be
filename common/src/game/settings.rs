use super::entities::{FRUIT_SKIN_COUNT, SNAKE_SKIN_COUNT};
use super::grid::FieldSize;

/// Everything a session needs to start: board shape, base speed, and the
/// cosmetic choices made in the menu.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    pub field: FieldSize,
    pub ticks_per_second: u32,
    pub powerup_spawn_probability: f32,
    pub snake_skin_idx: usize,
    pub fruit_skin_idx: usize,
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.field.width < 10 || self.field.width > 100 {
            return Err("Field width must be between 10 and 100".to_string());
        }
        if self.field.height < 10 || self.field.height > 100 {
            return Err("Field height must be between 10 and 100".to_string());
        }
        if self.ticks_per_second < 1 || self.ticks_per_second > 60 {
            return Err("Ticks per second must be between 1 and 60".to_string());
        }
        if !(0.0..=1.0).contains(&self.powerup_spawn_probability) {
            return Err("Powerup spawn probability must be between 0.0 and 1.0".to_string());
        }
        if self.snake_skin_idx >= SNAKE_SKIN_COUNT {
            return Err(format!("Snake skin index must be below {}", SNAKE_SKIN_COUNT));
        }
        if self.fruit_skin_idx >= FRUIT_SKIN_COUNT {
            return Err(format!("Fruit skin index must be below {}", FRUIT_SKIN_COUNT));
        }
        Ok(())
    }

    pub fn base_interval_ms(&self) -> u64 {
        1000 / self.ticks_per_second.max(1) as u64
    }

    /// Obstacle cap: half a percent of the board, but never fewer than 10.
    pub fn max_obstacles(&self) -> usize {
        (self.field.cell_count() * 5 / 1000).max(10)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            field: FieldSize::new(40, 30),
            ticks_per_second: 15,
            powerup_spawn_probability: 0.2,
            snake_skin_idx: 0,
            fruit_skin_idx: 0,
        }
    }
}
