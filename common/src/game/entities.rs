use super::grid::Point;

/// Number of snake skins the client ships. Persisted skin indices are
/// validated against these counts so a stale save cannot index past the
/// client's tables.
pub const SNAKE_SKIN_COUNT: usize = 5;
pub const FRUIT_SKIN_COUNT: usize = 5;

/// How long a collected powerup stays in force, in seconds of game time.
pub const POWERUP_DURATION_SECS: u32 = 5;

const BOOST_RATE_INCREASE: u32 = 10;
const SLOW_RATE_DECREASE: u32 = 5;
const MIN_BOOST_INTERVAL_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub skin_idx: usize,
}

impl Food {
    pub fn new(position: Point, skin_idx: usize) -> Self {
        Self { position, skin_idx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Point,
}

impl Obstacle {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    SpeedBoost,
    SlowDown,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::SpeedBoost, PowerupKind::SlowDown];

    /// Tag used in the save document and on the HUD-facing name.
    pub fn wire_name(self) -> &'static str {
        match self {
            PowerupKind::SpeedBoost => "speed_boost",
            PowerupKind::SlowDown => "slow_down",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "speed_boost" => Some(PowerupKind::SpeedBoost),
            "slow_down" => Some(PowerupKind::SlowDown),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PowerupKind::SpeedBoost => "Speed Boost",
            PowerupKind::SlowDown => "Slow Down",
        }
    }

    pub fn duration_ticks(self, ticks_per_second: u32) -> u32 {
        POWERUP_DURATION_SECS * ticks_per_second
    }

    /// Move-tick interval while this effect is in force. The boosted
    /// interval is floored so a high base rate cannot degenerate into a
    /// zero-length timer; the slowed rate is floored at one tick per
    /// second for the same reason.
    pub fn interval_ms(self, base_ticks_per_second: u32) -> u64 {
        match self {
            PowerupKind::SpeedBoost => {
                let rate = base_ticks_per_second + BOOST_RATE_INCREASE;
                (1000 / rate as u64).max(MIN_BOOST_INTERVAL_MS)
            }
            PowerupKind::SlowDown => {
                let rate = base_ticks_per_second.saturating_sub(SLOW_RATE_DECREASE).max(1);
                1000 / rate as u64
            }
        }
    }
}

/// A powerup lying on the field, waiting to be run over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Powerup {
    pub position: Point,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn new(position: Point, kind: PowerupKind) -> Self {
        Self { position, kind }
    }
}

/// The single effect currently modifying the move-tick interval. At most
/// one exists; collecting another powerup replaces it, timer included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerupKind,
    pub remaining_ticks: u32,
}
