use std::collections::HashSet;
use std::time::Duration;

use crate::log;
use crate::persistence::{SaveDocument, SavedPowerup};
use crate::session_rng::SessionRng;

use super::entities::{
    ActiveEffect, FRUIT_SKIN_COUNT, Food, Obstacle, Powerup, PowerupKind, SNAKE_SKIN_COUNT,
};
use super::grid::{FieldSize, Point, first_free_position, random_free_position};
use super::settings::SessionSettings;
use super::snake::{Direction, Snake};

/// Bounded attempt count for the random placement of spawned entities.
/// Exhaustion skips the spawn; food relocation has a deterministic
/// fallback on top.
const SPAWN_ATTEMPTS: usize = 100;

/// Every 20th point drops one more obstacle onto the field.
const OBSTACLE_SCORE_STEP: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Over(EndReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
    /// No free cell was left to relocate the food to. Practically
    /// unreachable, but bounded searches need a terminal answer.
    BoardFull,
}

/// What happened on one move tick, for the presentation layer to react to
/// (sounds, particles, HUD flashes). Game state is already updated when
/// this is returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ate_food: bool,
    pub collected_powerup: Option<PowerupKind>,
    pub spawned_obstacle: bool,
    pub ended: Option<EndReason>,
}

#[derive(Debug)]
pub enum SnapshotError {
    EmptySnake,
    OutOfBounds { x: usize, y: usize },
    InvalidDirection,
    UnknownPowerup(String),
    InvalidSkin(usize),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::EmptySnake => write!(f, "Snapshot contains an empty snake"),
            SnapshotError::OutOfBounds { x, y } => {
                write!(f, "Snapshot position ({}, {}) is outside the field", x, y)
            }
            SnapshotError::InvalidDirection => write!(f, "Snapshot direction is not a unit step"),
            SnapshotError::UnknownPowerup(name) => write!(f, "Unknown powerup type '{}'", name),
            SnapshotError::InvalidSkin(idx) => write!(f, "Skin index {} does not exist", idx),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// One play session: all entity state from spawn to game-over. The
/// presentation shell drives it with inputs and move ticks and reads it
/// back for drawing; nothing in here touches a screen, a clock, or a
/// speaker.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub settings: SessionSettings,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    pub score: u32,
    pub active_effect: Option<ActiveEffect>,
    pub phase: Phase,
}

impl GameSession {
    pub fn new(settings: SessionSettings, rng: &mut SessionRng) -> Self {
        let snake = Snake::new(
            settings.field.center(),
            Direction::Right,
            settings.snake_skin_idx,
        );

        let food_pos = random_free_position(rng, &settings.field, &snake.body_set, SPAWN_ATTEMPTS)
            .or_else(|| first_free_position(&settings.field, &snake.body_set))
            .expect("A fresh board always has a free cell for food");
        let food = Food::new(food_pos, settings.fruit_skin_idx);

        Self {
            settings,
            snake,
            food,
            obstacles: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            active_effect: None,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            Phase::Over(reason) => Some(reason),
            _ => None,
        }
    }

    /// Queues a turn; reversals are rejected inside the snake. Ignored
    /// unless the session is running.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.is_running() {
            self.snake.request_direction(direction);
        }
    }

    /// Returns true when the session is now paused. A finished session
    /// cannot be paused or resumed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                false
            }
            Phase::Over(_) => false,
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// The move-tick interval the shell's timer should currently use:
    /// the base rate, unless an active effect overrides it.
    pub fn tick_interval(&self) -> Duration {
        let ms = match self.active_effect {
            Some(effect) => effect.kind.interval_ms(self.settings.ticks_per_second),
            None => self.settings.base_interval_ms(),
        };
        Duration::from_millis(ms)
    }

    /// Whole seconds the active effect has left, for the HUD.
    pub fn active_effect_seconds(&self) -> Option<u32> {
        self.active_effect
            .map(|effect| effect.remaining_ticks / self.settings.ticks_per_second.max(1))
    }

    /// Advances the game by one move tick. Does nothing unless running.
    pub fn advance_tick(&mut self, rng: &mut SessionRng) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_running() {
            return report;
        }

        self.snake.apply_pending_direction();

        // Fatal checks happen before any mutation: a snake cannot die and
        // eat on the same tick, and a fatal tick leaves state untouched.
        let next_head = match self.next_head() {
            Ok(point) => point,
            Err(reason) => return self.end_session(reason, report),
        };
        if self.snake.occupies(next_head) {
            return self.end_session(EndReason::SelfCollision, report);
        }
        if self.obstacles.iter().any(|o| o.position == next_head) {
            return self.end_session(EndReason::ObstacleCollision, report);
        }

        self.snake.advance(next_head);

        if next_head == self.food.position {
            report.ate_food = true;
            self.score += 1;
            log!("Ate food at ({}, {}). Score: {}", next_head.x, next_head.y, self.score);

            self.try_spawn_powerup(rng);

            if !self.relocate_food(rng) {
                log!("No free cell left to place food; the board is full");
                return self.end_session(EndReason::BoardFull, report);
            }

            if self.score % OBSTACLE_SCORE_STEP == 0
                && self.obstacles.len() < self.settings.max_obstacles()
            {
                report.spawned_obstacle = self.try_spawn_obstacle(rng);
            }
        } else {
            self.snake.retract();
        }

        if let Some(idx) = self.powerups.iter().position(|p| p.position == next_head) {
            let collected = self.powerups.remove(idx);
            // A new pickup replaces whatever effect was in force, timer
            // included.
            self.active_effect = Some(ActiveEffect {
                kind: collected.kind,
                remaining_ticks: collected.kind.duration_ticks(self.settings.ticks_per_second),
            });
            report.collected_powerup = Some(collected.kind);
            log!("Collected {} powerup", collected.kind.wire_name());
        }

        if let Some(effect) = &mut self.active_effect {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            if effect.remaining_ticks == 0 {
                self.active_effect = None;
            }
        }

        report
    }

    fn end_session(&mut self, reason: EndReason, mut report: TickReport) -> TickReport {
        self.phase = Phase::Over(reason);
        report.ended = Some(reason);
        report
    }

    /// The cell the head moves into this tick, or the wall it would cross.
    fn next_head(&self) -> Result<Point, EndReason> {
        let head = self.snake.head();
        let field = &self.settings.field;

        match self.snake.direction {
            Direction::Up => {
                if head.y == 0 {
                    return Err(EndReason::WallCollision);
                }
                Ok(Point::new(head.x, head.y - 1))
            }
            Direction::Down => {
                if head.y + 1 >= field.height {
                    return Err(EndReason::WallCollision);
                }
                Ok(Point::new(head.x, head.y + 1))
            }
            Direction::Left => {
                if head.x == 0 {
                    return Err(EndReason::WallCollision);
                }
                Ok(Point::new(head.x - 1, head.y))
            }
            Direction::Right => {
                if head.x + 1 >= field.width {
                    return Err(EndReason::WallCollision);
                }
                Ok(Point::new(head.x + 1, head.y))
            }
        }
    }

    fn occupied_cells(&self, include_food: bool) -> HashSet<Point> {
        let mut occupied: HashSet<Point> = self.snake.body_set.clone();
        if include_food {
            occupied.insert(self.food.position);
        }
        occupied.extend(self.obstacles.iter().map(|o| o.position));
        occupied.extend(self.powerups.iter().map(|p| p.position));
        occupied
    }

    fn try_spawn_powerup(&mut self, rng: &mut SessionRng) {
        if !rng.chance(self.settings.powerup_spawn_probability) {
            return;
        }

        let occupied = self.occupied_cells(true);
        if let Some(position) =
            random_free_position(rng, &self.settings.field, &occupied, SPAWN_ATTEMPTS)
        {
            let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
            self.powerups.push(Powerup::new(position, kind));
            log!("Powerup {} spawned at ({}, {})", kind.wire_name(), position.x, position.y);
        }
    }

    /// Moves the food to a free cell. Random draws first, then a scan, so
    /// this only fails when the board holds no free cell at all.
    fn relocate_food(&mut self, rng: &mut SessionRng) -> bool {
        let occupied = self.occupied_cells(false);
        let position = random_free_position(rng, &self.settings.field, &occupied, SPAWN_ATTEMPTS)
            .or_else(|| first_free_position(&self.settings.field, &occupied));

        match position {
            Some(position) => {
                self.food.position = position;
                true
            }
            None => false,
        }
    }

    fn try_spawn_obstacle(&mut self, rng: &mut SessionRng) -> bool {
        let occupied = self.occupied_cells(true);
        match random_free_position(rng, &self.settings.field, &occupied, SPAWN_ATTEMPTS) {
            Some(position) => {
                self.obstacles.push(Obstacle::new(position));
                log!("Obstacle placed at ({}, {})", position.x, position.y);
                true
            }
            None => false,
        }
    }

    /// The full canonical state, in save-file form.
    pub fn snapshot(&self) -> SaveDocument {
        SaveDocument {
            snake: self.snake.body.iter().map(|p| (p.x, p.y)).collect(),
            direction: self.snake.direction.delta(),
            food_pos: (self.food.position.x, self.food.position.y),
            food_skin_idx: self.food.skin_idx,
            obstacles: self.obstacles.iter().map(|o| (o.position.x, o.position.y)).collect(),
            powerups: self
                .powerups
                .iter()
                .map(|p| SavedPowerup {
                    pos: (p.position.x, p.position.y),
                    kind: p.kind.wire_name().to_string(),
                })
                .collect(),
            score: self.score,
            powerup_active: self.active_effect.map(|e| e.kind.wire_name().to_string()),
            powerup_timer: self.active_effect.map(|e| e.remaining_ticks).unwrap_or(0),
            snake_skin_idx: self.snake.skin_idx,
        }
    }

    /// Validates a save document against the given settings and builds a
    /// running session from it. The live session is untouched on failure:
    /// callers replace their session only with an `Ok`.
    pub fn from_snapshot(
        doc: &SaveDocument,
        settings: &SessionSettings,
    ) -> Result<Self, SnapshotError> {
        let field = &settings.field;

        if doc.snake.is_empty() {
            return Err(SnapshotError::EmptySnake);
        }
        if doc.snake_skin_idx >= SNAKE_SKIN_COUNT {
            return Err(SnapshotError::InvalidSkin(doc.snake_skin_idx));
        }
        if doc.food_skin_idx >= FRUIT_SKIN_COUNT {
            return Err(SnapshotError::InvalidSkin(doc.food_skin_idx));
        }

        let segments = check_points(&doc.snake, field)?;
        let direction =
            Direction::from_delta(doc.direction).ok_or(SnapshotError::InvalidDirection)?;
        let food_pos = check_point(doc.food_pos, field)?;

        let obstacle_points = check_points(&doc.obstacles, field)?;
        let obstacles = obstacle_points.into_iter().map(Obstacle::new).collect();

        let mut powerups = Vec::with_capacity(doc.powerups.len());
        for saved in &doc.powerups {
            let kind = PowerupKind::from_wire(&saved.kind)
                .ok_or_else(|| SnapshotError::UnknownPowerup(saved.kind.clone()))?;
            powerups.push(Powerup::new(check_point(saved.pos, field)?, kind));
        }

        let active_effect = match &doc.powerup_active {
            Some(name) => {
                let kind = PowerupKind::from_wire(name)
                    .ok_or_else(|| SnapshotError::UnknownPowerup(name.clone()))?;
                Some(ActiveEffect {
                    kind,
                    remaining_ticks: doc.powerup_timer,
                })
            }
            None => None,
        };

        Ok(Self {
            settings: settings.clone(),
            snake: Snake::from_segments(segments, direction, doc.snake_skin_idx),
            food: Food::new(food_pos, doc.food_skin_idx),
            obstacles,
            powerups,
            score: doc.score,
            active_effect,
            phase: Phase::Running,
        })
    }
}

fn check_point(pair: (usize, usize), field: &FieldSize) -> Result<Point, SnapshotError> {
    let point = Point::new(pair.0, pair.1);
    if field.contains(point) {
        Ok(point)
    } else {
        Err(SnapshotError::OutOfBounds { x: pair.0, y: pair.1 })
    }
}

fn check_points(pairs: &[(usize, usize)], field: &FieldSize) -> Result<Vec<Point>, SnapshotError> {
    pairs.iter().map(|pair| check_point(*pair, field)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> SessionSettings {
        SessionSettings {
            field: FieldSize::new(20, 20),
            ticks_per_second: 15,
            // Deterministic tests: no surprise powerups unless asked for.
            powerup_spawn_probability: 0.0,
            snake_skin_idx: 0,
            fruit_skin_idx: 0,
        }
    }

    fn fresh_session(rng: &mut SessionRng) -> GameSession {
        let mut session = GameSession::new(test_settings(), rng);
        // Park the food away from the snake's path along row 10.
        session.food.position = Point::new(0, 0);
        session
    }

    fn place_food_ahead(session: &mut GameSession) {
        let head = session.snake.head();
        session.food.position = Point::new(head.x + 1, head.y);
    }

    #[test]
    fn test_snake_starts_at_center_moving_right() {
        let mut rng = SessionRng::new(1);
        let session = GameSession::new(test_settings(), &mut rng);

        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.snake.head(), Point::new(10, 10));
        assert_eq!(session.snake.direction, Direction::Right);
        assert_eq!(session.score, 0);
        assert!(session.is_running());
        assert_ne!(session.food.position, session.snake.head());
    }

    #[test]
    fn test_three_ticks_move_head_without_growth() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);

        for _ in 0..3 {
            let report = session.advance_tick(&mut rng);
            assert_eq!(report, TickReport::default());
        }

        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.snake.head(), Point::new(13, 10));
    }

    #[test]
    fn test_eating_grows_snake_and_scores() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        place_food_ahead(&mut session);

        let report = session.advance_tick(&mut rng);

        assert!(report.ate_food);
        assert_eq!(session.score, 1);
        assert_eq!(session.snake.len(), 2);
        // Food moved somewhere free the instant it was eaten.
        assert_ne!(session.food.position, session.snake.head());
        assert!(!session.snake.occupies(session.food.position));
        assert!(!session.obstacles.iter().any(|o| o.position == session.food.position));
    }

    #[test]
    fn test_wall_collision_ends_session_without_mutation() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.snake = Snake::new(Point::new(19, 10), Direction::Right, 0);

        let report = session.advance_tick(&mut rng);

        assert_eq!(report.ended, Some(EndReason::WallCollision));
        assert_eq!(session.phase, Phase::Over(EndReason::WallCollision));
        assert_eq!(session.snake.head(), Point::new(19, 10));
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_self_collision_is_fatal() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        // A hook shape: moving down from (5,5) runs into (5,6).
        session.snake = Snake::from_segments(
            vec![
                Point::new(5, 5),
                Point::new(4, 5),
                Point::new(4, 6),
                Point::new(5, 6),
                Point::new(6, 6),
            ],
            Direction::Down,
            0,
        );

        let report = session.advance_tick(&mut rng);
        assert_eq!(report.ended, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_moving_into_tail_cell_is_fatal() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        // The tail cell only frees up after the head moves, so entering
        // it still counts as self-collision.
        session.snake = Snake::from_segments(
            vec![
                Point::new(5, 5),
                Point::new(4, 5),
                Point::new(4, 6),
                Point::new(5, 6),
            ],
            Direction::Down,
            0,
        );

        let report = session.advance_tick(&mut rng);
        assert_eq!(report.ended, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_obstacle_collision_is_fatal() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        let head = session.snake.head();
        session.obstacles.push(Obstacle::new(Point::new(head.x + 1, head.y)));

        let report = session.advance_tick(&mut rng);
        assert_eq!(report.ended, Some(EndReason::ObstacleCollision));
    }

    #[test]
    fn test_reverse_direction_is_ignored_on_tick() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);

        session.request_direction(Direction::Left);
        session.advance_tick(&mut rng);

        assert_eq!(session.snake.direction, Direction::Right);
        assert_eq!(session.snake.head(), Point::new(11, 10));
    }

    #[test]
    fn test_orthogonal_turns_are_accepted() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);

        session.request_direction(Direction::Up);
        session.advance_tick(&mut rng);

        assert_eq!(session.snake.direction, Direction::Up);
        assert_eq!(session.snake.head(), Point::new(10, 9));
    }

    #[test]
    fn test_obstacle_appears_on_twentieth_point() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.score = 19;
        session.obstacles = vec![
            Obstacle::new(Point::new(0, 1)),
            Obstacle::new(Point::new(0, 2)),
            Obstacle::new(Point::new(0, 3)),
        ];
        place_food_ahead(&mut session);

        let report = session.advance_tick(&mut rng);

        assert!(report.ate_food);
        assert!(report.spawned_obstacle);
        assert_eq!(session.score, 20);
        assert_eq!(session.obstacles.len(), 4);
    }

    #[test]
    fn test_no_obstacle_beyond_the_cap() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.score = 19;
        let cap = session.settings.max_obstacles();
        for i in 0..cap {
            session.obstacles.push(Obstacle::new(Point::new(i % 20, 19)));
        }
        place_food_ahead(&mut session);

        let report = session.advance_tick(&mut rng);

        assert!(!report.spawned_obstacle);
        assert_eq!(session.obstacles.len(), cap);
    }

    #[test]
    fn test_powerup_pickup_reconfigures_interval_immediately() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        let head = session.snake.head();
        session
            .powerups
            .push(Powerup::new(Point::new(head.x + 1, head.y), PowerupKind::SpeedBoost));

        let report = session.advance_tick(&mut rng);

        assert_eq!(report.collected_powerup, Some(PowerupKind::SpeedBoost));
        assert!(session.powerups.is_empty());
        // Duration 75 at 15 ticks/s, minus the collection tick itself.
        let effect = session.active_effect.unwrap();
        assert_eq!(effect.remaining_ticks, 74);
        assert_eq!(session.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_new_pickup_replaces_active_effect() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.active_effect = Some(ActiveEffect {
            kind: PowerupKind::SpeedBoost,
            remaining_ticks: 3,
        });
        let head = session.snake.head();
        session
            .powerups
            .push(Powerup::new(Point::new(head.x + 1, head.y), PowerupKind::SlowDown));

        session.advance_tick(&mut rng);

        let effect = session.active_effect.unwrap();
        assert_eq!(effect.kind, PowerupKind::SlowDown);
        assert_eq!(effect.remaining_ticks, PowerupKind::SlowDown.duration_ticks(15) - 1);
        assert_eq!(session.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_effect_timer_counts_down_and_restores_base_interval() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.active_effect = Some(ActiveEffect {
            kind: PowerupKind::SlowDown,
            remaining_ticks: 2,
        });

        session.advance_tick(&mut rng);
        assert_eq!(session.active_effect.unwrap().remaining_ticks, 1);

        session.advance_tick(&mut rng);
        assert_eq!(session.active_effect, None);
        assert_eq!(
            session.tick_interval(),
            Duration::from_millis(session.settings.base_interval_ms())
        );
    }

    #[test]
    fn test_pause_blocks_ticks_and_inputs() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);

        assert!(session.toggle_pause());
        assert!(session.is_paused());

        let head_before = session.snake.head();
        let report = session.advance_tick(&mut rng);
        assert_eq!(report, TickReport::default());
        assert_eq!(session.snake.head(), head_before);

        session.request_direction(Direction::Up);
        assert_eq!(session.snake.pending_direction, None);

        session.resume();
        assert!(session.is_running());
    }

    #[test]
    fn test_full_board_ends_session_with_board_full() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        place_food_ahead(&mut session);

        // Wall off every cell except the snake and the food it is about
        // to eat.
        let head = session.snake.head();
        let food = session.food.position;
        for y in 0..20 {
            for x in 0..20 {
                let p = Point::new(x, y);
                if p != head && p != food {
                    session.obstacles.push(Obstacle::new(p));
                }
            }
        }

        let report = session.advance_tick(&mut rng);

        assert!(report.ate_food);
        assert_eq!(report.ended, Some(EndReason::BoardFull));
        assert_eq!(session.phase, Phase::Over(EndReason::BoardFull));
    }

    #[test]
    fn test_snapshot_round_trip_preserves_session() {
        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        session.snake = Snake::from_segments(
            vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)],
            Direction::Up,
            2,
        );
        session.food = Food::new(Point::new(12, 3), 4);
        session.obstacles = vec![Obstacle::new(Point::new(1, 1)), Obstacle::new(Point::new(8, 9))];
        session.powerups = vec![Powerup::new(Point::new(2, 17), PowerupKind::SlowDown)];
        session.score = 23;
        session.active_effect = Some(ActiveEffect {
            kind: PowerupKind::SpeedBoost,
            remaining_ticks: 31,
        });

        let doc = session.snapshot();
        let restored = GameSession::from_snapshot(&doc, &session.settings).unwrap();

        assert_eq!(restored.snake.body, session.snake.body);
        assert_eq!(restored.snake.direction, Direction::Up);
        assert_eq!(restored.snake.skin_idx, 2);
        assert_eq!(restored.food, session.food);
        assert_eq!(restored.obstacles, session.obstacles);
        assert_eq!(restored.powerups, session.powerups);
        assert_eq!(restored.score, 23);
        assert_eq!(restored.active_effect, session.active_effect);
        assert!(restored.is_running());
        // The restored effect drives the tick interval again.
        assert_eq!(restored.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_snapshots_are_rejected() {
        let mut rng = SessionRng::new(1);
        let session = fresh_session(&mut rng);
        let settings = session.settings.clone();
        let valid = session.snapshot();

        let mut doc = valid.clone();
        doc.snake = vec![];
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::EmptySnake)
        ));

        let mut doc = valid.clone();
        doc.snake = vec![(25, 3)];
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::OutOfBounds { x: 25, y: 3 })
        ));

        let mut doc = valid.clone();
        doc.direction = (0, 0);
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::InvalidDirection)
        ));

        let mut doc = valid.clone();
        doc.powerups = vec![SavedPowerup { pos: (3, 3), kind: "teleport".to_string() }];
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::UnknownPowerup(_))
        ));

        let mut doc = valid.clone();
        doc.powerup_active = Some("teleport".to_string());
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::UnknownPowerup(_))
        ));

        let mut doc = valid;
        doc.snake_skin_idx = 99;
        assert!(matches!(
            GameSession::from_snapshot(&doc, &settings),
            Err(SnapshotError::InvalidSkin(99))
        ));
    }

    #[test]
    fn test_powerup_spawn_follows_configured_probability() {
        let mut rng = SessionRng::new(1);
        let mut settings = test_settings();
        settings.powerup_spawn_probability = 1.0;
        let mut session = GameSession::new(settings, &mut rng);
        place_food_ahead(&mut session);

        session.advance_tick(&mut rng);
        assert_eq!(session.powerups.len(), 1);
        let spawned = session.powerups[0];
        assert!(!session.snake.occupies(spawned.position));
        assert_ne!(spawned.position, session.food.position);

        let mut rng = SessionRng::new(1);
        let mut session = fresh_session(&mut rng);
        place_food_ahead(&mut session);

        session.advance_tick(&mut rng);
        assert!(session.powerups.is_empty());
    }
}
