use std::collections::{HashSet, VecDeque};

use super::grid::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// Unit cell delta, y growing downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn from_delta(delta: (i32, i32)) -> Option<Self> {
        match delta {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub skin_idx: usize,
}

impl Snake {
    /// A fresh one-segment snake, as at session start.
    pub fn new(start_pos: Point, direction: Direction, skin_idx: usize) -> Self {
        Self::from_segments(vec![start_pos], direction, skin_idx)
    }

    /// Rebuilds a snake from explicit head-first segments (restored saves,
    /// tests). Callers guarantee at least one segment.
    pub fn from_segments(segments: Vec<Point>, direction: Direction, skin_idx: usize) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
            skin_idx,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Queues a turn for the next move tick. Requests that would reverse
    /// the snake onto itself are dropped.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies the queued turn, if any. Called once at the start of each
    /// move tick so at most one turn takes effect per tick.
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Prepends a new head segment. Growth is "advance without retract".
    pub fn advance(&mut self, new_head: Point) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }

    /// Drops the tail segment, keeping net length unchanged on a
    /// non-eating tick.
    pub fn retract(&mut self) {
        let tail = self
            .body
            .pop_back()
            .expect("Snake body should never be empty");
        // The tail cell may be shared with another segment only if the
        // body crosses itself, which ends the session before retraction.
        self.body_set.remove(&tail);
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(!Direction::Left.is_opposite(&Direction::Up));
        assert!(!Direction::Down.is_opposite(&Direction::Down));
    }

    #[test]
    fn test_delta_round_trips() {
        for direction in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ] {
            assert_eq!(Direction::from_delta(direction.delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta((0, 0)), None);
        assert_eq!(Direction::from_delta((2, 0)), None);
    }

    #[test]
    fn test_reverse_request_is_dropped() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 0);

        snake.request_direction(Direction::Left);
        assert_eq!(snake.pending_direction, None);

        snake.request_direction(Direction::Up);
        assert_eq!(snake.pending_direction, Some(Direction::Up));

        snake.apply_pending_direction();
        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.pending_direction, None);
    }

    #[test]
    fn test_advance_and_retract_keep_occupancy_in_sync() {
        let mut snake = Snake::new(Point::new(3, 3), Direction::Right, 0);

        snake.advance(Point::new(4, 3));
        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(Point::new(3, 3)));
        assert!(snake.occupies(Point::new(4, 3)));

        snake.retract();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Point::new(4, 3));
        assert!(!snake.occupies(Point::new(3, 3)));
    }
}
