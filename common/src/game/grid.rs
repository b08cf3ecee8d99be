use std::collections::HashSet;

use crate::session_rng::SessionRng;

/// A cell coordinate on the playing field. The client decides how many
/// pixels a cell occupies; game logic never sees pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Draws uniformly random cells until one misses `occupied`, giving up
/// after `max_attempts` draws. Callers decide what a `None` means: entity
/// spawns skip the event, food relocation falls back to a full scan.
pub fn random_free_position(
    rng: &mut SessionRng,
    field: &FieldSize,
    occupied: &HashSet<Point>,
    max_attempts: usize,
) -> Option<Point> {
    for _ in 0..max_attempts {
        let candidate = Point::new(
            rng.random_range(0..field.width),
            rng.random_range(0..field.height),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Deterministic fallback for `random_free_position`: scans every cell in
/// row order. Returns `None` only when the board is truly full.
pub fn first_free_position(field: &FieldSize, occupied: &HashSet<Point>) -> Option<Point> {
    for y in 0..field.height {
        for x in 0..field.width {
            let candidate = Point::new(x, y);
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupy_all_but(field: &FieldSize, free: Point) -> HashSet<Point> {
        let mut occupied = HashSet::new();
        for y in 0..field.height {
            for x in 0..field.width {
                let p = Point::new(x, y);
                if p != free {
                    occupied.insert(p);
                }
            }
        }
        occupied
    }

    #[test]
    fn test_random_free_position_avoids_occupied_cells() {
        let field = FieldSize::new(4, 4);
        let free = Point::new(2, 1);
        let occupied = occupy_all_but(&field, free);
        let mut rng = SessionRng::new(7);

        let found = random_free_position(&mut rng, &field, &occupied, 10_000);
        assert_eq!(found, Some(free));
    }

    #[test]
    fn test_random_free_position_gives_up_on_full_board() {
        let field = FieldSize::new(3, 3);
        let mut occupied = HashSet::new();
        for y in 0..3 {
            for x in 0..3 {
                occupied.insert(Point::new(x, y));
            }
        }
        let mut rng = SessionRng::new(7);

        assert_eq!(random_free_position(&mut rng, &field, &occupied, 100), None);
    }

    #[test]
    fn test_first_free_position_finds_the_only_gap() {
        let field = FieldSize::new(5, 5);
        let free = Point::new(4, 3);
        let occupied = occupy_all_but(&field, free);

        assert_eq!(first_free_position(&field, &occupied), Some(free));
        assert_eq!(first_free_position(&field, &occupy_all_but(&field, Point::new(9, 9))), None);
    }

    #[test]
    fn test_field_contains_and_center() {
        let field = FieldSize::new(10, 6);
        assert!(field.contains(Point::new(9, 5)));
        assert!(!field.contains(Point::new(10, 5)));
        assert!(!field.contains(Point::new(9, 6)));
        assert_eq!(field.center(), Point::new(5, 3));
        assert_eq!(field.cell_count(), 60);
    }
}
