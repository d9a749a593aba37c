// Grid primitives: cells, directions and free-cell sampling.

use rand::seq::SliceRandom;
use rand::Rng;

/// Default board size: a 1200x800 window at 20px cells in the original
/// arcade layout.
pub const GRID_W: i32 = 60;
pub const GRID_H: i32 = 40;

/// A position on the game grid. Signed so that one step past the edge is
/// representable for the out-of-bounds check.
pub type Cell = (i32, i32);

/// Direction of snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for one grid tick.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Pick a uniformly random cell of the `width` x `height` grid that does
/// not satisfy `occupied`. Returns `None` when the grid is full.
pub fn random_free_cell<R, F>(rng: &mut R, width: i32, height: i32, occupied: F) -> Option<Cell>
where
    R: Rng,
    F: Fn(Cell) -> bool,
{
    let free: Vec<Cell> = (0..width)
        .flat_map(|x| (0..height).map(move |y| (x, y)))
        .filter(|&c| !occupied(c))
        .collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_unit_step() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_opposite_is_involutive() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_random_free_cell_avoids_occupied() {
        let mut rng = rand::thread_rng();
        // Everything occupied except (1, 1).
        let cell = random_free_cell(&mut rng, 3, 3, |c| c != (1, 1));
        assert_eq!(cell, Some((1, 1)));
    }

    #[test]
    fn test_random_free_cell_full_grid() {
        let mut rng = rand::thread_rng();
        assert_eq!(random_free_cell(&mut rng, 2, 2, |_| true), None);
    }
}
