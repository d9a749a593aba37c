// The per-tick snake state machine: direction commit, movement, food,
// bonus growth and collision detection. No rendering dependency, so the
// whole machine is unit-testable headless.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::grid::{self, Cell, Direction};

/// Game state shared between the tick loop and the background tasks
/// (bonus spawner, color cycler). The tick loop is the sole writer of the
/// snake and normal food; the spawner only touches `bonus` and reads the
/// rest.
pub type SharedGame = Arc<Mutex<GameState>>;

/// Result of advancing the simulation by one grid tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Wall or self collision; the score is frozen at its pre-terminal
    /// value.
    GameOver,
}

pub struct GameState {
    pub width: i32,
    pub height: i32,
    /// Body cells, head first. Contiguous and duplicate-free while alive.
    pub snake: VecDeque<Cell>,
    pub direction: Direction,
    /// Buffered input, committed at the start of the next tick unless it
    /// reverses the current direction.
    pub pending_direction: Direction,
    /// Normal food. `None` only when the grid has no free cell left.
    pub food: Option<Cell>,
    /// Bonus food; `Some` means visible. Written by the spawner task and
    /// cleared here when eaten.
    pub bonus: Option<Cell>,
    pub score: u32,
    /// Cleared on game over (or by the client on quit) so background
    /// tasks stop spawning.
    pub running: bool,
}

impl GameState {
    /// New game: length-3 snake centered on the grid, heading right, with
    /// normal food already placed.
    pub fn new(width: i32, height: i32) -> Self {
        let (hx, hy) = (width / 2, height / 2);
        let snake = VecDeque::from([(hx, hy), (hx - 1, hy), (hx - 2, hy)]);

        let mut state = GameState {
            width,
            height,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            bonus: None,
            score: 0,
            running: true,
        };
        state.respawn_food();
        state
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Buffer a direction change for the next tick. Reversals are filtered
    /// at commit time, so mashing the opposite key is harmless.
    pub fn set_pending(&mut self, dir: Direction) {
        self.pending_direction = dir;
    }

    /// Advance the simulation by one grid tick.
    pub fn step(&mut self) -> StepOutcome {
        // 1. Commit buffered input; an instant reversal is ignored.
        if self.pending_direction != self.direction.opposite() {
            self.direction = self.pending_direction;
        }

        // 2. One unit step, no wraparound.
        let (dx, dy) = self.direction.delta();
        let (hx, hy) = self.head();
        let new_head = (hx + dx, hy + dy);

        // 3. Wall collision.
        if !self.in_bounds(new_head) {
            self.running = false;
            return StepOutcome::GameOver;
        }

        self.snake.push_front(new_head);

        // 4. Normal food grows at the head: the tail is only dropped on a
        //    non-eating step.
        if self.food == Some(new_head) {
            self.score += 10;
            self.respawn_food();
        } else {
            self.snake.pop_back();
        }

        // 5. Bonus food grows at the tail, independently of the above.
        if self.bonus == Some(new_head) {
            self.score += 50;
            self.bonus = None;
            self.grow_tail();
        }

        // 6. Self collision, checked last so stepping into the square the
        //    tail just vacated stays legal.
        if self.snake.iter().skip(1).any(|&c| c == new_head) {
            self.running = false;
            return StepOutcome::GameOver;
        }

        StepOutcome::Moved
    }

    /// Place normal food on a uniformly random cell not occupied by the
    /// snake.
    fn respawn_food(&mut self) {
        let mut rng = rand::thread_rng();
        let snake = &self.snake;
        self.food =
            grid::random_free_cell(&mut rng, self.width, self.height, |c| snake.contains(&c));
    }

    /// Place bonus food on a random cell free of both the snake and the
    /// normal food. Returns false when the grid is full (the spawn cycle
    /// is skipped).
    pub fn spawn_bonus(&mut self) -> bool {
        let mut rng = rand::thread_rng();
        let snake = &self.snake;
        let food = self.food;
        let cell = grid::random_free_cell(&mut rng, self.width, self.height, |c| {
            snake.contains(&c) || food == Some(c)
        });
        self.bonus = cell;
        cell.is_some()
    }

    /// Append one cell past the tail, in the tail's direction of travel
    /// (sign of the vector between the last two segments; opposite of the
    /// heading when the snake is a single cell). Skipped silently when the
    /// cell is occupied or out of bounds.
    fn grow_tail(&mut self) {
        let len = self.snake.len();
        let tail = self.snake[len - 1];
        let (dx, dy) = if len >= 2 {
            let before = self.snake[len - 2];
            ((tail.0 - before.0).signum(), (tail.1 - before.1).signum())
        } else {
            let (dx, dy) = self.direction.delta();
            (-dx, -dy)
        };

        let new_tail = (tail.0 + dx, tail.1 + dy);
        if self.in_bounds(new_tail) && !self.snake.contains(&new_tail) {
            self.snake.push_back(new_tail);
        }
    }
}
