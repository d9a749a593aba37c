// Grid snake simulation: primitives, the per-tick state machine and the
// background bonus-food spawner. Fully headless; rendering lives in
// `crate::client`.

pub mod bonus;
pub mod grid;
pub mod state;

pub use bonus::{run_bonus_spawner, run_color_cycler, BonusSchedule};
pub use grid::{Cell, Direction, GRID_H, GRID_W};
pub use state::{GameState, SharedGame, StepOutcome};
