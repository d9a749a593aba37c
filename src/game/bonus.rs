// Bonus food lifecycle: a background task that periodically places a
// time-limited bonus item, plus the cosmetic color cycler. Both share the
// game state with the tick loop and stop once the run flag clears.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use super::state::SharedGame;

/// Timing of the bonus lifecycle, in whole seconds. Injectable so tests
/// can compress the schedule.
#[derive(Debug, Clone, Copy)]
pub struct BonusSchedule {
    /// Bounds of the random wait before each spawn attempt.
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
    /// How long a spawned bonus stays visible if not eaten.
    pub visible_secs: u64,
}

impl Default for BonusSchedule {
    fn default() -> Self {
        BonusSchedule {
            min_delay_secs: 5,
            max_delay_secs: 12,
            visible_secs: 6,
        }
    }
}

/// Spawn cycle: wait a random delay, place the bonus on a cell free of the
/// snake and the normal food, leave it visible for a fixed window, clear
/// it. Skips the cycle when the grid is full. Exits once the game's run
/// flag is cleared; no spawn can land after game over.
pub async fn run_bonus_spawner(game: SharedGame, schedule: BonusSchedule) {
    loop {
        let delay = rand::thread_rng().gen_range(schedule.min_delay_secs..=schedule.max_delay_secs);
        tokio::time::sleep(Duration::from_secs(delay)).await;

        {
            let mut g = game.lock().unwrap();
            if !g.running {
                break;
            }
            if !g.spawn_bonus() {
                continue;
            }
        }

        tokio::time::sleep(Duration::from_secs(schedule.visible_secs)).await;

        let mut g = game.lock().unwrap();
        // Expired unless already eaten (in which case this is a no-op).
        g.bonus = None;
        if !g.running {
            break;
        }
    }
}

/// Advance a shared palette index four times a second while the game runs.
/// Purely cosmetic; the client maps it onto the bonus star's color.
pub async fn run_color_cycler(game: SharedGame, phase: Arc<AtomicUsize>) {
    let mut interval = tokio::time::interval(Duration::from_millis(250));
    loop {
        interval.tick().await;
        if !game.lock().unwrap().running {
            break;
        }
        phase.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;
    use std::sync::Mutex;

    fn shared_game() -> SharedGame {
        Arc::new(Mutex::new(GameState::new(10, 10)))
    }

    fn fast_schedule() -> BonusSchedule {
        BonusSchedule {
            min_delay_secs: 1,
            max_delay_secs: 1,
            visible_secs: 2,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_bonus_appears_then_expires() {
        let game = shared_game();
        tokio::spawn(run_bonus_spawner(game.clone(), fast_schedule()));

        // Past the spawn delay, inside the visible window.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let bonus = game.lock().unwrap().bonus;
        let bonus = bonus.expect("bonus should be visible");
        assert!(!game.lock().unwrap().snake.contains(&bonus));

        // Past the visible window: expired even though nobody ate it.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(game.lock().unwrap().bonus, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawner_stops_when_game_ends() {
        let game = shared_game();
        let handle = tokio::spawn(run_bonus_spawner(game.clone(), fast_schedule()));

        game.lock().unwrap().running = false;

        // The next wakeup observes the cleared flag and exits without
        // spawning.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(handle.is_finished());
        assert_eq!(game.lock().unwrap().bonus, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bonus_cycles_repeatedly() {
        let game = shared_game();
        tokio::spawn(run_bonus_spawner(game.clone(), fast_schedule()));

        // Second cycle: delay 1s + visible 2s + delay 1s puts a new bonus
        // up at t=4.5s.
        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert!(game.lock().unwrap().bonus.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_color_cycler_advances_and_stops() {
        let game = shared_game();
        let phase = Arc::new(AtomicUsize::new(0));
        let handle = tokio::spawn(run_color_cycler(game.clone(), phase.clone()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(phase.load(Ordering::Relaxed) >= 3);

        game.lock().unwrap().running = false;
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(handle.is_finished());
    }
}
