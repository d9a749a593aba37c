// Terminal game client: name screen, fixed-tick play loop and the
// game-over/retry flow. The simulation itself lives in `crate::game`;
// this module only feeds it input and draws frames.

pub mod term;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

use crate::game::{
    run_bonus_spawner, run_color_cycler, BonusSchedule, Direction, GameState, SharedGame,
    StepOutcome, GRID_H, GRID_W,
};
use crate::submit;
use term::TermManager;

/// 12 grid steps per second.
const TICK: Duration = Duration::from_millis(83);
const MAX_NAME_LEN: usize = 18;

const BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const BONUS_CHAR: char = '*';
const DEAD_CHAR: char = 'X';

/// Colors the bonus star cycles through.
const BONUS_PALETTE: [Color; 4] = [Color::Yellow, Color::DarkYellow, Color::White, Color::Magenta];

/// How a round ended.
enum PlayEnd {
    Crashed,
    Quit,
}

pub struct GameClient {
    term: TermManager,
    api_url: Option<String>,
    grid_w: i32,
    grid_h: i32,
    phase: Arc<AtomicUsize>,
}

impl GameClient {
    pub fn new(api_url: Option<String>) -> std::io::Result<Self> {
        let term = TermManager::new()?;
        // Board: one HUD row on top, one border cell on each side. Shrink
        // to fit small terminals.
        let (tw, th) = term.size();
        let grid_w = (GRID_W).min(tw as i32 - 2).max(8);
        let grid_h = (GRID_H).min(th as i32 - 3).max(8);

        Ok(GameClient {
            term,
            api_url,
            grid_w,
            grid_h,
            phase: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Name screen, then play/submit/retry until the player quits.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.term.setup()?;
        let result = self.run_inner().await;
        // Always leave the terminal usable, even on error.
        self.term.restore()?;
        result
    }

    async fn run_inner(&mut self) -> std::io::Result<()> {
        let Some(name) = self.name_screen()? else {
            return Ok(());
        };

        loop {
            let (score, end) = self.play(&name).await?;

            // Fire-and-forget; the loop has already terminated so this
            // never affects frame pacing, and failures are swallowed.
            submit::submit_score(self.api_url.as_deref(), &name, score).await;

            match end {
                PlayEnd::Quit => return Ok(()),
                PlayEnd::Crashed => {
                    if !self.game_over_screen(score)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// One round. Returns the final score and how the round ended.
    async fn play(&mut self, name: &str) -> std::io::Result<(u32, PlayEnd)> {
        let game: SharedGame = Arc::new(Mutex::new(GameState::new(self.grid_w, self.grid_h)));

        let spawner = tokio::spawn(run_bonus_spawner(game.clone(), BonusSchedule::default()));
        let cycler = tokio::spawn(run_color_cycler(game.clone(), self.phase.clone()));

        self.term.clear()?;
        let mut ticker = tokio::time::interval(TICK);

        let end = 'game: loop {
            ticker.tick().await;

            for ev in self.term.read_key_events()? {
                if let Some(dir) = key_direction(&ev) {
                    game.lock().unwrap().set_pending(dir);
                } else if is_quit_key(&ev) {
                    game.lock().unwrap().running = false;
                    break 'game PlayEnd::Quit;
                }
            }

            let outcome = game.lock().unwrap().step();
            self.draw(&game, name)?;

            if outcome == StepOutcome::GameOver {
                break PlayEnd::Crashed;
            }
        };

        // Tear down the timers so no bonus spawns after the round.
        spawner.abort();
        cycler.abort();

        let score = game.lock().unwrap().score;
        Ok((score, end))
    }

    /// Full-frame redraw: HUD, borders, foods, snake.
    fn draw(&mut self, game: &SharedGame, name: &str) -> std::io::Result<()> {
        let g = game.lock().unwrap();

        let hud = format!(" {}  Score: {}", name, g.score);
        self.term.print_str_at((0, 0), &hud, Color::White)?;

        self.term
            .draw_borders(self.grid_w as u16 + 2, self.grid_h as u16 + 2, 1)?;

        let blank = " ".repeat(self.grid_w as usize);
        for y in 0..self.grid_h {
            self.term
                .print_str_at(Self::cell_pos((0, y)), &blank, Color::Reset)?;
        }

        if let Some(food) = g.food {
            self.term
                .print_at(Self::cell_pos(food), APPLE_CHAR, Color::Red)?;
        }
        if let Some(bonus) = g.bonus {
            let color = BONUS_PALETTE[self.phase.load(Ordering::Relaxed) % BONUS_PALETTE.len()];
            self.term.print_at(Self::cell_pos(bonus), BONUS_CHAR, color)?;
        }

        let crashed = !g.running;
        for (i, &cell) in g.snake.iter().enumerate() {
            let (ch, color) = if crashed {
                (DEAD_CHAR, Color::DarkRed)
            } else if i == 0 {
                (head_char(g.direction), Color::Green)
            } else {
                (BODY_CHAR, Color::DarkGreen)
            };
            self.term.print_at(Self::cell_pos(cell), ch, color)?;
        }

        self.term.flush()
    }

    /// Grid cell to screen position (inside the border, below the HUD).
    fn cell_pos((x, y): (i32, i32)) -> (u16, u16) {
        (x as u16 + 1, y as u16 + 2)
    }

    /// Ask for the player's name. `None` means the player quit. Empty
    /// input falls back to a placeholder.
    fn name_screen(&mut self) -> std::io::Result<Option<String>> {
        let mut name = String::new();

        loop {
            let entry = format!("> {name}_");
            let lines = [
                "S N A K E",
                "",
                "Enter your name:",
                entry.as_str(),
                "",
                "Enter to start - Esc to quit",
            ];
            self.term.show_message(&lines)?;

            let ev = self.term.read_key_blocking()?;
            if is_quit_key(&ev) {
                return Ok(None);
            }
            match ev.code {
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    let name = if trimmed.is_empty() {
                        "Player".to_string()
                    } else {
                        trimmed.to_string()
                    };
                    return Ok(Some(name));
                }
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) if !c.is_control() && name.len() < MAX_NAME_LEN => {
                    name.push(c);
                }
                _ => {}
            }
        }
    }

    /// Game-over panel. Returns true to retry with the same name.
    fn game_over_screen(&mut self, score: u32) -> std::io::Result<bool> {
        let score_line = format!("Final score: {score}");
        let lines = [
            "GAME OVER",
            "",
            score_line.as_str(),
            "",
            "R to retry - Esc to quit",
        ];
        self.term.show_message(&lines)?;

        loop {
            let ev = self.term.read_key_blocking()?;
            if is_quit_key(&ev) {
                return Ok(false);
            }
            if let KeyCode::Char('r' | 'R') = ev.code {
                return Ok(true);
            }
        }
    }
}

fn key_direction(ev: &KeyEvent) -> Option<Direction> {
    match ev.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit_key(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Esc
        || (ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL))
}

fn head_char(dir: Direction) -> char {
    match dir {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_direction_mapping() {
        let ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(key_direction(&ev), Some(Direction::Up));
        let ev = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(key_direction(&ev), Some(Direction::Right));
        let ev = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(key_direction(&ev), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_head_char_follows_direction() {
        assert_eq!(head_char(Direction::Up), '^');
        assert_eq!(head_char(Direction::Left), '<');
    }
}
