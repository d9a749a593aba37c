// Raw-mode terminal surface for the game client: alternate screen,
// colored glyphs, centered message boxes and a non-blocking key queue.

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
        })
    }

    pub fn setup(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> std::io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    /// Drain all pending key presses without blocking. Repeat/release
    /// events are dropped.
    pub fn read_key_events(&self) -> std::io::Result<Vec<KeyEvent>> {
        let mut events = Vec::new();
        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }
        Ok(events)
    }

    /// Block until the next key press.
    pub fn read_key_blocking(&self) -> std::io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn print_at(&mut self, (x, y): (u16, u16), ch: char, color: Color) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetForegroundColor(color),
            Print(ch)
        )
    }

    pub fn print_str_at(&mut self, (x, y): (u16, u16), s: &str, color: Color) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetForegroundColor(color),
            Print(s)
        )
    }

    /// Border around a `width` x `height` box whose top-left corner is at
    /// `(0, offset_y)`.
    pub fn draw_borders(&mut self, width: u16, height: u16, offset_y: u16) -> std::io::Result<()> {
        let end_x = width - 1;
        let end_y = offset_y + height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, offset_y), ch, Color::DarkGrey)?;
            self.print_at((x, end_y), ch, Color::DarkGrey)?;
        }
        for y in offset_y + 1..end_y {
            self.print_at((0, y), '|', Color::DarkGrey)?;
            self.print_at((end_x, y), '|', Color::DarkGrey)?;
        }
        Ok(())
    }

    /// Centered message box over whatever is on screen.
    pub fn show_message(&mut self, lines: &[&str]) -> std::io::Result<()> {
        let box_w = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 4;
        let box_h = lines.len() as u16 + 2;
        let left = self.width.saturating_sub(box_w) / 2;
        let top = self.height.saturating_sub(box_h) / 2;

        let blank = " ".repeat(box_w as usize);
        self.print_str_at((left, top), &blank, Color::White)?;
        self.print_str_at((left, top + box_h - 1), &blank, Color::White)?;
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", width = box_w as usize);
            self.print_str_at((left, top + 1 + i as u16), &padded, Color::White)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
