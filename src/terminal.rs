//! Terminal frontend
//!
//! Draws the world as text with crossterm and turns key events into
//! [`FrameInput`]. Terminals without key-release reporting get held
//! movement from a short timeout after each press, and no early jump cut.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Color},
    terminal::{self, ClearType},
};

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::game::{FrameInput, Frontend, RunSummary};
use crate::sim::{EnemyPose, PowerUpKind, Rect, Snapshot};

/// Ticks a direction stays held after a press when releases are not reported
const HOLD_TICKS: u32 = 8;

const TITLE: &str = "Cactus Jump";

/// One text cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// A frame rendered to text cells, row-major
#[derive(Debug, Clone)]
pub struct Canvas {
    pub cols: u16,
    pub rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols as usize * rows as usize],
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }

    /// Centre a line of text on a row
    fn put_centered(&mut self, row: i32, text: &str, color: Color) {
        let len = text.chars().count() as i32;
        let start = (self.cols as i32 - len) / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, color);
        }
    }

    /// Fill the cells covered by a world-space rect
    fn fill_rect(&mut self, rect: &Rect, ch: char, color: Color) {
        let sx = self.cols as f32 / VIEWPORT_WIDTH;
        let sy = self.rows as f32 / VIEWPORT_HEIGHT;
        let left = (rect.left() * sx).floor() as i32;
        let top = (rect.top() * sy).floor() as i32;
        // Always cover at least one cell
        let right = ((rect.right() * sx).ceil() as i32).max(left + 1);
        let bottom = ((rect.bottom() * sy).ceil() as i32).max(top + 1);
        for row in top..bottom {
            for col in left..right {
                self.put(col, row, ch, color);
            }
        }
    }

    /// Row text, for tests and debugging
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.ch)
            .collect()
    }
}

/// Render a snapshot to a canvas of the given size
pub fn rasterize(snapshot: &Snapshot, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    for platform in &snapshot.platforms {
        canvas.fill_rect(platform, '=', Color::DarkGreen);
    }
    for power_up in &snapshot.power_ups {
        let (ch, color) = match power_up.kind {
            PowerUpKind::Coin => ('$', Color::Yellow),
            PowerUpKind::Boost => ('^', Color::Cyan),
            PowerUpKind::Bomb => ('*', Color::Red),
        };
        canvas.fill_rect(&power_up.rect, ch, color);
    }
    for enemy in &snapshot.enemies {
        let ch = match enemy.pose {
            EnemyPose::Up => 'V',
            EnemyPose::Down => 'W',
        };
        canvas.fill_rect(&enemy.rect, ch, Color::Magenta);
    }
    canvas.fill_rect(&snapshot.player, '#', Color::Green);
    canvas.put_centered(0, &snapshot.score.to_string(), Color::Red);
    canvas
}

/// Title screen
pub fn title_screen(high_score: u64, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    let mid = rows as i32 / 2;
    canvas.put_centered(mid - 6, TITLE, Color::White);
    canvas.put_centered(mid - 4, "The hardest cactus game of all time", Color::White);
    canvas.put_centered(mid - 1, "Press a key to play", Color::Grey);
    canvas.put_centered(mid + 1, &format!("High Score: {}", high_score), Color::Grey);
    canvas.put_centered(
        mid + 4,
        "Arrows/A,D move  Space jump  Q double jump  Esc quit",
        Color::DarkGrey,
    );
    canvas
}

/// Game over screen
pub fn game_over_screen(summary: &RunSummary, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    let mid = rows as i32 / 2;
    canvas.put_centered(mid - 6, TITLE, Color::White);
    canvas.put_centered(mid - 3, &format!("Score: {}", summary.score), Color::White);
    canvas.put_centered(mid - 1, "Press a key to play", Color::White);
    let best = if summary.new_record {
        format!("New Record: {}", summary.high_score)
    } else {
        format!("High Score: {}", summary.high_score)
    };
    canvas.put_centered(mid + 1, &best, Color::Red);
    canvas
}

/// Held-key tracking
#[derive(Debug, Default)]
struct KeyState {
    /// Release events are reported by the terminal
    releases: bool,
    left: u32,
    right: u32,
    jump_down: bool,
}

impl KeyState {
    fn hold(&self) -> u32 {
        if self.releases { u32::MAX } else { HOLD_TICKS }
    }

    /// Age timed holds by one tick
    fn decay(&mut self) {
        if !self.releases {
            self.left = self.left.saturating_sub(1);
            self.right = self.right.saturating_sub(1);
        }
    }

    fn handle(&mut self, key: KeyEvent, input: &mut FrameInput) {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || key.code == KeyCode::Esc {
            input.quit = true;
            return;
        }

        match key.kind {
            KeyEventKind::Press => {
                input.any_key = true;
                self.press(key.code, input);
            }
            KeyEventKind::Repeat => self.press(key.code, input),
            KeyEventKind::Release => self.release(key.code, input),
        }
    }

    fn press(&mut self, code: KeyCode, input: &mut FrameInput) {
        match code {
            KeyCode::Left | KeyCode::Char('a') => {
                self.left = self.hold();
                self.right = 0;
            }
            KeyCode::Right | KeyCode::Char('d') => {
                self.right = self.hold();
                self.left = 0;
            }
            KeyCode::Char(' ') | KeyCode::Up => {
                // Without releases every press counts; the player only
                // jumps from rest anyway
                if !self.releases || !self.jump_down {
                    input.jump_pressed = true;
                }
                self.jump_down = true;
            }
            KeyCode::Char('q') => input.double_jump = true,
            _ => {}
        }
    }

    fn release(&mut self, code: KeyCode, input: &mut FrameInput) {
        match code {
            KeyCode::Left | KeyCode::Char('a') => self.left = 0,
            KeyCode::Right | KeyCode::Char('d') => self.right = 0,
            KeyCode::Char(' ') | KeyCode::Up => {
                self.jump_down = false;
                input.jump_released = true;
            }
            _ => {}
        }
    }
}

/// crossterm-backed frontend
pub struct TerminalFrontend {
    out: Stdout,
    audio: AudioManager,
    keys: KeyState,
    frame: Duration,
    last_tick: Instant,
    cols: u16,
    rows: u16,
    restored: bool,
}

impl TerminalFrontend {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn new(audio: AudioManager) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        let releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if releases {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            log::info!("Terminal does not report key releases, using timed holds");
        }

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            audio,
            keys: KeyState {
                releases,
                ..Default::default()
            },
            frame: Duration::from_secs(1) / FPS,
            last_tick: Instant::now(),
            cols,
            rows,
            restored: false,
        })
    }

    /// Put the terminal back the way we found it
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.keys.releases {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        queue!(self.out, style::ResetColor)?;
        let mut color = Color::Reset;
        for row in 0..canvas.rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for col in 0..canvas.cols {
                let Some(cell) = canvas.get(col, row) else {
                    continue;
                };
                if cell.color != color {
                    color = cell.color;
                    queue!(self.out, style::SetForegroundColor(color))?;
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }
}

impl Frontend for TerminalFrontend {
    fn poll_input(&mut self) -> io::Result<FrameInput> {
        let mut input = FrameInput::default();
        self.keys.decay();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.keys.handle(key, &mut input),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    execute!(self.out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        input.left = self.keys.left > 0;
        input.right = self.keys.right > 0;
        Ok(input)
    }

    fn draw_title(&mut self, high_score: u64) -> io::Result<()> {
        let canvas = title_screen(high_score, self.cols, self.rows);
        self.present(&canvas)
    }

    fn draw_frame(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let canvas = rasterize(snapshot, self.cols, self.rows);
        self.present(&canvas)
    }

    fn draw_game_over(&mut self, summary: &RunSummary) -> io::Result<()> {
        let canvas = game_over_screen(summary, self.cols, self.rows);
        self.present(&canvas)
    }

    fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
        self.audio.play(&mut self.out, effect)
    }

    fn wait_for_tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorldState;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_rasterize_draws_player_and_score() {
        let world = WorldState::new(1);
        let canvas = rasterize(&world.snapshot(), 50, 30);
        // Player at (250, 300) → column 25, row 14 (feet at row 15)
        assert_eq!(canvas.get(25, 14).map(|c| c.ch), Some('#'));
        assert_eq!(canvas.row_text(0).trim(), "0");
        // Centre platform under the player
        assert_eq!(canvas.get(25, 16).map(|c| c.ch), Some('='));
    }

    #[test]
    fn test_off_screen_entities_are_clipped() {
        let mut world = WorldState::empty(1);
        crate::sim::spawn::spawn_enemy(&mut world);
        let canvas = rasterize(&world.snapshot(), 50, 30);
        let drawn = (0..30).flat_map(|r| canvas.row_text(r).chars().collect::<Vec<_>>());
        assert!(drawn.filter(|&c| c == 'V' || c == 'W').count() == 0);
    }

    #[test]
    fn test_game_over_screen_text() {
        let summary = RunSummary {
            score: 12,
            high_score: 12,
            new_record: true,
            cause: None,
        };
        let canvas = game_over_screen(&summary, 40, 20);
        let text: Vec<String> = (0..20).map(|r| canvas.row_text(r)).collect();
        assert!(text.iter().any(|l| l.trim() == "New Record: 12"));
        assert!(text.iter().any(|l| l.trim() == "Score: 12"));
    }

    #[test]
    fn test_timed_hold_without_releases() {
        let mut keys = KeyState::default();
        let mut input = FrameInput::default();
        keys.handle(key(KeyCode::Left, KeyEventKind::Press), &mut input);
        assert!(input.any_key);
        assert_eq!(keys.left, HOLD_TICKS);
        for _ in 0..HOLD_TICKS {
            keys.decay();
        }
        assert_eq!(keys.left, 0);
    }

    #[test]
    fn test_jump_edges_with_releases() {
        let mut keys = KeyState {
            releases: true,
            ..Default::default()
        };
        let mut input = FrameInput::default();
        keys.handle(key(KeyCode::Char(' '), KeyEventKind::Press), &mut input);
        assert!(input.jump_pressed);

        let mut input = FrameInput::default();
        keys.handle(key(KeyCode::Char(' '), KeyEventKind::Repeat), &mut input);
        assert!(!input.jump_pressed);

        let mut input = FrameInput::default();
        keys.handle(key(KeyCode::Char(' '), KeyEventKind::Release), &mut input);
        assert!(input.jump_released);
        assert!(!input.any_key);
    }

    #[test]
    fn test_escape_quits_and_unknown_keys_ignored() {
        let mut keys = KeyState::default();
        let mut input = FrameInput::default();
        keys.handle(key(KeyCode::F(5), KeyEventKind::Press), &mut input);
        assert_eq!(
            input,
            FrameInput {
                any_key: true,
                ..Default::default()
            }
        );
        keys.handle(key(KeyCode::Esc, KeyEventKind::Press), &mut input);
        assert!(input.quit);
    }
}
