//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::parser::parse::{ParseError, Parser};
use crate::trace::{TokenTrace, TraceError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{SourceScrollState, render_diagnostics_pane, render_source_pane};
use super::panes::{render_status_bar, render_syntax_pane, render_tokens_pane};

/// Delay between automatic steps while playing
const PLAY_INTERVAL: Duration = Duration::from_millis(400);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Syntax,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> diagnostics -> tokens -> syntax)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Syntax,
            FocusedPane::Syntax => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Syntax,
            FocusedPane::Diagnostics => FocusedPane::Source,
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Syntax => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Token stream with the stepping cursor
    pub trace: TokenTrace,

    /// Parse result of the whole file
    pub program: Program,
    pub errors: Vec<ParseError>,

    /// The source code being explored
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub tokens_scroll: usize,
    pub syntax_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Lex and parse `source_code` and set up the explorer state
    pub fn new(source_code: String) -> Self {
        let trace = TokenTrace::new(&source_code);
        let mut parser = Parser::from_source(&source_code);
        let program = parser.parse_program();
        let errors = parser.into_errors();

        let status_message = if errors.is_empty() {
            String::from("Ready!")
        } else {
            format!("{} parse error(s)", errors.len())
        };

        App {
            trace,
            program,
            errors,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tokens_scroll: 0,
            syntax_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.trace.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tokens (top) | Syntax Tree (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let current = self.trace.current();
        let current_statement = current.and_then(|t| self.program.statement_at(t.location));

        render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            self.trace.tokens(),
            current,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.errors,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        render_tokens_pane(
            frame,
            right_rows[0],
            &self.trace,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        render_syntax_pane(
            frame,
            right_rows[1],
            &self.program,
            current_statement,
            self.focused_pane == FocusedPane::Syntax,
            &mut self.syntax_scroll,
        );

        render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.trace.position(),
            self.trace.len(),
            self.errors.len(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.trace.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} token(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.is_playing = false;
                    self.step_backward();
                }
                FocusedPane::Syntax => {
                    self.syntax_scroll = self.syntax_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.is_playing = false;
                    self.step_forward();
                }
                FocusedPane::Syntax => {
                    self.syntax_scroll = self.syntax_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(PLAY_INTERVAL)
                        .unwrap_or(Instant::now());
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.trace.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.trace.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn step_forward(&mut self) {
        let result = self.trace.step_forward();
        self.report_step(result, "Stepped forward");
    }

    fn step_backward(&mut self) {
        let result = self.trace.step_backward();
        self.report_step(result, "Stepped backward");
    }

    fn report_step(&mut self, result: Result<(), TraceError>, done: &str) {
        self.status_message = match result {
            Ok(()) => match self.trace.current() {
                Some(token) => format!("{}: {} at {}", done, token, token.location),
                None => done.to_string(),
            },
            Err(e) => format!("Cannot step: {}", e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_new_app_parses_source() {
        let app = App::new("let x = 5;\nlet y x;".to_string());

        assert_eq!(app.program.statements.len(), 1);
        assert_eq!(app.errors.len(), 1);
        assert_eq!(app.status_message, "1 parse error(s)");
        assert_eq!(app.trace.position(), 0);
    }

    #[test]
    fn test_stepping_keys() {
        let mut app = App::new("a + b".to_string());

        press(&mut app, KeyCode::Right);
        assert_eq!(app.trace.position(), 1);
        assert_eq!(app.status_message, "Stepped forward: '+' at 1:3");

        press(&mut app, KeyCode::Left);
        assert_eq!(app.trace.position(), 0);
        assert_eq!(app.status_message, "Stepped backward: identifier 'a' at 1:1");

        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, "Cannot step: already at the first token");

        press(&mut app, KeyCode::Right);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.trace.position(), 3);
        assert_eq!(app.status_message, "Stepped forward 2 token(s)");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.status_message, "Cannot step: already at the end of input");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.trace.position(), 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.trace.position(), 3);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(String::new());

        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Syntax);
    }

    #[test]
    fn test_tokens_pane_arrows_step() {
        let mut app = App::new("a b c".to_string());
        app.focused_pane = FocusedPane::Tokens;

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.trace.position(), 1);
    }

    #[test]
    fn test_play_toggle_and_quit() {
        let mut app = App::new("a".to_string());

        press(&mut app, KeyCode::Char(' '));
        assert!(app.is_playing);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.is_playing);
        assert_eq!(app.status_message, "Paused");

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_into_test_backend() {
        let mut app = App::new("let add = fn(a, b) { a + b };\nadd(1, 2) @".to_string());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| app.render(f)).unwrap();
        press(&mut app, KeyCode::Char('5'));
        terminal.draw(|f| app.render(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Source Code"));
        assert!(screen.contains("Tokens"));
        assert!(screen.contains("Syntax Tree"));
        assert!(screen.contains("Diagnostics"));
    }
}
