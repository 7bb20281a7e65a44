//! Interactive terminal frontend.
//!
//! Reads keys, sends intents to the [`MatchController`] and redraws from its
//! snapshot roughly sixty times a second. Frame deltas are measured with a
//! monotonic clock and fed to `tick`.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;
use timed_tictactoe::{
    Difficulty, EngineConfig, MatchController, MatchPhase, MatchSnapshot, Outcome, Player,
    Position, Square, TickEvent, TimerUrgency,
};
use tracing::{debug, error, info, instrument, warn};

/// Frame budget for a ~60 Hz loop.
const FRAME: Duration = Duration::from_millis(16);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Entries on the start menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Play(Difficulty),
    Quit,
}

impl MenuEntry {
    fn all() -> Vec<MenuEntry> {
        Difficulty::iter()
            .map(MenuEntry::Play)
            .chain(std::iter::once(MenuEntry::Quit))
            .collect()
    }

    fn label(self) -> String {
        match self {
            MenuEntry::Play(d) => format!("{:<8}{}", d.label(), d.blurb()),
            MenuEntry::Quit => "Quit".to_string(),
        }
    }
}

/// Whether the loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Frontend-only state layered over the controller.
#[derive(Debug)]
struct App {
    game: MatchController,
    menu: ListState,
    message: Option<String>,
}

impl App {
    fn new(game: MatchController) -> Self {
        let mut menu = ListState::default();
        menu.select(Some(0));
        Self {
            game,
            menu,
            message: None,
        }
    }

    fn selected_entry(&self) -> MenuEntry {
        let entries = MenuEntry::all();
        let idx = self.menu.selected().unwrap_or(0);
        entries[idx.min(entries.len() - 1)]
    }

    fn move_selection(&mut self, forward: bool) {
        let count = MenuEntry::all().len();
        let current = self.menu.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.menu.select(Some(next));
    }

    fn start(&mut self, difficulty: Difficulty) {
        self.message = None;
        if let Err(e) = self.game.start(difficulty) {
            warn!(error = %e, "Start failed");
            self.message = Some(e.to_string());
        }
    }

    #[instrument(skip(self, key), fields(code = ?key.code))]
    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match self.game.phase() {
            MatchPhase::Menu => self.handle_menu_key(key),
            MatchPhase::InProgress | MatchPhase::Over => self.handle_game_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Enter => match self.selected_entry() {
                MenuEntry::Play(difficulty) => self.start(difficulty),
                MenuEntry::Quit => return Flow::Quit,
            },
            KeyCode::Char('e') | KeyCode::Char('1') => self.start(Difficulty::Easy),
            KeyCode::Char('m') | KeyCode::Char('2') => self.start(Difficulty::Medium),
            KeyCode::Char('h') | KeyCode::Char('3') => self.start(Difficulty::Hard),
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let Some(pos) = c
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(Position::from_key)
                else {
                    return Flow::Continue;
                };
                match self.game.place_human_move(pos.row(), pos.col()) {
                    Ok(_) => self.message = None,
                    Err(e) => {
                        debug!(error = %e, "Move rejected");
                        self.message = Some(e.to_string());
                    }
                }
            }
            KeyCode::Char('r') => {
                if let Err(e) = self.game.restart() {
                    self.message = Some(e.to_string());
                } else {
                    self.message = None;
                }
            }
            KeyCode::Char('m') | KeyCode::Esc => {
                self.game.return_to_menu();
                self.message = None;
            }
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn on_tick(&mut self, delta: Duration) -> Result<()> {
        match self.game.tick(delta)? {
            TickEvent::Idle => {}
            TickEvent::AutoMove(action) => {
                self.message = Some(format!(
                    "Time's up! A move was made for you at {}.",
                    action.position.label()
                ));
            }
            TickEvent::ComputerMove(action, strategy) => {
                debug!(%action, ?strategy, "Computer moved");
            }
        }
        Ok(())
    }
}

/// Runs the terminal game until the player quits.
#[instrument(skip(config))]
pub fn run(config: EngineConfig, difficulty: Option<Difficulty>) -> Result<()> {
    info!("Starting terminal game");

    let game = MatchController::new(config)?;
    let mut app = App::new(game);
    if let Some(difficulty) = difficulty {
        app.start(difficulty);
    }

    enable_raw_mode()?;
    let mut terminal = undo_on_error(enter_alternate_screen(), leave_raw_mode)?;

    let res = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Terminal game finished");
    res
}

fn enter_alternate_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Best-effort teardown when setup fails partway.
fn leave_raw_mode() {
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, LeaveAlternateScreen) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
}

/// Runs `undo` if `attempt` failed, then passes the result through.
fn undo_on_error<T>(attempt: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if let Err(err) = &attempt {
        error!(error = ?err, "Terminal setup failed");
        undo();
    }
    attempt
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(FRAME)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key) == Flow::Quit
        {
            info!("Player quit");
            return Ok(());
        }

        let now = Instant::now();
        app.on_tick(now.duration_since(last))?;
        last = now;
    }
}

fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.game.snapshot();
    match snapshot.phase() {
        MatchPhase::Menu => render_menu(frame, app),
        MatchPhase::InProgress | MatchPhase::Over => render_match(frame, app, &snapshot),
    }
}

fn render_menu(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("Timed Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MenuEntry::all()
        .into_iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();
    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Select difficulty"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = app.menu;
    frame.render_stateful_widget(menu, chunks[1], &mut state);

    let help = Paragraph::new("↑↓: Navigate | Enter: Select | e/m/h: Quick start | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

fn render_match(frame: &mut Frame, app: &App, snapshot: &MatchSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let difficulty = snapshot
        .difficulty()
        .map(|d| d.label())
        .unwrap_or("-");
    let header = Paragraph::new(format!(
        "Difficulty: {}   Moves: {}",
        difficulty,
        snapshot.move_count()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Timed Tic-Tac-Toe"));
    frame.render_widget(header, chunks[0]);

    frame.render_widget(
        Paragraph::new(board_lines(snapshot))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        centered(chunks[1], 19),
    );

    frame.render_widget(
        Paragraph::new(status_line(snapshot))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );

    if let Some(message) = &app.message {
        frame.render_widget(
            Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }

    let help = Paragraph::new("1-9: Place | r: Restart | m: Menu | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn board_lines(snapshot: &MatchSnapshot) -> Vec<Line<'static>> {
    let highlight = snapshot.winning_line();
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            let Some(pos) = Position::from_row_col(row, col) else {
                continue;
            };
            let (text, mut style) = match snapshot.board().get(pos) {
                Square::Empty => (
                    format!(" {} ", pos.key()),
                    Style::default().fg(Color::DarkGray),
                ),
                Square::Occupied(player) => (
                    format!(" {} ", player.symbol()),
                    Style::default().fg(player_color(player)).add_modifier(Modifier::BOLD),
                ),
            };
            if highlight.is_some_and(|line| line.contains(&pos)) {
                style = style.bg(Color::Green);
            }
            spans.push(Span::styled(text, style));
            if col < 2 {
                spans.push(Span::raw("│"));
            }
        }
        lines.push(Line::from(spans));
        if row < 2 {
            lines.push(Line::from("───┼───┼───"));
        }
    }
    lines
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Cyan,
        Player::Computer => Color::Red,
    }
}

fn status_line(snapshot: &MatchSnapshot) -> Line<'static> {
    if *snapshot.phase() == MatchPhase::Over {
        let color = match snapshot.outcome() {
            Outcome::HumanWin => Color::Green,
            Outcome::ComputerWin => Color::Red,
            Outcome::Draw | Outcome::Ongoing => Color::Yellow,
        };
        return Line::from(Span::styled(
            format!("{}  (r: play again, m: menu)", snapshot.outcome()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    if *snapshot.is_computer_thinking() {
        return Line::from(Span::styled(
            "Computer is thinking...",
            Style::default().fg(Color::Magenta),
        ));
    }

    match (snapshot.human_time_remaining(), snapshot.urgency()) {
        (Some(remaining), Some(urgency)) => {
            let color = match urgency {
                TimerUrgency::Calm => Color::Green,
                TimerUrgency::Warning => Color::Yellow,
                TimerUrgency::Critical => Color::Red,
            };
            Line::from(Span::styled(
                format!("Your turn: {:.1}s left", remaining.as_secs_f64()),
                Style::default().fg(color),
            ))
        }
        _ => Line::from("Your turn"),
    }
}
