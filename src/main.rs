use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kombo::{
    config::{letters_field_accepts, Config, ConfigError, ConfigStore, FileConfigStore},
    drill::Drill,
    generator::Alphabet,
    runtime::{CrosstermEventSource, DrillEvent, DrillEventSource, Runner},
    ui::mode_color,
    util::{mean, std_dev},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// adaptive typing drills over every combination of your letter set
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Generates every word of a given length from your letter set, times each \
correctly typed word, and keeps serving the three you type slowest."
)]
pub struct Cli {
    /// length of the generated combinations
    #[clap(short = 'n', long)]
    length: Option<usize>,

    /// letters to build combinations from (distinct, no whitespace)
    #[clap(short = 'l', long)]
    letters: Option<String>,
}

impl Cli {
    /// Stored config with CLI flags layered on top.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(n) = self.length {
            config.word_length = n;
        }
        if let Some(ref letters) = self.letters {
            config.letters = letters.clone();
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Scoreboard,
    Settings,
}

#[derive(Debug, Default)]
pub struct ScoreboardState {
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Length,
    Letters,
}

/// Edit buffer for the settings screen. Letters are filtered as they are
/// typed (no whitespace, no duplicates); the minimum-length check runs when
/// the letters field loses focus and on apply.
#[derive(Debug)]
pub struct SettingsForm {
    pub length_input: String,
    pub letters_input: String,
    pub focus: SettingsField,
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn from_config(config: &Config) -> Self {
        Self {
            length_input: config.word_length.to_string(),
            letters_input: config.letters.clone(),
            focus: SettingsField::Length,
            error: None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            SettingsField::Length => {
                if c.is_ascii_digit() && self.length_input.len() < 2 {
                    self.length_input.push(c);
                }
            }
            SettingsField::Letters => {
                if letters_field_accepts(&self.letters_input, c) {
                    self.letters_input.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            SettingsField::Length => {
                self.length_input.pop();
            }
            SettingsField::Letters => {
                self.letters_input.pop();
            }
        }
    }

    /// Moves focus to the other field; leaving the letters field runs the
    /// minimum-length check and sets or clears the error indicator.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsField::Length => SettingsField::Letters,
            SettingsField::Letters => {
                self.check_letters();
                SettingsField::Length
            }
        };
    }

    fn check_letters(&mut self) {
        if self.letters_input.trim().chars().count() < 2 {
            self.error = Some("need at least 2 distinct letters".to_string());
        } else {
            self.error = None;
        }
    }

    /// Validates the buffers into a config plus its parsed alphabet.
    pub fn apply(&self) -> Result<(Config, Alphabet), ConfigError> {
        let config = Config {
            word_length: self.length_input.parse().unwrap_or(0),
            letters: self.letters_input.clone(),
        };
        let alphabet = config.validate()?;
        Ok((config, alphabet))
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub drill: Drill,
    pub state: AppState,
    pub scoreboard: ScoreboardState,
    pub settings: SettingsForm,
}

impl App {
    pub fn new(config: Config, alphabet: Alphabet) -> Self {
        let drill = Drill::new(config.word_length, alphabet);
        let settings = SettingsForm::from_config(&config);
        Self {
            config,
            drill,
            state: AppState::Typing,
            scoreboard: ScoreboardState::default(),
            settings,
        }
    }

    fn open_settings(&mut self) {
        self.settings = SettingsForm::from_config(&self.config);
        self.state = AppState::Settings;
    }

    fn apply_settings(&mut self) {
        match self.settings.apply() {
            Ok((config, alphabet)) => {
                self.drill.reconfigure(config.word_length, alphabet);
                self.config = config;
                self.scoreboard = ScoreboardState::default();
                self.state = AppState::Typing;
            }
            Err(e) => {
                self.settings.error = Some(e.to_string());
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
    ConfigApplied,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match app.state {
        AppState::Typing => match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab => app.open_settings(),
            KeyCode::Right => app.state = AppState::Scoreboard,
            KeyCode::Char(c) => {
                app.drill.on_key(c);
            }
            _ => {}
        },
        AppState::Scoreboard => match key.code {
            KeyCode::Esc | KeyCode::Right | KeyCode::Char('b') => {
                app.state = AppState::Typing;
            }
            KeyCode::Up => {
                app.scoreboard.scroll_offset = app.scoreboard.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down => {
                // Clamped to the table length in the render function
                app.scoreboard.scroll_offset += 1;
            }
            KeyCode::PageUp => {
                app.scoreboard.scroll_offset = app.scoreboard.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => {
                app.scoreboard.scroll_offset += 10;
            }
            KeyCode::Home => {
                app.scoreboard.scroll_offset = 0;
            }
            _ => {}
        },
        AppState::Settings => match key.code {
            KeyCode::Esc => app.state = AppState::Typing,
            KeyCode::Tab => app.settings.toggle_focus(),
            KeyCode::Backspace => app.settings.backspace(),
            KeyCode::Enter => {
                app.apply_settings();
                if app.state == AppState::Typing {
                    return Flow::ConfigApplied;
                }
            }
            KeyCode::Char(c) => app.settings.insert_char(c),
            _ => {}
        },
    }

    Flow::Continue
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    let alphabet = match config.validate() {
        Ok(alphabet) => alphabet,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, alphabet);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = run_app(&mut terminal, &mut app, &runner, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend, E: DrillEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
    store: &dyn ConfigStore,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            DrillEvent::Tick | DrillEvent::Resize => {}
            DrillEvent::Key(key) => match handle_key(app, key) {
                Flow::Quit => break,
                Flow::ConfigApplied => {
                    let _ = store.save(&app.config);
                }
                Flow::Continue => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    match app.state {
        AppState::Typing => f.render_widget(&app.drill, f.area()),
        AppState::Scoreboard => render_scoreboard(app, f),
        AppState::Settings => render_settings(app, f),
    }
}

fn render_scoreboard(app: &mut App, f: &mut Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Modifier, Style},
        widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    };

    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // score table
            Constraint::Length(4), // footer
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "Combinations ({} mode)",
        app.drill.mode()
    ))
    .block(Block::default().borders(Borders::ALL).title("Scoreboard"))
    .style(
        Style::default()
            .fg(mode_color(app.drill.mode()))
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let ranked = app.drill.scores().ranked();

    let table_height = chunks[1].height.saturating_sub(3) as usize;
    let max_scroll = ranked.len().saturating_sub(table_height);
    if app.scoreboard.scroll_offset > max_scroll {
        app.scoreboard.scroll_offset = max_scroll;
    }

    let header = Row::new(vec![Cell::from("Combination"), Cell::from("Score (ms)")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = ranked
        .iter()
        .skip(app.scoreboard.scroll_offset)
        .take(table_height)
        .map(|(slug, score)| {
            let score_color = match score {
                0 => Color::DarkGray,
                s if *s < 400 => Color::Green,
                s if *s < 800 => Color::Yellow,
                _ => Color::Red,
            };
            let score_display = if *score == 0 {
                "untested".to_string()
            } else {
                score.to_string()
            };
            Row::new(vec![
                Cell::from(slug.to_string()),
                Cell::from(score_display).style(Style::default().fg(score_color)),
            ])
        })
        .collect();

    let scroll_info = if ranked.len() > table_height {
        format!(
            " ({}/{} rows)",
            app.scoreboard.scroll_offset + rows.len().min(table_height),
            ranked.len()
        )
    } else {
        String::new()
    };

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Hardest first{scroll_info}")),
        );
    f.render_widget(table, chunks[1]);

    let tested: Vec<f64> = ranked
        .iter()
        .filter(|(_, score)| *score > 0)
        .map(|(_, score)| *score as f64)
        .collect();
    let summary = match (mean(&tested), std_dev(&tested)) {
        (Some(m), Some(sd)) => format!("{} tested · mean {m:.0} ms ± {sd:.0} ms", tested.len()),
        _ => "no combinations tested yet".to_string(),
    };

    let footer = Paragraph::new(format!(
        "{summary}\n↑/↓ PgUp/PgDn scroll | (b)ack (esc)ape"
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);
}

fn render_settings(app: &App, f: &mut Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph},
    };

    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(2), // length field
            Constraint::Length(2), // letters field
            Constraint::Length(1), // error indicator
            Constraint::Min(0),    // instructions
        ])
        .split(area);

    let title = Paragraph::new("Settings")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let focused = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let blurred = Style::default().fg(Color::Gray);

    let field = |label: &str, value: &str, has_focus: bool| {
        let style = if has_focus { focused } else { blurred };
        let cursor = if has_focus { "_" } else { "" };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label}: "), style),
            Span::styled(format!("{value}{cursor}"), style),
        ]))
    };

    f.render_widget(
        field(
            "word length",
            &app.settings.length_input,
            app.settings.focus == SettingsField::Length,
        ),
        chunks[1],
    );
    f.render_widget(
        field(
            "letters",
            &app.settings.letters_input,
            app.settings.focus == SettingsField::Letters,
        ),
        chunks[2],
    );

    if let Some(ref error) = app.settings.error {
        let indicator = Paragraph::new(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(indicator, chunks[3]);
    }

    let instructions = Paragraph::new(
        "(tab) switch field | (enter) apply, resets all scores | (esc) cancel",
    )
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC));
    f.render_widget(instructions, chunks[4]);
}
