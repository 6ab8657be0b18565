mod ui;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use typesprint::{
    config::{Config, ConfigStore, FileConfigStore},
    logging::{init_logging, LogFormat},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    TestDuration, TestSession,
};

/// timed typing test with live wpm and per-character accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test: type the sentence shown before the countdown runs out and see your words per minute and accuracy as you go."
)]
pub struct Cli {
    /// test length in seconds (15, 30 or 60); defaults to the saved setting
    #[clap(short = 's', long)]
    secs: Option<TestDuration>,

    /// start with the dark palette
    #[clap(long)]
    dark: bool,

    /// append logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// write logs as json lines instead of text
    #[clap(long, requires = "log_file")]
    log_json: bool,

    /// increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Test,
    History,
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// A test just started; the tick schedule must be re-armed
    Started,
    Quit,
}

pub struct App<S: ConfigStore = FileConfigStore> {
    pub session: TestSession,
    pub duration: TestDuration,
    pub dark_mode: bool,
    pub view: View,
    store: S,
}

impl<S: ConfigStore> App<S> {
    pub fn new(cli: &Cli, store: S) -> Self {
        let cfg = store.load();
        Self {
            session: TestSession::new(),
            duration: cli.secs.unwrap_or_else(|| cfg.duration()),
            dark_mode: cli.dark || cfg.dark_mode,
            view: View::Test,
            store,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('r') if ctrl => {
                self.session.reset();
            }
            KeyCode::Char('n') if ctrl => {
                self.session.refresh_sentence();
            }
            KeyCode::Char('t') if ctrl => {
                if !self.session.is_running() {
                    self.duration = self.duration.cycle();
                    self.persist();
                }
            }
            KeyCode::Char('d') if ctrl => {
                self.dark_mode = !self.dark_mode;
                self.persist();
            }
            KeyCode::Tab => {
                self.view = match self.view {
                    View::Test => View::History,
                    View::History => View::Test,
                };
            }
            KeyCode::Enter => {
                if self.session.is_running() {
                    self.session.finish();
                } else {
                    self.session.start(self.duration);
                    self.view = View::Test;
                    return Action::Started;
                }
            }
            KeyCode::Backspace => {
                if self.session.is_running() {
                    let mut text = self.session.typed_text().to_string();
                    text.pop();
                    self.session.on_input(&text);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if self.session.is_running() {
                    let mut text = self.session.typed_text().to_string();
                    text.push(c);
                    self.session.on_input(&text);
                }
            }
            _ => {}
        }

        Action::None
    }

    pub fn on_tick(&mut self) {
        if self.session.is_running() {
            self.session.on_tick();
        }
    }

    fn persist(&self) {
        let cfg = Config {
            duration_secs: self.duration.secs() as u64,
            dark_mode: self.dark_mode,
        };
        if let Err(err) = self.store.save(&cfg) {
            tracing::warn!(%err, "could not save settings");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        let format = if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        };
        init_logging(cli.verbose, path, format)?;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, FileConfigStore::new());
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;

    let history = app.session.history();
    if !history.is_empty() {
        println!(
            "{}",
            history
                .all()
                .iter()
                .map(|r| format!("{}  {}", r.completed_at.format("%a %b %d %H:%M"), r.summary()))
                .join("\n")
        );
    }

    Ok(())
}

fn start_tui<B: Backend, S: ConfigStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => match app.on_key(key) {
                Action::Quit => break,
                Action::Started => runner.restart_ticks(),
                Action::None => {}
            },
        }
    }

    Ok(())
}
