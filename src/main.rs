use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use sneksense::game::{Direction, Driver, GameConfig, GameLoop, GameSession, RunOutcome};
use sneksense::input::{IdleAgent, KeyboardInput};
use sneksense::render::TerminalRenderer;

#[derive(Parser)]
#[command(name = "sneksense")]
#[command(version, about = "Grid Snake with egocentric sensors for agents")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<u16>,

    /// Grid height
    #[arg(long)]
    height: Option<u16>,

    /// Terminal columns per grid cell
    #[arg(long)]
    scale: Option<u16>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Initial heading
    #[arg(long)]
    direction: Option<Direction>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Run without drawing; always agent-driven
    #[arg(long)]
    headless: bool,

    /// Let the agent steer instead of the keyboard
    #[arg(long)]
    agent: bool,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log destination while the terminal is in use
    #[arg(long, default_value = "sneksense.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(scale) = self.scale {
            config.cell_scale = scale;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if let Some(length) = self.length {
            config.initial_length = length;
        }
        if let Some(direction) = self.direction {
            config.initial_direction = direction;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.headless {
            config.show_game = false;
        }
        if self.agent || !config.show_game {
            config.agent = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli, show_game: bool) -> Result<()> {
    let level = LevelFilter::from(cli.log_level);
    if show_game {
        // The game owns the terminal, so logs go to a file
        let file = File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
        WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")
    } else {
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
        .context("Failed to initialize logger")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;
    init_logging(&cli, config.show_game)?;

    info!("Starting sneksense");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::new(&config, rng)?;

    let mut keyboard = KeyboardInput::new();
    let mut agent = IdleAgent;

    let outcome = if config.show_game {
        info!("Game display enabled");
        let tick_interval = config.tick_interval()?;
        let mut renderer = TerminalRenderer::enter(&config)?;
        let mut game = if config.agent {
            info!("Agent steering enabled, keyboard can still quit");
            GameLoop::visual(
                session,
                Driver::Agent(&mut agent),
                &mut renderer,
                config.colors,
                tick_interval,
            )
            .with_interrupt(&mut keyboard)
        } else {
            GameLoop::visual(
                session,
                Driver::Player(&mut keyboard),
                &mut renderer,
                config.colors,
                tick_interval,
            )
        };
        let result = game.run();
        renderer.restore()?;
        result?
    } else {
        info!("Game display disabled, running in headless mode");
        GameLoop::headless(session, Driver::Agent(&mut agent)).run()?
    };

    match outcome {
        RunOutcome::Finished(summary) => {
            info!("Game Over - Final Score: {}", summary.score);
            println!(
                "Game over ({:?}) - score {}, length {}, {} ticks",
                summary.reason, summary.score, summary.length, summary.ticks
            );
        }
        RunOutcome::Quit => {}
    }

    Ok(())
}
