//! Binary entrypoint for the HackSim CLI.
//!
//! Commands:
//! - `play [--new]` - start the game REPL, resuming the save unless `--new`
//! - `init` - create a starter `config.toml`
//! - `status` - print a summary of the on-disk save
use std::io::Write as _;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use hacksim::config::Config;
use hacksim::game::{GameEngine, ProgressSink, CLEAR_SENTINEL};
use hacksim::storage::{SaveData, SaveStore};

#[derive(Parser)]
#[command(name = "hacksim")]
#[command(about = "A terminal hacking simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game
    Play {
        /// Ignore any existing save and start a fresh game
        #[arg(long)]
        new: bool,
    },
    /// Initialize a new configuration file
    Init,
    /// Show save-game status
    Status,
}

/// Streams handler progress lines straight to stdout as they happen.
struct StdoutProgress;

impl ProgressSink for StdoutProgress {
    fn emit(&self, line: &str) {
        println!("{line}");
        let _ = std::io::stdout().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { new } => {
            let config = config.unwrap_or_default();
            play(config, new).await
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote default configuration to {}", cli.config);
            Ok(())
        }
        Commands::Status => {
            let config = config.unwrap_or_default();
            let store = SaveStore::new(&config.game.data_dir);
            match store.save_info()? {
                Some(saved) => {
                    println!("Save found (v{})", saved.version);
                    println!("  Player level: {}", saved.player_level);
                    println!("  Play time:    {}s", saved.play_time);
                    println!("  Saved at:     {}", saved.timestamp.to_rfc3339());
                }
                None => println!("No save found in {}", config.game.data_dir),
            }
            Ok(())
        }
    }
}

fn init_logging(config: &Option<Config>, verbose: u8) {
    let level = match verbose {
        0 => config
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if !atty::is(atty::Stream::Stdout) {
        builder.format_timestamp_secs();
    }
    let _ = builder.try_init();
}

async fn play(config: Config, fresh: bool) -> Result<()> {
    let store = SaveStore::new(&config.game.data_dir);
    let mut engine = GameEngine::new();
    engine.set_progress_sink(Arc::new(StdoutProgress));
    engine.player_mut().set_name(&config.game.player_name);

    if !fresh {
        match store.load() {
            Ok(Some(save)) => {
                engine.set_play_time_base(save.play_time);
                save.import(&mut engine);
                info!("resumed save from {}", config.game.data_dir);
            }
            Ok(None) => {}
            Err(e) => warn!("could not load save, starting fresh: {e}"),
        }
    }

    println!("{} - type 'help' for commands, 'quit' to exit.", config.game.name);
    let mut last_save = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        let output = engine.process(trimmed).await?;
        if output == CLEAR_SENTINEL {
            // ANSI clear screen + home; the REPL owns this special case.
            print!("\x1b[2J\x1b[H");
            std::io::stdout().flush()?;
        } else if !output.is_empty() {
            println!("{output}");
        }

        let interval = config.game.autosave_interval_secs;
        if interval > 0 && last_save.elapsed().as_secs() >= interval {
            if let Err(e) = store.save(&SaveData::export(&engine, engine.play_time_secs())) {
                warn!("autosave failed: {e}");
            }
            last_save = Instant::now();
        }
    }

    store.save(&SaveData::export(&engine, engine.play_time_secs()))?;
    println!("Game saved. Goodbye.");
    Ok(())
}
