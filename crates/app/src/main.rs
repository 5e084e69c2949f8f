mod host;
mod input;
mod render;

use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiz_core::model::{LevelId, QuizSettingsDraft};
use services::{Clock, QuizLoopService};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::host::{Flow, QuizHost};

/// Fill-in-the-blank English grammar drills in the terminal.
#[derive(Debug, Parser)]
#[command(name = "grammar-drill")]
struct Args {
    /// JSON exercise catalog; the built-in sample is used when omitted
    #[arg(long, env = "QUIZ_CATALOG")]
    catalog: Option<PathBuf>,

    /// Level to start with; defaults to the first level of the catalog
    #[arg(long, env = "QUIZ_LEVEL")]
    level: Option<String>,

    /// Seed for reproducible batches
    #[arg(long, env = "QUIZ_SEED")]
    seed: Option<u64>,

    /// Maximum exercises per batch
    #[arg(long, env = "QUIZ_BATCH_SIZE")]
    batch_size: Option<usize>,

    /// Exercise category read for every level
    #[arg(long)]
    category: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the levels in the catalog and exit
    Levels,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let storage = match &args.catalog {
        Some(path) => Storage::json(path).await?,
        None => Storage::sample(),
    };
    let settings = QuizSettingsDraft {
        batch_size: args.batch_size,
        category: args.category,
        ..QuizSettingsDraft::default()
    }
    .validate()?;

    let mut service = QuizLoopService::from_storage(Clock::system(), &storage).with_settings(settings);
    if let Some(seed) = args.seed {
        service = service.with_seed(seed);
    }

    let levels = service.list_levels().await?;
    if matches!(args.command, Some(Command::Levels)) {
        for level in &levels {
            println!("{level}");
        }
        return Ok(());
    }

    let level = match args.level {
        Some(raw) => LevelId::new(raw),
        None => levels
            .first()
            .cloned()
            .ok_or("the exercise catalog has no levels")?,
    };

    let mut host = QuizHost::new(service);
    host.open_level(&level).await?;
    host.notify(render::levels_view(&levels, Some(&level)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("\n{}", host.screen());
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match input::parse_intent(&line) {
            Ok(intent) => {
                if host.handle(intent).await == Flow::Quit {
                    break;
                }
            }
            Err(err) => host.notify(err.to_string()),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
