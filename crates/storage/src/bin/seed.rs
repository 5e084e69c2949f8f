use std::path::PathBuf;

use clap::Parser;
use quiz_core::model::DEFAULT_CATEGORY;
use storage::json::save_catalog;
use storage::sample::sample_catalog;

/// Write the built-in sample catalog to a JSON file as a starting point for
/// custom exercise sets.
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    /// Destination file
    #[arg(long, env = "QUIZ_CATALOG", default_value = "catalog.json")]
    out: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.force && tokio::fs::try_exists(&args.out).await? {
        return Err(format!(
            "{} already exists (pass --force to overwrite)",
            args.out.display()
        )
        .into());
    }

    let catalog = sample_catalog();
    save_catalog(&args.out, &catalog).await?;

    let exercises: usize = catalog
        .levels
        .iter()
        .filter_map(|level| level.categories.get(DEFAULT_CATEGORY))
        .map(Vec::len)
        .sum();
    println!(
        "Seeded {} levels with {} exercises and {} grammar tips into {}",
        catalog.levels.len(),
        exercises,
        catalog.grammar_tips.len(),
        args.out.display()
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
