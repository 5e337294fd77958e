use activities::{DirArgs, reconcile};
use clap::Parser;

/// Compare activities.csv against the files on disk. Read-only.
#[derive(Debug, Parser)]
#[command(name = "analyze-activities", version)]
struct Cli {
    #[command(flatten)]
    dirs: DirArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let dirs = cli.dirs.dirs();
    log::debug!("reading {} and {}", dirs.csv.display(), dirs.activities.display());

    let rec = reconcile(&dirs)?;
    print!("{rec}");
    Ok(())
}
