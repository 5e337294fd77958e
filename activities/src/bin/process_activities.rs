use activities::{DirArgs, FitSupport, process};
use clap::Parser;

/// Move unmatched files aside and turn every matched track into plain GPX.
#[derive(Debug, Parser)]
#[command(name = "process-activities", version)]
struct Cli {
    #[command(flatten)]
    dirs: DirArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let dirs = cli.dirs.dirs();

    let fit = FitSupport::detect();
    log::debug!("{fit:?}");

    let report = process(&dirs, &fit)?;
    let failures = report.moved.failures.len()
        + report.decompressed.failures.len()
        + report.converted.as_ref().map_or(0, |c| c.failures.len());
    if failures > 0 {
        log::warn!("{failures} files could not be processed");
    }
    log::info!("Done!");
    Ok(())
}
