use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;

use crate::{
    ActivityDirs, ActivityError, FitSupport, TrackDecoder,
    gpx::write_gpx,
    reconcile::{FileKind, Reconciliation, reconcile},
};

const PROGRESS_EVERY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub filename: String,
    pub reason: String,
}

/// Tally of one step. Failures never abort the step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub succeeded: usize,
    pub failures: Vec<FileFailure>,
}

impl StepOutcome {
    fn record(&mut self, step: &str, filename: &str, res: Result<(), ActivityError>) {
        match res {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                log::warn!("  Error {step} {filename}: {e}");
                self.failures.push(FileFailure {
                    filename: filename.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalState {
    pub gpx_files: usize,
    pub other_files: usize,
    /// `None` when the unmatched directory was never created.
    pub unmatched_files: Option<usize>,
}

impl FinalState {
    pub fn scan(dirs: &ActivityDirs) -> Result<Self, ActivityError> {
        let mut state = FinalState::default();
        for entry in fs::read_dir(&dirs.activities)? {
            if entry?.file_name().to_string_lossy().ends_with(".gpx") {
                state.gpx_files += 1;
            } else {
                state.other_files += 1;
            }
        }
        if dirs.unmatched.is_dir() {
            state.unmatched_files = Some(fs::read_dir(&dirs.unmatched)?.count());
        }
        Ok(state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub moved: StepOutcome,
    pub decompressed: StepOutcome,
    /// `None` when FIT support is unavailable and the step was skipped.
    pub converted: Option<StepOutcome>,
    pub final_state: FinalState,
}

/// The `.gpx` file a compressed track turns into once processed.
pub fn processed_name(name: &str) -> Option<String> {
    name.strip_suffix(".gpx.gz")
        .or_else(|| name.strip_suffix(".fit.gz"))
        .map(|stem| format!("{stem}.gpx"))
}

/// Unmatched files, minus the outputs of earlier runs over expected files.
pub fn files_to_move(rec: &Reconciliation) -> BTreeSet<String> {
    let outputs: BTreeSet<String> = rec
        .expected
        .iter()
        .filter_map(|n| processed_name(n))
        .collect();
    rec.unmatched.difference(&outputs).cloned().collect()
}

fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
        res => res,
    }
}

pub fn move_unmatched(
    dirs: &ActivityDirs,
    names: &BTreeSet<String>,
) -> Result<StepOutcome, ActivityError> {
    let mut outcome = StepOutcome::default();
    if names.is_empty() {
        log::info!("  No unmatched files to move.");
        return Ok(outcome);
    }
    fs::create_dir_all(&dirs.unmatched)?;

    for name in names {
        let res = move_file(&dirs.activities.join(name), &dirs.unmatched.join(name));
        outcome.record("moving", name, res.map_err(Into::into));
    }
    Ok(outcome)
}

fn gunzip(src: &Path, dst: &Path) -> Result<(), ActivityError> {
    let mut decoder = GzDecoder::new(BufReader::new(File::open(src)?));
    let mut out = BufWriter::new(File::create(dst)?);
    io::copy(&mut decoder, &mut out)?;
    out.flush()?;
    Ok(())
}

/// `x.gpx.gz` becomes `x.gpx`; the original is deleted only once that worked.
pub fn decompress_gpx_gz(path: &Path) -> Result<PathBuf, ActivityError> {
    let output = path.with_extension("");
    gunzip(path, &output)?;
    fs::remove_file(path)?;
    Ok(output)
}

/// `x.fit.gz` becomes `x.gpx` through a temporary `x.fit`. On failure the
/// temporary file is removed and `x.fit.gz` is left alone.
pub fn convert_fit_gz(path: &Path, decoder: &dyn TrackDecoder) -> Result<PathBuf, ActivityError> {
    let fit_path = path.with_extension("");
    let gpx_path = fit_path.with_extension("gpx");

    let res = (|| -> Result<(), ActivityError> {
        gunzip(path, &fit_path)?;
        let points = decoder.decode(&fit_path)?;
        if points.is_empty() {
            return Err(ActivityError::NoPoints);
        }
        fs::write(&gpx_path, write_gpx(&points))?;
        Ok(())
    })();

    if fit_path.exists() {
        if let Err(e) = fs::remove_file(&fit_path) {
            log::warn!("could not remove {}: {e}", fit_path.display());
        }
    }

    res?;
    fs::remove_file(path)?;
    Ok(gpx_path)
}

fn convert_all(dirs: &ActivityDirs, names: &[&String], decoder: &dyn TrackDecoder) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let total = names.len();
    for (i, name) in names.iter().enumerate() {
        let i = i + 1;
        if i % PROGRESS_EVERY == 0 || i == total {
            log::info!("  Processing {i}/{total}...");
        }
        let res = convert_fit_gz(&dirs.activities.join(name), decoder).map(|_| ());
        outcome.record("converting", name, res);
    }
    outcome
}

/// Moves unmatched files aside, decompresses matched `.gpx.gz`, then converts
/// matched `.fit.gz` when `fit` is available. Sequential and not resumable;
/// running it again over its own output does nothing.
pub fn process(dirs: &ActivityDirs, fit: &FitSupport) -> Result<ProcessReport, ActivityError> {
    let rec = reconcile(dirs)?;
    let to_move = files_to_move(&rec);
    let gpx_gz: Vec<&String> = rec.matched_of(FileKind::GpxGz).collect();
    let fit_gz: Vec<&String> = rec.matched_of(FileKind::FitGz).collect();

    log::info!("Files in CSV: {}", rec.expected.len());
    log::info!("Files on disk: {}", rec.present.len());
    log::info!("Matched: {}", rec.matched.len());
    log::info!("Unmatched (to move): {}", to_move.len());
    log::info!(
        "  .gpx files (no action needed): {}",
        rec.matched_of(FileKind::Gpx).count()
    );
    log::info!("  .gpx.gz files (to decompress): {}", gpx_gz.len());
    log::info!("  .fit.gz files (to convert): {}", fit_gz.len());

    log::info!("--- Step 1: Moving {} unmatched files ---", to_move.len());
    let moved = move_unmatched(dirs, &to_move)?;
    log::info!("  Moved: {}, Errors: {}", moved.succeeded, moved.failures.len());

    log::info!("--- Step 2: Decompressing {} .gpx.gz files ---", gpx_gz.len());
    let mut decompressed = StepOutcome::default();
    for name in &gpx_gz {
        let res = decompress_gpx_gz(&dirs.activities.join(name)).map(|_| ());
        decompressed.record("decompressing", name, res);
    }
    log::info!(
        "  Decompressed: {}, Errors: {}",
        decompressed.succeeded,
        decompressed.failures.len()
    );

    log::info!("--- Step 3: Converting {} .fit.gz files ---", fit_gz.len());
    let converted = match fit {
        FitSupport::Available(decoder) => {
            let outcome = convert_all(dirs, &fit_gz, decoder.as_ref());
            log::info!(
                "  Converted: {}, Errors: {}",
                outcome.succeeded,
                outcome.failures.len()
            );
            Some(outcome)
        }
        FitSupport::Unavailable => {
            log::warn!("  SKIPPED: built without FIT support (enable the `fit` feature)");
            None
        }
    };

    let final_state = FinalState::scan(dirs)?;
    log::info!("Final state of activities folder:");
    log::info!("  .gpx files: {}", final_state.gpx_files);
    log::info!("  Other files: {}", final_state.other_files);
    if let Some(n) = final_state.unmatched_files {
        log::info!("Unmatched folder: {n} files");
    }

    Ok(ProcessReport {
        moved,
        decompressed,
        converted,
        final_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn processed_names() {
        assert_eq!(processed_name("1.gpx.gz").as_deref(), Some("1.gpx"));
        assert_eq!(processed_name("2.fit.gz").as_deref(), Some("2.gpx"));
        assert_eq!(processed_name("3.gpx"), None);
        assert_eq!(processed_name("4.tcx.gz"), None);
    }

    #[test]
    fn outputs_of_expected_files_stay_put() {
        let rec = Reconciliation::new(
            set(&["1.gpx.gz", "2.fit.gz", "3.gpx"]),
            set(&["1.gpx", "2.gpx", "3.gpx", "4.gpx", "5.tcx.gz"]),
        );
        assert_eq!(files_to_move(&rec), set(&["4.gpx", "5.tcx.gz"]));
    }

    #[test]
    fn failures_are_tallied_not_raised() {
        let mut outcome = StepOutcome::default();
        outcome.record("moving", "a.gpx", Ok(()));
        outcome.record("moving", "b.gpx", Err(ActivityError::NoPoints));
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.attempted(), 2);
        assert_eq!(
            outcome.failures,
            vec![FileFailure {
                filename: "b.gpx".into(),
                reason: "No GPS points found in FIT file".into()
            }]
        );
    }
}
