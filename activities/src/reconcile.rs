use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    fs,
    path::Path,
};

use itertools::Itertools;

use crate::{
    ActivityDirs, ActivityError,
    manifest::{expected_files, read_manifest},
};

const SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    FitGz,
    GpxGz,
    Gpx,
    Other,
}

impl FileKind {
    pub fn of(name: &str) -> Self {
        if name.ends_with(".fit.gz") {
            FileKind::FitGz
        } else if name.ends_with(".gpx.gz") {
            FileKind::GpxGz
        } else if name.ends_with(".gpx") {
            FileKind::Gpx
        } else {
            FileKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::FitGz => "fit.gz",
            FileKind::GpxGz => "gpx.gz",
            FileKind::Gpx => "gpx",
            FileKind::Other => "other",
        }
    }
}

pub fn count_kinds<'a>(names: impl IntoIterator<Item = &'a String>) -> BTreeMap<FileKind, usize> {
    names.into_iter().map(|n| FileKind::of(n)).counts().into_iter().collect()
}

/// Names of the regular files directly inside `dir`, symlinked ones included.
pub fn list_present(dir: &Path) -> Result<BTreeSet<String>, ActivityError> {
    let mut present = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // follows symlinks
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                present.insert(name);
            }
            Err(name) => log::warn!("skipping non UTF-8 file name {name:?}"),
        }
    }
    Ok(present)
}

/// Three-way partition of the manifest against the directory contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub expected: BTreeSet<String>,
    pub present: BTreeSet<String>,
    /// expected ∩ present
    pub matched: BTreeSet<String>,
    /// expected − present
    pub missing: BTreeSet<String>,
    /// present − expected
    pub unmatched: BTreeSet<String>,
}

impl Reconciliation {
    pub fn new(expected: BTreeSet<String>, present: BTreeSet<String>) -> Self {
        let matched = expected.intersection(&present).cloned().collect();
        let missing = expected.difference(&present).cloned().collect();
        let unmatched = present.difference(&expected).cloned().collect();
        Self {
            expected,
            present,
            matched,
            missing,
            unmatched,
        }
    }

    pub fn matched_of(&self, kind: FileKind) -> impl Iterator<Item = &String> {
        self.matched.iter().filter(move |n| FileKind::of(n) == kind)
    }
}

/// Reads the manifest and the activities directory. Never writes.
pub fn reconcile(dirs: &ActivityDirs) -> Result<Reconciliation, ActivityError> {
    let entries = read_manifest(&dirs.csv)?;
    let present = list_present(&dirs.activities)?;
    Ok(Reconciliation::new(expected_files(&entries), present))
}

fn write_kinds(f: &mut fmt::Formatter<'_>, kinds: &BTreeMap<FileKind, usize>) -> fmt::Result {
    for (kind, count) in kinds.iter().sorted_by_key(|(k, _)| k.label()) {
        writeln!(f, "  .{}: {count}", kind.label())?;
    }
    Ok(())
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV entries: {}", self.expected.len())?;
        writeln!(f, "\nCSV file types:")?;
        write_kinds(f, &count_kinds(&self.expected))?;

        writeln!(f, "\nActual files in directory: {}", self.present.len())?;
        writeln!(f, "\nActual file types:")?;
        write_kinds(f, &count_kinds(&self.present))?;

        writeln!(f, "\n--- Matching Results ---")?;
        writeln!(f, "Matched (in CSV and on disk): {}", self.matched.len())?;
        writeln!(f, "In CSV but not on disk: {}", self.missing.len())?;
        writeln!(
            f,
            "On disk but not in CSV (unmatched): {}",
            self.unmatched.len()
        )?;

        writeln!(f, "\nMatched files by type:")?;
        write_kinds(f, &count_kinds(&self.matched))?;

        if !self.unmatched.is_empty() {
            writeln!(f, "\nSample unmatched files (first {SAMPLE_SIZE}):")?;
            for name in self.unmatched.iter().take(SAMPLE_SIZE) {
                writeln!(f, "  {name}")?;
            }
        }
        if !self.missing.is_empty() {
            writeln!(
                f,
                "\nSample files in CSV but missing from disk (first {SAMPLE_SIZE}):"
            )?;
            for name in self.missing.iter().take(SAMPLE_SIZE) {
                writeln!(f, "  {name}")?;
            }
        }
        Ok(())
    }
}
