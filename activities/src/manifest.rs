use std::{collections::BTreeSet, io, path::Path};

use crate::ActivityError;

/// Prefix the export puts in front of every `Filename` value.
pub const FILENAME_PREFIX: &str = "activities/";

/// One row of `activities.csv`, as far as the tools care.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityEntry {
    /// File name relative to the activities directory.
    pub filename: String,
    pub activity_id: String,
    pub date: String,
    pub name: String,
    pub activity_type: String,
    pub distance: String,
}

pub fn normalize_filename(raw: &str) -> &str {
    raw.strip_prefix(FILENAME_PREFIX).unwrap_or(raw)
}

pub fn read_manifest(path: &Path) -> Result<Vec<ActivityEntry>, ActivityError> {
    let file = std::fs::File::open(path)?;
    read_entries(file)
}

/// Parses the export. Rows without a filename (manual activities) are skipped.
pub fn read_entries<R: io::Read>(source: R) -> Result<Vec<ActivityEntry>, ActivityError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    // last occurrence wins; the export repeats `Distance`, metres last
    let col = |name: &str| headers.iter().rposition(|h| h == name);
    let filename = col("Filename").ok_or(ActivityError::MissingColumn("Filename"))?;
    let activity_id = col("Activity ID");
    let date = col("Activity Date");
    let name = col("Activity Name");
    let activity_type = col("Activity Type");
    let distance = col("Distance");

    let mut entries = vec![];
    for record in rdr.records() {
        let record = record?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        let normalized = normalize_filename(record.get(filename).unwrap_or_default().trim());
        if normalized.is_empty() {
            continue;
        }
        entries.push(ActivityEntry {
            filename: normalized.to_string(),
            activity_id: field(activity_id),
            date: field(date),
            name: field(name),
            activity_type: field(activity_type),
            distance: field(distance),
        });
    }
    Ok(entries)
}

pub fn expected_files(entries: &[ActivityEntry]) -> BTreeSet<String> {
    entries.iter().map(|e| e.filename.clone()).collect()
}
