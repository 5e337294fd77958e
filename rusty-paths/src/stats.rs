use std::collections::BTreeMap;

use serde::Serialize;

use crate::{round3, Path};

/// Group key used for records without a category value.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupStats {
    pub count: i64,
    pub length_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathStats {
    pub total_paths: i64,
    pub total_length_km: f64,
    pub by_type: BTreeMap<String, GroupStats>,
    pub by_area: BTreeMap<String, GroupStats>,
}

/// One row of a `GROUP BY` aggregation: category, count, summed length.
pub type GroupRow = (Option<String>, i64, Option<f64>);

impl PathStats {
    /// Assembles the response from raw aggregates. Lengths are rounded here,
    /// after summing.
    pub fn from_groups(
        total_paths: i64,
        total_length_km: Option<f64>,
        by_type: impl IntoIterator<Item = GroupRow>,
        by_area: impl IntoIterator<Item = GroupRow>,
    ) -> Self {
        PathStats {
            total_paths,
            total_length_km: round3(total_length_km.unwrap_or_default()),
            by_type: group_map(by_type),
            by_area: group_map(by_area),
        }
    }

    /// Computes the same aggregates the database does, over in-memory rows.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut total_paths = 0;
        let mut total_length = 0.0;
        let mut by_type: BTreeMap<Option<&str>, (i64, f64)> = BTreeMap::new();
        let mut by_area: BTreeMap<Option<&str>, (i64, f64)> = BTreeMap::new();

        for path in paths {
            let length = path.length_km.unwrap_or_default();
            total_paths += 1;
            total_length += length;
            for (groups, key) in [
                (&mut by_type, path.path_type.as_deref()),
                (&mut by_area, path.area.as_deref()),
            ] {
                let entry = groups.entry(key).or_default();
                entry.0 += 1;
                entry.1 += length;
            }
        }

        let rows = |groups: BTreeMap<Option<&str>, (i64, f64)>| {
            groups
                .into_iter()
                .map(|(k, (count, len))| (k.map(str::to_owned), count, Some(len)))
                .collect::<Vec<_>>()
        };

        Self::from_groups(total_paths, Some(total_length), rows(by_type), rows(by_area))
    }
}

fn group_map(rows: impl IntoIterator<Item = GroupRow>) -> BTreeMap<String, GroupStats> {
    let mut raw: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for (key, count, length) in rows {
        // null and empty categories share the placeholder group
        let key = key.filter(|k| !k.is_empty()).unwrap_or_else(|| UNKNOWN.into());
        let entry = raw.entry(key).or_default();
        entry.0 += count;
        entry.1 += length.unwrap_or_default();
    }
    raw.into_iter()
        .map(|(k, (count, len))| {
            (
                k,
                GroupStats {
                    count,
                    length_km: round3(len),
                },
            )
        })
        .collect()
}
