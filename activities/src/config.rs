use std::path::{Path, PathBuf};

use clap::Args;

pub const DEFAULT_BASE_DIR: &str = "/var/www/bridleway-log/data/gpxfiles";

/// Where the tools read and write. Every routine takes this explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDirs {
    pub activities: PathBuf,
    pub unmatched: PathBuf,
    pub csv: PathBuf,
}

impl ActivityDirs {
    /// The standard layout under `base`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            activities: base.join("activities"),
            unmatched: base.join("unmatched"),
            csv: base.join("activities.csv"),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DirArgs {
    /// Directory holding activities.csv and the activities/ folder
    #[arg(long, env = "ACTIVITIES_BASE_DIR", default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,
}

impl DirArgs {
    pub fn dirs(&self) -> ActivityDirs {
        ActivityDirs::new(&self.base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_base() {
        let dirs = ActivityDirs::new("/data/gpx");
        assert_eq!(dirs.activities, PathBuf::from("/data/gpx/activities"));
        assert_eq!(dirs.unmatched, PathBuf::from("/data/gpx/unmatched"));
        assert_eq!(dirs.csv, PathBuf::from("/data/gpx/activities.csv"));
    }
}
