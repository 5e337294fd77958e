use std::convert::Infallible;

use itertools::Itertools;

use crate::{Path, PathFilter, PathStats, Paths};

/// Read access to the `paths` table, independent of where it lives.
// actix drives handlers on a per-worker runtime; the futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait PathStore {
    type Error: std::error::Error + 'static;

    /// Every record matching `filter`, in store order.
    async fn paths(&self, filter: &PathFilter) -> Result<Vec<Path>, Self::Error>;
    /// Distinct non-empty path types, sorted.
    async fn path_types(&self) -> Result<Vec<String>, Self::Error>;
    /// Distinct non-empty areas, sorted.
    async fn areas(&self) -> Result<Vec<String>, Self::Error>;
    async fn stats(&self) -> Result<PathStats, Self::Error>;
}

/// Sorted, deduplicated, non-empty values.
pub fn distinct_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .sorted_unstable()
        .dedup()
        .map(str::to_owned)
        .collect()
}

impl PathStore for Paths {
    type Error = Infallible;

    async fn paths(&self, filter: &PathFilter) -> Result<Vec<Path>, Self::Error> {
        Ok(self.filtered(filter).cloned().collect())
    }

    async fn path_types(&self) -> Result<Vec<String>, Self::Error> {
        Ok(distinct_values(self.rows.iter().map(|p| p.path_type.as_deref())))
    }

    async fn areas(&self) -> Result<Vec<String>, Self::Error> {
        Ok(distinct_values(self.rows.iter().map(|p| p.area.as_deref())))
    }

    async fn stats(&self) -> Result<PathStats, Self::Error> {
        Ok(PathStats::from_paths(&self.rows))
    }
}
