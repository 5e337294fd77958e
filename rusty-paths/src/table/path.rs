use derive_more::{Display, From, Into};
use geo_types::LineString;

use crate::{default, Id};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into, Display)]
pub struct PathKey(pub Id);

/// A bridleway or footpath as stored in the `paths` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: Id,
    pub source_fid: Option<String>,
    pub route_code: Option<String>,
    pub name: Option<String>,
    pub path_type: Option<String>,
    pub area: Option<String>,
    /// WGS84 lon/lat vertices
    pub geom: Option<LineString<f64>>,
    pub length_km: Option<f64>,
}

impl Path {
    pub fn key(&self) -> PathKey {
        PathKey(self.id)
    }
}

/// Conjunction of set-membership filters. An empty set does not restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    pub area: Vec<String>,
    pub path_type: Vec<String>,
}

impl PathFilter {
    pub fn new(area: Vec<String>, path_type: Vec<String>) -> Self {
        Self { area, path_type }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.area.is_empty() && self.path_type.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        member_of(&self.area, path.area.as_deref())
            && member_of(&self.path_type, path.path_type.as_deref())
    }
}

fn member_of(set: &[String], value: Option<&str>) -> bool {
    set.is_empty() || value.is_some_and(|v| set.iter().any(|s| s == v))
}

/// In-memory `paths` table, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Paths {
    pub rows: Vec<Path>,
}

impl Paths {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn filtered<'a>(&'a self, filter: &'a PathFilter) -> impl Iterator<Item = &'a Path> + 'a {
        self.rows.iter().filter(move |p| filter.matches(p))
    }
}

impl FromIterator<Path> for Paths {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        let mut slf: Self = default();
        slf.insert_many(iter);
        slf
    }
}

impl Insertable<Path> for Paths {
    type Key = PathKey;

    fn insert(&mut self, data: Path) -> Self::Key {
        // Does not insert duplicates
        let key = data.key();
        if self.find_index(&key).is_none() {
            self.rows.push(data);
        }
        key
    }
}

impl Queryable<PathKey> for Paths {
    fn find_index(&self, key: &PathKey) -> Option<usize> {
        self.rows.iter().position(|x| x.id == key.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(id: Id, area: Option<&str>, path_type: Option<&str>) -> Path {
        Path {
            id,
            source_fid: None,
            route_code: None,
            name: None,
            path_type: path_type.map(Into::into),
            area: area.map(Into::into),
            geom: None,
            length_km: None,
        }
    }

    #[test]
    fn duplicate_ids_are_not_inserted() {
        let mut paths = Paths::default();
        let a = paths.insert(path(1, Some("North"), None));
        let b = paths.insert(path(1, Some("South"), None));
        assert_eq!(a, b);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths.rows[0].area.as_deref(), Some("North"));
    }

    #[test]
    fn find_many_reports_missing_keys() {
        let paths: Paths = [path(4, None, None), path(7, None, None)].into_iter().collect();
        assert_eq!(
            paths.find_many_indexes(&[PathKey(7), PathKey(5), PathKey(4)]),
            vec![Some(1), None, Some(0)]
        );
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = PathFilter::default();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&path(1, None, None)));
        assert!(filter.matches(&path(2, Some("East"), Some("Bridleway"))));
    }

    #[test]
    fn filters_are_a_conjunction() {
        let filter = PathFilter::new(vec!["East".into()], vec!["Bridleway".into()]);
        assert!(filter.matches(&path(1, Some("East"), Some("Bridleway"))));
        assert!(!filter.matches(&path(2, Some("East"), Some("Footpath"))));
        assert!(!filter.matches(&path(3, Some("West"), Some("Bridleway"))));
    }

    #[test]
    fn null_values_never_match_a_non_empty_set() {
        let filter = PathFilter::new(vec!["East".into()], vec![]);
        assert!(!filter.matches(&path(1, None, Some("Bridleway"))));
    }

    #[test]
    fn filtered_keeps_insertion_order() {
        let paths: Paths = [
            path(3, Some("East"), None),
            path(1, Some("West"), None),
            path(2, Some("East"), None),
        ]
        .into_iter()
        .collect();
        let filter = PathFilter::new(vec!["East".into()], vec![]);
        let ids: Vec<Id> = paths.filtered(&filter).map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
