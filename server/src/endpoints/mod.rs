use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    App, Error,
};
use rusty_paths::{PathFilter, PathStore};

pub mod paths;
pub mod site;
pub mod stats;

/// Mounts the `/api` routers over store `S` plus the frontend and health check.
pub fn services<S, T>(app: App<T>) -> App<T>
where
    S: PathStore + 'static,
    T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>,
{
    let app = paths::services::<S, T>(app);
    let app = stats::services::<S, T>(app);
    site::services(app)
}

/// Collects repeatable `area` and `path_type` query parameters.
pub fn get_filter(query: &[(String, String)]) -> PathFilter {
    let values = |key: &str| {
        query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect::<Vec<_>>()
    };

    PathFilter::new(values("area"), values("path_type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_accumulate() {
        let filter = get_filter(&pairs(&[
            ("area", "North"),
            ("path_type", "Bridleway"),
            ("area", "South"),
            ("bbox", "ignored"),
        ]));
        assert_eq!(filter.area, vec!["North", "South"]);
        assert_eq!(filter.path_type, vec!["Bridleway"]);
    }

    #[test]
    fn no_parameters_is_unrestricted() {
        assert!(get_filter(&[]).is_unrestricted());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use geo_types::line_string;
    use rusty_paths::{Path, PathFilter, PathStats, PathStore, Paths};

    fn path(id: i32, area: Option<&str>, path_type: Option<&str>, km: Option<f64>) -> Path {
        Path {
            id,
            source_fid: Some(format!("fid-{id}")),
            route_code: None,
            name: None,
            path_type: path_type.map(Into::into),
            area: area.map(Into::into),
            geom: Some(line_string![(x: -0.75, y: 51.6), (x: -0.7512, y: 51.6031)]),
            length_km: km,
        }
    }

    pub fn sample_paths() -> Paths {
        let mut no_geom = path(4, Some("Cotswolds"), Some("Footpath"), None);
        no_geom.geom = None;
        [
            path(1, Some("Chilterns"), Some("Bridleway"), Some(1.23456)),
            path(2, Some("Chilterns"), Some("Footpath"), Some(0.5)),
            path(3, Some("Cotswolds"), Some("Bridleway"), Some(2.0)),
            no_geom,
            path(5, None, Some(""), Some(0.75)),
        ]
        .into_iter()
        .collect()
    }

    /// Fails every query, like a database that went away.
    pub struct BrokenStore;

    fn gone() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "database is gone")
    }

    impl PathStore for BrokenStore {
        type Error = std::io::Error;

        async fn paths(&self, _: &PathFilter) -> Result<Vec<Path>, Self::Error> {
            Err(gone())
        }

        async fn path_types(&self) -> Result<Vec<String>, Self::Error> {
            Err(gone())
        }

        async fn areas(&self) -> Result<Vec<String>, Self::Error> {
            Err(gone())
        }

        async fn stats(&self) -> Result<PathStats, Self::Error> {
            Err(gone())
        }
    }
}
