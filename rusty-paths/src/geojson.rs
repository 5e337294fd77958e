//! GeoJSON encoding of [`Path`] records.
//!
//! This is the only place that knows the GeoJSON shape; stores hand over
//! decoded [`LineString`]s and endpoints hand out [`FeatureCollection`]s.

use geo_types::LineString;
use serde::Serialize;

use crate::{round3, Id, Path};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<[f64; 2]> },
}

impl From<&LineString<f64>> for Geometry {
    fn from(ls: &LineString<f64>) -> Self {
        Geometry::LineString {
            coordinates: ls.coords().map(|c| [c.x, c.y]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathProperties {
    pub id: Id,
    pub source_fid: Option<String>,
    pub route_code: Option<String>,
    pub name: Option<String>,
    pub path_type: Option<String>,
    pub area: Option<String>,
    pub length_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub properties: PathProperties,
    pub geometry: Option<Geometry>,
}

impl From<Path> for Feature {
    fn from(path: Path) -> Self {
        Feature {
            kind: "Feature",
            geometry: path.geom.as_ref().map(Geometry::from),
            properties: PathProperties {
                id: path.id,
                source_fid: path.source_fid,
                route_code: path.route_code,
                name: path.name,
                path_type: path.path_type,
                area: path.area,
                length_km: path.length_km.map(round3),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

impl FromIterator<Path> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        FeatureCollection {
            kind: "FeatureCollection",
            features: iter.into_iter().map(Feature::from).collect(),
        }
    }
}
