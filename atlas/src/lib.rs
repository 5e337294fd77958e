use geo_traits::to_geo::ToGeoGeometry;
use geo_types::{Geometry, LineString};
use rusty_paths::{Path, PathFilter, PathStats, PathStore};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use wkb::reader::read_wkb;

pub mod error;
pub mod paths;
pub mod stats;

pub use error::DbError;
pub use paths::{distinct_query, path_query, Column};
pub use stats::stats_query;

pub async fn bind(conn: &str, max_conn: Option<u32>) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_conn.unwrap_or(1))
        .connect_lazy(conn)
}

fn read_u32(bytes: &[u8], at: usize, little: bool) -> Option<u32> {
    let word: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(if little {
        u32::from_le_bytes(word)
    } else {
        u32::from_be_bytes(word)
    })
}

/// Byte order, base geometry code and coordinate dimension of an ISO WKB header.
fn wkb_header(bytes: &[u8]) -> Option<(bool, u32, usize)> {
    let little = match bytes.first()? {
        0 => false,
        1 => true,
        _ => return None,
    };
    let code = read_u32(bytes, 1, little)?;
    let dims = match code / 1000 {
        0 => 2,
        1 | 2 => 3,
        3 => 4,
        _ => return None,
    };
    Some((little, code % 1000, dims))
}

/// Length in bytes of the linestring starting at `bytes[0]`.
fn linestring_wkb_len(bytes: &[u8]) -> Option<usize> {
    let (little, kind, dims) = wkb_header(bytes)?;
    if kind != 2 {
        return None;
    }
    let points = read_u32(bytes, 5, little)? as usize;
    let len = points.checked_mul(8 * dims)?.checked_add(9)?;
    (bytes.len() >= len).then_some(len)
}

/// Whether `bytes` is exactly one complete linestring or multilinestring.
/// `read_wkb` panics on truncated or unknown input, so it only sees these.
fn is_linear_wkb(bytes: &[u8]) -> bool {
    match wkb_header(bytes) {
        Some((_, 2, _)) => linestring_wkb_len(bytes) == Some(bytes.len()),
        Some((little, 5, _)) => {
            let Some(members) = read_u32(bytes, 5, little) else {
                return false;
            };
            let mut at = 9;
            for _ in 0..members {
                match bytes.get(at..).and_then(linestring_wkb_len) {
                    Some(len) => at += len,
                    None => return false,
                }
            }
            at == bytes.len()
        }
        _ => false,
    }
}

/// Decodes `ST_AsBinary(geometry, 'NDR')`. A multilinestring yields its first member.
/// Anything else, malformed bytes included, is `None`.
pub fn wkb_to_linestring(bytea: &[u8]) -> Option<LineString<f64>> {
    if !is_linear_wkb(bytea) {
        return None;
    }
    let a = read_wkb(bytea).ok()?.try_to_geometry()?;
    match a {
        Geometry::LineString(geom) => Some(geom),
        Geometry::MultiLineString(geoms) => geoms.0.into_iter().next(),
        _ => None,
    }
}

/// [`PathStore`] backed by the PostGIS `paths` table.
#[derive(Debug, Clone)]
pub struct PgPathStore {
    pool: Pool<Postgres>,
}

impl PgPathStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl PathStore for PgPathStore {
    type Error = DbError;

    async fn paths(&self, filter: &PathFilter) -> Result<Vec<Path>, DbError> {
        path_query(self.pool.acquire().await?, filter).await
    }

    async fn path_types(&self) -> Result<Vec<String>, DbError> {
        distinct_query(self.pool.acquire().await?, Column::PathType).await
    }

    async fn areas(&self) -> Result<Vec<String>, DbError> {
        distinct_query(self.pool.acquire().await?, Column::Area).await
    }

    async fn stats(&self) -> Result<PathStats, DbError> {
        stats_query(self.pool.acquire().await?).await
    }
}
