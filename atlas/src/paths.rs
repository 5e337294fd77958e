use rusty_paths::{Path, PathFilter};
use sqlx::{pool::PoolConnection, Postgres};

use crate::{error::DbError, wkb_to_linestring};

#[derive(sqlx::FromRow)]
struct PathRow {
    id: i32,
    source_fid: Option<String>,
    route_code: Option<String>,
    name: Option<String>,
    path_type: Option<String>,
    area: Option<String>,
    length_km: Option<f64>,
    geom: Option<Vec<u8>>,
}

impl TryFrom<PathRow> for Path {
    type Error = DbError;

    fn try_from(row: PathRow) -> Result<Self, Self::Error> {
        let geom = match row.geom {
            Some(bytea) => {
                Some(wkb_to_linestring(&bytea).ok_or(DbError::Linestring { id: row.id })?)
            }
            None => None,
        };
        Ok(Path {
            id: row.id,
            source_fid: row.source_fid,
            route_code: row.route_code,
            name: row.name,
            path_type: row.path_type,
            area: row.area,
            geom,
            length_km: row.length_km,
        })
    }
}

/// Categorical columns of the `paths` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PathType,
    Area,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::PathType => "path_type",
            Column::Area => "area",
        }
    }
}

/// All paths matching `filter`. An empty filter array binds as an empty
/// `text[]` and disables that half of the conjunction.
pub async fn path_query(
    mut conn: PoolConnection<Postgres>,
    filter: &PathFilter,
) -> Result<Vec<Path>, DbError> {
    let rows: Vec<PathRow> = sqlx::query_as(
        "SELECT id, source_fid, route_code, name, path_type, area, length_km,
       ST_AsBinary(geometry, 'NDR') AS geom
FROM paths
WHERE (cardinality($1::text[]) = 0 OR area = ANY($1))
  AND (cardinality($2::text[]) = 0 OR path_type = ANY($2));",
    )
    .bind(&filter.area)
    .bind(&filter.path_type)
    .fetch_all(&mut *conn)
    .await?;

    log::debug!("path query matched {} rows", rows.len());
    rows.into_iter().map(Path::try_from).collect()
}

/// Distinct non-empty values of `column`, in database collation order.
pub async fn distinct_query(
    mut conn: PoolConnection<Postgres>,
    column: Column,
) -> Result<Vec<String>, DbError> {
    let col = column.as_str();
    let res: Vec<(String,)> = sqlx::query_as(&format!(
        "SELECT DISTINCT {col} FROM paths WHERE {col} IS NOT NULL AND {col} <> '' ORDER BY {col};"
    ))
    .fetch_all(&mut *conn)
    .await?;

    Ok(res.into_iter().map(|x| x.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    fn row(geom: Option<Vec<u8>>) -> PathRow {
        PathRow {
            id: 3,
            source_fid: Some("17".into()),
            route_code: None,
            name: Some("Ridgeway".into()),
            path_type: Some("Byway".into()),
            area: None,
            length_km: Some(2.5),
            geom,
        }
    }

    #[test]
    fn row_without_geometry_converts() {
        let path = Path::try_from(row(None)).expect("convertible");
        assert_eq!(path.id, 3);
        assert_eq!(path.geom, None);
        assert_eq!(path.length_km, Some(2.5));
    }

    #[test]
    fn row_with_linestring_converts() {
        let ls = line_string![(x: 1.0, y: 51.0), (x: 1.5, y: 51.5)];
        let mut buf = vec![];
        wkb::writer::write_line_string(&mut buf, &ls, wkb::Endianness::LittleEndian)
            .expect("writable");
        let path = Path::try_from(row(Some(buf))).expect("convertible");
        assert_eq!(path.geom, Some(ls));
    }

    #[test]
    fn undecodable_geometry_is_an_error() {
        let res = Path::try_from(row(Some(vec![0xde, 0xad])));
        assert!(matches!(res, Err(DbError::Linestring { id: 3 })));

        let ls = line_string![(x: 1.0, y: 51.0), (x: 1.5, y: 51.5)];
        let mut buf = vec![];
        wkb::writer::write_line_string(&mut buf, &ls, wkb::Endianness::LittleEndian)
            .expect("writable");
        buf.truncate(buf.len() - 8);
        let res = Path::try_from(row(Some(buf)));
        assert!(matches!(res, Err(DbError::Linestring { id: 3 })));
    }

    #[test]
    fn column_names_match_schema() {
        assert_eq!(Column::PathType.as_str(), "path_type");
        assert_eq!(Column::Area.as_str(), "area");
    }
}
