use rusty_paths::{GroupRow, PathStats};
use sqlx::{pool::PoolConnection, Postgres};

use crate::{error::DbError, paths::Column};

async fn group_query(
    conn: &mut PoolConnection<Postgres>,
    column: Column,
) -> Result<Vec<GroupRow>, DbError> {
    let col = column.as_str();
    let res: Vec<GroupRow> = sqlx::query_as(&format!(
        "SELECT {col}, COUNT(id), COALESCE(SUM(length_km), 0) FROM paths GROUP BY {col};"
    ))
    .fetch_all(&mut **conn)
    .await?;
    Ok(res)
}

/// Totals plus independent group-by aggregations over type and area.
pub async fn stats_query(mut conn: PoolConnection<Postgres>) -> Result<PathStats, DbError> {
    let (total_paths, total_length): (i64, Option<f64>) =
        sqlx::query_as("SELECT COUNT(id), SUM(length_km) FROM paths;")
            .fetch_one(&mut *conn)
            .await?;

    let by_type = group_query(&mut conn, Column::PathType).await?;
    let by_area = group_query(&mut conn, Column::Area).await?;

    Ok(PathStats::from_groups(
        total_paths,
        total_length,
        by_type,
        by_area,
    ))
}
