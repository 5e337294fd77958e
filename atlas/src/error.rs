use thiserror::Error;

use rusty_paths::Id;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("path {id} has a geometry that is not a linestring")]
    Linestring { id: Id },
}
