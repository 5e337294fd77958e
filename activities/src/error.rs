use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("activities.csv has no {0:?} column")]
    MissingColumn(&'static str),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("No GPS points found in FIT file")]
    NoPoints,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid FIT data: {0}")]
    Fit(String),
}
