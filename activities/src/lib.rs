//! Reconciles an `activities.csv` export against the track files next to it,
//! and normalises those files into plain GPX.

pub mod config;
pub mod decoder;
pub mod error;
pub mod gpx;
pub mod manifest;
pub mod process;
pub mod reconcile;

pub use config::{ActivityDirs, DirArgs};
pub use decoder::{FitSupport, TrackDecoder, TrackPoint};
pub use error::{ActivityError, DecodeError};
pub use manifest::{ActivityEntry, read_manifest};
pub use process::{ProcessReport, process};
pub use reconcile::{FileKind, Reconciliation, reconcile};
