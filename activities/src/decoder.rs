use std::{fmt, path::Path};

use chrono::{DateTime, Utc};

use crate::DecodeError;

/// A GPS fix in degrees, as written to a `<trkpt>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

/// Fields of one binary track record before unit conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawRecord {
    /// semicircles
    pub lat: Option<i64>,
    /// semicircles
    pub lon: Option<i64>,
    pub altitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

pub fn semicircles_to_degrees(value: i64) -> f64 {
    value as f64 * 180.0 / 2f64.powi(31)
}

impl RawRecord {
    /// `None` unless both coordinates are present.
    pub fn to_track_point(&self) -> Option<TrackPoint> {
        Some(TrackPoint {
            lat: semicircles_to_degrees(self.lat?),
            lon: semicircles_to_degrees(self.lon?),
            ele: self.altitude,
            time: self.timestamp,
        })
    }
}

pub trait TrackDecoder {
    /// Usable points of the track file at `path`, in file order.
    fn decode(&self, path: &Path) -> Result<Vec<TrackPoint>, DecodeError>;
}

/// Whether binary tracks can be converted in this build.
pub enum FitSupport {
    Available(Box<dyn TrackDecoder>),
    Unavailable,
}

impl FitSupport {
    /// Decided at compile time by the `fit` feature.
    pub fn detect() -> Self {
        #[cfg(feature = "fit")]
        {
            FitSupport::Available(Box::new(fit::FitDecoder))
        }
        #[cfg(not(feature = "fit"))]
        {
            FitSupport::Unavailable
        }
    }
}

impl fmt::Debug for FitSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitSupport::Available(_) => f.write_str("FitSupport::Available"),
            FitSupport::Unavailable => f.write_str("FitSupport::Unavailable"),
        }
    }
}

#[cfg(feature = "fit")]
pub mod fit {
    use std::{fs::File, io::BufReader, path::Path};

    use chrono::Utc;
    use fitparser::{FitDataRecord, Value, profile::MesgNum};

    use super::{RawRecord, TrackDecoder, TrackPoint};
    use crate::DecodeError;

    /// Decodes Garmin FIT files with `fitparser`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FitDecoder;

    impl TrackDecoder for FitDecoder {
        fn decode(&self, path: &Path) -> Result<Vec<TrackPoint>, DecodeError> {
            let mut reader = BufReader::new(File::open(path)?);
            let records =
                fitparser::from_reader(&mut reader).map_err(|e| DecodeError::Fit(e.to_string()))?;

            Ok(records
                .iter()
                .filter(|r| r.kind() == MesgNum::Record)
                .map(raw_record)
                .filter_map(|r| r.to_track_point())
                .collect())
        }
    }

    fn raw_record(record: &FitDataRecord) -> RawRecord {
        let mut raw = RawRecord::default();
        for field in record.fields() {
            match field.name() {
                "position_lat" => raw.lat = value_to_i64(field.value()),
                "position_long" => raw.lon = value_to_i64(field.value()),
                "enhanced_altitude" => {
                    if let Some(alt) = value_to_f64(field.value()) {
                        raw.altitude = Some(alt);
                    }
                }
                "altitude" => {
                    if raw.altitude.is_none() {
                        raw.altitude = value_to_f64(field.value());
                    }
                }
                "timestamp" => {
                    if let Value::Timestamp(ts) = field.value() {
                        raw.timestamp = Some(ts.with_timezone(&Utc));
                    }
                }
                _ => {}
            }
        }
        raw
    }

    fn value_to_i64(value: &Value) -> Option<i64> {
        match value {
            Value::SInt32(v) => Some(*v as i64),
            Value::SInt64(v) => Some(*v),
            Value::UInt32(v) => Some(*v as i64),
            _ => None,
        }
    }

    fn value_to_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            Value::SInt16(v) => Some(*v as f64),
            Value::UInt16(v) => Some(*v as f64),
            Value::SInt32(v) => Some(*v as f64),
            Value::UInt32(v) => Some(*v as f64),
            _ => None,
        }
    }

}
