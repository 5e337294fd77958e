pub mod table;
pub use table::*;

pub mod geojson;
pub use geojson::{Feature, FeatureCollection, Geometry};

pub mod stats;
pub use stats::*;

pub mod store;
pub use store::*;

#[inline]
pub(crate) fn default<T: Default>() -> T {
    T::default()
}

pub type Id = i32;

/// Rounds a length to the 3 decimals it is reported with.
#[inline]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_decimals() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(2.0), 2.0);
        assert_eq!(round3(0.0004), 0.0);
        assert_eq!(round3(12.3449), 12.345);
    }
}
