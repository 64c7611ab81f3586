//! Validation for geographic coordinates and batch arguments.

use crate::error::{IsochroneError, Result};

/// Validates a longitude/latitude pair.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use isochrones::validation::validate_lon_lat;
///
/// assert!(validate_lon_lat(37.6173, 55.7558).is_ok());
/// assert!(validate_lon_lat(200.0, 0.0).is_err());
/// assert!(validate_lon_lat(0.0, -95.0).is_err());
/// ```
pub fn validate_lon_lat(lon: f64, lat: f64) -> Result<()> {
    if !lon.is_finite() {
        return Err(IsochroneError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !lat.is_finite() {
        return Err(IsochroneError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(IsochroneError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(IsochroneError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates that parallel coordinate arrays line up.
pub fn validate_coordinate_arrays(lons: &[f64], lats: &[f64]) -> Result<()> {
    if lons.len() != lats.len() {
        return Err(IsochroneError::InvalidInput(format!(
            "Longitude and latitude arrays differ in length: {} vs {}",
            lons.len(),
            lats.len()
        )));
    }
    Ok(())
}

pub fn validate_worker_count(workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(IsochroneError::InvalidInput(
            "Worker count must be at least 1".to_string(),
        ));
    }
    Ok(())
}
