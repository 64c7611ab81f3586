//! Hilbert-curve index codes for lon/lat coordinates.
//!
//! The world rectangle `[-180, 180] x [-90, 90]` is divided into a
//! `dim x dim` grid of cells and every cell is numbered by its position
//! along a Hilbert curve. The position is rendered as a fixed-width code of
//! `precision` characters, each carrying `bits_per_char` bits. Nearby cells
//! tend to share long code prefixes, and the code of a point at a coarse
//! precision is always a prefix of its code at a finer one.

use crate::config::Config;
use crate::error::{IsochroneError, Result};
use crate::parallel::run_in_threads;
use crate::validation::{validate_coordinate_arrays, validate_lon_lat};
use isochrones_types::Point2d;

pub const LON_INTERVAL: (f64, f64) = (-180.0, 180.0);
pub const LAT_INTERVAL: (f64, f64) = (-90.0, 90.0);

pub const DEFAULT_PRECISION: usize = 18;
pub const DEFAULT_BITS_PER_CHAR: u32 = 2;

/// Largest grid side: curve distances must fit in 64 bits.
pub const MAX_DIM: u64 = 1 << 32;

const BASE4_ALPHABET: &[u8; 4] = b"0123";

/// Grid cell of a coordinate on a `dim x dim` grid.
///
/// Values on the upper boundary (`lon == 180`, `lat == 90`) are clamped into
/// the last cell.
pub fn coordinate_to_cell(lon: f64, lat: f64, dim: u64) -> Result<(u64, u64)> {
    if dim == 0 {
        return Err(IsochroneError::InvalidInput(
            "Grid dimension must be at least 1".to_string(),
        ));
    }
    validate_lon_lat(lon, lat)?;

    let scale = dim as f64;
    let x = (lon - LON_INTERVAL.0) / (LON_INTERVAL.1 - LON_INTERVAL.0) * scale;
    let y = (lat - LAT_INTERVAL.0) / (LAT_INTERVAL.1 - LAT_INTERVAL.0) * scale;

    let last = dim - 1;
    Ok(((x.floor() as u64).min(last), (y.floor() as u64).min(last)))
}

/// Position of cell `(x, y)` along the Hilbert curve filling a `dim x dim`
/// grid.
///
/// `dim` must be a power of two no larger than [`MAX_DIM`], and both
/// coordinates must lie in `[0, dim)`.
///
/// # Examples
///
/// ```
/// use isochrones::geohash::cell_to_curve_distance;
///
/// // The 2x2 curve visits (0,0), (0,1), (1,1), (1,0).
/// assert_eq!(cell_to_curve_distance(0, 1, 2)?, 1);
/// assert_eq!(cell_to_curve_distance(1, 0, 2)?, 3);
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn cell_to_curve_distance(x: u64, y: u64, dim: u64) -> Result<u64> {
    if !dim.is_power_of_two() || dim > MAX_DIM {
        return Err(IsochroneError::InvalidInput(format!(
            "Grid dimension must be a power of two in [1, 2^32], got {}",
            dim
        )));
    }
    if x >= dim || y >= dim {
        return Err(IsochroneError::InvalidInput(format!(
            "Cell ({}, {}) is outside a {}x{} grid",
            x, y, dim, dim
        )));
    }

    let (mut x, mut y) = (x, y);
    let mut distance = 0u64;
    let mut level = dim >> 1;

    while level > 0 {
        let rx = u64::from((x & level) > 0);
        let ry = u64::from((y & level) > 0);
        distance += level * level * ((3 * rx) ^ ry);

        // Only the bits below `level` matter from here on.
        x &= level - 1;
        y &= level - 1;
        if ry == 0 {
            if rx == 1 {
                x = level - 1 - x;
                y = level - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }

        level >>= 1;
    }

    Ok(distance)
}

fn validate_code_shape(precision: usize, bits_per_char: u32) -> Result<()> {
    if precision == 0 {
        return Err(IsochroneError::InvalidInput(
            "Precision must be greater than zero".to_string(),
        ));
    }
    match bits_per_char {
        2 => {}
        4 | 6 => {
            return Err(IsochroneError::NotImplemented(format!(
                "Codes with {} bits per character",
                bits_per_char
            )));
        }
        _ => {
            return Err(IsochroneError::InvalidInput(format!(
                "Bits per character must be 2, 4 or 6, got {}",
                bits_per_char
            )));
        }
    }
    if precision.saturating_mul(bits_per_char as usize) > 64 {
        return Err(IsochroneError::InvalidInput(format!(
            "Precision {} with {} bits per character exceeds 64 bits",
            precision, bits_per_char
        )));
    }
    Ok(())
}

/// Curve distance of a coordinate before it is rendered as text.
///
/// Only the 2-bit alphabet is supported; 4 and 6 bits per character fail
/// with [`IsochroneError::NotImplemented`] at any precision.
pub fn encode_to_int(lon: f64, lat: f64, precision: usize, bits_per_char: u32) -> Result<u64> {
    validate_lon_lat(lon, lat)?;
    validate_code_shape(precision, bits_per_char)?;

    let bits = precision as u32 * bits_per_char;
    let dim = 1u64 << (bits / 2);
    let (x, y) = coordinate_to_cell(lon, lat, dim)?;
    cell_to_curve_distance(x, y, dim)
}

/// Render a curve distance as a fixed-width code.
///
/// Only the 2-bit (`'0'..='3'`) alphabet is supported; 4 and 6 bits per
/// character fail with [`IsochroneError::NotImplemented`].
pub fn code_to_string(code: u64, bits_per_char: u32, precision: usize) -> Result<String> {
    validate_code_shape(precision, bits_per_char)?;

    let bits = precision as u32 * bits_per_char;
    if bits < u64::BITS && code >> bits != 0 {
        return Err(IsochroneError::InvalidInput(format!(
            "Code {} does not fit in {} characters",
            code, precision
        )));
    }

    let text = (0..precision)
        .rev()
        .map(|i| BASE4_ALPHABET[((code >> (2 * i)) & 0b11) as usize] as char)
        .collect();
    Ok(text)
}

/// Index code of a coordinate.
///
/// # Examples
///
/// ```
/// use isochrones::geohash::encode;
///
/// assert_eq!(encode(0.0, 0.0, 18, 2)?, "200000000000000000");
/// assert_eq!(encode(-90.0, 45.0, 1, 2)?, "1");
/// assert!(encode(200.0, 0.0, 18, 2).is_err());
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn encode(lon: f64, lat: f64, precision: usize, bits_per_char: u32) -> Result<String> {
    let code = encode_to_int(lon, lat, precision, bits_per_char)?;
    code_to_string(code, bits_per_char, precision)
}

/// [`encode`] with the default precision and alphabet.
pub fn encode_default(lon: f64, lat: f64) -> Result<String> {
    encode(lon, lat, DEFAULT_PRECISION, DEFAULT_BITS_PER_CHAR)
}

/// Decoding codes back to coordinates is not supported.
pub fn decode(code: &str) -> Result<(f64, f64)> {
    Err(IsochroneError::NotImplemented(format!(
        "Decoding index code '{}'",
        code
    )))
}

/// Encode parallel coordinate arrays on `config.workers` threads.
///
/// `result[i]` is the code of `(lons[i], lats[i])`; the first invalid
/// coordinate fails the whole batch.
pub fn encode_batch(lons: &[f64], lats: &[f64], config: &Config) -> Result<Vec<String>> {
    validate_coordinate_arrays(lons, lats)?;
    config.validate().map_err(IsochroneError::Config)?;

    let points: Vec<Point2d> = lons
        .iter()
        .zip(lats)
        .map(|(&lon, &lat)| Point2d::new(lon, lat))
        .collect();

    run_in_threads(&points, config.workers, |point, _worker| {
        encode(
            point.lon(),
            point.lat(),
            config.geohash_precision,
            config.bits_per_char,
        )
    })
}
