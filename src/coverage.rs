//! Batch containment and index-code tagging over a polygonal area.

use crate::config::Config;
use crate::error::{IsochroneError, Result};
use crate::geohash::encode;
use crate::geometry::MultiPolygon;
use crate::parallel::run_in_threads;
use crate::validation::validate_coordinate_arrays;
use isochrones_types::Point2d;

fn zip_points(lons: &[f64], lats: &[f64]) -> Result<Vec<Point2d>> {
    validate_coordinate_arrays(lons, lats)?;

    let points: Vec<Point2d> = lons
        .iter()
        .zip(lats)
        .map(|(&lon, &lat)| Point2d::new(lon, lat))
        .collect();

    let non_finite = points.iter().filter(|p| !p.is_finite()).count();
    if non_finite > 0 {
        log::warn!(
            "{} of {} query points are not finite and will be reported outside",
            non_finite,
            points.len()
        );
    }
    Ok(points)
}

/// `mask[i]` is whether `(lons[i], lats[i])` lies inside `area`.
///
/// # Examples
///
/// ```
/// use isochrones::{MultiPolygon, Polygon, coverage::contains_batch};
///
/// let square = Polygon::from_rings([[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]])?;
/// let area = MultiPolygon::from(square);
/// let mask = contains_batch(&area, &[1.0, 3.0], &[1.0, 1.0], 2)?;
/// assert_eq!(mask, vec![true, false]);
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn contains_batch(
    area: &MultiPolygon,
    lons: &[f64],
    lats: &[f64],
    workers: usize,
) -> Result<Vec<bool>> {
    let points = zip_points(lons, lats)?;
    run_in_threads(&points, workers, |point, _worker| Ok(area.contains(*point)))
}

/// Index code of every point inside `area`, `None` for points outside.
pub fn tag_points(
    area: &MultiPolygon,
    lons: &[f64],
    lats: &[f64],
    config: &Config,
) -> Result<Vec<Option<String>>> {
    config.validate().map_err(IsochroneError::Config)?;
    let points = zip_points(lons, lats)?;

    run_in_threads(&points, config.workers, |point, _worker| {
        if !area.contains(*point) {
            return Ok(None);
        }
        encode(
            point.lon(),
            point.lat(),
            config.geohash_precision,
            config.bits_per_char,
        )
        .map(Some)
    })
}

/// Sorted, deduplicated codes of the lattice points that fall inside `area`.
///
/// The lattice starts at the lower-left corner of the area's bounding box
/// and steps by `config.lon_step` x `config.lat_step`; point `(i, j)` is
/// `(xmin + i * lon_step, ymin + j * lat_step)`. Rows are spread across
/// `config.workers` threads.
pub fn polygon_geohashes(area: &MultiPolygon, config: &Config) -> Result<Vec<String>> {
    config.validate().map_err(IsochroneError::Config)?;

    let bbox = area.bbox();
    if area.is_empty() || bbox.is_empty() {
        log::warn!("Coverage requested for an empty area");
        return Ok(Vec::new());
    }

    let columns = lattice_len(bbox.width(), config.lon_step)?;
    let rows = lattice_len(bbox.height(), config.lat_step)?;
    let total = columns.checked_mul(rows).ok_or_else(|| {
        IsochroneError::InvalidInput(format!(
            "Coverage lattice of {} x {} points is too large",
            columns, rows
        ))
    })?;
    log::debug!(
        "Covering area with {} x {} lattice ({} points)",
        columns,
        rows,
        total
    );

    let row_indices: Vec<usize> = (0..rows).collect();
    let per_row = run_in_threads(&row_indices, config.workers, |&row, _worker| {
        let lat = bbox.ymin + row as f64 * config.lat_step;
        let mut codes = Vec::new();
        for column in 0..columns {
            let lon = bbox.xmin + column as f64 * config.lon_step;
            if area.contains((lon, lat)) {
                codes.push(encode(
                    lon,
                    lat,
                    config.geohash_precision,
                    config.bits_per_char,
                )?);
            }
        }
        Ok(codes)
    })?;

    let mut codes: Vec<String> = per_row.into_iter().flatten().collect();
    codes.sort_unstable();
    codes.dedup();
    log::debug!("Coverage produced {} distinct codes", codes.len());
    Ok(codes)
}

/// Number of lattice points in `[0, extent]` spaced by `step`.
fn lattice_len(extent: f64, step: f64) -> Result<usize> {
    let steps = (extent / step).floor();
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return Err(IsochroneError::InvalidInput(format!(
            "Extent {} is too large for lattice step {}",
            extent, step
        )));
    }
    Ok(steps as usize + 1)
}
