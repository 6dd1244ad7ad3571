//! Raster outputs: polygon-clipped grids and dense contour rectangles.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::{point_in_ring, Aabb2, Ring};
use crate::kriging::ordinary::Variogram;

/// Sentinel for lattice cells outside every polygon ring.
pub const NODATA: f64 = -9999.0;

/// Polygon-clipped prediction lattice.
///
/// `data[j][k]` is the prediction at `(xlim[0] + j * width, ylim[0] + k * width)`;
/// cells outside every ring hold [`nodata_value`](Self::nodata_value).
/// `zlim` spans the *training values*, not the predictions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridMatrices {
    pub data: Vec<Vec<f64>>,
    pub width: f64,
    #[serde(rename = "xLim")]
    pub xlim: [f64; 2],
    #[serde(rename = "yLim")]
    pub ylim: [f64; 2],
    #[serde(rename = "zLim")]
    pub zlim: [f64; 2],
    #[serde(rename = "nodataValue")]
    pub nodata_value: f64,
}

/// Dense row-major raster over a rectangle, no clipping and no nodata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContourRectangle {
    pub contour: Vec<f64>,
    #[serde(rename = "xWidth")]
    pub x_width: usize,
    #[serde(rename = "yWidth")]
    pub y_width: usize,
    #[serde(rename = "xLim")]
    pub xlim: [f64; 2],
    #[serde(rename = "yLim")]
    pub ylim: [f64; 2],
    #[serde(rename = "zLim")]
    pub zlim: [f64; 2],
    #[serde(rename = "xResolution")]
    pub x_resolution: f64,
    #[serde(rename = "yResolution")]
    pub y_resolution: f64,
}

fn min_max(values: &[f64]) -> [f64; 2] {
    values.iter().fold([f64::INFINITY, f64::NEG_INFINITY], |acc, &v| {
        [acc[0].min(v), acc[1].max(v)]
    })
}

/// Rasterize `variogram` over the union bounding box of `polygon`, clipped
/// to its rings.
///
/// The lattice has `ceil(dx / width) + 1` by `ceil(dy / width) + 1` cells
/// and starts out all-nodata. For each ring, the subrange of lattice
/// indices its bounding box can cover is derived (snapped onto the global
/// lattice so both grids share phase), candidate cells are tested with the
/// even-odd rule, and the surviving cells are predicted in parallel at cell
/// granularity. Each cell has exactly one writer, and a cell is only
/// non-nodata once its prediction has actually been collected.
///
/// An empty polygon list yields an empty result.
pub fn grid(variogram: &Variogram, polygon: &[Ring], width: f64) -> GridMatrices {
    let mut union: Option<Aabb2> = None;
    for ring in polygon {
        if let Some(local) = Aabb2::from_points(ring) {
            match &mut union {
                Some(bbox) => bbox.union(&local),
                None => union = Some(local),
            }
        }
    }
    let Some(bbox) = union else {
        return GridMatrices::default();
    };

    let nx = ((bbox.max.x - bbox.min.x) / width).ceil() as usize;
    let ny = ((bbox.max.y - bbox.min.y) / width).ceil() as usize;
    let mut data = vec![vec![NODATA; ny + 1]; nx + 1];

    for ring in polygon {
        let Some(local) = Aabb2::from_points(ring) else {
            continue;
        };

        // lattice index subrange this ring can cover, phase-aligned with
        // the global lattice
        let j0 = (((local.min.x - (local.min.x - bbox.min.x) % width) - bbox.min.x) / width)
            .floor() as i64;
        let j1 = (((local.max.x - (local.max.x - bbox.max.x) % width) - bbox.min.x) / width)
            .ceil() as i64;
        let k0 = (((local.min.y - (local.min.y - bbox.min.y) % width) - bbox.min.y) / width)
            .floor() as i64;
        let k1 = (((local.max.y - (local.max.y - bbox.max.y) % width) - bbox.min.y) / width)
            .ceil() as i64;

        let j0 = j0.clamp(0, nx as i64) as usize;
        let j1 = j1.clamp(0, nx as i64) as usize;
        let k0 = k0.clamp(0, ny as i64) as usize;
        let k1 = k1.clamp(0, ny as i64) as usize;

        let mut cells = Vec::new();
        for j in j0..=j1 {
            let x = bbox.min.x + j as f64 * width;
            for k in k0..=k1 {
                let y = bbox.min.y + k as f64 * width;
                if point_in_ring(ring, x, y) {
                    cells.push((j, k, x, y));
                }
            }
        }

        let predictions: Vec<(usize, usize, f64)> = cells
            .into_par_iter()
            .map(|(j, k, x, y)| (j, k, variogram.predict(x, y)))
            .collect();

        for (j, k, value) in predictions {
            data[j][k] = value;
        }
    }

    GridMatrices {
        data,
        width,
        xlim: [bbox.min.x, bbox.max.x],
        ylim: [bbox.min.y, bbox.max.y],
        zlim: min_max(variogram.values()),
        nodata_value: NODATA,
    }
}

/// Dense raster over the samples' bounding box, `x_width` by `y_width`
/// pixels, row-major bottom-up.
pub fn contour(variogram: &Variogram, x_width: usize, y_width: usize) -> ContourRectangle {
    let xlim = min_max(variogram.sample_x());
    let ylim = min_max(variogram.sample_y());
    let x_step = (xlim[1] - xlim[0]) / x_width as f64;
    let y_step = (ylim[1] - ylim[0]) / y_width as f64;

    let contour = raster_rows(variogram, xlim[0], ylim[0], x_step, y_step, x_width, y_width);

    ContourRectangle {
        contour,
        x_width,
        y_width,
        xlim,
        ylim,
        zlim: min_max(variogram.values()),
        x_resolution: 1.0,
        y_resolution: 1.0,
    }
}

/// Dense raster over an explicit `[min_x, min_y, max_x, max_y]` bbox.
///
/// `width` is the pixel width (rounded up); the pixel height preserves the
/// bbox aspect ratio so the image and geographic proportions agree.
pub fn contour_with_bbox(variogram: &Variogram, bbox: [f64; 4], width: f64) -> ContourRectangle {
    let xlim = [bbox[0], bbox[2]];
    let ylim = [bbox[1], bbox[3]];
    let geo_x_width = xlim[1] - xlim[0];
    let geo_y_width = ylim[1] - ylim[0];

    let x_width = width.ceil() as usize;
    let y_width = (x_width as f64 / (geo_x_width / geo_y_width)).ceil() as usize;

    let x_resolution = geo_x_width / x_width as f64;
    let y_resolution = geo_y_width / y_width as f64;

    let contour = raster_rows(
        variogram,
        xlim[0],
        ylim[0],
        x_resolution,
        y_resolution,
        x_width,
        y_width,
    );

    ContourRectangle {
        contour,
        x_width,
        y_width,
        xlim,
        ylim,
        zlim: min_max(variogram.values()),
        x_resolution,
        y_resolution,
    }
}

fn raster_rows(
    variogram: &Variogram,
    x0: f64,
    y0: f64,
    x_step: f64,
    y_step: f64,
    x_width: usize,
    y_width: usize,
) -> Vec<f64> {
    (0..y_width)
        .into_par_iter()
        .flat_map_iter(|j| {
            let y = y0 + j as f64 * y_step;
            (0..x_width).map(move |k| variogram.predict(x0 + k as f64 * x_step, y))
        })
        .collect()
}
