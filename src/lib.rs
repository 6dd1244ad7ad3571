//! Ordinary kriging for scattered planar samples.
//!
//! Fits a spatial covariance model (the variogram) to geo-referenced
//! samples and uses it for best linear unbiased prediction at unsampled
//! locations, either point by point or rasterized over polygon-clipped
//! grids and dense contour rectangles.
//!
//! ```no_run
//! use krige::prelude::*;
//!
//! let samples = OrdinaryKriging::new(
//!     vec![45.99, 46.22, 52.82],
//!     vec![117.996, 118.003, 118.039],
//!     vec![31.996, 32.003, 32.039],
//! );
//! let variogram = samples.train(ModelKind::Exponential, 0.0, 100.0)?;
//! let estimate = variogram.predict(118.01, 32.01);
//! # let _ = estimate;
//! # Ok::<(), KrigeError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod kriging;
pub mod raster;
pub mod systems;
pub mod variography;

pub mod prelude {
    pub use crate::error::{KrigeError, Result};
    pub use crate::geometry::{Point, Ring};
    pub use crate::kriging::ordinary::{OrdinaryKriging, Variogram, VariogramParams};
    pub use crate::raster::{ContourRectangle, GridMatrices, NODATA};
    pub use crate::variography::model_variograms::ModelKind;
}
