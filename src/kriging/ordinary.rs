//! Ordinary kriging: variogram fitting and point prediction.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Ring;
use crate::raster::{self, ContourRectangle, GridMatrices};
use crate::systems::dense;
use crate::variography::empirical::{bin_lags, distance_pairs};
use crate::variography::model_variograms::{ModelKind, SHAPE_A};

/// Raw samples awaiting a variogram fit.
///
/// Three parallel sequences of equal length: measured value and planar
/// coordinates.
#[derive(Debug, Clone)]
pub struct OrdinaryKriging {
    values: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

/// A fitted variogram: model parameters plus the precomputed prediction
/// weights. Read-only once built, so shared references may predict
/// concurrently.
#[derive(Debug, Clone)]
pub struct Variogram {
    values: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,

    model: ModelKind,
    nugget: f64,
    range: f64,
    sill: f64,
    a: f64,

    /// Inverse of the sigma2-regularized Gram matrix, `n x n` row-major.
    covariance_inverse: Vec<f64>,
    /// `covariance_inverse · values`, the kriging weight vector.
    weights: Vec<f64>,
}

/// Serializable snapshot of a fit, wire-compatible with the historical JSON
/// shape (where `K` carries the *inverted* regularized Gram matrix).
/// Together with the model kind and the sample coordinates it is sufficient
/// to rebuild a predictor without retraining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariogramParams {
    pub nugget: f64,
    pub range: f64,
    pub sill: f64,
    #[serde(rename = "A")]
    pub a: f64,
    pub n: usize,
    #[serde(rename = "K")]
    pub covariance_inverse: Vec<f64>,
    #[serde(rename = "M")]
    pub weights: Vec<f64>,
}

impl OrdinaryKriging {
    /// Wrap raw sample arrays. All three slices must have equal length.
    pub fn new(values: Vec<f64>, x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            x.len(),
            "values and x must be parallel arrays of equal length"
        );
        assert_eq!(
            values.len(),
            y.len(),
            "values and y must be parallel arrays of equal length"
        );
        Self { values, x, y }
    }

    /// Fit a variogram of the requested family.
    ///
    /// `sigma2` is the prediction-noise regularization added to the Gram
    /// diagonal; `alpha` is the ridge penalty of the linear model fit,
    /// applied as `1 / alpha`.
    ///
    /// Runs the two fitting phases: the empirical variogram (pairwise
    /// distance cloud, sort, lag binning) and a weighted least-squares fit
    /// of the model envelope over the binned cloud, followed by inversion
    /// of the regularized Gram matrix.
    pub fn train(self, model: ModelKind, sigma2: f64, alpha: f64) -> Result<Variogram> {
        let a = SHAPE_A;

        let pairs = distance_pairs(&self.x, &self.y, &self.values);
        let empirical = bin_lags(&pairs)?;
        let lags = empirical.bins();
        // model-fitting basis is the realized bin span, not the max distance
        let range = empirical.range;

        // ridge-regularized normal equations over [1, basis(lag)]
        let mut design = vec![1.0; lags * 2];
        for (i, &h) in empirical.lag.iter().enumerate() {
            design[i * 2 + 1] = model.basis(h, range, a);
        }
        let design_t = dense::transpose(&design, lags, 2);
        let mut normal = dense::add(
            &dense::multiply(&design_t, &design, 2, lags, 2),
            &dense::diag(1.0 / alpha, 2),
            2,
            2,
        );
        dense::invert_symmetric(&mut normal, 2)?;
        let w = dense::multiply(
            &dense::multiply(&normal, &design_t, 2, 2, lags),
            &empirical.semivariance,
            2,
            lags,
            1,
        );

        let nugget = w[0];
        let sill = w[1] * range + nugget;

        // Gram matrix of all sample pairs, noise prior on the diagonal
        let n = self.values.len();
        let mut covariance = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..i {
                let dx = self.x[i] - self.x[j];
                let dy = self.y[i] - self.y[j];
                let h = (dx * dx + dy * dy).sqrt();
                let g = model.semivariance(h, nugget, range, sill, a);
                covariance[i * n + j] = g;
                covariance[j * n + i] = g;
            }
            covariance[i * n + i] = model.semivariance(0.0, nugget, range, sill, a) + sigma2;
        }
        dense::invert_symmetric(&mut covariance, n)?;
        let weights = dense::multiply(&covariance, &self.values, n, n, 1);

        Ok(Variogram {
            values: self.values,
            x: self.x,
            y: self.y,
            model,
            nugget,
            range,
            sill,
            a,
            covariance_inverse: covariance,
            weights,
        })
    }
}

impl Variogram {
    /// Best linear unbiased estimate at `(x, y)`.
    ///
    /// O(n): the covariance vector between the query point and every sample,
    /// dotted with the precomputed weights. Reproduces the sample value at a
    /// sample location when trained with `sigma2 = 0`.
    pub fn predict(&self, x: f64, y: f64) -> f64 {
        let mut estimate = 0.0;
        for i in 0..self.values.len() {
            let dx = x - self.x[i];
            let dy = y - self.y[i];
            let h = (dx * dx + dy * dy).sqrt();
            estimate +=
                self.model.semivariance(h, self.nugget, self.range, self.sill, self.a)
                    * self.weights[i];
        }
        estimate
    }

    /// Rasterize predictions over the union bounding box of `polygon`,
    /// clipped to its rings. See [`raster::grid`].
    pub fn grid(&self, polygon: &[Ring], width: f64) -> GridMatrices {
        raster::grid(self, polygon, width)
    }

    /// Dense rectangle raster over the samples' bounding box.
    /// See [`raster::contour`].
    pub fn contour(&self, x_width: usize, y_width: usize) -> ContourRectangle {
        raster::contour(self, x_width, y_width)
    }

    /// Dense rectangle raster over an explicit bbox, pixel height derived
    /// from the geographic aspect ratio. See [`raster::contour_with_bbox`].
    pub fn contour_with_bbox(&self, bbox: [f64; 4], width: f64) -> ContourRectangle {
        raster::contour_with_bbox(self, bbox, width)
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn nugget(&self) -> f64 {
        self.nugget
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn sill(&self) -> f64 {
        self.sill
    }

    pub fn shape_a(&self) -> f64 {
        self.a
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sample_x(&self) -> &[f64] {
        &self.x
    }

    pub fn sample_y(&self) -> &[f64] {
        &self.y
    }

    /// Snapshot of the fitted state for persistence or interchange.
    pub fn params(&self) -> VariogramParams {
        VariogramParams {
            nugget: self.nugget,
            range: self.range,
            sill: self.sill,
            a: self.a,
            n: self.values.len(),
            covariance_inverse: self.covariance_inverse.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Rebuild a predictor from a snapshot without retraining.
    pub fn from_params(
        model: ModelKind,
        values: Vec<f64>,
        x: Vec<f64>,
        y: Vec<f64>,
        params: VariogramParams,
    ) -> Self {
        assert_eq!(values.len(), params.n);
        assert_eq!(params.weights.len(), params.n);
        Self {
            values,
            x,
            y,
            model,
            nugget: params.nugget,
            range: params.range,
            sill: params.sill,
            a: params.a,
            covariance_inverse: params.covariance_inverse,
            weights: params.weights,
        }
    }
}
