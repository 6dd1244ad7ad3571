use serde::{Deserialize, Serialize};

pub mod exponential;
pub mod gaussian;
pub mod spherical;

pub use exponential::Exponential;
pub use gaussian::Gaussian;
pub use spherical::Spherical;

/// Shape constant shared by all models during fitting and prediction.
pub const SHAPE_A: f64 = 1.0 / 3.0;

/// Closed-form semivariance as a function of separation distance.
///
/// Monotone non-decreasing in `h` for any sane parameterization.
pub trait IsoVariogramModel {
    fn semivariance(&self, h: f64) -> f64;
}

/// Selector for the three supported model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Gaussian,
    Exponential,
    Spherical,
}

impl ModelKind {
    /// Semivariance at lag `h` for this family with the given parameters.
    pub fn semivariance(self, h: f64, nugget: f64, range: f64, sill: f64, a: f64) -> f64 {
        match self {
            ModelKind::Gaussian => Gaussian::new(nugget, range, sill, a).semivariance(h),
            ModelKind::Exponential => Exponential::new(nugget, range, sill, a).semivariance(h),
            ModelKind::Spherical => Spherical::new(nugget, range, sill, a).semivariance(h),
        }
    }

    /// Unit-sill shape basis used for the second column of the fitting
    /// design matrix.
    pub fn basis(self, h: f64, range: f64, a: f64) -> f64 {
        match self {
            ModelKind::Gaussian => 1.0 - exp0(-(1.0 / a) * (h / range) * (h / range)),
            ModelKind::Exponential => 1.0 - exp0(-(1.0 / a) * (h / range)),
            ModelKind::Spherical => 1.5 * (h / range) - 0.5 * (h / range).powi(3),
        }
    }
}

/// `exp` with `exp(0)` pinned to exactly 1, so the Gaussian and Exponential
/// envelopes vanish cleanly at `h = 0` instead of leaving a `-0` artifact.
#[inline(always)]
pub(crate) fn exp0(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.exp()
    }
}
