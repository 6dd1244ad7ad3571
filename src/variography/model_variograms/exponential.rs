use serde::{Deserialize, Serialize};

use super::{exp0, IsoVariogramModel};

/// Exponential semivariance model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Exponential {
    pub nugget: f64,
    pub range: f64,
    pub sill: f64,
    pub a: f64,
}

impl Exponential {
    pub fn new(nugget: f64, range: f64, sill: f64, a: f64) -> Self {
        Self {
            nugget,
            range,
            sill,
            a,
        }
    }
}

impl IsoVariogramModel for Exponential {
    fn semivariance(&self, h: f64) -> f64 {
        let x = -(1.0 / self.a) * (h / self.range);
        self.nugget + ((self.sill - self.nugget) / self.range) * (1.0 - exp0(x))
    }
}
