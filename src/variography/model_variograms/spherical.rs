use serde::{Deserialize, Serialize};

use super::IsoVariogramModel;

/// Spherical semivariance model. Saturates once `h` exceeds the range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spherical {
    pub nugget: f64,
    pub range: f64,
    pub sill: f64,
    pub a: f64,
}

impl Spherical {
    pub fn new(nugget: f64, range: f64, sill: f64, a: f64) -> Self {
        Self {
            nugget,
            range,
            sill,
            a,
        }
    }
}

impl IsoVariogramModel for Spherical {
    fn semivariance(&self, h: f64) -> f64 {
        if h > self.range {
            return self.nugget + (self.sill - self.nugget) / self.range;
        }
        let x = h / self.range;
        self.nugget + ((self.sill - self.nugget) / self.range) * (1.5 * x - 0.5 * x * x * x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn saturates_beyond_range() {
        let model = Spherical::new(0.3, 8.0, 4.0, 1.0 / 3.0);
        let plateau = 0.3 + (4.0 - 0.3) / 8.0;
        for h in [8.001, 10.0, 100.0, 1e9] {
            assert_relative_eq!(model.semivariance(h), plateau, max_relative = 1e-12);
        }
    }

    #[test]
    fn continuous_at_range() {
        let model = Spherical::new(0.3, 8.0, 4.0, 1.0 / 3.0);
        let just_below = model.semivariance(8.0 - 1e-9);
        let at_range = model.semivariance(8.0);
        let just_above = model.semivariance(8.0 + 1e-9);
        assert_abs_diff_eq!(just_below, at_range, epsilon = 1e-8);
        assert_abs_diff_eq!(at_range, just_above, epsilon = 1e-8);
    }
}
