//! Regression tests against recorded baselines for a fixed five-sample
//! scenario: train with `sigma2 = 0, alpha = 100`, raster a 200 x 200
//! rectangle over the sample bounding box, and compare the first row of
//! predictions.

use approx::assert_abs_diff_eq;
use krige::prelude::*;

fn samples() -> OrdinaryKriging {
    OrdinaryKriging::new(
        vec![
            45.986076009952846,
            46.223032113384235,
            52.821454425024626,
            89.19253247046487,
            31.062802427638776,
        ],
        vec![
            117.99598607600996,
            117.99622303211338,
            118.00282145442502,
            118.03919253247047,
            117.98106280242764,
        ],
        vec![
            31.995986076009952,
            31.99622303211338,
            32.002821454425025,
            32.03919253247046,
            31.981062802427637,
        ],
    )
}

fn assert_first_row(model: ModelKind, expected: &[f64], epsilon: f64) {
    let variogram = samples().train(model, 0.0, 100.0).unwrap();
    let rect = variogram.contour(200, 200);
    assert_eq!(rect.contour.len(), 200 * 200);
    for (i, &want) in expected.iter().enumerate() {
        assert_abs_diff_eq!(rect.contour[i], want, epsilon = epsilon);
    }
}

#[test]
fn exponential_first_row() {
    assert_first_row(
        ModelKind::Exponential,
        &[
            31.062802427639,
            31.67443506838088,
            32.27805611994289,
            32.87380457354172,
            33.461820447530236,
            34.042244827188064,
            34.61521990152406,
            35.18088899653797,
            35.73939660436969,
            36.29088840795865,
        ],
        1e-9,
    );
}

#[test]
fn spherical_first_row() {
    assert_first_row(
        ModelKind::Spherical,
        &[
            31.062802427637955,
            31.35568613698695,
            31.649070507173384,
            31.942636980745615,
            32.23631166432933,
            32.53011270795399,
            32.82405871070559,
            33.11816872323164,
            33.41246224930053,
            33.70695924637588,
        ],
        1e-9,
    );
}

#[test]
fn gaussian_first_row() {
    // the gaussian gram matrix for this data is nearly singular, so the
    // inversion noise floor is higher than for the other families
    assert_first_row(
        ModelKind::Gaussian,
        &[
            31.062802438363697,
            31.19418275387546,
            31.32895545000455,
            31.467084521380848,
            31.60853364267539,
            31.753266184588494,
            31.901245229805934,
            32.052433588854164,
            32.206793815838,
            32.36428822416533,
        ],
        1e-6,
    );
}

#[test]
fn first_cell_reproduces_the_corner_sample() {
    // the raster origin coincides with the bottom-left sample, and sigma2
    // is zero, so the first prediction is the sample value itself
    let variogram = samples().train(ModelKind::Exponential, 0.0, 100.0).unwrap();
    let rect = variogram.contour(200, 200);
    assert_abs_diff_eq!(rect.contour[0], 31.062802427638776, epsilon = 1e-9);
}
