use thiserror::Error;

/// Errors surfaced by variogram fitting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KrigeError {
    /// Fewer than 2 non-empty lag bins after distance binning. Happens with
    /// fewer than 3 samples or with degenerate (near-duplicate) locations.
    #[error("insufficient data: {bins} lag bins, at least 2 required to fit a variogram")]
    InsufficientData { bins: usize },

    /// Both Cholesky and Gauss-Jordan failed to invert a required matrix.
    #[error("singular {n}x{n} matrix: cholesky and gauss-jordan inversion both failed")]
    SingularMatrix { n: usize },
}

pub type Result<T> = std::result::Result<T, KrigeError>;
