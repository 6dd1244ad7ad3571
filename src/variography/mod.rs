pub mod empirical;
pub mod model_variograms;
