mod dual_variance_weighted_total_least_squares;
mod error;
mod estimator;
mod variance_weighted_total_least_squares;

pub use dual_variance_weighted_total_least_squares::DualVarianceWeightedTotalLeastSquares;
pub use error::EstimatorError;
pub use estimator::WeightEstimator;
pub use variance_weighted_total_least_squares::VarianceWeightedTotalLeastSquares;
