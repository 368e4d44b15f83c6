use crate::estimators::EstimatorError;

/// Recursive estimator of the weight W in `Y = W * X`.
///
/// Implementations accumulate measurements through their own `update`
/// methods (signatures differ per variant) and expose the current solution
/// through this query seam. Both queries are side-effect free and legal in
/// any state, including immediately after construction.
pub trait WeightEstimator {
    /// Returns the current weight estimate.
    fn estimate(&self) -> Result<f64, EstimatorError>;

    /// Returns the estimated variance of the weight estimate.
    fn variance(&self) -> Result<f64, EstimatorError>;
}
