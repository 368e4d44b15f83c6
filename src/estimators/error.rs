use thiserror::Error;

/// Failures surfaced by the weight estimators.
///
/// Construction is validated eagerly and never yields a half-built
/// estimator; `update` deliberately performs no validation (hot path), so
/// bad variances propagate as NaN/infinity through the accumulators instead
/// of raising an error here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The stationarity quartic of the dual-variance merit function has no
    /// real roots: the minimum sits closest to a point on the complex plane
    /// and no real estimate can be reported.
    #[error("merit function has no real stationary point")]
    NoRealStationaryPoint,
}
