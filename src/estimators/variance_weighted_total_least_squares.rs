use crate::estimators::{EstimatorError, WeightEstimator};

/// Recursive weighted total least squares estimator of the weight W in
/// `Y = W * X`, weighting each sample by the known variance of its y
/// measurement. The x/y noise ratio is a single fixed scalar supplied at
/// construction.
///
/// Only three running sums are kept (inverse-variance-weighted second
/// moments of x, of y, and their cross product), so memory and per-update
/// cost are constant regardless of stream length. The stationarity
/// condition of the merit function is a quadratic in the weight, so the
/// estimate has a closed form and no root solver is involved.
///
/// Can fail if the variance is proportionally much larger than the
/// measurement value, because of floating point precision limits.
///
/// Reference: Gregory L. Plett, "Recursive approximate weighted total least
/// squares estimation of battery cell total capacity", Journal of Power
/// Sources 196(4), 2011. <https://doi.org/10.1016/j.jpowsour.2010.09.048>
#[derive(Debug, Clone)]
pub struct VarianceWeightedTotalLeastSquares {
    forgetting_factor: f64,
    // Always used squared, so the square is what is stored.
    variance_ratio_squared: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl VarianceWeightedTotalLeastSquares {
    /// Creates an estimator seeded with a nominal weight.
    ///
    /// * `nominal_value`: initial estimate of the weight.
    /// * `variance_ratio`: ratio of x measurement noise magnitude to y
    ///   measurement noise magnitude; must be greater than zero.
    /// * `forgetting_factor`: exponential decay applied to accumulated
    ///   statistics each update, in `(0, 1]`; 1.0 keeps all history.
    /// * `initial_variance`: variance of a hypothetical measurement of
    ///   y = `nominal_value` at x = 1, expressing the initial uncertainty in
    ///   the relationship; must be greater than zero.
    pub fn new(
        nominal_value: f64,
        variance_ratio: f64,
        forgetting_factor: f64,
        initial_variance: f64,
    ) -> Result<Self, EstimatorError> {
        if !(forgetting_factor > 0.0 && forgetting_factor <= 1.0) {
            return Err(EstimatorError::InvalidParameter(format!(
                "forgetting factor must be in (0, 1], got {forgetting_factor}"
            )));
        }
        if variance_ratio <= 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "variance ratio must be greater than 0, got {variance_ratio}"
            )));
        }
        if initial_variance <= 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "initial variance must be greater than 0, got {initial_variance}"
            )));
        }

        Ok(Self {
            forgetting_factor,
            variance_ratio_squared: variance_ratio * variance_ratio,
            c1: 1.0 / initial_variance,
            c2: nominal_value / initial_variance,
            c3: (nominal_value * nominal_value) / initial_variance,
        })
    }

    /// Folds one measurement pair into the accumulators.
    ///
    /// No input validation happens here, this is the hot path. A
    /// non-positive `y_variance` propagates as infinity/NaN through the
    /// accumulators rather than failing fast.
    #[inline]
    pub fn update(&mut self, x: f64, y: f64, y_variance: f64) {
        self.c1 = self.forgetting_factor * self.c1 + x * x / y_variance;
        self.c2 = self.forgetting_factor * self.c2 + x * y / y_variance;
        self.c3 = self.forgetting_factor * self.c3 + y * y / y_variance;
    }

    /// Returns the current weight estimate.
    ///
    /// Closed-form root of the merit function's stationarity quadratic.
    /// When that quadratic is degenerate (zero ratio or an exactly zero
    /// cross moment) the estimate is reported as 0.0 instead of failing;
    /// this estimator never errors, unlike its dual-variance counterpart.
    pub fn estimate(&self) -> f64 {
        if self.variance_ratio_squared == 0.0 || self.c2 == 0.0 {
            return 0.0;
        }

        let top_left = -self.c1 + self.variance_ratio_squared * self.c3;
        let top_right_inner = self.c1 - self.variance_ratio_squared * self.c3;
        let top_right = (top_right_inner * top_right_inner
            + 4.0 * self.variance_ratio_squared * self.c2 * self.c2)
            .sqrt();

        (top_left + top_right) / (2.0 * self.variance_ratio_squared * self.c2)
    }

    /// Returns the estimated variance of the weight estimate, obtained from
    /// a closed-form curvature expression of the merit function evaluated at
    /// the current estimate.
    pub fn variance(&self) -> f64 {
        let estimate = self.estimate();
        let ratio_sq = self.variance_ratio_squared;

        let bottom = estimate * estimate * ratio_sq + 1.0;

        let top = (-4.0 * ratio_sq * ratio_sq * self.c2) * estimate * estimate * estimate
            + 6.0 * ratio_sq * ratio_sq * self.c3 * estimate * estimate
            + (-6.0 * self.c1 + 12.0 * self.c2) * ratio_sq * estimate
            + 2.0 * (self.c1 - ratio_sq * self.c3);

        let hessian = top / (bottom * bottom * bottom);

        2.0 / hessian
    }
}

impl Default for VarianceWeightedTotalLeastSquares {
    /// Equivalent to `new(0.0, 1.0, 1.0, 1.0)`.
    fn default() -> Self {
        Self {
            forgetting_factor: 1.0,
            variance_ratio_squared: 1.0,
            c1: 1.0,
            c2: 0.0,
            c3: 0.0,
        }
    }
}

impl WeightEstimator for VarianceWeightedTotalLeastSquares {
    fn estimate(&self) -> Result<f64, EstimatorError> {
        Ok(VarianceWeightedTotalLeastSquares::estimate(self))
    }

    fn variance(&self) -> Result<f64, EstimatorError> {
        Ok(VarianceWeightedTotalLeastSquares::variance(self))
    }
}
