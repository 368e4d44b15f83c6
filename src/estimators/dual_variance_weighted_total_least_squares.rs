use crate::estimators::{EstimatorError, WeightEstimator};
use crate::roots::real_roots_quartic;

/// The x/y noise-scale ratio used to place both variables in one weighting
/// frame. Unless supplied at construction it is derived once, from the two
/// variances of the very first update, and fixed for the estimator's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
enum VarianceRatio {
    Pending,
    Fixed(f64),
}

/// Recursive weighted total least squares estimator of the weight W in
/// `Y = W * X`, weighting the uncertainties of both variables
/// independently through their per-sample variances.
///
/// Six decayed accumulators form the entire sufficient statistic. The
/// merit function is a rational function of the candidate weight whose
/// stationarity condition is a quartic; each query solves it through the
/// real-root solver and picks the stationary point of least merit. The
/// surface is non-convex, and it can happen that its minimum is closest to
/// a point on the complex plane even when only real answers are of
/// interest; that case surfaces as
/// [`EstimatorError::NoRealStationaryPoint`].
///
/// Can fail if the variance is significantly larger in magnitude than the
/// measurement value, because of floating point precision limits.
///
/// Reference: Gregory L. Plett, "Recursive approximate weighted total least
/// squares estimation of battery cell total capacity", Journal of Power
/// Sources 196(4), 2011. <https://doi.org/10.1016/j.jpowsour.2010.09.048>
#[derive(Debug, Clone)]
pub struct DualVarianceWeightedTotalLeastSquares {
    forgetting_factor: f64,
    ratio: VarianceRatio,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
    c5: f64,
    c6: f64,
}

impl DualVarianceWeightedTotalLeastSquares {
    /// Creates an estimator seeded with a nominal weight.
    ///
    /// * `nominal_value`: initial estimate of the weight.
    /// * `forgetting_factor`: exponential decay applied to accumulated
    ///   statistics each update, in `(0, 1]`.
    /// * `initial_x_variance`, `initial_y_variance`: variances of a
    ///   hypothetical measurement pair x = 1, y = `nominal_value`,
    ///   expressing the initial uncertainty in the relationship; both must
    ///   be greater than zero.
    /// * `variance_ratio`: relative x/y noise magnitude; an order of
    ///   magnitude value is enough. `None` derives it from the first
    ///   update's variances.
    pub fn new(
        nominal_value: f64,
        forgetting_factor: f64,
        initial_x_variance: f64,
        initial_y_variance: f64,
        variance_ratio: Option<f64>,
    ) -> Result<Self, EstimatorError> {
        if !(forgetting_factor > 0.0 && forgetting_factor <= 1.0) {
            return Err(EstimatorError::InvalidParameter(format!(
                "forgetting factor must be in (0, 1], got {forgetting_factor}"
            )));
        }
        if initial_x_variance <= 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "initial x variance must be greater than 0, got {initial_x_variance}"
            )));
        }
        if initial_y_variance <= 0.0 {
            return Err(EstimatorError::InvalidParameter(format!(
                "initial y variance must be greater than 0, got {initial_y_variance}"
            )));
        }

        let (ratio, nominal_value) = match variance_ratio {
            Some(ratio) if ratio <= 0.0 => {
                return Err(EstimatorError::InvalidParameter(format!(
                    "variance ratio must be greater than 0, got {ratio}"
                )));
            }
            // An explicit ratio pre-scales the nominal value into the
            // ratio-corrected frame the accumulators live in.
            Some(ratio) => (VarianceRatio::Fixed(ratio), ratio * nominal_value),
            None => (VarianceRatio::Pending, nominal_value),
        };

        Ok(Self {
            forgetting_factor,
            ratio,
            c1: 1.0 / initial_y_variance,
            c2: nominal_value / initial_y_variance,
            c3: nominal_value * nominal_value / initial_y_variance,
            c4: 1.0 / initial_x_variance,
            c5: nominal_value / initial_x_variance,
            c6: nominal_value * nominal_value / initial_x_variance,
        })
    }

    /// Folds one measurement pair into the accumulators.
    ///
    /// The very first call with a pending ratio derives it as
    /// `sqrt(x_variance) / sqrt(y_variance)` and retroactively rescales the
    /// seeded accumulators into the ratio-corrected frame, exactly once,
    /// before the sample is applied.
    ///
    /// No input validation happens here, this is the hot path.
    /// Non-positive variances propagate as infinity/NaN through the
    /// accumulators rather than failing fast.
    pub fn update(&mut self, x: f64, y: f64, x_variance: f64, y_variance: f64) {
        let ratio = match self.ratio {
            VarianceRatio::Fixed(ratio) => ratio,
            VarianceRatio::Pending => {
                let ratio = x_variance.sqrt() / y_variance.sqrt();
                self.ratio = VarianceRatio::Fixed(ratio);

                self.c1 /= ratio * ratio;
                self.c2 /= ratio;
                // c3 is untouched: its ratio factors cancel. c4 carries no
                // y factor at all.
                self.c5 *= ratio;
                self.c6 *= ratio * ratio;

                ratio
            }
        };

        let corrected_y = y * ratio;
        let y_bottom = y_variance * ratio * ratio;
        let lambda = self.forgetting_factor;

        self.c1 = lambda * self.c1 + x * x / y_bottom;
        self.c2 = lambda * self.c2 + x * corrected_y / y_bottom;
        self.c3 = lambda * self.c3 + corrected_y * corrected_y / y_bottom;

        self.c4 = lambda * self.c4 + x * x / x_variance;
        self.c5 = lambda * self.c5 + x * corrected_y / x_variance;
        self.c6 = lambda * self.c6 + corrected_y * corrected_y / x_variance;
    }

    /// Returns the current weight estimate, corrected back out of the
    /// ratio-scaled frame.
    pub fn estimate(&self) -> Result<f64, EstimatorError> {
        Ok(self.estimate_uncorrected()? / self.ratio_or_unit())
    }

    /// Returns the estimated variance of the weight estimate, obtained from
    /// a closed-form curvature expression of the merit function evaluated at
    /// the uncorrected optimum.
    pub fn variance(&self) -> Result<f64, EstimatorError> {
        let estimate = self.estimate_uncorrected()?;
        let estimate_sq = estimate * estimate;

        let top = -2.0 * self.c5 * estimate_sq * estimate_sq * estimate
            + (3.0 * self.c3 - 6.0 * self.c4 + 3.0 * self.c6) * estimate_sq * estimate_sq
            + (-12.0 * self.c2 + 16.0 * self.c5) * estimate_sq * estimate
            + (-8.0 * self.c1 + 10.0 * self.c3 + 6.0 * self.c4 - 8.0 * self.c6) * estimate_sq
            + (12.0 * self.c2 - 6.0 * self.c5) * estimate
            + self.c1 - 2.0 * self.c3 + self.c6;

        let bottom = estimate_sq + 1.0;
        let hessian = 2.0 * top / (bottom * bottom * bottom * bottom);

        let ratio = self.ratio_or_unit();
        Ok(2.0 * ratio * ratio / hessian)
    }

    /// Merit of a candidate weight `estimate` (in the ratio-scaled frame);
    /// lower is better.
    fn merit(&self, estimate: f64) -> f64 {
        let estimate_sq = estimate * estimate;
        let top = self.c4 * estimate_sq * estimate_sq - 2.0 * self.c5 * estimate_sq * estimate
            + (self.c1 + self.c6) * estimate_sq
            - 2.0 * self.c2 * estimate
            + self.c3;

        let bottom = estimate_sq + 1.0;
        top / (bottom * bottom)
    }

    /// Weight estimate in the ratio-scaled frame: the real stationary point
    /// of the merit function with the least merit.
    fn estimate_uncorrected(&self) -> Result<f64, EstimatorError> {
        // Stationarity condition of the merit function, as a quartic in the
        // candidate weight.
        let a = self.c5;
        let b = 2.0 * self.c4 - self.c1 - self.c6;
        let c = 3.0 * self.c2 - 3.0 * self.c5;
        let d = self.c1 - 2.0 * self.c3 + self.c6;
        let e = -self.c2;

        let roots = real_roots_quartic(a, b, c, d, e);

        let mut best: Option<(f64, f64)> = None;
        for root in roots {
            let merit = self.merit(root);
            // <= keeps the later candidate on exact merit ties.
            if best.is_none_or(|(_, best_merit)| merit <= best_merit) {
                best = Some((root, merit));
            }
        }

        match best {
            Some((root, _)) => Ok(root),
            None => Err(EstimatorError::NoRealStationaryPoint),
        }
    }

    #[inline]
    fn ratio_or_unit(&self) -> f64 {
        match self.ratio {
            VarianceRatio::Fixed(ratio) => ratio,
            // Before the first update the accumulators were seeded without
            // any scaling, so the unscaled frame is the corrected frame.
            VarianceRatio::Pending => 1.0,
        }
    }
}

impl Default for DualVarianceWeightedTotalLeastSquares {
    /// Equivalent to `new(0.0, 1.0, 100.0, 100.0, None)`.
    fn default() -> Self {
        Self {
            forgetting_factor: 1.0,
            ratio: VarianceRatio::Pending,
            c1: 0.01,
            c2: 0.0,
            c3: 0.0,
            c4: 0.01,
            c5: 0.0,
            c6: 0.0,
        }
    }
}

impl WeightEstimator for DualVarianceWeightedTotalLeastSquares {
    fn estimate(&self) -> Result<f64, EstimatorError> {
        DualVarianceWeightedTotalLeastSquares::estimate(self)
    }

    fn variance(&self) -> Result<f64, EstimatorError> {
        DualVarianceWeightedTotalLeastSquares::variance(self)
    }
}
