use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::streams::measurement_stream::MeasurementStream;
use crate::streams::Measurement;

/// Synthetic stream of measurements of `y = slope * x` with independent
/// Gaussian noise on each coordinate.
///
/// Each measurement draws a true x uniformly from the configured range,
/// computes the exact y, then perturbs both coordinates with zero-mean
/// Gaussian noise of the configured variances. The reported variances are
/// the configured ones, so a well-calibrated estimator consuming this
/// stream should converge to `slope`.
#[derive(Debug)]
pub struct ProportionalGenerator {
    seed: u64,
    rng: StdRng,
    slope: f64,
    min_x: f64,
    max_x: f64,
    x_variance: f64,
    y_variance: f64,
    x_sigma: f64,
    y_sigma: f64,
    slope_change: Option<(usize, f64)>,
    max_measurements: Option<usize>,
    produced: usize,
}

impl ProportionalGenerator {
    pub fn new(
        slope: f64,
        min_x: f64,
        max_x: f64,
        x_variance: f64,
        y_variance: f64,
        max_measurements: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if !(min_x.is_finite() && max_x.is_finite() && min_x < max_x) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "x range must be finite with min_x < max_x",
            ));
        }
        if x_variance < 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "x variance must be non-negative",
            ));
        }
        if y_variance <= 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "y variance must be greater than 0",
            ));
        }

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            slope,
            min_x,
            max_x,
            x_variance,
            y_variance,
            x_sigma: libm::sqrt(x_variance),
            y_sigma: libm::sqrt(y_variance),
            slope_change: None,
            max_measurements,
            produced: 0,
        })
    }

    /// Switches the true slope to `new_slope` starting at the measurement
    /// with the given zero-based index. Used to exercise forgetting-factor
    /// tracking.
    pub fn with_slope_change(mut self, index: usize, new_slope: f64) -> Self {
        self.slope_change = Some((index, new_slope));
        self
    }

    /// Standard Gaussian draw by the Box-Muller transform.
    fn standard_gaussian(&mut self) -> f64 {
        let u1: f64 = self.rng.random_range(f64::MIN_POSITIVE..1.0);
        let u2: f64 = self.rng.random_range(0.0..1.0);
        libm::sqrt(-2.0 * libm::log(u1)) * libm::cos(2.0 * core::f64::consts::PI * u2)
    }

    fn current_slope(&self) -> f64 {
        match self.slope_change {
            Some((index, new_slope)) if self.produced >= index => new_slope,
            _ => self.slope,
        }
    }
}

impl MeasurementStream for ProportionalGenerator {
    fn has_more_measurements(&self) -> bool {
        self.max_measurements.is_none_or(|max| self.produced < max)
    }

    fn next_measurement(&mut self) -> Option<Measurement> {
        if !self.has_more_measurements() {
            return None;
        }

        let true_x = self.rng.random_range(self.min_x..self.max_x);
        let true_y = self.current_slope() * true_x;

        let x = if self.x_variance > 0.0 {
            true_x + self.x_sigma * self.standard_gaussian()
        } else {
            true_x
        };
        let y = true_y + self.y_sigma * self.standard_gaussian();

        self.produced += 1;
        Some(Measurement::new(x, y, self.x_variance, self.y_variance))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        Ok(())
    }
}
