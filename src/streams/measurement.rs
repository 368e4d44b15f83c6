/// One paired observation of the proportional relationship `Y = W * X`,
/// carrying the known variance of each noisy coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub x: f64,
    pub y: f64,
    pub x_variance: f64,
    pub y_variance: f64,
}

impl Measurement {
    pub fn new(x: f64, y: f64, x_variance: f64, y_variance: f64) -> Self {
        Self {
            x,
            y,
            x_variance,
            y_variance,
        }
    }
}
