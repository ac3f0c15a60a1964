//! Error metrics over signed prediction residuals (`predicted - actual`).

/// A metric that folds residuals one at a time
pub trait ErrorMetric {
    fn add(&mut self, residual: f64);
    /// Metric value; 0.0 before any residual was added
    fn result(&self) -> f64;
    fn name(&self) -> &str;
}

/// Root mean squared error
#[derive(Debug, Clone, Default)]
pub struct Rmse {
    sum_of_squares: f64,
    qty: usize,
}

impl Rmse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorMetric for Rmse {
    fn add(&mut self, residual: f64) {
        self.sum_of_squares += residual * residual;
        self.qty += 1;
    }

    fn result(&self) -> f64 {
        if self.qty > 0 {
            (self.sum_of_squares / self.qty as f64).sqrt()
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "RMSE"
    }
}

/// Mean absolute error
#[derive(Debug, Clone, Default)]
pub struct Mae {
    sum_of_abs: f64,
    qty: usize,
}

impl Mae {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorMetric for Mae {
    fn add(&mut self, residual: f64) {
        self.sum_of_abs += residual.abs();
        self.qty += 1;
    }

    fn result(&self) -> f64 {
        if self.qty > 0 {
            self.sum_of_abs / self.qty as f64
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "MAE"
    }
}
