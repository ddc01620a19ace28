use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

// Guards the t-statistic denominator when the correlation is exactly ±1.
const TINY: f64 = 1e-20;
const CURVE_POINTS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    TooFewPoints(usize),
    LengthMismatch { x: usize, y: usize },
    NonFinite { index: usize },
    ConstantX,
    Computation(String),
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::TooFewPoints(n) => {
                write!(f, "a fit needs at least 2 points, got {n}")
            }
            RegressionError::LengthMismatch { x, y } => {
                write!(f, "x has {x} points but y has {y}")
            }
            RegressionError::NonFinite { index } => {
                write!(f, "row {index} has a missing or non-finite value", index = index + 1)
            }
            RegressionError::ConstantX => {
                write!(f, "all x values are identical; the slope is undefined")
            }
            RegressionError::Computation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RegressionError {}

pub type RegressionResult<T> = Result<T, RegressionError>;

/// Ordinary-least-squares fit of y against x.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub std_error: f64,
}

impl LinearFit {
    /// The fitted line evaluated over equally spaced points spanning
    /// `[x_min, x_max]`.
    pub fn line_points(&self, x_min: f64, x_max: f64) -> Vec<(f64, f64)> {
        let step = (x_max - x_min) / (CURVE_POINTS - 1) as f64;
        (0..CURVE_POINTS)
            .map(|i| {
                let x = x_min + step * i as f64;
                (x, self.slope * x + self.intercept)
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Y = {slope:.2} * X + {intercept:.2}\n\
             slope (A): {slope:.2}\n\
             intercept (B): {intercept:.2}\n\
             R²: {r2:.2}\n\
             std error: {se:.2}\n\
             p-value: {p:.3}",
            slope = self.slope,
            intercept = self.intercept,
            r2 = self.r_squared,
            se = self.std_error,
            p = self.p_value,
        )
    }
}

/// Fits `y = slope * x + intercept` by ordinary least squares and derives
/// the Pearson r², the two-sided p-value for the null hypothesis of zero
/// slope, and the standard error of the slope estimate.
pub fn fit(x: &[f64], y: &[f64]) -> RegressionResult<LinearFit> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(RegressionError::TooFewPoints(x.len()));
    }
    for (index, (&xv, &yv)) in x.iter().zip(y).enumerate() {
        if !xv.is_finite() || !yv.is_finite() {
            return Err(RegressionError::NonFinite { index });
        }
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    let mut ss_xy = 0.0;
    for (&xv, &yv) in x.iter().zip(y) {
        let dx = xv - x_mean;
        let dy = yv - y_mean;
        ss_x += dx * dx;
        ss_y += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_x == 0.0 {
        return Err(RegressionError::ConstantX);
    }

    let slope = ss_xy / ss_x;
    let intercept = y_mean - slope * x_mean;

    let r = if ss_y > 0.0 {
        (ss_xy / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let r_squared = r * r;

    let df = n - 2.0;
    let (p_value, std_error) = if df > 0.0 {
        let t = r * (df / ((1.0 - r + TINY) * (1.0 + r + TINY))).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|err| RegressionError::Computation(err.to_string()))?;
        let p = 2.0 * (1.0 - dist.cdf(t.abs()));
        let residual_ss = (ss_y - slope * slope * ss_x).max(0.0);
        (p, (residual_ss / (df * ss_x)).sqrt())
    } else {
        // Two points leave no residual degrees of freedom.
        (1.0, 0.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        p_value,
        std_error,
    })
}
