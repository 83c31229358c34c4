use linfa::prelude::*;
use linfa_linear::{LinearError, LinearRegression as OrdinaryLeastSquares};
use ndarray::{concatenate, Array1, Array2, Axis};
use thiserror::Error;

/// Ridge penalty, relative to the mean diagonal of X'X, used when the
/// plain least-squares fit is singular
const RIDGE_FALLBACK: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("No training rows")]
    Empty,

    #[error("Row {row} has {found} features, expected {expected}")]
    DimensionMismatch { row: usize, expected: usize, found: usize },

    #[error("Targets and rows differ in length ({targets} vs {rows})")]
    TargetMismatch { targets: usize, rows: usize },

    #[error("Least squares fit failed: {0}")]
    Fit(String),
}

impl From<LinearError<f64>> for RegressionError {
    fn from(err: LinearError<f64>) -> Self {
        RegressionError::Fit(err.to_string())
    }
}

impl From<ndarray::ShapeError> for RegressionError {
    fn from(err: ndarray::ShapeError) -> Self {
        RegressionError::Fit(err.to_string())
    }
}

/// Ordinary least squares with an intercept
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegression {
    /// Fit through linfa's ordinary least squares.
    ///
    /// Collinear or under-determined inputs retry with a tiny ridge
    /// penalty so a prediction is still available.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self, RegressionError> {
        let n = x.len();
        if n == 0 {
            return Err(RegressionError::Empty);
        }
        if y.len() != n {
            return Err(RegressionError::TargetMismatch { targets: y.len(), rows: n });
        }
        let p = x[0].len();
        if let Some((row, r)) = x.iter().enumerate().find(|(_, r)| r.len() != p) {
            return Err(RegressionError::DimensionMismatch { row, expected: p, found: r.len() });
        }

        let records = Array2::from_shape_vec((n, p), x.iter().flatten().copied().collect())?;
        let targets = Array1::from(y.to_vec());

        let plain = OrdinaryLeastSquares::new()
            .fit(&Dataset::new(records.clone(), targets.clone()))
            .map(|fitted| Self {
                intercept: fitted.intercept(),
                coefficients: fitted.params().to_vec(),
            });

        match plain {
            Ok(model) if model.is_finite() => Ok(model),
            Ok(_) => Self::fit_ridge(records, targets),
            Err(e) => {
                tracing::debug!("Least squares fit failed ({}), retrying with ridge", e);
                Self::fit_ridge(records, targets)
            }
        }
    }

    /// Ridge on centered data, expressed as least squares over rows
    /// augmented with `sqrt(lambda) * I` and zero targets
    fn fit_ridge(records: Array2<f64>, targets: Array1<f64>) -> Result<Self, RegressionError> {
        let p = records.ncols();
        let x_mean = records.mean_axis(Axis(0)).ok_or(RegressionError::Empty)?;
        let y_mean = targets.mean().ok_or(RegressionError::Empty)?;

        let centered = &records - &x_mean;
        let mean_diag = centered.mapv(|v| v * v).sum() / p.max(1) as f64;
        let lambda = RIDGE_FALLBACK * mean_diag.max(1.0);
        tracing::debug!("Fitting ridge with lambda {}", lambda);

        let penalty = Array2::<f64>::eye(p) * lambda.sqrt();
        let augmented = concatenate(Axis(0), &[centered.view(), penalty.view()])?;
        let centered_targets = &targets - y_mean;
        let zeros = Array1::<f64>::zeros(p);
        let augmented_targets = concatenate(Axis(0), &[centered_targets.view(), zeros.view()])?;

        let fitted = OrdinaryLeastSquares::new()
            .with_intercept(false)
            .fit(&Dataset::new(augmented, augmented_targets))?;

        let model = Self {
            intercept: y_mean - x_mean.dot(fitted.params()),
            coefficients: fitted.params().to_vec(),
        };
        if model.is_finite() {
            Ok(model)
        } else {
            Err(RegressionError::Fit("non-finite coefficients".to_string()))
        }
    }

    fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }
}
