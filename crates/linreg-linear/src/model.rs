use linreg_core::{Float, LinregError, LinregResult, Matrix};
use linreg_linalg::inv;
use log::debug;
use rand::distributions::{Distribution, Standard};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fitting strategy for [`LinearModel::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitMethod<T: Float> {
    /// Closed-form normal equation: w = (XᵀX)⁻¹Xᵀy.
    LeastSquares,
    /// Iterative gradient descent on the mean squared error.
    GradientDescent { learning_rate: T, iterations: usize },
}

impl<T: Float> FromStr for FitMethod<T> {
    type Err = LinregError;

    /// Parse the original method names. `"gradient_descent"` uses the
    /// historical defaults (learning rate 0.01, 1000 iterations).
    fn from_str(s: &str) -> LinregResult<Self> {
        match s {
            "least_squares" => Ok(FitMethod::LeastSquares),
            "gradient_descent" => Ok(FitMethod::GradientDescent {
                learning_rate: T::from_f64(0.01),
                iterations: 1000,
            }),
            other => Err(LinregError::InvalidMethod(other.to_string())),
        }
    }
}

/// Per-iteration record of a gradient-descent fit.
///
/// Three parallel sequences in iteration order, one entry per step. Each
/// coefficient entry is a snapshot copy; the model's live parameters keep
/// mutating after the snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct FitHistory<T: Float> {
    pub loss: Vec<T>,
    pub intercept: Vec<T>,
    pub coefficients: Vec<Vec<T>>,
}

impl<T: Float> FitHistory<T> {
    fn with_capacity(n: usize) -> Self {
        FitHistory {
            loss: Vec::with_capacity(n),
            intercept: Vec::with_capacity(n),
            coefficients: Vec::with_capacity(n),
        }
    }
}

/// Linear regression with closed-form and gradient-descent fitting.
///
/// `intercept` and `coefficients` start unset, are written by every
/// successful fit, and are read by predict. Not safe for concurrent
/// fit/predict on one instance; use one model per thread.
pub struct LinearModel<T: Float> {
    pub intercept: Option<T>,
    pub coefficients: Option<Vec<T>>,
    seed: Option<u64>,
}

impl<T: Float> LinearModel<T>
where
    Standard: Distribution<T>,
{
    pub fn new() -> Self {
        LinearModel {
            intercept: None,
            coefficients: None,
            seed: None,
        }
    }

    /// Seed the gradient-descent initializer for reproducible fits.
    pub fn with_seed(seed: u64) -> Self {
        LinearModel {
            intercept: None,
            coefficients: None,
            seed: Some(seed),
        }
    }

    /// Fit the model to a design matrix and target vector.
    ///
    /// The bias column is prepended internally and discarded after the call.
    /// Gradient descent returns its [`FitHistory`]; the closed-form path
    /// returns `None`. A rank-deficient XᵀX surfaces as
    /// [`LinregError::SingularMatrix`] — a data-quality problem (collinear
    /// features, or fewer rows than columns), not a model bug.
    pub fn fit(
        &mut self,
        x: &Matrix<T>,
        y: &[T],
        method: FitMethod<T>,
    ) -> LinregResult<Option<FitHistory<T>>> {
        if y.len() != x.rows() {
            return Err(LinregError::DimensionMismatch(format!(
                "fit: y has {} elements but x has {} rows",
                y.len(),
                x.rows()
            )));
        }
        let x_bias = x.prepend_ones();
        match method {
            FitMethod::LeastSquares => {
                self.fit_least_squares(&x_bias, y)?;
                Ok(None)
            }
            FitMethod::GradientDescent {
                learning_rate,
                iterations,
            } => Ok(Some(self.fit_gradient_descent(
                &x_bias,
                y,
                learning_rate,
                iterations,
            ))),
        }
    }

    /// Fit on a flat single-feature sequence, one row per value.
    pub fn fit_univariate(
        &mut self,
        x: &[T],
        y: &[T],
        method: FitMethod<T>,
    ) -> LinregResult<Option<FitHistory<T>>> {
        self.fit(&Matrix::from_col(x), y, method)
    }

    /// Normal equation on the bias-augmented matrix: w = (XᵀX)⁻¹Xᵀy.
    fn fit_least_squares(&mut self, x_bias: &Matrix<T>, y: &[T]) -> LinregResult<()> {
        let xt = x_bias.transpose();
        let xtx = xt.matmul(x_bias)?;
        let xty = xt.matvec(y)?;
        let w = inv(&xtx)?.matvec(&xty)?;

        self.intercept = Some(w[0]);
        self.coefficients = Some(w[1..].to_vec());
        Ok(())
    }

    /// Gradient descent on the bias-augmented matrix.
    ///
    /// Runs exactly `iterations` steps — no convergence check and no early
    /// stopping. Parameters start as small uniform random values (≤ 0.01)
    /// and are written through to the model every step, so an interrupted
    /// loop leaves the last completed step's values.
    fn fit_gradient_descent(
        &mut self,
        x_bias: &Matrix<T>,
        y: &[T],
        learning_rate: T,
        iterations: usize,
    ) -> FitHistory<T> {
        let m = x_bias.rows();
        let n_features = x_bias.cols() - 1;
        let m_t = T::from_usize(m);

        // Entry 0 seeds the intercept, the rest the coefficients.
        let scale = T::from_f64(0.01);
        let init = Matrix::<T>::rand(1, n_features + 1, self.seed);
        let mut intercept = init.data()[0] * scale;
        let mut coefficients: Vec<T> = init.data()[1..].iter().map(|&v| v * scale).collect();

        let data = x_bias.data();
        let stride = x_bias.cols();
        let mut history = FitHistory::with_capacity(iterations);

        for epoch in 0..iterations {
            // error = X_bias · [intercept, coefficients] − y
            let mut error = Vec::with_capacity(m);
            for i in 0..m {
                let row = &data[i * stride..(i + 1) * stride];
                let mut pred = intercept;
                for j in 0..n_features {
                    pred += row[j + 1] * coefficients[j];
                }
                error.push(pred - y[i]);
            }

            // gradient = (1/m) · X_biasᵀ · error; entry 0 is the bias term
            let grad_intercept = error.iter().copied().sum::<T>() / m_t;
            intercept -= learning_rate * grad_intercept;
            for j in 0..n_features {
                let mut grad = T::ZERO;
                for i in 0..m {
                    grad += data[i * stride + j + 1] * error[i];
                }
                coefficients[j] -= learning_rate * grad / m_t;
            }

            let mse = error.iter().map(|&e| e * e).sum::<T>() / m_t;
            if epoch % 100 == 0 {
                debug!("iteration {}: mse = {}", epoch, mse);
            }

            history.loss.push(mse);
            history.intercept.push(intercept);
            history.coefficients.push(coefficients.clone());

            self.intercept = Some(intercept);
            self.coefficients = Some(coefficients.clone());
        }

        history
    }

    /// Predict one value per row of `x`.
    pub fn predict(&self, x: &Matrix<T>) -> LinregResult<Vec<T>> {
        let (intercept, coefficients) = self.params()?;
        if x.cols() != coefficients.len() {
            return Err(LinregError::DimensionMismatch(format!(
                "predict: x has {} columns but the model has {} coefficients",
                x.cols(),
                coefficients.len()
            )));
        }
        let mut out = x.matvec(coefficients)?;
        for v in out.iter_mut() {
            *v += intercept;
        }
        Ok(out)
    }

    /// Predict from a flat sequence of single-feature observations.
    ///
    /// Only valid for a model with exactly one coefficient; multi-feature
    /// models must go through [`LinearModel::predict`].
    pub fn predict_univariate(&self, x: &[T]) -> LinregResult<Vec<T>> {
        let (intercept, coefficients) = self.params()?;
        if coefficients.len() != 1 {
            return Err(LinregError::InvalidOperation(format!(
                "predict_univariate requires a single-feature model, got {} coefficients",
                coefficients.len()
            )));
        }
        let c = coefficients[0];
        Ok(x.iter().map(|&xi| intercept + c * xi).collect())
    }

    fn params(&self) -> LinregResult<(T, &[T])> {
        match (self.intercept, self.coefficients.as_deref()) {
            (Some(b), Some(w)) => Ok((b, w)),
            _ => Err(LinregError::NotFitted),
        }
    }
}

impl<T: Float> Default for LinearModel<T>
where
    Standard: Distribution<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_data() -> (Vec<f64>, Vec<f64>) {
        // y = 1 + 2x
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&xi| 1.0 + 2.0 * xi).collect();
        (x, y)
    }

    #[test]
    fn test_least_squares_recovers_line() {
        let (x, y) = line_data();
        let mut model = LinearModel::new();
        let history = model.fit_univariate(&x, &y, FitMethod::LeastSquares).unwrap();
        assert!(history.is_none());
        assert_relative_eq!(model.intercept.unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(model.coefficients.as_ref().unwrap()[0], 2.0, epsilon = 1e-9);

        let pred = model.predict_univariate(&[0.0, 10.0]).unwrap();
        assert_relative_eq!(pred[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(pred[1], 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_least_squares_multi_feature() {
        // y = 1 + 2*x1 + 3*x2
        let x: Matrix<f64> = Matrix::from_rows(&[
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 4.0],
            vec![4.0, 3.0],
            vec![5.0, 5.0],
        ])
        .unwrap();
        let y: Vec<f64> = (0..5)
            .map(|i| 1.0 + 2.0 * x.get(i, 0).unwrap() + 3.0 * x.get(i, 1).unwrap())
            .collect();

        let mut model = LinearModel::new();
        model.fit(&x, &y, FitMethod::LeastSquares).unwrap();
        let pred = model.predict(&x).unwrap();
        for (&p, &t) in pred.iter().zip(y.iter()) {
            assert_relative_eq!(p, t, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_gradient_descent_matches_closed_form() {
        let (x, y) = line_data();

        let mut closed = LinearModel::new();
        closed.fit_univariate(&x, &y, FitMethod::LeastSquares).unwrap();

        let mut gd = LinearModel::with_seed(7);
        let history = gd
            .fit_univariate(
                &x,
                &y,
                FitMethod::GradientDescent {
                    learning_rate: 0.01,
                    iterations: 20_000,
                },
            )
            .unwrap()
            .unwrap();

        assert_relative_eq!(
            gd.intercept.unwrap(),
            closed.intercept.unwrap(),
            epsilon = 1e-4
        );
        assert_relative_eq!(
            gd.coefficients.as_ref().unwrap()[0],
            closed.coefficients.as_ref().unwrap()[0],
            epsilon = 1e-4
        );

        assert_eq!(history.loss.len(), 20_000);
        assert_eq!(history.intercept.len(), 20_000);
        assert_eq!(history.coefficients.len(), 20_000);
        assert!(history.loss[history.loss.len() - 1] < history.loss[0]);
    }

    #[test]
    fn test_gradient_descent_seeded_is_reproducible() {
        let (x, y) = line_data();
        let method = FitMethod::GradientDescent {
            learning_rate: 0.01,
            iterations: 50,
        };

        let mut a = LinearModel::with_seed(42);
        a.fit_univariate(&x, &y, method).unwrap();
        let mut b = LinearModel::with_seed(42);
        b.fit_univariate(&x, &y, method).unwrap();

        assert_eq!(a.intercept, b.intercept);
        assert_eq!(a.coefficients, b.coefficients);
    }

    #[test]
    fn test_history_snapshots_are_copies() {
        let (x, y) = line_data();
        let mut model = LinearModel::with_seed(1);
        let history = model
            .fit_univariate(
                &x,
                &y,
                FitMethod::GradientDescent {
                    learning_rate: 0.01,
                    iterations: 100,
                },
            )
            .unwrap()
            .unwrap();

        // Early snapshots must not reflect later updates.
        assert_ne!(history.coefficients[0], history.coefficients[99]);
        assert_eq!(
            history.coefficients[99],
            model.coefficients.clone().unwrap()
        );
    }

    #[test]
    fn test_predict_before_fit() {
        let model: LinearModel<f64> = LinearModel::new();
        let x: Matrix<f64> = Matrix::from_col(&[1.0, 2.0]);
        assert_eq!(model.predict(&x), Err(LinregError::NotFitted));
        assert_eq!(model.predict_univariate(&[1.0]), Err(LinregError::NotFitted));
    }

    #[test]
    fn test_predict_univariate_rejects_multi_feature_model() {
        let x: Matrix<f64> = Matrix::from_rows(&[
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 4.0],
        ])
        .unwrap();
        let y = vec![5.0, 4.0, 11.0];
        let mut model = LinearModel::new();
        model.fit(&x, &y, FitMethod::LeastSquares).unwrap();
        assert!(matches!(
            model.predict_univariate(&[1.0, 2.0]),
            Err(LinregError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "least_squares".parse::<FitMethod<f64>>().unwrap(),
            FitMethod::LeastSquares
        );
        assert_eq!(
            "gradient_descent".parse::<FitMethod<f64>>().unwrap(),
            FitMethod::GradientDescent {
                learning_rate: 0.01,
                iterations: 1000
            }
        );
        assert_eq!(
            "banana".parse::<FitMethod<f64>>(),
            Err(LinregError::InvalidMethod("banana".to_string()))
        );
    }

    #[test]
    fn test_refit_overwrites() {
        let (x, y) = line_data();
        let y_shifted: Vec<f64> = x.iter().map(|&xi| 5.0 - 1.0 * xi).collect();

        let mut model = LinearModel::new();
        model.fit_univariate(&x, &y, FitMethod::LeastSquares).unwrap();
        model
            .fit_univariate(&x, &y_shifted, FitMethod::LeastSquares)
            .unwrap();

        assert_relative_eq!(model.intercept.unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(model.coefficients.as_ref().unwrap()[0], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_target_length_mismatch() {
        let x: Matrix<f64> = Matrix::from_col(&[1.0, 2.0, 3.0]);
        let mut model = LinearModel::new();
        assert!(matches!(
            model.fit(&x, &[1.0, 2.0], FitMethod::LeastSquares),
            Err(LinregError::DimensionMismatch(_))
        ));
        assert_eq!(model.intercept, None);
    }

    #[test]
    fn test_collinear_features_are_singular() {
        // Second column duplicates the first.
        let x: Matrix<f64> = Matrix::from_rows(&[
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
        ])
        .unwrap();
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let mut model = LinearModel::new();
        assert_eq!(
            model.fit(&x, &y, FitMethod::LeastSquares),
            Err(LinregError::SingularMatrix)
        );
        assert_eq!(model.intercept, None);
        assert_eq!(model.coefficients, None);
    }

    #[test]
    fn test_predict_column_mismatch() {
        let (x, y) = line_data();
        let mut model = LinearModel::new();
        model.fit_univariate(&x, &y, FitMethod::LeastSquares).unwrap();
        let wide: Matrix<f64> = Matrix::zeros(2, 3);
        assert!(matches!(
            model.predict(&wide),
            Err(LinregError::DimensionMismatch(_))
        ));
    }
}
