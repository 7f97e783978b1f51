use linreg_core::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// R² (coefficient of determination).
///
/// Returns NaN (or ±∞) when `y_true` is empty or constant — the total sum
/// of squares is zero and the score is undefined.
pub fn r2_score<T: Float>(y_true: &[T], y_pred: &[T]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len());
    let n = y_true.len() as f64;
    let mean_true: f64 = y_true.iter().map(|v| v.to_f64()).sum::<f64>() / n;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let d = t.to_f64() - p.to_f64();
            d * d
        })
        .sum();

    let ss_tot: f64 = y_true
        .iter()
        .map(|&t| {
            let d = t.to_f64() - mean_true;
            d * d
        })
        .sum();

    1.0 - ss_res / ss_tot
}

/// Root Mean Squared Error.
pub fn rmse<T: Float>(y_true: &[T], y_pred: &[T]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len());
    let n = y_true.len() as f64;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let d = (t - p).to_f64();
            d * d
        })
        .sum();
    (sum / n).sqrt()
}

/// Mean Absolute Error.
pub fn mae<T: Float>(y_true: &[T], y_pred: &[T]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len());
    let n = y_true.len() as f64;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).to_f64().abs())
        .sum();
    sum / n
}

/// Goodness-of-fit summary for a set of true/predicted value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R2: {:.6}, RMSE: {:.6}, MAE: {:.6}",
            self.r2, self.rmse, self.mae
        )
    }
}

/// Compute R², RMSE and MAE in one pass over the pair of vectors.
pub fn evaluate<T: Float>(y_true: &[T], y_pred: &[T]) -> RegressionReport {
    RegressionReport {
        r2: r2_score(y_true, y_pred),
        rmse: rmse(y_true, y_pred),
        mae: mae(y_true, y_pred),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_prediction() {
        let y = [1.0_f64, 2.0, 3.0, 4.0];
        let report = evaluate(&y, &y);
        assert_eq!(report.r2, 1.0);
        assert_eq!(report.rmse, 0.0);
        assert_eq!(report.mae, 0.0);
    }

    #[test]
    fn test_known_errors() {
        let y_true = [1.0_f64, 2.0, 3.0];
        let y_pred = [1.5_f64, 2.5, 3.5];
        assert_relative_eq!(mae(&y_true, &y_pred), 0.5, epsilon = 1e-12);
        assert_relative_eq!(rmse(&y_true, &y_pred), 0.5, epsilon = 1e-12);
        // ss_res = 0.75, ss_tot = 2.0
        assert_relative_eq!(r2_score(&y_true, &y_pred), 1.0 - 0.75 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_target_is_undefined() {
        let y_true = [2.0_f64, 2.0, 2.0];
        let y_pred = [1.0_f64, 2.0, 3.0];
        let r2 = r2_score(&y_true, &y_pred);
        assert!(r2.is_nan() || r2.is_infinite());
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let _ = evaluate(&[1.0_f64, 2.0], &[1.0_f64]);
    }

    #[test]
    fn test_display() {
        let report = RegressionReport {
            r2: 0.5,
            rmse: 1.0,
            mae: 0.75,
        };
        let s = report.to_string();
        assert!(s.contains("R2") && s.contains("RMSE") && s.contains("MAE"));
    }
}
