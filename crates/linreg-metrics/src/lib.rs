pub mod regression;

pub use regression::{evaluate, mae, r2_score, rmse, RegressionReport};
