//! # linreg
//!
//! An educational linear-regression toolkit.
//!
//! ## Modules
//!
//! - **core** — Dense 2-D `Matrix`, the `Float` numeric trait, shared errors
//! - **linalg** — Matrix inverse (Gauss–Jordan with partial pivoting)
//! - **preprocessing** — Mixed numeric/text `Frame` and one-hot encoding
//! - **linear** — `LinearModel`: normal equation and gradient descent with a
//!   per-iteration fit history
//! - **metrics** — R², RMSE, MAE and the aggregate `RegressionReport`

/// Matrix core.
pub use linreg_core as core;

/// Linear algebra operations.
pub use linreg_linalg as linalg;

/// Categorical preprocessing.
pub use linreg_preprocessing as preprocessing;

/// Linear regression models.
pub use linreg_linear as linear;

/// Evaluation metrics.
pub use linreg_metrics as metrics;
