pub mod model;

pub use model::{FitHistory, FitMethod, LinearModel};
