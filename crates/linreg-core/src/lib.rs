pub mod dtype;
pub mod error;
pub mod matrix;

pub use dtype::Float;
pub use error::{LinregError, LinregResult};
pub use matrix::Matrix;
