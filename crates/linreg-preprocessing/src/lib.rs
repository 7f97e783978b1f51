pub mod encoder;
pub mod frame;

pub use encoder::one_hot_encode;
pub use frame::{Cell, Frame};
