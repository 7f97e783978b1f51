pub mod inverse;

pub use inverse::inv;
