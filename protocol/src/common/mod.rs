pub mod character;
pub mod image;

pub use character::*;
pub use image::*;
