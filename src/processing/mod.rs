//! # Processing
//!
//! Image preprocessing and prediction on top of a loaded model.

pub mod image;
pub mod predict;

pub use predict::{interpret_output, predict_image_from_path};
