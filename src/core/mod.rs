//! Core domain types

pub mod diagnosis;
pub mod input;
pub mod upload;

pub use diagnosis::{Diagnosis, Prediction};
pub use input::{InputSpec, TensorLayout};
pub use upload::{UploadError, UploadedImage};
