//! # Models
//!
//! Loading, discovery and the once-per-process model handle.

pub mod classifier;
pub mod discovery;
pub mod loader;
pub mod state;

pub use classifier::{Classifier, PneumoniaModel};
pub use discovery::{latest_model, list_models, ModelFile};
pub use loader::{check_model_path, load_trained_model, LoadError};
pub use state::ModelState;
