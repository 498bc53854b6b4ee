//! Model file validation and loading

use std::path::{Path, PathBuf};

use crate::config::is_model_file;
use crate::core::InputSpec;
use crate::models::PneumoniaModel;
use crate::runtime::create_session;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("Model file not found: {}", .0.display())]
	NotFound(PathBuf),

	#[error("Only .onnx and .ort model files are supported. Given: {}", .0.display())]
	UnsupportedFormat(PathBuf),

	#[error("Failed to load model {}: {reason}", path.display())]
	Runtime { path: PathBuf, reason: String },
}

/// Load a trained classifier from disk
///
/// The path must exist and end in `.onnx` or `.ort`; anything else is
/// refused before ONNX Runtime is touched.
pub fn load_trained_model(path: &Path, spec: InputSpec) -> Result<PneumoniaModel, LoadError> {
	check_model_path(path)?;

	let session = create_session(path).map_err(|e| LoadError::Runtime {
		path: path.to_path_buf(),
		reason: format!("{:#}", e),
	})?;

	crate::ui::success(&format!("Loaded model from {}", path.display()));
	Ok(PneumoniaModel::new(session, path, spec))
}

/// Existence first, then suffix
pub fn check_model_path(path: &Path) -> Result<(), LoadError> {
	if !path.exists() {
		return Err(LoadError::NotFound(path.to_path_buf()));
	}
	if !is_model_file(path) {
		return Err(LoadError::UnsupportedFormat(path.to_path_buf()));
	}
	Ok(())
}
