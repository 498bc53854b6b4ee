//! Process-wide model state, resolved once at start-up

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::{discovery, Classifier};
use crate::ui::{self, ModelNotice};

pub enum ModelState {
	Ready { path: PathBuf, classifier: Arc<dyn Classifier> },
	Missing { dir: PathBuf },
	Failed { path: PathBuf, reason: String },
}

impl ModelState {
	/// Discover the newest model in `dir` and load it with `load`
	pub fn resolve<F, E>(dir: &Path, load: F) -> Self
	where
		F: FnOnce(&Path) -> Result<Arc<dyn Classifier>, E>,
		E: Display,
	{
		match discovery::latest_model(dir) {
			Some(path) => Self::from_file(&path, load),
			None => {
				ui::warn(&format!("No .onnx or .ort model found in {}", dir.display()));
				ModelState::Missing { dir: dir.to_path_buf() }
			}
		}
	}

	pub fn from_file<F, E>(path: &Path, load: F) -> Self
	where
		F: FnOnce(&Path) -> Result<Arc<dyn Classifier>, E>,
		E: Display,
	{
		ui::debug(&format!("Loading model: {}", path.display()));
		match load(path) {
			Ok(classifier) => ModelState::Ready { path: path.to_path_buf(), classifier },
			Err(e) => {
				ui::error(&e.to_string());
				ModelState::Failed { path: path.to_path_buf(), reason: e.to_string() }
			}
		}
	}

	pub fn classifier(&self) -> Option<Arc<dyn Classifier>> {
		match self {
			ModelState::Ready { classifier, .. } => Some(Arc::clone(classifier)),
			_ => None,
		}
	}

	pub fn model_name(&self) -> Option<&str> {
		match self {
			ModelState::Ready { classifier, .. } => Some(classifier.name()),
			_ => None,
		}
	}

	pub fn notice(&self) -> ModelNotice {
		match self {
			ModelState::Ready { .. } => ModelNotice::Ready,
			ModelState::Missing { .. } => ModelNotice::Missing,
			ModelState::Failed { reason, .. } => ModelNotice::Failed(reason.clone()),
		}
	}
}
