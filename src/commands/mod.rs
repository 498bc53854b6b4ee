//! # Command Implementations
//!
//! Each submodule handles one CLI command.

pub mod models;
pub mod predict;
pub mod serve;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::ModelArgs;
use crate::config;
use crate::models::{load_trained_model, Classifier, ModelState};

/// Resolve the model once: an explicit `--model` must load, discovery may come up empty
pub fn resolve_model(args: &ModelArgs) -> Result<ModelState> {
	let spec = args.input_spec();

	if let Some(path) = &args.model {
		let model = load_trained_model(path, spec)?;
		return Ok(ModelState::Ready { path: path.clone(), classifier: Arc::new(model) });
	}

	let dir = config::models_dir();
	Ok(ModelState::resolve(&dir, |path: &Path| {
		load_trained_model(path, spec).map(|m| Arc::new(m) as Arc<dyn Classifier>)
	}))
}
