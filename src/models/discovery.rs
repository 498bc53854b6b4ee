//! Newest-model discovery

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::is_model_file;

/// A candidate model file
#[derive(Debug, Clone)]
pub struct ModelFile {
	pub path: PathBuf,
	pub size: u64,
	pub modified: SystemTime,
}

impl ModelFile {
	pub fn name(&self) -> String {
		self.path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.path.display().to_string())
	}
}

/// Model files directly inside `dir`, newest first
pub fn list_models(dir: &Path) -> Vec<ModelFile> {
	let Ok(entries) = fs::read_dir(dir) else {
		crate::ui::debug(&format!("Models directory not readable: {}", dir.display()));
		return Vec::new();
	};

	let mut models: Vec<ModelFile> = entries
		.filter_map(|entry| entry.ok())
		.filter_map(|entry| {
			let path = entry.path();
			if !is_model_file(&path) {
				return None;
			}
			let meta = entry.metadata().ok()?;
			if !meta.is_file() {
				return None;
			}
			let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
			Some(ModelFile { path, size: meta.len(), modified })
		})
		.collect();

	models.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
	models
}

/// Most recently modified model file in `dir`
pub fn latest_model(dir: &Path) -> Option<PathBuf> {
	list_models(dir).into_iter().next().map(|m| m.path)
}
