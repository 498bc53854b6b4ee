//! Models command - list model files

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;

use crate::config;
use crate::models::list_models;
use crate::ui;

pub fn run() -> Result<()> {
	let dir = config::models_dir();
	ui::info(&format!("Models directory: {}", dir.display()));

	let models = list_models(&dir);
	if models.is_empty() {
		ui::warn("No .onnx or .ort model files found");
		return Ok(());
	}

	println!();
	for (i, model) in models.iter().enumerate() {
		let modified: DateTime<Local> = model.modified.into();
		let line = format!(
			"  {} {} {}",
			model.name().bright_white(),
			format!("{:.1} MB", model.size as f64 / (1024.0 * 1024.0)).dimmed(),
			modified.format("%Y-%m-%d %H:%M").to_string().dimmed()
		);
		if i == 0 {
			println!("{} {}", line, "← loaded by serve".bright_green());
		} else {
			println!("{}", line);
		}
	}
	println!();

	Ok(())
}
