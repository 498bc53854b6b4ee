//! Predict command - classify one image from the terminal

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::cli::ModelArgs;
use crate::core::UploadedImage;
use crate::models::ModelState;
use crate::server::PredictResponse;
use crate::ui;

pub fn run(image: &Path, json: bool, args: &ModelArgs) -> Result<()> {
	let bytes = fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
	let filename = image
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| image.display().to_string());
	UploadedImage::new(filename.clone(), bytes).validate()?;

	let state = super::resolve_model(args)?;
	let classifier = match &state {
		ModelState::Ready { classifier, .. } => classifier.clone(),
		ModelState::Missing { dir } => bail!("Model file not found in {}", dir.display()),
		ModelState::Failed { reason, .. } => bail!("{}", reason),
	};

	let start = Instant::now();
	let prediction = classifier.classify(image).context("Error during analysis")?;
	let elapsed = start.elapsed().as_millis();

	if json {
		let body = PredictResponse {
			label: prediction.label,
			confidence: prediction.confidence,
			model: classifier.name().to_string(),
			filename,
		};
		println!("{}", serde_json::to_string_pretty(&body)?);
		return Ok(());
	}

	ui::analyzed(&filename, prediction.label.as_str(), prediction.confidence, elapsed);
	println!();
	if prediction.is_pneumonia() {
		println!("  {}", "⚠ PNEUMONIA DETECTED".bright_red().bold());
	} else {
		println!("  {}", "✔ NORMAL".bright_green().bold());
	}
	println!("  {} {:.1}%", "Confidence:".bright_blue(), prediction.confidence * 100.0);
	println!();

	Ok(())
}
