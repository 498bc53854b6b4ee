//! Single-image prediction

use anyhow::{bail, Result};
use std::path::Path;
use std::time::Instant;

use crate::core::{Diagnosis, Prediction};
use crate::models::PneumoniaModel;
use crate::processing::image::{open_image, preprocess};

/// Open, preprocess, run one forward pass and map the first output to a label
pub fn predict_image_from_path(model: &PneumoniaModel, path: &Path) -> Result<Prediction> {
	let start = Instant::now();
	let img = open_image(path)?;
	let spec = model.spec();
	let input = preprocess(&img, &spec);

	let (shape, scores) = model.run(input)?;
	let prediction = interpret_output(&shape, &scores, spec.threshold)?;

	crate::ui::debug(&format!(
		"Inference on {} took {}ms (raw {:?})",
		path.display(),
		start.elapsed().as_millis(),
		scores
	));
	Ok(prediction)
}

/// Map raw model scores to a label
///
/// A single score is P(pneumonia) compared against `threshold`; a score outside
/// [0, 1] is a raw logit and goes through a sigmoid first.
/// Two scores are [NORMAL, PNEUMONIA]; logits are softmaxed first.
pub fn interpret_output(shape: &[i64], data: &[f32], threshold: f32) -> Result<Prediction> {
	if data.iter().any(|v| !v.is_finite()) {
		bail!("Model produced non-finite scores: {:?}", data);
	}

	match data {
		[score] => {
			let p = if (0.0..=1.0).contains(score) { *score } else { sigmoid(*score) };
			if p > threshold {
				Ok(Prediction::new(Diagnosis::Pneumonia, p))
			} else {
				Ok(Prediction::new(Diagnosis::Normal, 1.0 - p))
			}
		}
		[_, _] => {
			let probs = as_probabilities(data);
			let (index, confidence) = probs
				.iter()
				.copied()
				.enumerate()
				.fold((0, f32::MIN), |best, (i, p)| if p > best.1 { (i, p) } else { best });
			match Diagnosis::from_index(index) {
				Some(label) => Ok(Prediction::new(label, confidence)),
				None => bail!("No label for class index {}", index),
			}
		}
		_ => bail!("Unexpected model output shape {:?} ({} values)", shape, data.len()),
	}
}

fn sigmoid(x: f32) -> f32 {
	1.0 / (1.0 + (-x).exp())
}

fn as_probabilities(data: &[f32]) -> Vec<f32> {
	let sum: f32 = data.iter().sum();
	if data.iter().all(|v| *v >= 0.0) && (sum - 1.0).abs() <= 1e-3 {
		return data.to_vec();
	}
	let max = data.iter().copied().fold(f32::MIN, f32::max);
	let exp: Vec<f32> = data.iter().map(|v| (v - max).exp()).collect();
	let total: f32 = exp.iter().sum();
	exp.iter().map(|v| v / total).collect()
}
