//! ONNX-backed pneumonia classifier

use anyhow::{anyhow, Context, Result};
use ndarray::Array4;
use ort::{session::Session, value::Tensor};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::{InputSpec, Prediction};

/// Anything that can label a chest X-ray image on disk
pub trait Classifier: Send + Sync {
	fn classify(&self, image: &Path) -> Result<Prediction>;

	/// Display name, usually the model file name
	fn name(&self) -> &str;
}

pub struct PneumoniaModel {
	session: Mutex<Session>,
	spec: InputSpec,
	path: PathBuf,
	name: String,
}

impl PneumoniaModel {
	pub fn new(session: Session, path: &Path, spec: InputSpec) -> Self {
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| path.display().to_string());
		Self { session: Mutex::new(session), spec, path: path.to_path_buf(), name }
	}

	pub fn spec(&self) -> InputSpec {
		self.spec
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// One forward pass; returns the shape and values of the first output
	pub fn run(&self, pixels: Array4<f32>) -> Result<(Vec<i64>, Vec<f32>)> {
		let input = Tensor::from_array(pixels)?;
		let mut session = self.session.lock().map_err(|_| anyhow!("Model session lock poisoned"))?;
		let outputs = session.run(ort::inputs![input])?;

		let (_, output) = outputs.iter().next().context("Model produced no outputs")?;
		let (shape, data) = output.try_extract_tensor::<f32>()?;
		Ok((shape.to_vec(), data.to_vec()))
	}
}

impl Classifier for PneumoniaModel {
	fn classify(&self, image: &Path) -> Result<Prediction> {
		crate::processing::predict_image_from_path(self, image)
	}

	fn name(&self) -> &str {
		&self.name
	}
}
