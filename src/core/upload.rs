//! Uploaded image validation

use image::ImageFormat;
use std::path::Path;

use crate::config::{has_extension, UPLOAD_EXTENSIONS};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
	#[error("No image was uploaded")]
	Missing,

	#[error("Malformed upload: {0}")]
	Malformed(String),

	#[error("{0} is empty")]
	Empty(String),

	#[error("Unsupported file type: {0}. Supported formats: JPG, JPEG, PNG")]
	UnsupportedType(String),

	#[error("{0} is not a readable JPEG or PNG image")]
	Undecodable(String),
}

/// Image bytes received from the browser, with the client-side file name
#[derive(Debug, Clone)]
pub struct UploadedImage {
	pub filename: String,
	pub bytes: Vec<u8>,
}

impl UploadedImage {
	pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
		Self { filename: filename.into(), bytes }
	}

	pub fn size(&self) -> usize {
		self.bytes.len()
	}

	pub fn size_kb(&self) -> f64 {
		self.bytes.len() as f64 / 1024.0
	}

	/// Lowercase extension of the client file name, if any
	pub fn extension(&self) -> Option<String> {
		Path::new(&self.filename)
			.extension()
			.and_then(|e| e.to_str())
			.map(|e| e.to_ascii_lowercase())
	}

	/// Suffix for the temporary file handed to the predictor
	pub fn temp_suffix(&self) -> String {
		format!(".{}", self.extension().unwrap_or_else(|| "jpg".to_string()))
	}

	/// Checks extension, emptiness and that the content decodes as JPEG or PNG
	pub fn validate(&self) -> Result<ImageFormat, UploadError> {
		if !has_extension(Path::new(&self.filename), UPLOAD_EXTENSIONS) {
			return Err(UploadError::UnsupportedType(self.filename.clone()));
		}
		if self.bytes.is_empty() {
			return Err(UploadError::Empty(self.filename.clone()));
		}

		let format = image::guess_format(&self.bytes)
			.map_err(|_| UploadError::Undecodable(self.filename.clone()))?;
		if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
			return Err(UploadError::Undecodable(self.filename.clone()));
		}
		image::load_from_memory_with_format(&self.bytes, format)
			.map_err(|_| UploadError::Undecodable(self.filename.clone()))?;

		Ok(format)
	}
}
