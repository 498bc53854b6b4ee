// Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{ImageFormat, Rgb, RgbImage};
use pneumoscan::core::{Diagnosis, Prediction};
use pneumoscan::models::{Classifier, ModelState};
use pneumoscan::server::AppState;

pub const BOUNDARY: &str = "pneumoscan-test-boundary";

// Rendered result elements; the stylesheet mentions the same class names
pub const ANY_PANEL: &str = "<div class=\"result-box";
pub const PNEUMONIA_PANEL: &str = "<div class=\"result-box pneumonia\">";
pub const NORMAL_PANEL: &str = "<div class=\"result-box normal\">";

/// Classifier returning a fixed label, remembering every path it was handed
pub struct FixedClassifier {
    pub label: Diagnosis,
    pub seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl FixedClassifier {
    pub fn new(label: Diagnosis) -> Arc<Self> {
        Arc::new(Self { label, seen: Mutex::new(Vec::new()) })
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, image: &Path) -> anyhow::Result<Prediction> {
        self.seen.lock().unwrap().push((image.to_path_buf(), image.exists()));
        Ok(Prediction::new(self.label, 0.87))
    }

    fn name(&self) -> &str {
        "fixed.onnx"
    }
}

/// Classifier whose inference always fails
pub struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn classify(&self, _image: &Path) -> anyhow::Result<Prediction> {
        anyhow::bail!("input tensor has wrong rank")
    }

    fn name(&self) -> &str {
        "broken.onnx"
    }
}

pub fn ready_state(classifier: Arc<dyn Classifier>) -> AppState {
    AppState::new(ModelState::Ready { path: PathBuf::from("models/fixed.onnx"), classifier })
}

pub fn missing_state() -> AppState {
    AppState::new(ModelState::Missing { dir: PathBuf::from("models") })
}

pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(16, 16, Rgb([90, 90, 90]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// (content-type header, body) for a single-file multipart upload
pub fn multipart(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
