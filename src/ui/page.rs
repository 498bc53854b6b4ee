//! Single-page HTML rendering

use std::fmt::Write;

use crate::config::UPLOAD_FIELD;
use crate::core::{Diagnosis, Prediction};

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", system-ui, sans-serif; background: #ffffff; color: #31333f; }
.main { max-width: 730px; margin: 0 auto; padding: 2rem; }
h1 {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    font-weight: 700;
    text-align: center;
}
.upload-section {
    background: #f8f9fa;
    padding: 30px;
    border-radius: 15px;
    border: 2px dashed #dee2e6;
    margin: 20px 0;
}
.help { color: #808495; font-size: 0.85rem; }
button {
    width: 100%;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    font-weight: 600;
    padding: 0.75rem 1.5rem;
    border-radius: 10px;
    border: none;
    font-size: 1.1rem;
    margin-top: 1rem;
    cursor: pointer;
    transition: all 0.3s ease;
}
button:hover { transform: translateY(-2px); box-shadow: 0 4px 15px rgba(102, 126, 234, 0.4); }
.columns { display: flex; gap: 1.5rem; }
.columns > div { flex: 1; min-width: 0; }
.columns img { width: 100%; border-radius: 8px; }
.caption { color: #808495; font-size: 0.85rem; }
.alert { padding: 1rem; border-radius: 8px; margin: 1rem 0; }
.alert.error { background: #ffe2e0; color: #7d353b; }
.alert.info { background: #e0ecff; color: #1c4f8b; }
.result-box { padding: 20px; border-radius: 15px; text-align: center; margin-top: 20px; }
.pneumonia { background: linear-gradient(135deg, #ff6b6b 0%, #ee5a5a 100%); color: white; }
.normal { background: linear-gradient(135deg, #51cf66 0%, #40c057 100%); color: white; }
"#;

/// Model availability as shown at the top of the page
#[derive(Debug, Clone, PartialEq)]
pub enum ModelNotice {
	Ready,
	Missing,
	Failed(String),
}

/// The uploaded image shown in the left column
#[derive(Debug, Clone)]
pub struct Preview {
	pub filename: String,
	pub size_kb: f64,
	/// `data:` URI of the image, absent when the upload could not be decoded
	pub data_uri: Option<String>,
}

/// What the "Prediction" column shows after pressing Analyze
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	Diagnosis(Prediction),
	ModelMissing,
	Failed(String),
	Rejected(String),
}

#[derive(Debug, Clone)]
pub struct PageView {
	pub model: ModelNotice,
	pub preview: Option<Preview>,
	pub outcome: Option<Outcome>,
}

impl PageView {
	pub fn empty(model: ModelNotice) -> Self {
		Self { model, preview: None, outcome: None }
	}
}

pub fn render(view: &PageView) -> String {
	let mut body = String::new();

	body.push_str("<h1>🏥 Chest X-ray Pneumonia Detection</h1>\n<hr>\n");
	body.push_str("<p>Upload a chest X-ray image to detect pneumonia using AI</p>\n");

	match &view.model {
		ModelNotice::Ready => {}
		ModelNotice::Missing => {
			body.push_str(&alert("error", "❌ Model file not found in the <code>models/</code> directory."));
			body.push_str(&alert("info", "Please ensure your <code>.onnx</code> model file is in the <code>models/</code> folder."));
		}
		ModelNotice::Failed(reason) => {
			body.push_str(&alert("error", &format!("❌ Model could not be loaded: {}", escape(reason))));
		}
	}

	body.push_str("<h3>📤 Upload Image</h3>\n");
	let _ = write!(
		body,
		concat!(
			"<form class=\"upload-section\" method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">\n",
			"<label for=\"{field}\">Choose a chest X-ray image</label><br>\n",
			"<input type=\"file\" id=\"{field}\" name=\"{field}\" accept=\".jpg,.jpeg,.png\" required>\n",
			"<div class=\"help\">Supported formats: JPG, JPEG, PNG</div>\n",
			"<button type=\"submit\">🔍 Analyze Image</button>\n",
			"</form>\n"
		),
		field = UPLOAD_FIELD
	);

	match (&view.preview, &view.outcome) {
		(Some(preview), outcome) => {
			body.push_str("<div class=\"columns\">\n<div>\n<h4>Uploaded Image</h4>\n");
			if let Some(uri) = &preview.data_uri {
				let _ = writeln!(body, "<img src=\"{}\" alt=\"{}\">", uri, escape(&preview.filename));
			}
			let _ = writeln!(
				body,
				"<div class=\"caption\">📁 {} ({:.1} KB)</div>",
				escape(&preview.filename),
				preview.size_kb
			);
			body.push_str("</div>\n<div>\n<h4>Prediction</h4>\n");
			// The form sends the file and Analyze in one POST, so a preview always carries an outcome
			if let Some(outcome) = outcome {
				body.push_str(&render_outcome(outcome));
			}
			body.push_str("</div>\n</div>\n");
		}
		(None, Some(outcome)) => body.push_str(&render_outcome(outcome)),
		(None, None) => body.push_str(&alert("info", "👆 Upload a chest X-ray image to get started")),
	}

	format!(
		concat!(
			"<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
			"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
			"<title>Pneumonia Detection</title>\n",
			"<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🏥</text></svg>\">\n",
			"<style>{style}</style>\n</head>\n<body>\n<main class=\"main\">\n{body}</main>\n</body>\n</html>\n"
		),
		style = STYLE,
		body = body
	)
}

fn render_outcome(outcome: &Outcome) -> String {
	match outcome {
		Outcome::Diagnosis(prediction) => result_box(prediction),
		Outcome::ModelMissing => alert("error", "Prediction cannot run because the model is missing."),
		Outcome::Failed(msg) => alert("error", &format!("Error during analysis: {}", escape(msg))),
		Outcome::Rejected(msg) => alert("error", &escape(msg)),
	}
}

fn result_box(prediction: &Prediction) -> String {
	let (class, heading) = match prediction.label {
		Diagnosis::Pneumonia => ("pneumonia", "⚠️ PNEUMONIA DETECTED"),
		Diagnosis::Normal => ("normal", "✅ NORMAL"),
	};
	format!(
		"<div class=\"result-box {}\">\n<h2>{}</h2>\n<p>Confidence: {:.1}%</p>\n</div>\n",
		class,
		heading,
		prediction.confidence * 100.0
	)
}

fn alert(kind: &str, html: &str) -> String {
	format!("<div class=\"alert {}\">{}</div>\n", kind, html)
}

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}
