//! Request handlers

use base64::Engine as _;
use bytes::Buf;
use futures_util::TryStreamExt;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use warp::http::StatusCode;
use warp::multipart::FormData;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::config::{MAX_UPLOAD_BYTES, UPLOAD_FIELD};
use crate::core::{Diagnosis, Prediction, UploadError, UploadedImage};
use crate::models::Classifier;
use crate::server::AppState;
use crate::ui::{self, Outcome, PageView, Preview};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
	pub label: Diagnosis,
	pub confidence: f32,
	pub model: String,
	pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
	pub error: String,
	pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub model: Option<String>,
	pub provider: String,
}

/// Why an analyze request produced no diagnosis
#[derive(Debug)]
enum AnalysisError {
	Upload(UploadError),
	ModelMissing,
	Inference(String),
}

impl AnalysisError {
	fn status(&self) -> StatusCode {
		match self {
			AnalysisError::Upload(_) => StatusCode::BAD_REQUEST,
			AnalysisError::ModelMissing => StatusCode::SERVICE_UNAVAILABLE,
			AnalysisError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn code(&self) -> &'static str {
		match self {
			AnalysisError::Upload(UploadError::Missing) => "missing_upload",
			AnalysisError::Upload(UploadError::Malformed(_)) => "malformed_upload",
			AnalysisError::Upload(UploadError::Empty(_)) => "empty_upload",
			AnalysisError::Upload(UploadError::UnsupportedType(_)) => "unsupported_type",
			AnalysisError::Upload(UploadError::Undecodable(_)) => "undecodable_image",
			AnalysisError::ModelMissing => "model_missing",
			AnalysisError::Inference(_) => "inference_failed",
		}
	}

	fn message(&self) -> String {
		match self {
			AnalysisError::Upload(e) => e.to_string(),
			AnalysisError::ModelMissing => "Prediction cannot run because the model is missing.".to_string(),
			AnalysisError::Inference(reason) => format!("Error during analysis: {}", reason),
		}
	}

	fn into_outcome(self) -> Outcome {
		match self {
			AnalysisError::Upload(e) => Outcome::Rejected(e.to_string()),
			AnalysisError::ModelMissing => Outcome::ModelMissing,
			AnalysisError::Inference(reason) => Outcome::Failed(reason),
		}
	}
}

struct Analysis {
	upload: Option<UploadedImage>,
	format: Option<ImageFormat>,
	result: Result<Prediction, AnalysisError>,
}

pub fn index(state: AppState) -> impl Reply {
	warp::reply::html(ui::render(&PageView::empty(state.model.notice())))
}

pub async fn analyze(form: FormData, state: AppState) -> Result<Response, Infallible> {
	let analysis = run_analysis(form, &state).await;

	let preview = analysis.upload.as_ref().map(|upload| Preview {
		filename: upload.filename.clone(),
		size_kb: upload.size_kb(),
		data_uri: analysis.format.map(|format| data_uri(upload, format)),
	});
	let (outcome, status) = match analysis.result {
		Ok(prediction) => (Outcome::Diagnosis(prediction), StatusCode::OK),
		Err(e) => {
			let status = e.status();
			(e.into_outcome(), status)
		}
	};

	let view = PageView { model: state.model.notice(), preview, outcome: Some(outcome) };
	Ok(warp::reply::with_status(warp::reply::html(ui::render(&view)), status).into_response())
}

pub async fn api_predict(form: FormData, state: AppState) -> Result<Response, Infallible> {
	let analysis = run_analysis(form, &state).await;

	match analysis.result {
		Ok(prediction) => {
			let body = PredictResponse {
				label: prediction.label,
				confidence: prediction.confidence,
				model: state.model.model_name().unwrap_or_default().to_string(),
				filename: analysis.upload.map(|u| u.filename).unwrap_or_default(),
			};
			Ok(warp::reply::json(&body).into_response())
		}
		Err(e) => Ok(error_response(e.status(), e.code(), &e.message())),
	}
}

pub fn health(state: AppState) -> impl Reply {
	warp::reply::json(&HealthResponse {
		status: "ok".to_string(),
		model: state.model.model_name().map(str::to_string),
		provider: crate::runtime::active_provider().to_string(),
	})
}

pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
	let (code, slug, message) = if err.is_not_found() {
		(StatusCode::NOT_FOUND, "not_found", "Not found".to_string())
	} else if let Some(rejected) = classify_upload_rejection(&err) {
		rejected
	} else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
		(StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", "Method not allowed".to_string())
	} else {
		ui::error(&format!("Unhandled rejection: {:?}", err));
		(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Internal server error".to_string())
	};

	Ok(error_response(code, slug, &message))
}

/// Upload rejections on `/analyze` come back as the page, with the reason in the prediction slot
pub async fn analyze_rejection(err: Rejection, state: AppState) -> Result<Response, Rejection> {
	let Some((status, _, message)) = classify_upload_rejection(&err) else {
		return Err(err);
	};

	ui::warn(&message);
	let view = PageView { model: state.model.notice(), preview: None, outcome: Some(Outcome::Rejected(message)) };
	Ok(warp::reply::with_status(warp::reply::html(ui::render(&view)), status).into_response())
}

/// Status, error code and message for rejections raised while reading a multipart body
fn classify_upload_rejection(err: &Rejection) -> Option<(StatusCode, &'static str, String)> {
	if err.find::<warp::reject::PayloadTooLarge>().is_some() {
		Some((
			StatusCode::PAYLOAD_TOO_LARGE,
			"payload_too_large",
			format!("Uploaded file is too large (limit {} MB)", MAX_UPLOAD_BYTES / (1024 * 1024)),
		))
	} else if err.find::<warp::reject::LengthRequired>().is_some() {
		Some((StatusCode::LENGTH_REQUIRED, "length_required", "A content-length header is required".to_string()))
	} else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
		Some((
			StatusCode::UNSUPPORTED_MEDIA_TYPE,
			"unsupported_media_type",
			"Expected a multipart/form-data upload".to_string(),
		))
	} else if let Some(e) = err.find::<warp::reject::MissingHeader>() {
		Some((StatusCode::BAD_REQUEST, "missing_header", e.to_string()))
	} else {
		err.find::<warp::reject::InvalidHeader>()
			.map(|e| (StatusCode::BAD_REQUEST, "invalid_header", e.to_string()))
	}
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
	let body = ApiError { error: message.to_string(), code: code.to_string() };
	warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

async fn run_analysis(form: FormData, state: &AppState) -> Analysis {
	let upload = match read_upload(form).await {
		Ok(upload) => upload,
		Err(e) => {
			ui::warn(&e.to_string());
			return Analysis { upload: None, format: None, result: Err(AnalysisError::Upload(e)) };
		}
	};

	ui::debug(&format!("Received {} ({:.1} KB)", upload.filename, upload.size_kb()));

	let format = match upload.validate() {
		Ok(format) => format,
		Err(e) => {
			ui::warn(&e.to_string());
			return Analysis { upload: Some(upload), format: None, result: Err(AnalysisError::Upload(e)) };
		}
	};

	let Some(classifier) = state.model.classifier() else {
		ui::warn("Analysis requested but no model is loaded");
		return Analysis { upload: Some(upload), format: Some(format), result: Err(AnalysisError::ModelMissing) };
	};

	let start = Instant::now();
	let result = infer(classifier, &upload).await;
	match &result {
		Ok(prediction) => ui::analyzed(
			&upload.filename,
			prediction.label.as_str(),
			prediction.confidence,
			start.elapsed().as_millis(),
		),
		Err(reason) => ui::error(&format!("Analysis of {} failed: {}", upload.filename, reason)),
	}

	Analysis {
		upload: Some(upload),
		format: Some(format),
		result: result.map_err(AnalysisError::Inference),
	}
}

/// Write the upload to a temporary file and classify it off the async reactor
async fn infer(classifier: Arc<dyn Classifier>, upload: &UploadedImage) -> Result<Prediction, String> {
	let mut tmp = tempfile::Builder::new()
		.prefix("pneumoscan-")
		.suffix(&upload.temp_suffix())
		.tempfile()
		.map_err(|e| format!("Failed to create temporary file: {}", e))?;
	tmp.write_all(&upload.bytes)
		.and_then(|_| tmp.flush())
		.map_err(|e| format!("Failed to write temporary file: {}", e))?;

	let joined = tokio::task::spawn_blocking(move || {
		let result = classifier.classify(tmp.path());
		drop(tmp);
		result
	})
	.await;

	match joined {
		Ok(Ok(prediction)) => Ok(prediction),
		Ok(Err(e)) => Err(format!("{:#}", e)),
		Err(e) => Err(format!("Inference worker stopped: {}", e)),
	}
}

async fn read_upload(mut form: FormData) -> Result<UploadedImage, UploadError> {
	while let Some(part) = form.try_next().await.map_err(|e| UploadError::Malformed(e.to_string()))? {
		if part.name() != UPLOAD_FIELD {
			continue;
		}

		let filename = part.filename().unwrap_or_default().to_string();
		let bytes = part
			.stream()
			.try_fold(Vec::new(), |mut acc, buf| async move {
				acc.extend_from_slice(buf.chunk());
				Ok::<_, warp::Error>(acc)
			})
			.await
			.map_err(|e| UploadError::Malformed(e.to_string()))?;

		// Browsers send an empty, unnamed part when no file was chosen
		if filename.is_empty() && bytes.is_empty() {
			return Err(UploadError::Missing);
		}
		return Ok(UploadedImage::new(filename, bytes));
	}

	Err(UploadError::Missing)
}

fn data_uri(upload: &UploadedImage, format: ImageFormat) -> String {
	format!(
		"data:{};base64,{}",
		format.to_mime_type(),
		base64::engine::general_purpose::STANDARD.encode(&upload.bytes)
	)
}
