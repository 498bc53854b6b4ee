//! Execution provider selection

use anyhow::{Context, Result};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::INTRA_THREADS;
use crate::ui;

pub use crate::cli::Provider;

static REQUESTED: OnceLock<Provider> = OnceLock::new();
static ACTIVE: OnceLock<&'static str> = OnceLock::new();

pub fn set_provider(p: Provider) {
	let _ = REQUESTED.set(p);
}

fn requested() -> Provider {
	REQUESTED.get().copied().unwrap_or_default()
}

/// Name of the provider the first session was built with ("CPU" until then)
pub fn active_provider() -> &'static str {
	ACTIVE.get().copied().unwrap_or("CPU")
}

pub fn create_session(model_path: &Path) -> Result<Session> {
	let mut builder = Session::builder().context("Failed to create session builder")?;

	let name = match requested() {
		Provider::Auto => register_best(&mut builder),
		Provider::Cpu => Some("CPU"),
		Provider::Cuda => try_cuda(&mut builder),
		Provider::Tensorrt => try_tensorrt(&mut builder),
		Provider::CoreML => try_coreml(&mut builder),
		Provider::Xnnpack => try_xnnpack(&mut builder),
	};

	let name = name.unwrap_or_else(|| {
		ui::error(&format!("{:?} requested but unavailable, falling back to CPU", requested()));
		"CPU"
	});
	if ACTIVE.set(name).is_ok() {
		ui::success(&format!("Using {} execution provider", name));
	}

	builder
		.with_optimization_level(GraphOptimizationLevel::Level3)
		.map_err(ort::Error::<()>::from)
		.context("Failed to set optimization level")?
		.with_intra_threads(INTRA_THREADS)
		.map_err(ort::Error::<()>::from)
		.context("Failed to set thread count")?
		.commit_from_file(model_path)
		.with_context(|| format!("Failed to load model: {}", model_path.display()))
}

fn register_best(builder: &mut SessionBuilder) -> Option<&'static str> {
	try_tensorrt(builder)
		.or_else(|| try_cuda(builder))
		.or_else(|| try_coreml(builder))
		.or_else(|| try_xnnpack(builder))
		.or(Some("CPU"))
}

macro_rules! try_provider {
	($builder:expr, $provider_type:ty, $name:expr) => {{
		use ort::ep::ExecutionProvider;

		let provider = <$provider_type>::default();
		if !provider.is_available().unwrap_or(false) {
			ui::debug(&format!("{} not available", $name));
			return None;
		}

		match provider.register($builder) {
			Ok(_) => Some($name),
			Err(e) => {
				ui::debug(&format!("{} registration failed: {}", $name, e));
				None
			}
		}
	}};
}

fn try_cuda(builder: &mut SessionBuilder) -> Option<&'static str> {
	use ort::ep::CUDA;
	try_provider!(builder, CUDA, "CUDA")
}

fn try_tensorrt(builder: &mut SessionBuilder) -> Option<&'static str> {
	use ort::ep::TensorRT;
	try_provider!(builder, TensorRT, "TensorRT")
}

#[cfg(target_os = "macos")]
fn try_coreml(builder: &mut SessionBuilder) -> Option<&'static str> {
	use ort::ep::CoreML;
	try_provider!(builder, CoreML, "CoreML")
}

#[cfg(not(target_os = "macos"))]
fn try_coreml(_builder: &mut SessionBuilder) -> Option<&'static str> {
	ui::debug("CoreML only available on macOS");
	None
}

fn try_xnnpack(builder: &mut SessionBuilder) -> Option<&'static str> {
	use ort::ep::XNNPACK;
	try_provider!(builder, XNNPACK, "XNNPACK")
}
