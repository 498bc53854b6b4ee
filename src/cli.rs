use clap::{builder::Styles, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_THRESHOLD, INPUT_SIZE};
use crate::core::{InputSpec, TensorLayout};

/// Execution provider for ONNX Runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
	/// Auto-detect best available (TensorRT → CUDA → CoreML → XNNPACK → CPU)
	#[default]
	Auto,
	/// CPU only
	Cpu,
	/// NVIDIA CUDA GPU
	Cuda,
	/// NVIDIA TensorRT (optimized inference)
	Tensorrt,
	/// Apple CoreML (macOS only)
	#[value(name = "coreml")]
	CoreML,
	/// XNNPACK (optimized CPU kernels)
	Xnnpack,
}

fn parse_threshold(s: &str) -> Result<f32, String> {
	let val: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !(0.0..=1.0).contains(&val) {
		Err(format!("threshold must be between 0.0 and 1.0, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	let blue = Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue));
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(blue))
		.usage(anstyle::Style::new().bold().fg_color(blue))
		.literal(anstyle::Style::new().fg_color(blue))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "pneumoscan",
	author,
	version,
	about = "Chest X-ray pneumonia detection",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {serve}    {serve_args}      {serve_desc}
  {bin} {predict}  {predict_args}        {predict_desc}
  {bin} {models}   {models_args}            {models_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "pneumoscan".bright_blue(),
		serve = "serve".yellow(),
		serve_args = "--port 8501",
		serve_desc = "Start the web UI".dimmed(),
		predict = "predict".yellow(),
		predict_args = "chest.jpeg",
		predict_desc = "Classify one image".dimmed(),
		models = "models".yellow(),
		models_args = "-m ./models",
		models_desc = "List model files".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Execution provider: auto, cpu, cuda, tensorrt, coreml, xnnpack
	#[arg(short = 'p', long = "provider", global = true, default_value = "auto")]
	pub provider: Provider,

	/// Directory searched for the newest .onnx / .ort model
	#[arg(short = 'm', long = "models-dir", global = true)]
	pub models_dir: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

/// Preprocessing and decision options shared by `serve` and `predict`
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
	/// Load this model file instead of the newest one in the models directory
	#[arg(long = "model", value_name = "PATH")]
	pub model: Option<PathBuf>,

	/// Square input resolution expected by the model
	#[arg(long = "input-size", default_value_t = INPUT_SIZE)]
	pub input_size: u32,

	/// Input tensor layout (Keras exports are NHWC)
	#[arg(long = "layout", default_value = "nhwc")]
	pub layout: TensorLayout,

	/// Feed a single luma channel instead of RGB
	#[arg(long = "grayscale")]
	pub grayscale: bool,

	/// Pneumonia probability above which the image is labelled PNEUMONIA
	#[arg(short = 't', long = "threshold", default_value_t = DEFAULT_THRESHOLD, value_parser = parse_threshold)]
	pub threshold: f32,
}

impl ModelArgs {
	pub fn input_spec(&self) -> InputSpec {
		InputSpec {
			size: self.input_size,
			channels: if self.grayscale { 1 } else { 3 },
			layout: self.layout,
			threshold: self.threshold,
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Serve the upload-and-analyze web page
	Serve {
		/// Address to bind
		#[arg(long = "host", default_value = DEFAULT_HOST)]
		host: String,

		/// Port to listen on
		#[arg(long = "port", default_value_t = DEFAULT_PORT)]
		port: u16,

		#[command(flatten)]
		model: ModelArgs,
	},

	/// Classify a single chest X-ray image from the terminal
	Predict {
		/// Image to classify (jpg, jpeg, png)
		#[arg(value_name = "IMAGE")]
		image: PathBuf,

		/// Print the result as JSON
		#[arg(long = "json")]
		json: bool,

		#[command(flatten)]
		model: ModelArgs,
	},

	/// List model files in the models directory, newest first
	Models,

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
