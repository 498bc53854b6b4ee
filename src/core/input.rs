//! Model input description

use clap::ValueEnum;

/// Memory order of the image tensor fed to the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TensorLayout {
	/// [batch, height, width, channels] (TensorFlow / Keras)
	#[default]
	Nhwc,
	/// [batch, channels, height, width] (PyTorch)
	Nchw,
}

/// Everything preprocessing and output interpretation need to know about a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSpec {
	pub size: u32,
	pub channels: usize,
	pub layout: TensorLayout,
	pub threshold: f32,
}

impl Default for InputSpec {
	fn default() -> Self {
		Self {
			size: crate::config::INPUT_SIZE,
			channels: 3,
			layout: TensorLayout::Nhwc,
			threshold: crate::config::DEFAULT_THRESHOLD,
		}
	}
}

impl InputSpec {
	pub fn shape(&self) -> [usize; 4] {
		let s = self.size as usize;
		match self.layout {
			TensorLayout::Nhwc => [1, s, s, self.channels],
			TensorLayout::Nchw => [1, self.channels, s, s],
		}
	}
}
