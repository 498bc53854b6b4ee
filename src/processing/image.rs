//! Image decoding and tensor preprocessing

use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, ImageReader};
use ndarray::Array4;
use std::path::Path;

use crate::core::{InputSpec, TensorLayout};

/// Decode an image file, guessing the format from its content
pub fn open_image(path: &Path) -> Result<DynamicImage> {
	crate::ui::debug(&format!("Decoding image: {}", path.display()));
	ImageReader::open(path)
		.with_context(|| format!("Failed to open: {}", path.display()))?
		.with_guessed_format()?
		.decode()
		.with_context(|| format!("Failed to decode: {}", path.display()))
}

/// Resize to the model resolution and scale pixels to [0, 1] in the requested layout
pub fn preprocess(img: &DynamicImage, spec: &InputSpec) -> Array4<f32> {
	let resized = img.resize_exact(spec.size, spec.size, FilterType::CatmullRom);
	let mut arr = Array4::<f32>::zeros(spec.shape());

	let mut put = |c: usize, y: u32, x: u32, value: u8| {
		let (y, x) = (y as usize, x as usize);
		let v = value as f32 / 255.0;
		match spec.layout {
			TensorLayout::Nhwc => arr[[0, y, x, c]] = v,
			TensorLayout::Nchw => arr[[0, c, y, x]] = v,
		}
	};

	if spec.channels == 1 {
		for (x, y, px) in resized.to_luma8().enumerate_pixels() {
			put(0, y, x, px[0]);
		}
	} else {
		for (x, y, px) in resized.to_rgb8().enumerate_pixels() {
			put(0, y, x, px[0]);
			put(1, y, x, px[1]);
			put(2, y, x, px[2]);
		}
	}

	arr
}
