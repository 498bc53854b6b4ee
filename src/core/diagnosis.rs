//! Prediction result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary classifier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Diagnosis {
	Pneumonia,
	Normal,
}

impl Diagnosis {
	/// Label index in Keras alphabetical class order (NORMAL = 0, PNEUMONIA = 1)
	pub fn from_index(index: usize) -> Option<Self> {
		match index {
			0 => Some(Diagnosis::Normal),
			1 => Some(Diagnosis::Pneumonia),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Diagnosis::Pneumonia => "PNEUMONIA",
			Diagnosis::Normal => "NORMAL",
		}
	}
}

impl fmt::Display for Diagnosis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single inference outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
	pub label: Diagnosis,
	/// Probability of `label`, in [0.0, 1.0]
	pub confidence: f32,
}

impl Prediction {
	pub fn new(label: Diagnosis, confidence: f32) -> Self {
		Self { label, confidence: confidence.clamp(0.0, 1.0) }
	}

	pub fn is_pneumonia(&self) -> bool {
		self.label == Diagnosis::Pneumonia
	}
}
