use pe_room_model::OpeningType;
use serde::{Deserialize, Serialize};

/// Fallback floor for rooms found before any floor heading.
pub const DEFAULT_FLOOR: &str = "1st Floor";

/// Dimensions as read from the source, in feet and square feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDimensions {
	pub length: f64,
	pub width: f64,
	pub height: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub area: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub perimeter: Option<f64>,
}

impl RawDimensions {
	/// Stated area, or length times width when none was given.
	#[must_use]
	pub fn floor_area(&self) -> f64 {
		self.area
			.filter(|area| *area > 0.0)
			.unwrap_or(self.length * self.width)
	}
}

/// An opening before it is sized, with missing dimensions left to per-kind defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawOpening {
	#[serde(rename = "type")]
	pub kind: OpeningType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<f64>,
}

impl RawOpening {
	#[must_use]
	pub const fn sized(kind: OpeningType, width: f64, height: f64) -> Self {
		Self {
			kind,
			width: Some(width),
			height: Some(height),
		}
	}
}

/// A room as extracted from one source format, before measurements are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateRoom {
	pub floor: String,
	pub name: String,
	pub raw_dimensions: RawDimensions,
	#[serde(default)]
	pub openings: Vec<RawOpening>,
	/// How much the extractor trusts its own reading, from 0 to 1.
	pub source_confidence: f64,
}
