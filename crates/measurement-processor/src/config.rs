use serde::{Deserialize, Serialize};

/// Values used when the source data leaves a dimension out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
	/// Ceiling height in feet.
	pub default_height: f64,
	pub default_length: f64,
	pub default_width: f64,
	/// Length to width ratio assumed when only a floor area is known.
	pub aspect_ratio: f64,
}

impl Default for ProcessorConfig {
	fn default() -> Self {
		Self {
			default_height: 8.0,
			default_length: 10.0,
			default_width: 10.0,
			aspect_ratio: 1.2,
		}
	}
}

impl ProcessorConfig {
	/// Length and width of a rectangle with the configured aspect ratio and `area`.
	#[must_use]
	pub fn dimensions_from_area(&self, area: f64) -> (f64, f64) {
		let width = (area / self.aspect_ratio).sqrt();
		(area / width, width)
	}

	#[must_use]
	pub fn default_area(&self) -> f64 {
		self.default_length * self.default_width
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn area_only_rooms_get_the_configured_shape() {
		let (length, width) = ProcessorConfig::default().dimensions_from_area(120.0);

		assert!((length * width - 120.0).abs() < 1e-9);
		assert!((length / width - 1.2).abs() < 1e-9);
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let config: ProcessorConfig =
			serde_json::from_str(r#"{ "default_height": 9.0 }"#).expect("valid config");

		assert!((config.default_height - 9.0).abs() < f64::EPSILON);
		assert!((config.aspect_ratio - 1.2).abs() < f64::EPSILON);
	}
}
