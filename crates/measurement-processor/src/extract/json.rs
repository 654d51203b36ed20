use serde::Deserialize;
use tracing::info;

use crate::{
	config::ProcessorConfig,
	intermediate::{IntermediateRoom, RawDimensions, DEFAULT_FLOOR},
	text::clean_room_name,
	Result,
};

use super::RoomExtractor;

const JSON_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Default, Deserialize)]
struct MeasurementFile {
	#[serde(default)]
	measurements: Vec<MeasurementEntry>,
}

#[derive(Debug, Deserialize)]
struct MeasurementEntry {
	#[serde(default)]
	elevation: Option<String>,
	#[serde(default)]
	room: Option<String>,
	#[serde(default)]
	dimensions: EntryDimensions,
}

#[derive(Debug, Default, Deserialize)]
struct EntryDimensions {
	length: Option<f64>,
	width: Option<f64>,
	height: Option<f64>,
}

/// Reads `{"measurements": [{"elevation", "room", "dimensions"}]}` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExtractor;

impl RoomExtractor for JsonExtractor {
	fn extract(&self, raw: &str, config: &ProcessorConfig) -> Result<Vec<IntermediateRoom>> {
		let file = serde_json::from_str::<MeasurementFile>(raw)?;

		let rooms = file
			.measurements
			.into_iter()
			.map(|entry| IntermediateRoom {
				floor: entry.elevation.unwrap_or_else(|| DEFAULT_FLOOR.to_string()),
				name: clean_room_name(entry.room.as_deref().unwrap_or("Room")),
				raw_dimensions: RawDimensions {
					length: entry.dimensions.length.unwrap_or(config.default_length),
					width: entry.dimensions.width.unwrap_or(config.default_width),
					height: entry.dimensions.height.unwrap_or(config.default_height),
					area: None,
					perimeter: None,
				},
				openings: Vec::new(),
				source_confidence: JSON_CONFIDENCE,
			})
			.collect::<Vec<_>>();

		info!("Extracted {} rooms from measurement json", rooms.len());

		Ok(rooms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ProcessorError;

	#[test]
	fn reads_entries_with_defaults() {
		let rooms = JsonExtractor
			.extract(
				r#"{ "measurements": [
					{ "elevation": "2nd Floor", "room": "guest bedroom", "dimensions": { "length": 13, "width": 11 } },
					{ "dimensions": {} }
				] }"#,
				&ProcessorConfig::default(),
			)
			.expect("valid measurement json");

		assert_eq!(rooms.len(), 2);
		assert_eq!(rooms[0].floor, "2nd Floor");
		assert_eq!(rooms[0].name, "Guest Bedroom");
		assert!((rooms[0].raw_dimensions.height - 8.0).abs() < f64::EPSILON);
		assert_eq!(rooms[1].floor, DEFAULT_FLOOR);
		assert_eq!(rooms[1].name, "Room");
	}

	#[test]
	fn other_documents_have_no_rooms() {
		let rooms = JsonExtractor
			.extract(r#"{ "project": "Maple St" }"#, &ProcessorConfig::default())
			.expect("valid json");

		assert!(rooms.is_empty());
	}

	#[test]
	fn invalid_json_is_an_error() {
		assert!(matches!(
			JsonExtractor.extract("{ not json", &ProcessorConfig::default()),
			Err(ProcessorError::InvalidJson(_))
		));
	}
}
