use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use tracing::{info, warn};

use crate::{
	calculator::round_to,
	config::ProcessorConfig,
	intermediate::{IntermediateRoom, RawDimensions, DEFAULT_FLOOR},
	text::{clean_room_name, extract_floor_name},
	Result,
};

use super::RoomExtractor;

const OCR_CONFIDENCE: f64 = 0.7;
const FALLBACK_CONFIDENCE: f64 = 0.5;

static ROOM_LINE: OnceLock<Regex> = OnceLock::new();

/// Reads loose `Name: L x W` lines as OCR produces them from photos and sketches.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcrExtractor;

impl RoomExtractor for OcrExtractor {
	fn extract(&self, raw: &str, config: &ProcessorConfig) -> Result<Vec<IntermediateRoom>> {
		let mut current_floor = None;
		let mut rooms = Vec::new();

		for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
			if let Some(floor) = extract_floor_name(line) {
				current_floor = Some(floor);
				continue;
			}

			if let Some((name, length, width)) = parse_room_line(line) {
				rooms.push(IntermediateRoom {
					floor: current_floor.as_deref().unwrap_or(DEFAULT_FLOOR).to_string(),
					name,
					raw_dimensions: RawDimensions {
						length,
						width,
						height: config.default_height,
						area: Some(round_to(length * width, 2)),
						perimeter: None,
					},
					openings: Vec::new(),
					source_confidence: OCR_CONFIDENCE,
				});
			}
		}

		if rooms.is_empty() {
			warn!("No rooms found in OCR text, using a fallback room");
			rooms.push(IntermediateRoom {
				floor: DEFAULT_FLOOR.to_string(),
				name: "Room".to_string(),
				raw_dimensions: RawDimensions {
					length: 12.0,
					width: 10.0,
					height: config.default_height,
					area: Some(120.0),
					perimeter: None,
				},
				openings: Vec::new(),
				source_confidence: FALLBACK_CONFIDENCE,
			});
		}

		info!("Extracted {} rooms from OCR text", rooms.len());

		Ok(rooms)
	}
}

fn parse_room_line(line: &str) -> Option<(String, f64, f64)> {
	let re = ROOM_LINE.get_or_init(|| {
		RegexBuilder::new(r"(\w+(?:\s+\w+)*?)\s*[:\-]?\s*(\d+(?:\.\d+)?)\s*[x×]\s*(\d+(?:\.\d+)?)")
			.case_insensitive(true)
			.build()
			.expect("this regex should always be valid")
	});

	let captures = re.captures(line)?;

	Some((
		clean_room_name(&captures[1]),
		captures[2].parse().ok()?,
		captures[3].parse().ok()?,
	))
}
