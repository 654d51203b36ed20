use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
	calculator::round_to,
	config::ProcessorConfig,
	intermediate::{IntermediateRoom, RawDimensions, DEFAULT_FLOOR},
	text::{clean_room_name, extract_floor_name},
	Result,
};

use super::RoomExtractor;

const HEADER_ROWS: [&str; 4] = [
	"ROOM ATTRIBUTES",
	"GROUND SURFACE",
	"VOLUME",
	"PLAN ATTRIBUTES",
];

const ROOM_KEYWORDS: [&str; 18] = [
	"room", "kitchen", "bathroom", "bedroom", "living", "dining", "hall", "closet", "laundry",
	"office", "study", "family", "master", "guest", "powder", "utility", "entry", "foyer",
];

const TABLE_CONFIDENCE: f64 = 0.8;
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Rows closer than this in every dimension are the same row exported twice.
const DUPLICATE_TOLERANCE: f64 = 0.1;

static SUMMARY_ROWS: OnceLock<Regex> = OnceLock::new();
static NON_ROOM_ROWS: OnceLock<Regex> = OnceLock::new();
static NUMBER: OnceLock<Regex> = OnceLock::new();

/// Reads comma separated takeoff tables, as exported by floor-plan tools or pulled out of PDFs.
///
/// Floor headings switch the floor for the rows below them. A row is a room when its first
/// cell names a kind of room and isn't a summary line; the second cell holds the area and a
/// later `L x W [x H]` cell the dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor;

impl RoomExtractor for TableExtractor {
	fn extract(&self, raw: &str, config: &ProcessorConfig) -> Result<Vec<IntermediateRoom>> {
		info!("Reading measurement table with {} lines", raw.lines().count());

		let mut current_floor = None;
		let mut rooms = Vec::new();

		for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
			if let Some(floor) = extract_floor_name(line) {
				debug!("Found <floor='{floor}'>");
				current_floor = Some(floor);
				continue;
			}

			let cells = line.split(',').map(str::trim).collect::<Vec<_>>();
			if cells.len() < 2 {
				continue;
			}

			let label = cells[0].to_uppercase();
			if HEADER_ROWS.iter().any(|header| label.contains(header)) || !is_room_row(cells[0]) {
				continue;
			}

			let room = parse_room_row(&cells, current_floor.as_deref(), config);
			debug!("Found <room='{}'> on <floor='{}'>", room.name, room.floor);
			rooms.push(room);
		}

		if rooms.is_empty() {
			warn!("No rooms found in measurement table, using fallback rooms");
			rooms = fallback_rooms();
		}

		let rooms = dedupe_and_number(rooms);
		info!("Extracted {} rooms from measurement table", rooms.len());

		Ok(rooms)
	}
}

fn is_room_row(label: &str) -> bool {
	let summary = SUMMARY_ROWS.get_or_init(|| {
		Regex::new(
			r"above\s+grade.*area|below\s+grade.*area|total.*area|ground\s+surface|^rooms$|^bedrooms$|^bathrooms?$",
		)
		.expect("this regex should always be valid")
	});

	let label = label.to_lowercase();

	!summary.is_match(&label) && ROOM_KEYWORDS.iter().any(|keyword| label.contains(keyword))
}

fn parse_room_row(cells: &[&str], floor: Option<&str>, config: &ProcessorConfig) -> IntermediateRoom {
	let mut area = cells.get(1).map_or(0.0, |cell| parse_area(cell));

	let dimensions = cells.iter().skip(2).find_map(|cell| parse_dimensions(cell));

	let mut size = dimensions
		.map(|(length, width, _)| (length, width))
		.filter(|(length, width)| *length > 0.0 && *width > 0.0);

	if area > 0.0 && size.is_none() {
		size = Some(config.dimensions_from_area(area));
	} else if area <= 0.0 {
		if let Some((length, width)) = size {
			area = length * width;
		}
	}

	let (length, width) = match size {
		Some(size) => size,
		None => {
			area = config.default_area();
			(config.default_length, config.default_width)
		}
	};

	let height = dimensions
		.and_then(|(_, _, height)| height)
		.filter(|height| *height > 0.0)
		.unwrap_or(config.default_height);

	IntermediateRoom {
		floor: floor.unwrap_or(DEFAULT_FLOOR).to_string(),
		name: clean_room_name(cells[0]),
		raw_dimensions: RawDimensions {
			length: round_to(length, 1),
			width: round_to(width, 1),
			height: round_to(height, 1),
			area: Some(round_to(area, 2)),
			perimeter: None,
		},
		openings: Vec::new(),
		source_confidence: TABLE_CONFIDENCE,
	}
}

/// Area cell such as `120`, `120 sq ft` or `120sqft`; zero when unreadable.
fn parse_area(cell: &str) -> f64 {
	cell.replace(' ', "")
		.replace("sq", "")
		.replace("ft", "")
		.parse::<f64>()
		.ok()
		.filter(|area| area.is_finite())
		.unwrap_or(0.0)
}

/// Dimension cell such as `12 x 10` or `14x12x9`.
fn parse_dimensions(cell: &str) -> Option<(f64, f64, Option<f64>)> {
	if !cell.to_lowercase().contains('x') && !cell.contains('×') {
		return None;
	}

	let number = NUMBER.get_or_init(|| {
		Regex::new(r"\d+(?:\.\d+)?").expect("this regex should always be valid")
	});

	let values = number
		.find_iter(cell)
		.filter_map(|found| found.as_str().parse::<f64>().ok())
		.collect::<Vec<_>>();

	match values.as_slice() {
		[length, width, rest @ ..] => Some((*length, *width, rest.first().copied())),
		_ => None,
	}
}

fn is_placeholder(dimensions: &RawDimensions) -> bool {
	(dimensions.length - 10.0).abs() < f64::EPSILON
		&& (dimensions.width - 10.0).abs() < f64::EPSILON
		&& (dimensions.height - 8.0).abs() < f64::EPSILON
}

fn is_same_row(a: &RawDimensions, b: &RawDimensions) -> bool {
	(a.length - b.length).abs() < DUPLICATE_TOLERANCE
		&& (a.width - b.width).abs() < DUPLICATE_TOLERANCE
		&& (a.area.unwrap_or(0.0) - b.area.unwrap_or(0.0)).abs() < DUPLICATE_TOLERANCE
}

/// Drops unusable rows and repeats, then numbers the rooms that still share a name on a floor.
///
/// Rooms sharing a floor and name end up next to each other, in the order their first row
/// was found.
fn dedupe_and_number(rooms: Vec<IntermediateRoom>) -> Vec<IntermediateRoom> {
	let non_room = NON_ROOM_ROWS.get_or_init(|| {
		Regex::new(
			r#"object count|kitchen cabinets \(24"\)|plan attributes|ground surface|volume|room attributes|above grade.*area|below grade.*area|total.*area"#,
		)
		.expect("this regex should always be valid")
	});

	let found = rooms.len();
	let mut kept = Vec::<IntermediateRoom>::with_capacity(found);

	for room in rooms {
		let dimensions = &room.raw_dimensions;

		if dimensions.area.unwrap_or(0.0) < 1.0 && dimensions.length * dimensions.width < 1.0 {
			debug!("Skipping tiny <room='{}'>", room.name);
			continue;
		}

		if non_room.is_match(&room.name.to_lowercase()) {
			debug!("Skipping non-room <row='{}'>", room.name);
			continue;
		}

		let repeated = kept
			.iter()
			.filter(|existing| existing.floor == room.floor && existing.name == room.name)
			.any(|existing| {
				is_same_row(dimensions, &existing.raw_dimensions) || is_placeholder(dimensions)
			});

		if repeated {
			debug!("Skipping repeated <room='{}'> on <floor='{}'>", room.name, room.floor);
			continue;
		}

		kept.push(room);
	}

	let mut groups = Vec::<Vec<IntermediateRoom>>::new();
	let mut group_index = HashMap::<(String, String), usize>::new();

	for room in kept {
		let idx = *group_index
			.entry((room.floor.clone(), room.name.clone()))
			.or_insert_with(|| {
				groups.push(Vec::new());
				groups.len() - 1
			});
		groups[idx].push(room);
	}

	let numbered = groups
		.into_iter()
		.flat_map(|group| {
			let needs_numbers = group.len() > 1;
			group.into_iter().enumerate().map(move |(idx, mut room)| {
				if needs_numbers {
					room.name = format!("{} #{}", room.name, idx + 1);
				}
				room
			})
		})
		.collect::<Vec<_>>();

	info!("Filtered {found} rooms down to {} unique rooms", numbered.len());

	numbered
}

fn fallback_rooms() -> Vec<IntermediateRoom> {
	[("Living Room", 15.0, 12.0), ("Kitchen", 12.0, 10.0)]
		.into_iter()
		.map(|(name, length, width)| IntermediateRoom {
			floor: DEFAULT_FLOOR.to_string(),
			name: name.to_string(),
			raw_dimensions: RawDimensions {
				length,
				width,
				height: 8.0,
				area: Some(length * width),
				perimeter: None,
			},
			openings: Vec::new(),
			source_confidence: FALLBACK_CONFIDENCE,
		})
		.collect()
}
