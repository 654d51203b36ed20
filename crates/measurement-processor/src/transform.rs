use std::collections::HashMap;

use pe_room_model::{Location, Measurements, Opening, OpeningType, PlainRoom, Room};
use tracing::{info, warn};

use crate::{
	calculator::calculate_measurements, estimate::estimate_openings,
	intermediate::{IntermediateRoom, DEFAULT_FLOOR},
};

/// Position of a floor when listing locations bottom to top; unknown floors go last.
#[must_use]
pub fn floor_sort_key(floor: &str) -> u8 {
	let floor = floor.to_lowercase();

	if floor.contains("basement") || floor.contains("lower") {
		0
	} else if floor.contains("ground") || floor.contains("1st") {
		1
	} else if floor.contains("2nd") {
		2
	} else if floor.contains("3rd") {
		3
	} else {
		10
	}
}

/// Groups extracted rooms into locations by floor and derives their measurements.
///
/// Rooms without openings get typical ones for their kind. Floors keep the order they were
/// first seen in, then are sorted bottom to top. When nothing usable is left a single
/// placeholder living room is returned, so the session always has a room to edit.
#[must_use]
pub fn build_locations(rooms: Vec<IntermediateRoom>) -> Vec<Location> {
	let all_names = rooms.iter().map(|room| room.name.clone()).collect::<Vec<_>>();
	let all_names = all_names.iter().map(String::as_str).collect::<Vec<_>>();

	let mut locations = Vec::<Location>::new();
	let mut location_index = HashMap::<String, usize>::new();

	for mut room in rooms {
		if room.openings.is_empty() {
			room.openings =
				estimate_openings(&room.name, room.raw_dimensions.floor_area(), &all_names);
		}

		let measurements = calculate_measurements(&room);
		let floor = if room.floor.trim().is_empty() {
			DEFAULT_FLOOR.to_string()
		} else {
			room.floor
		};

		let idx = *location_index.entry(floor.clone()).or_insert_with(|| {
			locations.push(Location::new(floor, Vec::new()));
			locations.len() - 1
		});

		locations[idx]
			.rooms
			.push(Room::Plain(PlainRoom::new(room.name, measurements)));
	}

	locations.sort_by_key(|location| floor_sort_key(&location.name));

	if locations.iter().all(|location| location.rooms.is_empty()) {
		warn!("No usable rooms in measurement data, using a placeholder room");
		return fallback_locations();
	}

	info!(
		"Built {} locations with {} rooms",
		locations.len(),
		locations
			.iter()
			.map(|location| location.rooms.len())
			.sum::<usize>()
	);

	locations
}

fn fallback_locations() -> Vec<Location> {
	vec![Location::new(
		DEFAULT_FLOOR,
		vec![Room::Plain(PlainRoom::new(
			"Living Room",
			Measurements {
				height: 9.0,
				wall_area_sqft: 426.73,
				ceiling_area_sqft: 199.32,
				floor_area_sqft: 199.32,
				walls_and_ceiling_area_sqft: 626.05,
				flooring_area_sy: 22.15,
				ceiling_perimeter_lf: 58.83,
				floor_perimeter_lf: 43.48,
				openings: vec![Opening::new(OpeningType::Door, "3' X 6'8\"")],
			},
		))],
	)]
}
