use anyhow::Result;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use pe_room_model::{Location, Measurements, Opening, Room, DEFAULT_SUB_AREA_TYPE};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

pub fn table(header: Vec<&str>) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(header);
	table
}

/// One row per room, numbered the way the edit commands address them.
pub fn print_locations(locations: &[Location]) {
	if locations.is_empty() {
		println!("No rooms measured");
		return;
	}

	for (location_index, location) in locations.iter().enumerate() {
		println!("[{location_index}] {}", location.name);

		let mut rooms = table(vec![
			"#",
			"Room",
			"Kind",
			"Floor sqft",
			"Wall sqft",
			"Flooring SY",
			"Openings",
		]);

		for (room_index, room) in location.rooms.iter().enumerate() {
			let measurements = room.effective_measurements();
			rooms.add_row(vec![
				room_index.to_string(),
				display_name(room.name()),
				room_kind(room),
				format!("{:.2}", measurements.floor_area_sqft),
				format!("{:.2}", measurements.wall_area_sqft),
				format!("{:.2}", measurements.flooring_area_sy),
				measurements.openings.len().to_string(),
			]);
		}

		println!("{rooms}");
		println!();
	}
}

pub fn print_openings(openings: &[Opening]) {
	if openings.is_empty() {
		println!("No openings");
		return;
	}

	let mut rows = table(vec!["#", "Type", "Size", "Opens to"]);
	for (idx, opening) in openings.iter().enumerate() {
		rows.add_row(vec![
			idx.to_string(),
			opening.kind.to_string(),
			opening.size.clone(),
			opening.opens_to.clone().unwrap_or_default(),
		]);
	}
	println!("{rows}");
}

pub fn print_measurements(measurements: &Measurements) {
	let values = [
		("height", measurements.height),
		("floor_area_sqft", measurements.floor_area_sqft),
		("wall_area_sqft", measurements.wall_area_sqft),
		("ceiling_area_sqft", measurements.ceiling_area_sqft),
		(
			"walls_and_ceiling_area_sqft",
			measurements.walls_and_ceiling_area_sqft,
		),
		("flooring_area_sy", measurements.flooring_area_sy),
		("floor_perimeter_lf", measurements.floor_perimeter_lf),
		("ceiling_perimeter_lf", measurements.ceiling_perimeter_lf),
	];

	let mut rows = table(vec!["Measurement", "Value"]);
	for (name, value) in values {
		rows.add_row(vec![name.to_string(), format!("{value:.2}")]);
	}
	println!("{rows}");
}

pub fn display_name(name: &str) -> String {
	if name.trim().is_empty() {
		"(unnamed)".to_string()
	} else {
		name.to_string()
	}
}

fn room_kind(room: &Room) -> String {
	match room {
		Room::Merged(merged) => format!("merged ({} sub-areas)", merged.sub_areas.len()),
		Room::Plain(plain) => match &plain.classification {
			Some(classification) if classification.is_sub_area => {
				let kind = classification
					.sub_area_type
					.as_ref()
					.map_or(DEFAULT_SUB_AREA_TYPE, |kind| kind.as_str());
				if classification.user_confirmed {
					format!("sub-area: {kind}")
				} else {
					format!("sub-area?: {kind}")
				}
			}
			Some(_) => "standalone".to_string(),
			None => "room".to_string(),
		},
	}
}
