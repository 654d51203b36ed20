use pe_room_model::{Measurements, Opening, OpeningType};
use tracing::debug;

use crate::intermediate::{IntermediateRoom, RawOpening};

const SQFT_PER_SQYD: f64 = 9.0;

/// Width and height used for an opening whose size the source left out.
#[must_use]
pub const fn default_opening_size(kind: OpeningType) -> (f64, f64) {
	match kind {
		OpeningType::Door => (3.0, 6.8),
		OpeningType::Window => (4.0, 3.0),
		OpeningType::OpenWall => (6.0, 8.0),
	}
}

#[must_use]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
	let factor = 10_f64.powi(decimals);
	(value * factor).round() / factor
}

/// Feet as takeoff sheets print them, always with a decimal: `3.0`, `6.8`.
fn feet(value: f64) -> String {
	if value.fract().abs() < f64::EPSILON {
		format!("{value:.1}")
	} else {
		value.to_string()
	}
}

/// Derives every measurement of a room from its raw dimensions and openings.
///
/// Doors and windows take their own area off the walls. An open wall takes out a full
/// height section of wall and shortens the perimeter by its width. Everything is rounded
/// to two decimals.
#[must_use]
pub fn calculate_measurements(room: &IntermediateRoom) -> Measurements {
	let dimensions = &room.raw_dimensions;
	let height = dimensions.height;

	let floor_area = dimensions.floor_area();
	let perimeter = dimensions
		.perimeter
		.filter(|perimeter| *perimeter > 0.0)
		.unwrap_or(2.0 * (dimensions.length + dimensions.width));

	let mut removed_wall_area = 0.0;
	let mut open_perimeter = 0.0;

	let openings = room
		.openings
		.iter()
		.map(|opening| {
			let (width, opening_height) = opening_size(opening);

			if opening.kind == OpeningType::OpenWall {
				removed_wall_area += width * height;
				open_perimeter += width;
			} else {
				removed_wall_area += width * opening_height;
			}

			Opening::new(opening.kind, size_label(opening.kind, width, opening_height))
		})
		.collect::<Vec<_>>();

	let wall_area = perimeter.mul_add(height, -removed_wall_area);
	let perimeter = (perimeter - open_perimeter).max(0.0);

	debug!(
		"Calculated <room='{}'>: {floor_area} sqft floor, {wall_area} sqft walls, {} openings",
		room.name,
		openings.len()
	);

	Measurements {
		height: round_to(height, 2),
		wall_area_sqft: round_to(wall_area, 2),
		ceiling_area_sqft: round_to(floor_area, 2),
		floor_area_sqft: round_to(floor_area, 2),
		walls_and_ceiling_area_sqft: round_to(wall_area + floor_area, 2),
		flooring_area_sy: round_to(floor_area / SQFT_PER_SQYD, 2),
		ceiling_perimeter_lf: round_to(perimeter, 2),
		floor_perimeter_lf: round_to(perimeter, 2),
		openings,
	}
}

fn opening_size(opening: &RawOpening) -> (f64, f64) {
	let (default_width, default_height) = default_opening_size(opening.kind);

	(
		opening.width.unwrap_or(default_width),
		opening.height.unwrap_or(default_height),
	)
}

fn size_label(kind: OpeningType, width: f64, height: f64) -> String {
	match kind {
		OpeningType::Door => format!("{}' X {}'", feet(width), feet(height)),
		OpeningType::Window => format!("{}' X {}' window", feet(width), feet(height)),
		OpeningType::OpenWall => format!("{}' wide opening", feet(width)),
	}
}
