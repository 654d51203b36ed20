use tracing::{info, warn};

use crate::{
	model::{Location, MainArea, Measurements, MergedRoom, PlainRoom, Room, SubArea},
	names::strip_number_suffix,
	openings::{filter_openings_for_sub_area, reconcile_openings},
};

const SQFT_PER_SQYD: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
	/// Peer rooms folded into one plain room.
	Flat,
	/// A sub-area attached to its parent room.
	SubArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	LocationOutOfBounds,
	RoomOutOfBounds,
	SameRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
	Merged(MergeKind),
	/// Nothing was touched.
	Skipped(SkipReason),
}

impl MergeOutcome {
	#[must_use]
	pub const fn is_merged(self) -> bool {
		matches!(self, Self::Merged(_))
	}
}

/// Merges rooms `room_a` and `room_b` of the location at `location_index`.
///
/// When exactly one of them is classified as a sub-area it is attached to the other one,
/// whatever the argument order. Every other combination is a flat merge into `room_a`.
/// Out of range indices, or the same index twice, leave `locations` untouched.
pub fn merge_rooms(
	locations: &mut [Location],
	location_index: usize,
	room_a: usize,
	room_b: usize,
) -> MergeOutcome {
	let Some(location) = locations.get_mut(location_index) else {
		warn!("Skipping merge, no location at <index='{location_index}'>");
		return MergeOutcome::Skipped(SkipReason::LocationOutOfBounds);
	};

	let rooms = &mut location.rooms;

	if room_a >= rooms.len() || room_b >= rooms.len() {
		warn!(
			"Skipping merge in <location='{}'>, rooms <{room_a}, {room_b}> out of {} rooms",
			location.name,
			rooms.len()
		);
		return MergeOutcome::Skipped(SkipReason::RoomOutOfBounds);
	}

	if room_a == room_b {
		warn!("Skipping merge of <room='{}'> with itself", rooms[room_a].name());
		return MergeOutcome::Skipped(SkipReason::SameRoom);
	}

	let kind = match (rooms[room_a].is_sub_area(), rooms[room_b].is_sub_area()) {
		(false, true) => {
			merge_as_sub_area(rooms, room_a, room_b);
			MergeKind::SubArea
		}
		(true, false) => {
			merge_as_sub_area(rooms, room_b, room_a);
			MergeKind::SubArea
		}
		_ => {
			flat_merge(rooms, room_a, room_b);
			MergeKind::Flat
		}
	};

	MergeOutcome::Merged(kind)
}

/// Replaces the parent with a merged room holding the sub-area; the result lands on the
/// lower of the two slots.
fn merge_as_sub_area(rooms: &mut Vec<Room>, parent_index: usize, sub_index: usize) {
	let merged = attach_sub_area(&rooms[parent_index], &rooms[sub_index]);

	info!(
		"Merged <sub_area='{}'> into <room='{}'>, now with {} sub-areas",
		rooms[sub_index].name(),
		merged.name,
		merged.sub_areas.len()
	);

	let (low, high) = if parent_index < sub_index {
		(parent_index, sub_index)
	} else {
		(sub_index, parent_index)
	};

	rooms.remove(high);
	rooms[low] = Room::Merged(merged);
}

#[must_use]
pub(crate) fn attach_sub_area(parent: &Room, sub: &Room) -> MergedRoom {
	let classification = sub.classification();

	let kind = classification
		.and_then(|classification| classification.sub_area_type.clone())
		.unwrap_or_default();
	let material_applicable =
		classification.map_or(true, |classification| classification.material_applicable);

	let mut measurements = sub.effective_measurements().clone();
	measurements.openings = filter_openings_for_sub_area(&measurements.openings, &kind);

	let (main_area, mut sub_areas, parent_openings) = match parent {
		Room::Plain(plain) => (
			MainArea {
				measurements: plain.measurements.clone(),
			},
			Vec::with_capacity(1),
			plain.measurements.openings.as_slice(),
		),
		Room::Merged(merged) => (
			merged.main_area.clone(),
			merged.sub_areas.clone(),
			merged.total_measurements.openings.as_slice(),
		),
	};

	let openings = reconcile_openings(
		parent_openings,
		&measurements.openings,
		parent.name(),
		sub.name(),
	);

	sub_areas.push(SubArea {
		kind,
		measurements,
		material_applicable,
	});

	let mut total_measurements = sum_measurements(&main_area.measurements, &sub_areas);
	total_measurements.openings = openings;

	MergedRoom {
		name: strip_number_suffix(parent.name()).to_string(),
		main_area,
		sub_areas,
		total_measurements,
	}
}

/// Totals of a main area and its sub-areas, openings left empty.
///
/// Areas add up. Height and perimeters take the maximum: a sub-area sits inside the
/// parent's outline instead of extending it.
#[must_use]
pub(crate) fn sum_measurements(main: &Measurements, sub_areas: &[SubArea]) -> Measurements {
	sub_areas
		.iter()
		.map(|sub_area| &sub_area.measurements)
		.fold(
			Measurements {
				openings: Vec::new(),
				..main.clone()
			},
			|mut total, sub| {
				total.height = total.height.max(sub.height);
				total.wall_area_sqft += sub.wall_area_sqft;
				total.ceiling_area_sqft += sub.ceiling_area_sqft;
				total.floor_area_sqft += sub.floor_area_sqft;
				total.walls_and_ceiling_area_sqft += sub.walls_and_ceiling_area_sqft;
				total.flooring_area_sy += sub.flooring_area_sy;
				total.ceiling_perimeter_lf = total.ceiling_perimeter_lf.max(sub.ceiling_perimeter_lf);
				total.floor_perimeter_lf = total.floor_perimeter_lf.max(sub.floor_perimeter_lf);
				total
			},
		)
}

/// Folds `second` into `first`; the result takes `first`'s place.
fn flat_merge(rooms: &mut Vec<Room>, first: usize, second: usize) {
	let merged = {
		let (a, b) = (&rooms[first], &rooms[second]);

		PlainRoom {
			name: strip_number_suffix(a.name()).to_string(),
			measurements: combine_flat(
				a.effective_measurements(),
				b.effective_measurements(),
				a.name(),
				b.name(),
			),
			classification: a.classification().cloned(),
		}
	};

	info!(
		"Merged <room='{}'> into <room='{}'> as <name='{}'>",
		rooms[second].name(),
		rooms[first].name(),
		merged.name
	);

	rooms.remove(second);
	let target = if second < first { first - 1 } else { first };
	rooms[target] = Room::Plain(merged);
}

fn combine_flat(a: &Measurements, b: &Measurements, name_a: &str, name_b: &str) -> Measurements {
	let floor_area_sqft = a.floor_area_sqft + b.floor_area_sqft;

	Measurements {
		height: a.height.max(b.height),
		wall_area_sqft: a.wall_area_sqft + b.wall_area_sqft,
		ceiling_area_sqft: a.ceiling_area_sqft + b.ceiling_area_sqft,
		floor_area_sqft,
		walls_and_ceiling_area_sqft: a.walls_and_ceiling_area_sqft + b.walls_and_ceiling_area_sqft,
		// Recomputed instead of summed so already rounded yard values don't drift.
		flooring_area_sy: floor_area_sqft / SQFT_PER_SQYD,
		ceiling_perimeter_lf: a.ceiling_perimeter_lf + b.ceiling_perimeter_lf,
		floor_perimeter_lf: a.floor_perimeter_lf + b.floor_perimeter_lf,
		openings: reconcile_openings(&a.openings, &b.openings, name_a, name_b),
	}
}
