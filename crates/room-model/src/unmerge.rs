use tracing::{info, warn};

use crate::{
	model::{Location, MergedRoom, PlainRoom, Room, RoomClassification},
	names::strip_number_suffix,
};

/// Splits the merged room at `room_index` back into its main area and sub-areas.
///
/// The main area becomes `"{name} #1"`, each sub-area `"{name} #{n}"` in order, all in the
/// merged room's slot. Returns `false`, touching nothing, if there is no merged room there.
pub fn unmerge_room(locations: &mut [Location], location_index: usize, room_index: usize) -> bool {
	let Some(location) = locations.get_mut(location_index) else {
		warn!("Skipping unmerge, no location at <index='{location_index}'>");
		return false;
	};

	let split = match location.rooms.get(room_index) {
		Some(Room::Merged(merged)) => split_merged(merged),
		Some(Room::Plain(plain)) => {
			warn!("Skipping unmerge of <room='{}'>, it isn't merged", plain.name);
			return false;
		}
		None => {
			warn!(
				"Skipping unmerge in <location='{}'>, no room at <index='{room_index}'>",
				location.name
			);
			return false;
		}
	};

	info!(
		"Unmerged <room='{}'> into {} rooms",
		location.rooms[room_index].name(),
		split.len()
	);

	location.rooms.splice(room_index..=room_index, split);

	true
}

fn split_merged(merged: &MergedRoom) -> Vec<Room> {
	let base_name = strip_number_suffix(&merged.name);

	let main = PlainRoom::new(
		format!("{base_name} #1"),
		merged.main_area.measurements.clone(),
	);

	let sub_areas = merged
		.sub_areas
		.iter()
		.enumerate()
		.map(|(idx, sub_area)| {
			PlainRoom::new(
				format!("{base_name} #{}", idx + 2),
				sub_area.measurements.clone(),
			)
			.with_classification(RoomClassification::confirmed_sub_area(
				sub_area.kind.clone(),
				sub_area.material_applicable,
			))
		});

	std::iter::once(main).chain(sub_areas).map(Room::Plain).collect()
}
