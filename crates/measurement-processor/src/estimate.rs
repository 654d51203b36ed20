//! Typical openings for rooms whose source data lists none.

use pe_room_model::OpeningType;

use crate::intermediate::RawOpening;

const NO_OPENINGS: [&str; 6] = ["cabinet", "storage", "shelf", "rack", "fixture", "pantry"];
const PRIVATE_ROOMS: [&str; 3] = ["bedroom", "office", "study"];
const LIVING_AREAS: [&str; 4] = ["living", "kitchen", "dining", "family"];

/// Room kinds that are usually open to each other instead of separated by a door.
const CONNECTED_SPACES: [(&str, &str); 5] = [
	("kitchen", "living"),
	("kitchen", "dining"),
	("living", "dining"),
	("kitchen", "family"),
	("dining", "family"),
];

const SMALL_WINDOW: RawOpening = RawOpening::sized(OpeningType::Window, 3.0, 3.0);
const STANDARD_WINDOW: RawOpening = RawOpening::sized(OpeningType::Window, 4.0, 3.5);
const PICTURE_WINDOW: RawOpening = RawOpening::sized(OpeningType::Window, 6.0, 4.0);

/// Guesses the openings of `room_name` from its kind and floor area.
///
/// `all_room_names` is every room of the takeoff, used to tell whether a living area opens
/// onto a connected one.
#[must_use]
pub fn estimate_openings(room_name: &str, floor_area: f64, all_room_names: &[&str]) -> Vec<RawOpening> {
	let name = room_name.to_lowercase();
	let has = |keywords: &[&str]| keywords.iter().any(|keyword| name.contains(keyword));

	if has(NO_OPENINGS.as_slice()) {
		return Vec::new();
	}

	let door = |width| RawOpening::sized(OpeningType::Door, width, 6.8);

	if has(PRIVATE_ROOMS.as_slice()) {
		let mut openings = vec![door(3.0)];
		openings.extend(windows_for_area(floor_area, false));
		openings
	} else if name.contains("bathroom") {
		let mut openings = vec![door(2.5)];
		if floor_area > 50.0 {
			openings.push(RawOpening::sized(OpeningType::Window, 2.0, 2.5));
		}
		openings
	} else if name.contains("closet") {
		vec![door(2.5)]
	} else if has(LIVING_AREAS.as_slice()) {
		let mut openings = if is_connected_space(&name, all_room_names) {
			vec![RawOpening::sized(OpeningType::OpenWall, 8.0, 8.0)]
		} else {
			vec![door(4.0)]
		};
		openings.extend(windows_for_area(floor_area, true));
		openings
	} else if name.contains("hall") || name.contains("corridor") {
		if floor_area > 80.0 {
			windows_for_area(floor_area, false)
		} else {
			Vec::new()
		}
	} else {
		let mut openings = vec![door(3.0)];
		openings.extend(windows_for_area(floor_area, false));
		openings
	}
}

/// Whether a room of this kind and another room it is usually open to are both in the takeoff.
fn is_connected_space(name: &str, all_room_names: &[&str]) -> bool {
	let any_named = |keyword: &str| {
		all_room_names
			.iter()
			.any(|other| other.to_lowercase().contains(keyword))
	};

	CONNECTED_SPACES.iter().any(|(first, second)| {
		if name.contains(first) {
			any_named(*second)
		} else if name.contains(second) {
			any_named(*first)
		} else {
			false
		}
	})
}

fn windows_for_area(floor_area: f64, is_living_area: bool) -> Vec<RawOpening> {
	if floor_area < 80.0 {
		vec![SMALL_WINDOW]
	} else if floor_area < 150.0 {
		vec![STANDARD_WINDOW]
	} else if floor_area < 250.0 {
		if is_living_area {
			vec![PICTURE_WINDOW]
		} else {
			vec![STANDARD_WINDOW, SMALL_WINDOW]
		}
	} else if is_living_area {
		vec![PICTURE_WINDOW, STANDARD_WINDOW]
	} else {
		vec![STANDARD_WINDOW, STANDARD_WINDOW, SMALL_WINDOW]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds(openings: &[RawOpening]) -> Vec<OpeningType> {
		openings.iter().map(|opening| opening.kind).collect()
	}

	#[test]
	fn storage_gets_nothing() {
		assert!(estimate_openings("Pantry", 30.0, &[]).is_empty());
		assert!(estimate_openings("Kitchen Cabinets", 12.0, &[]).is_empty());
	}

	#[test]
	fn bedrooms_get_a_door_and_windows_by_size() {
		let openings = estimate_openings("Master Bedroom", 200.0, &[]);

		assert_eq!(
			kinds(&openings),
			[OpeningType::Door, OpeningType::Window, OpeningType::Window]
		);
		assert_eq!(openings[1], STANDARD_WINDOW);
	}

	#[test]
	fn kitchen_opens_onto_the_living_room() {
		let names = ["Kitchen", "Living Room", "Bedroom"];

		let kitchen = estimate_openings("Kitchen", 120.0, &names);
		assert_eq!(kind_of_first(&kitchen), OpeningType::OpenWall);

		let alone = estimate_openings("Kitchen", 120.0, &["Kitchen", "Bedroom"]);
		assert_eq!(kind_of_first(&alone), OpeningType::Door);
	}

	#[test]
	fn small_halls_have_no_openings() {
		assert!(estimate_openings("Hall", 40.0, &[]).is_empty());
		assert_eq!(estimate_openings("Hall", 90.0, &[]), vec![STANDARD_WINDOW]);
	}

	fn kind_of_first(openings: &[RawOpening]) -> OpeningType {
		openings[0].kind
	}
}
