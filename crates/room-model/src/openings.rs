use serde::Serialize;
use tracing::debug;

use crate::{
	model::{Opening, OpeningType, Room, SubAreaType},
	names::InternalNames,
};

/// Merges two opening lists for a room built out of `name_a` and `name_b`.
///
/// Openings leading to either room (in any case or numbering variant) are internal to
/// the merged room and dropped, and exact duplicates keep only their first occurrence.
/// Order is A's openings then B's.
#[must_use]
pub fn reconcile_openings(
	openings_a: &[Opening],
	openings_b: &[Opening],
	name_a: &str,
	name_b: &str,
) -> Vec<Opening> {
	let internal = InternalNames::new([name_a, name_b]);

	let mut reconciled = Vec::<Opening>::with_capacity(openings_a.len() + openings_b.len());
	let mut internal_count = 0usize;
	let mut duplicate_count = 0usize;

	for opening in openings_a.iter().chain(openings_b) {
		if opening
			.opens_to
			.as_deref()
			.is_some_and(|target| internal.contains(target))
		{
			internal_count += 1;
			continue;
		}

		if reconciled.contains(opening) {
			duplicate_count += 1;
			continue;
		}

		reconciled.push(opening.clone());
	}

	debug!(
		"Reconciled openings of <rooms='{name_a}', '{name_b}'>: kept {}, \
		dropped {internal_count} internal and {duplicate_count} duplicated",
		reconciled.len()
	);

	reconciled
}

/// Allow-list of opening kinds for a sub-area type given as free text.
#[must_use]
pub fn valid_opening_types(sub_area_type: &str) -> &'static [OpeningType] {
	SubAreaType::parse(sub_area_type).allowed_openings()
}

/// Keeps only the openings a sub-area of `sub_area_type` may have.
#[must_use]
pub fn filter_openings_for_sub_area(
	openings: &[Opening],
	sub_area_type: &SubAreaType,
) -> Vec<Opening> {
	split_openings_for_sub_area(openings, sub_area_type).0
}

/// Splits openings into `(valid, invalid)` for a sub-area of `sub_area_type`.
#[must_use]
pub fn split_openings_for_sub_area(
	openings: &[Opening],
	sub_area_type: &SubAreaType,
) -> (Vec<Opening>, Vec<Opening>) {
	openings
		.iter()
		.cloned()
		.partition(|opening| sub_area_type.allows(opening.kind))
}

/// Openings that do not fit the sub-area type they belong to.
///
/// This is a question for the user; nothing is removed until they answer it with an
/// [`InvalidOpeningsChoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidOpenings {
	/// Index into a merged room's sub-areas, `None` for a plain room classified as a sub-area.
	pub sub_area_index: Option<usize>,
	pub sub_area_type: SubAreaType,
	pub openings: Vec<Opening>,
}

impl InvalidOpenings {
	#[must_use]
	pub fn count(&self) -> usize {
		self.openings.len()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOpeningsChoice {
	KeepAll,
	RemoveInvalid,
}

impl Default for InvalidOpeningsChoice {
	fn default() -> Self {
		Self::KeepAll
	}
}

/// Reports every set of openings in `room` that its sub-area type does not allow.
#[must_use]
pub fn find_invalid_openings(room: &Room) -> Vec<InvalidOpenings> {
	match room {
		Room::Plain(plain) => plain
			.classification
			.as_ref()
			.filter(|classification| classification.is_sub_area)
			.and_then(|classification| classification.sub_area_type.as_ref())
			.and_then(|kind| invalid_for(None, kind, &plain.measurements.openings))
			.into_iter()
			.collect(),

		Room::Merged(merged) => merged
			.sub_areas
			.iter()
			.enumerate()
			.filter_map(|(idx, sub_area)| {
				invalid_for(Some(idx), &sub_area.kind, &sub_area.measurements.openings)
			})
			.collect(),
	}
}

fn invalid_for(
	sub_area_index: Option<usize>,
	kind: &SubAreaType,
	openings: &[Opening],
) -> Option<InvalidOpenings> {
	let (_, invalid) = split_openings_for_sub_area(openings, kind);

	(!invalid.is_empty()).then(|| InvalidOpenings {
		sub_area_index,
		sub_area_type: kind.clone(),
		openings: invalid,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Measurements, PlainRoom, RoomClassification};

	fn door_and_window() -> Vec<Opening> {
		vec![
			Opening::new(OpeningType::Door, "2'0\" X 6'8\""),
			Opening::new(OpeningType::Window, "2x2"),
		]
	}

	#[test]
	fn bathtub_allows_nothing() {
		assert!(filter_openings_for_sub_area(&door_and_window(), &SubAreaType::Bathtub).is_empty());
	}

	#[test]
	fn closet_keeps_only_doors() {
		let filtered = filter_openings_for_sub_area(&door_and_window(), &"closet".into());

		assert_eq!(filtered, vec![Opening::new(OpeningType::Door, "2'0\" X 6'8\"")]);
	}

	#[test]
	fn custom_types_are_permissive() {
		assert_eq!(valid_opening_types("reading nook"), OpeningType::ALL.as_slice());
		assert_eq!(valid_opening_types("Walk-in Shower"), &[] as &[OpeningType]);
		assert_eq!(valid_opening_types("ALCOVE"), &[OpeningType::Window]);
	}

	#[test]
	fn reconcile_drops_internal_and_duplicate_openings() {
		let a = vec![
			Opening::new(OpeningType::Door, "2'6\" X 6'8\"").opening_to("Bathroom2"),
			Opening::new(OpeningType::Window, "4' X 3'").opening_to("Exterior"),
		];
		let b = vec![
			Opening::new(OpeningType::Door, "2'6\" X 6'8\"").opening_to("BATHROOM"),
			Opening::new(OpeningType::Window, "4' X 3'").opening_to("Exterior"),
			Opening::new(OpeningType::Door, "3' X 6'8\"").opening_to("Hall"),
		];

		let reconciled = reconcile_openings(&a, &b, "Bathroom", "Bathroom2");

		assert_eq!(
			reconciled,
			vec![
				Opening::new(OpeningType::Window, "4' X 3'").opening_to("Exterior"),
				Opening::new(OpeningType::Door, "3' X 6'8\"").opening_to("Hall"),
			]
		);
	}

	#[test]
	fn invalid_openings_reported_for_classified_room() {
		let room = Room::Plain(
			PlainRoom::new(
				"Tub",
				Measurements {
					openings: door_and_window(),
					..Default::default()
				},
			)
			.with_classification(RoomClassification::confirmed_sub_area(
				SubAreaType::Bathtub,
				false,
			)),
		);

		let report = find_invalid_openings(&room);

		assert_eq!(report.len(), 1);
		assert_eq!(report[0].count(), 2);
		assert_eq!(report[0].sub_area_index, None);
	}

	#[test]
	fn unclassified_room_has_nothing_to_report() {
		let room = Room::Plain(PlainRoom::new(
			"Kitchen",
			Measurements {
				openings: door_and_window(),
				..Default::default()
			},
		));

		assert!(find_invalid_openings(&room).is_empty());
	}
}
