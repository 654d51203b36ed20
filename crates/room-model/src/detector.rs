use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
	model::{Location, Room, RoomClassification, SubAreaType},
	names::strip_number_suffix,
};

/// A naming problem in the measurement tree, with a replacement name to offer the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
	EmptyName {
		location_index: usize,
		room_index: usize,
		suggestion: String,
	},
	DuplicateName {
		location_index: usize,
		room_index: usize,
		name: String,
		suggestion: String,
	},
}

impl Issue {
	#[must_use]
	pub const fn location_index(&self) -> usize {
		match self {
			Self::EmptyName { location_index, .. } | Self::DuplicateName { location_index, .. } => {
				*location_index
			}
		}
	}

	#[must_use]
	pub const fn room_index(&self) -> usize {
		match self {
			Self::EmptyName { room_index, .. } | Self::DuplicateName { room_index, .. } => {
				*room_index
			}
		}
	}

	#[must_use]
	pub fn suggestion(&self) -> &str {
		match self {
			Self::EmptyName { suggestion, .. } | Self::DuplicateName { suggestion, .. } => {
				suggestion
			}
		}
	}
}

/// Scans every location for blank room names and repeated ones.
///
/// Names are compared trimmed but case-sensitively, so `STAIRS` and `Stairs` are not
/// reported here even though opening reconciliation treats them as the same space.
#[must_use]
pub fn detect_issues(locations: &[Location]) -> Vec<Issue> {
	let mut issues = Vec::new();

	for (location_index, location) in locations.iter().enumerate() {
		let taken = location
			.rooms
			.iter()
			.map(|room| room.name().trim())
			.collect::<HashSet<_>>();
		let mut occurrences = HashMap::<&str, usize>::new();
		let mut suggested = HashSet::<String>::new();

		for (room_index, room) in location.rooms.iter().enumerate() {
			let name = room.name().trim();

			if name.is_empty() {
				issues.push(Issue::EmptyName {
					location_index,
					room_index,
					suggestion: format!("Room {}", room_index + 1),
				});
				continue;
			}

			let seen = occurrences.entry(name).or_insert(0);
			*seen += 1;

			if *seen > 1 {
				let suggestion = (*seen..)
					.map(|n| format!("{name} #{n}"))
					.find(|candidate| {
						!taken.contains(candidate.as_str()) && !suggested.contains(candidate)
					})
					.unwrap_or_default();
				suggested.insert(suggestion.clone());

				issues.push(Issue::DuplicateName {
					location_index,
					room_index,
					name: name.to_string(),
					suggestion,
				});
			}
		}
	}

	issues
}

/// An unclassified room whose name says it is probably part of another room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubAreaCandidate {
	pub location_index: usize,
	pub room_index: usize,
	pub suggested: RoomClassification,
}

/// Finds plain, unclassified rooms named like a known sub-area kind.
///
/// Confidence is `"high"` when the whole name (numbering aside) is the marker and
/// `"medium"` when the name merely contains it.
#[must_use]
pub fn detect_sub_area_candidates(locations: &[Location]) -> Vec<SubAreaCandidate> {
	locations
		.iter()
		.enumerate()
		.flat_map(|(location_index, location)| {
			location
				.rooms
				.iter()
				.enumerate()
				.filter_map(move |(room_index, room)| match room {
					Room::Plain(plain) if plain.classification.is_none() => {
						suggest_classification(&plain.name).map(|suggested| SubAreaCandidate {
							location_index,
							room_index,
							suggested,
						})
					}
					_ => None,
				})
		})
		.collect()
}

/// Suggests a sub-area classification from a room name alone.
#[must_use]
pub fn suggest_classification(name: &str) -> Option<RoomClassification> {
	let lowered = strip_number_suffix(name.trim()).to_lowercase();

	SubAreaType::KNOWN.into_iter().find_map(|kind| {
		let marker = kind
			.name_markers()
			.iter()
			.find(|marker| lowered.contains(*marker))?;

		let confidence = if lowered == *marker { "high" } else { "medium" };

		Some(RoomClassification {
			sub_area_type: Some(kind.clone()),
			is_sub_area: true,
			material_applicable: kind.default_material_applicable(),
			user_confirmed: false,
			detection_confidence: Some(confidence.to_string()),
		})
	})
}

/// Where a merge started from a single room should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MergeTarget {
	Found { index: usize },
	NotFound,
}

/// Picks the room that `room_index` should be merged with.
///
/// A duplicated name targets the first room carrying it. Otherwise a sub-area targets the
/// closest room before it that is not a sub-area.
#[must_use]
pub fn find_merge_target(location: &Location, room_index: usize) -> MergeTarget {
	let Some(room) = location.rooms.get(room_index) else {
		return MergeTarget::NotFound;
	};

	let name = room.name().trim();

	if !name.is_empty() {
		if let Some(index) = location
			.rooms
			.iter()
			.enumerate()
			.find(|(idx, other)| *idx != room_index && other.name().trim() == name)
			.map(|(idx, _)| idx)
		{
			return MergeTarget::Found { index };
		}
	}

	if room.is_sub_area() {
		if let Some(index) = location.rooms[..room_index]
			.iter()
			.rposition(|other| !other.is_sub_area())
		{
			return MergeTarget::Found { index };
		}
	}

	MergeTarget::NotFound
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Measurements, PlainRoom};

	fn room(name: &str) -> Room {
		Room::Plain(PlainRoom::new(name, Measurements::default()))
	}

	#[test]
	fn reports_empty_and_duplicate_names() {
		let locations = vec![
			Location::new("1st Floor", vec![room("Kitchen"), room("  "), room("Kitchen ")]),
			Location::new("2nd Floor", vec![room("Kitchen"), room("STAIRS"), room("Stairs")]),
		];

		let issues = detect_issues(&locations);

		assert_eq!(
			issues,
			vec![
				Issue::EmptyName {
					location_index: 0,
					room_index: 1,
					suggestion: "Room 2".to_string(),
				},
				Issue::DuplicateName {
					location_index: 0,
					room_index: 2,
					name: "Kitchen".to_string(),
					suggestion: "Kitchen #2".to_string(),
				},
			]
		);
	}

	#[test]
	fn duplicate_suggestion_skips_taken_names() {
		let locations = vec![Location::new(
			"1st Floor",
			vec![room("Bath"), room("Bath #2"), room("Bath"), room("Bath")],
		)];

		let suggestions = detect_issues(&locations)
			.iter()
			.map(|issue| issue.suggestion().to_string())
			.collect::<Vec<_>>();

		assert_eq!(suggestions, ["Bath #3", "Bath #4"]);
	}

	#[test]
	fn sub_area_markers_are_detected() {
		let locations = vec![Location::new(
			"1st Floor",
			vec![room("Bedroom"), room("Closet #2"), room("Master Walk-In Shower")],
		)];

		let candidates = detect_sub_area_candidates(&locations);

		assert_eq!(candidates.len(), 2);
		assert_eq!(candidates[0].room_index, 1);
		assert_eq!(candidates[0].suggested.sub_area_type, Some(SubAreaType::Closet));
		assert_eq!(candidates[0].suggested.detection_confidence.as_deref(), Some("high"));
		assert_eq!(
			candidates[1].suggested.sub_area_type,
			Some(SubAreaType::WalkInShower)
		);
		assert!(!candidates[1].suggested.material_applicable);
		assert_eq!(candidates[1].suggested.detection_confidence.as_deref(), Some("medium"));
	}

	#[test]
	fn merge_target_prefers_duplicates_then_parent() {
		let closet = Room::Plain(
			PlainRoom::new("Closet", Measurements::default()).with_classification(
				RoomClassification::confirmed_sub_area(SubAreaType::Closet, true),
			),
		);
		let location = Location::new(
			"1st Floor",
			vec![room("Bedroom"), room("Hall"), closet, room("Hall")],
		);

		assert_eq!(find_merge_target(&location, 3), MergeTarget::Found { index: 1 });
		assert_eq!(find_merge_target(&location, 2), MergeTarget::Found { index: 1 });
		assert_eq!(find_merge_target(&location, 0), MergeTarget::NotFound);
		assert_eq!(find_merge_target(&location, 9), MergeTarget::NotFound);
	}
}
