use tracing::{debug, info};

use crate::{
	detector::Issue,
	merge::{self, MergeOutcome},
	model::{Location, Opening, Room, RoomClassification, SubAreaType},
	openings::{find_invalid_openings, split_openings_for_sub_area, InvalidOpenings, InvalidOpeningsChoice},
	unmerge,
};

/// The editable measurement tree next to the last committed version of it.
///
/// Each edit runs on a copy of the working tree which only replaces it when the edit
/// actually changed something, so a skipped or failed edit never leaves partial changes
/// behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
	committed: Vec<Location>,
	working: Vec<Location>,
}

impl Draft {
	#[must_use]
	pub fn new(locations: Vec<Location>) -> Self {
		Self {
			committed: locations.clone(),
			working: locations,
		}
	}

	#[must_use]
	pub fn working(&self) -> &[Location] {
		&self.working
	}

	#[must_use]
	pub fn committed(&self) -> &[Location] {
		&self.committed
	}

	#[must_use]
	pub fn is_dirty(&self) -> bool {
		self.working != self.committed
	}

	pub fn commit(&mut self) {
		if self.is_dirty() {
			info!(
				"Committing measurement draft with {} rooms",
				self.working
					.iter()
					.map(|location| location.rooms.len())
					.sum::<usize>()
			);
		}
		self.committed.clone_from(&self.working);
	}

	pub fn discard(&mut self) {
		if self.is_dirty() {
			debug!("Discarding uncommitted measurement edits");
		}
		self.working.clone_from(&self.committed);
	}

	#[must_use]
	pub fn into_committed(self) -> Vec<Location> {
		self.committed
	}

	/// Runs `edit` on a copy of the working tree, keeping the copy only if `changed` says so.
	fn transact<T>(
		&mut self,
		edit: impl FnOnce(&mut Vec<Location>) -> T,
		changed: impl FnOnce(&T) -> bool,
	) -> T {
		let mut next = self.working.clone();
		let out = edit(&mut next);
		if changed(&out) {
			self.working = next;
		}
		out
	}

	pub fn merge_rooms(
		&mut self,
		location_index: usize,
		room_a: usize,
		room_b: usize,
	) -> MergeOutcome {
		self.transact(
			|tree| merge::merge_rooms(tree, location_index, room_a, room_b),
			|outcome| outcome.is_merged(),
		)
	}

	pub fn unmerge_room(&mut self, location_index: usize, room_index: usize) -> bool {
		self.transact(
			|tree| unmerge::unmerge_room(tree, location_index, room_index),
			|done| *done,
		)
	}

	pub fn rename_room(
		&mut self,
		location_index: usize,
		room_index: usize,
		name: impl Into<String>,
	) -> bool {
		let name = name.into();
		self.transact(
			|tree| {
				room_mut(tree, location_index, room_index)
					.map(|room| room.set_name(name))
					.is_some()
			},
			|done| *done,
		)
	}

	/// Renames every room named in `issues` to its suggested name.
	pub fn apply_suggested_names(&mut self, issues: &[Issue]) -> usize {
		self.transact(
			|tree| {
				issues
					.iter()
					.filter_map(|issue| {
						room_mut(tree, issue.location_index(), issue.room_index())
							.map(|room| room.set_name(issue.suggestion()))
					})
					.count()
			},
			|renamed| *renamed > 0,
		)
	}

	/// Marks a plain room as a sub-area of `kind` and drops the openings that kind can't have.
	///
	/// Material applicability falls back to the kind's default. Returns the dropped
	/// openings, or `None` when there is no plain room at that position.
	pub fn assign_sub_area_type(
		&mut self,
		location_index: usize,
		room_index: usize,
		kind: SubAreaType,
		material_applicable: Option<bool>,
	) -> Option<Vec<Opening>> {
		self.transact(
			|tree| {
				let Some(Room::Plain(plain)) = room_mut(tree, location_index, room_index) else {
					return None;
				};

				let material_applicable =
					material_applicable.unwrap_or_else(|| kind.default_material_applicable());
				let (valid, invalid) = split_openings_for_sub_area(&plain.measurements.openings, &kind);

				debug!(
					"Classified <room='{}'> as <sub_area_type='{kind}'>, dropping {} openings",
					plain.name,
					invalid.len()
				);

				plain.measurements.openings = valid;
				plain.classification = Some(RoomClassification {
					detection_confidence: plain
						.classification
						.take()
						.and_then(|previous| previous.detection_confidence),
					..RoomClassification::confirmed_sub_area(kind, material_applicable)
				});

				Some(invalid)
			},
			Option::is_some,
		)
	}

	/// Records that the user considers this room a standalone space.
	pub fn mark_standalone(&mut self, location_index: usize, room_index: usize) -> bool {
		self.transact(
			|tree| match room_mut(tree, location_index, room_index) {
				Some(Room::Plain(plain)) => {
					plain.classification = Some(RoomClassification::confirmed_standalone());
					true
				}
				_ => false,
			},
			|done| *done,
		)
	}

	/// Drops whatever classification a plain room had, confirmed or detected.
	pub fn clear_classification(&mut self, location_index: usize, room_index: usize) -> bool {
		self.transact(
			|tree| match room_mut(tree, location_index, room_index) {
				Some(Room::Plain(plain)) => plain.classification.take().is_some(),
				_ => false,
			},
			|done| *done,
		)
	}

	pub fn add_opening(&mut self, location_index: usize, room_index: usize, opening: Opening) -> bool {
		self.transact(
			|tree| {
				room_mut(tree, location_index, room_index)
					.map(|room| room.openings_mut().push(opening))
					.is_some()
			},
			|done| *done,
		)
	}

	pub fn update_opening(
		&mut self,
		location_index: usize,
		room_index: usize,
		opening_index: usize,
		opening: Opening,
	) -> bool {
		self.transact(
			|tree| {
				room_mut(tree, location_index, room_index)
					.and_then(|room| room.openings_mut().get_mut(opening_index))
					.map(|slot| *slot = opening)
					.is_some()
			},
			|done| *done,
		)
	}

	pub fn remove_opening(
		&mut self,
		location_index: usize,
		room_index: usize,
		opening_index: usize,
	) -> Option<Opening> {
		self.transact(
			|tree| {
				let openings = room_mut(tree, location_index, room_index)?.openings_mut();
				(opening_index < openings.len()).then(|| openings.remove(opening_index))
			},
			Option::is_some,
		)
	}

	/// Openings in a room that don't fit their sub-area type, for the user to decide on.
	#[must_use]
	pub fn invalid_openings(&self, location_index: usize, room_index: usize) -> Vec<InvalidOpenings> {
		self.working
			.get(location_index)
			.and_then(|location| location.rooms.get(room_index))
			.map(find_invalid_openings)
			.unwrap_or_default()
	}

	/// Applies the user's answer to [`Draft::invalid_openings`]. Returns how many openings
	/// were removed.
	pub fn resolve_invalid_openings(
		&mut self,
		location_index: usize,
		room_index: usize,
		choice: InvalidOpeningsChoice,
	) -> usize {
		if choice == InvalidOpeningsChoice::KeepAll {
			return 0;
		}

		self.transact(
			|tree| {
				room_mut(tree, location_index, room_index).map_or(0, remove_invalid_openings)
			},
			|removed| *removed > 0,
		)
	}
}

fn room_mut(tree: &mut [Location], location_index: usize, room_index: usize) -> Option<&mut Room> {
	tree.get_mut(location_index)?.rooms.get_mut(room_index)
}

fn remove_invalid_openings(room: &mut Room) -> usize {
	match room {
		Room::Plain(plain) => {
			let Some(kind) = plain
				.classification
				.as_ref()
				.filter(|classification| classification.is_sub_area)
				.and_then(|classification| classification.sub_area_type.clone())
			else {
				return 0;
			};

			let (valid, invalid) = split_openings_for_sub_area(&plain.measurements.openings, &kind);
			plain.measurements.openings = valid;
			invalid.len()
		}

		Room::Merged(merged) => {
			let mut removed = Vec::new();
			for sub_area in &mut merged.sub_areas {
				let (valid, invalid) =
					split_openings_for_sub_area(&sub_area.measurements.openings, &sub_area.kind);
				sub_area.measurements.openings = valid;
				removed.extend(invalid);
			}

			// The totals carry the sub-area openings too, unless the main area has its own copy.
			let main_openings = &merged.main_area.measurements.openings;
			merged
				.total_measurements
				.openings
				.retain(|opening| !removed.contains(opening) || main_openings.contains(opening));

			removed.len()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		detector::detect_issues,
		model::{Measurements, OpeningType, PlainRoom},
	};

	fn plain(name: &str, openings: Vec<Opening>) -> Room {
		Room::Plain(PlainRoom::new(
			name,
			Measurements {
				floor_area_sqft: 50.0,
				openings,
				..Default::default()
			},
		))
	}

	fn draft() -> Draft {
		Draft::new(vec![Location::new(
			"1st Floor",
			vec![
				plain("Bedroom", vec![Opening::new(OpeningType::Window, "4' X 3'")]),
				plain(
					"Closet",
					vec![
						Opening::new(OpeningType::Door, "2' X 6'8\"").opening_to("Bedroom"),
						Opening::new(OpeningType::Window, "2' X 2'"),
					],
				),
				plain("Bedroom", Vec::new()),
			],
		)])
	}

	#[test]
	fn commit_and_discard() {
		let mut draft = draft();
		assert!(!draft.is_dirty());

		assert!(draft.rename_room(0, 0, "Primary Bedroom"));
		assert!(draft.is_dirty());
		assert_eq!(draft.committed()[0].rooms[0].name(), "Bedroom");

		draft.discard();
		assert!(!draft.is_dirty());
		assert_eq!(draft.working()[0].rooms[0].name(), "Bedroom");

		assert!(draft.rename_room(0, 0, "Primary Bedroom"));
		draft.commit();
		assert!(!draft.is_dirty());
		assert_eq!(draft.committed()[0].rooms[0].name(), "Primary Bedroom");
	}

	#[test]
	fn skipped_edits_leave_the_draft_clean() {
		let mut draft = draft();

		assert!(!draft.merge_rooms(0, 0, 7).is_merged());
		assert!(!draft.unmerge_room(0, 0));
		assert!(!draft.rename_room(4, 0, "Nowhere"));
		assert!(draft.remove_opening(0, 0, 3).is_none());
		assert!(!draft.is_dirty());
	}

	#[test]
	fn assigning_a_type_filters_openings() {
		let mut draft = draft();

		let dropped = draft
			.assign_sub_area_type(0, 1, SubAreaType::Closet, None)
			.expect("closet is a plain room");

		assert_eq!(dropped, vec![Opening::new(OpeningType::Window, "2' X 2'")]);

		let closet = &draft.working()[0].rooms[1];
		assert!(closet.is_sub_area());
		assert_eq!(closet.effective_measurements().openings.len(), 1);
		assert!(closet.classification().is_some_and(|c| c.user_confirmed));
	}

	#[test]
	fn invalid_openings_wait_for_the_user() {
		let mut draft = Draft::new(vec![Location::new(
			"1st Floor",
			vec![Room::Plain(
				PlainRoom::new(
					"Tub",
					Measurements {
						openings: vec![Opening::new(OpeningType::Window, "2' X 2'")],
						..Default::default()
					},
				)
				.with_classification(RoomClassification::confirmed_sub_area(SubAreaType::Bathtub, false)),
			)],
		)]);

		assert_eq!(draft.invalid_openings(0, 0)[0].count(), 1);

		assert_eq!(draft.resolve_invalid_openings(0, 0, InvalidOpeningsChoice::KeepAll), 0);
		assert!(!draft.is_dirty());

		assert_eq!(
			draft.resolve_invalid_openings(0, 0, InvalidOpeningsChoice::RemoveInvalid),
			1
		);
		assert!(draft.invalid_openings(0, 0).is_empty());
	}

	#[test]
	fn suggested_names_resolve_duplicates() {
		let mut draft = draft();

		let issues = detect_issues(draft.working());
		assert_eq!(draft.apply_suggested_names(&issues), 1);

		assert_eq!(draft.working()[0].rooms[2].name(), "Bedroom #2");
		assert!(detect_issues(draft.working()).is_empty());
	}

	#[test]
	fn opening_edits() {
		let mut draft = draft();

		assert!(draft.add_opening(0, 2, Opening::new(OpeningType::Door, "3' X 6'8\"")));
		assert!(draft.update_opening(
			0,
			2,
			0,
			Opening::new(OpeningType::Door, "2'8\" X 6'8\"").opening_to("Hall")
		));
		assert_eq!(
			draft.remove_opening(0, 2, 0),
			Some(Opening::new(OpeningType::Door, "2'8\" X 6'8\"").opening_to("Hall"))
		);
		assert!(draft.working()[0].rooms[2].effective_measurements().openings.is_empty());
	}
}
