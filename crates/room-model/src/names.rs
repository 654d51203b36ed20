//! Room name normalization used when deciding whether two names describe the same space.
//!
//! Floor-plan exports number repeated labels in a few ways (`STAIRS2`, `Stairs 2`,
//! `Bedroom #2`). Names are compared case-insensitively after dropping any trailing
//! digit run, so every one of those collapses to the same key.

use std::{collections::HashSet, sync::OnceLock};

use regex::Regex;

static NUMBER_SUFFIX: OnceLock<Regex> = OnceLock::new();
static TRAILING_DIGITS: OnceLock<Regex> = OnceLock::new();

/// Strips a `" #<digits>"` numbering suffix, as added when duplicate rooms are numbered.
#[must_use]
pub fn strip_number_suffix(name: &str) -> &str {
	let re = NUMBER_SUFFIX
		.get_or_init(|| Regex::new(r"\s+#\d+$").expect("this regex should always be valid"));

	re.find(name)
		.map_or(name, |suffix| &name[..suffix.start()])
}

/// Lowercased, trimmed name with any trailing digit run (and the `#`/spaces before it) removed.
#[must_use]
pub fn normalize_room_name(name: &str) -> String {
	let re = TRAILING_DIGITS
		.get_or_init(|| Regex::new(r"[\s#]*\d+$").expect("this regex should always be valid"));

	let lowered = name.trim().to_lowercase();
	let stripped = re.replace(&lowered, "");

	// A name made only of digits would normalize to nothing and match every other
	// digit-only name, so it stays as is.
	if stripped.trim().is_empty() {
		lowered
	} else {
		stripped.trim_end().to_string()
	}
}

/// Names of the rooms taking part in a merge; an opening leading to any of them
/// becomes internal to the merged room.
#[derive(Debug, Clone, Default)]
pub struct InternalNames {
	normalized: HashSet<String>,
}

impl InternalNames {
	pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
		Self {
			normalized: names
				.into_iter()
				.map(normalize_room_name)
				.filter(|name| !name.is_empty())
				.collect(),
		}
	}

	#[must_use]
	pub fn contains(&self, opens_to: &str) -> bool {
		self.normalized.contains(&normalize_room_name(opens_to))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_only_hash_numbering() {
		assert_eq!(strip_number_suffix("Bedroom #2"), "Bedroom");
		assert_eq!(strip_number_suffix("Bedroom  #12"), "Bedroom");
		assert_eq!(strip_number_suffix("Bedroom2"), "Bedroom2");
		assert_eq!(strip_number_suffix("#2"), "#2");
	}

	#[test]
	fn normalization_collapses_numbered_labels() {
		assert_eq!(normalize_room_name("STAIRS"), "stairs");
		assert_eq!(normalize_room_name("STAIRS2"), "stairs");
		assert_eq!(normalize_room_name(" Stairs 2 "), "stairs");
		assert_eq!(normalize_room_name("Stairs #14"), "stairs");
		assert_eq!(normalize_room_name("101"), "101");
	}

	#[test]
	fn internal_names_match_case_and_number_variants() {
		let names = InternalNames::new(["Bathroom", "Bathroom2"]);

		assert!(names.contains("bathroom"));
		assert!(names.contains("BATHROOM2"));
		assert!(names.contains("Bathroom 11"));
		assert!(!names.contains("Master Bathroom"));
		assert!(!names.contains("Hall"));
	}
}
