use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

static ROOM_PREFIX: OnceLock<Regex> = OnceLock::new();
static AREA_SUFFIX: OnceLock<Regex> = OnceLock::new();
static FLOOR_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn case_insensitive(pattern: &str) -> Regex {
	RegexBuilder::new(pattern)
		.case_insensitive(true)
		.build()
		.expect("this regex should always be valid")
}

/// Drops `Room 3:` style prefixes and `: sq ft` trailers, then title cases what is left.
#[must_use]
pub fn clean_room_name(name: &str) -> String {
	let prefix = ROOM_PREFIX.get_or_init(|| case_insensitive(r"^room\s*\d+\s*[:-]?\s*"));
	let suffix = AREA_SUFFIX.get_or_init(|| case_insensitive(r"\s*:\s*sq\s*ft.*$"));

	let name = name.trim();
	let name = prefix.replace(name, "");
	let name = suffix.replace(&name, "");

	title_case(&name)
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// A word starts after anything that is neither a letter nor a digit, so `walk-in` becomes
/// `Walk-In` while `2ND` becomes `2nd`.
#[must_use]
pub fn title_case(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut at_word_start = true;

	for c in text.chars() {
		if c.is_alphabetic() {
			if at_word_start {
				out.extend(c.to_uppercase());
			} else {
				out.extend(c.to_lowercase());
			}
		} else {
			out.push(c);
		}
		at_word_start = !c.is_alphanumeric();
	}

	out
}

/// Floor heading mentioned in `text`, title cased, e.g. `2nd Floor` or `Basement`.
#[must_use]
pub fn extract_floor_name(text: &str) -> Option<String> {
	let patterns = FLOOR_PATTERNS.get_or_init(|| {
		[
			r"(\d+(?:st|nd|rd|th)?\s*floor)",
			r"(ground\s*floor)",
			r"(basement)",
			r"(main\s*level)",
			r"(upper\s*level)",
			r"(lower\s*level)",
		]
		.into_iter()
		.map(case_insensitive)
		.collect()
	});

	patterns
		.iter()
		.find_map(|pattern| pattern.find(text))
		.map(|found| title_case(found.as_str()))
}
