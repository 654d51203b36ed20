use serde::{Deserialize, Serialize};

use crate::{model::Location, Error};

/// Body of the request that stores a session's final measurement tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveMeasurementsRequest {
	#[serde(rename = "measurementData", alias = "measurement_data")]
	pub measurement_data: Vec<Location>,
}

impl From<Vec<Location>> for SaveMeasurementsRequest {
	fn from(measurement_data: Vec<Location>) -> Self {
		Self { measurement_data }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveMeasurementsResponse {
	pub success: bool,
}

/// Key a session's measurement tree is cached under.
#[must_use]
pub fn session_cache_key(session_id: impl std::fmt::Display) -> String {
	format!("measurementData_{session_id}")
}

pub fn from_json_str(json: &str) -> Result<Vec<Location>, Error> {
	serde_json::from_str(json).map_err(Into::into)
}

pub fn to_json_string(locations: &[Location]) -> Result<String, Error> {
	serde_json::to_string_pretty(locations).map_err(Into::into)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_body_uses_camel_case_key() {
		let request = SaveMeasurementsRequest::from(vec![Location::new("1st Floor", Vec::new())]);

		let value = serde_json::to_value(&request).expect("serializable");

		assert_eq!(value["measurementData"][0]["location"], "1st Floor");
	}

	#[test]
	fn cache_key_embeds_session_id() {
		assert_eq!(session_cache_key("abc-123"), "measurementData_abc-123");
	}

	#[test]
	fn malformed_tree_is_an_error() {
		assert!(matches!(
			from_json_str(r#"[{ "location": "1st Floor", "rooms": [{ "name": "Hall" }] }]"#),
			Err(Error::Json(_))
		));
	}
}
