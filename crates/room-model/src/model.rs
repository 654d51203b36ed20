use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Fallback sub-area kind for rooms flagged as sub-areas without a type.
pub const DEFAULT_SUB_AREA_TYPE: &str = "sub_area";

const ANY_OPENING: &[OpeningType] = &[OpeningType::Door, OpeningType::Window, OpeningType::OpenWall];

const fn default_true() -> bool {
	true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
	!*value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningType {
	Door,
	Window,
	OpenWall,
}

impl OpeningType {
	pub const ALL: [Self; 3] = [Self::Door, Self::Window, Self::OpenWall];

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Door => "door",
			Self::Window => "window",
			Self::OpenWall => "open_wall",
		}
	}
}

impl fmt::Display for OpeningType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OpeningType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match canonical_key(s).as_str() {
			"door" => Ok(Self::Door),
			"window" => Ok(Self::Window),
			"open_wall" => Ok(Self::OpenWall),
			_ => Err(Error::UnknownOpeningType(s.to_string())),
		}
	}
}

/// A physical gap in a room's envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opening {
	#[serde(rename = "type")]
	pub kind: OpeningType,
	/// Free-text dimension as it came from the takeoff, e.g. `3' X 6'8"`.
	#[serde(default)]
	pub size: String,
	/// Name of the space this opening connects to, if known.
	#[serde(default, skip_serializing_if = "Option::is_none", alias = "opensTo")]
	pub opens_to: Option<String>,
}

impl Opening {
	#[must_use]
	pub fn new(kind: OpeningType, size: impl Into<String>) -> Self {
		Self {
			kind,
			size: size.into(),
			opens_to: None,
		}
	}

	#[must_use]
	pub fn opening_to(mut self, room_name: impl Into<String>) -> Self {
		self.opens_to = Some(room_name.into());
		self
	}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
	#[serde(alias = "heightFt")]
	pub height: f64,
	#[serde(alias = "wallAreaSqft")]
	pub wall_area_sqft: f64,
	#[serde(alias = "ceilingAreaSqft")]
	pub ceiling_area_sqft: f64,
	#[serde(alias = "floorAreaSqft")]
	pub floor_area_sqft: f64,
	#[serde(alias = "wallsAndCeilingAreaSqft")]
	pub walls_and_ceiling_area_sqft: f64,
	#[serde(alias = "flooringAreaSy")]
	pub flooring_area_sy: f64,
	#[serde(alias = "ceilingPerimeterLf")]
	pub ceiling_perimeter_lf: f64,
	#[serde(alias = "floorPerimeterLf")]
	pub floor_perimeter_lf: f64,
	pub openings: Vec<Opening>,
}

/// Kind of space a sub-area represents.
///
/// Parsing is case-insensitive and treats spaces and hyphens like underscores, so
/// `"Walk-in Shower"` and `"walk_in_shower"` are the same kind. Anything unknown is
/// kept verbatim as [`SubAreaType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubAreaType {
	Closet,
	Pantry,
	Alcove,
	WalkInShower,
	Bathtub,
	ShowerBooth,
	Cabinet,
	Fixture,
	Custom(String),
}

impl SubAreaType {
	pub const KNOWN: [Self; 8] = [
		Self::Closet,
		Self::Pantry,
		Self::Alcove,
		Self::WalkInShower,
		Self::Bathtub,
		Self::ShowerBooth,
		Self::Cabinet,
		Self::Fixture,
	];

	#[must_use]
	pub fn parse(raw: &str) -> Self {
		match canonical_key(raw).as_str() {
			"closet" => Self::Closet,
			"pantry" => Self::Pantry,
			"alcove" => Self::Alcove,
			"walk_in_shower" => Self::WalkInShower,
			"bathtub" => Self::Bathtub,
			"shower_booth" => Self::ShowerBooth,
			"cabinet" => Self::Cabinet,
			"fixture" => Self::Fixture,
			_ => Self::Custom(raw.trim().to_string()),
		}
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			Self::Closet => "closet",
			Self::Pantry => "pantry",
			Self::Alcove => "alcove",
			Self::WalkInShower => "walk_in_shower",
			Self::Bathtub => "bathtub",
			Self::ShowerBooth => "shower_booth",
			Self::Cabinet => "cabinet",
			Self::Fixture => "fixture",
			Self::Custom(name) => name,
		}
	}

	/// Opening kinds a sub-area of this type may legally have.
	///
	/// Showers, tubs, cabinets and fixtures are sealed areas and allow none.
	/// Custom types are permissive.
	#[must_use]
	pub const fn allowed_openings(&self) -> &'static [OpeningType] {
		match self {
			Self::Closet | Self::Pantry => &[OpeningType::Door],
			Self::Alcove => &[OpeningType::Window],
			Self::WalkInShower
			| Self::Bathtub
			| Self::ShowerBooth
			| Self::Cabinet
			| Self::Fixture => &[],
			Self::Custom(_) => ANY_OPENING,
		}
	}

	#[must_use]
	pub fn allows(&self, kind: OpeningType) -> bool {
		self.allowed_openings().contains(&kind)
	}

	/// Whether flooring material normally goes into this kind of space.
	#[must_use]
	pub const fn default_material_applicable(&self) -> bool {
		!matches!(
			self,
			Self::WalkInShower | Self::Bathtub | Self::ShowerBooth | Self::Cabinet | Self::Fixture
		)
	}

	/// Lowercase name fragments that mark a room as this kind of sub-area.
	#[must_use]
	pub const fn name_markers(&self) -> &'static [&'static str] {
		match self {
			Self::Closet => &["closet"],
			Self::Pantry => &["pantry"],
			Self::Alcove => &["alcove"],
			Self::WalkInShower => &["walk-in shower", "walk in shower", "walk_in_shower"],
			Self::Bathtub => &["bathtub", "bath tub"],
			Self::ShowerBooth => &["shower booth", "shower stall", "shower_booth"],
			Self::Cabinet => &["cabinet"],
			Self::Fixture => &["fixture"],
			Self::Custom(_) => &[],
		}
	}
}

impl Default for SubAreaType {
	fn default() -> Self {
		Self::Custom(DEFAULT_SUB_AREA_TYPE.to_string())
	}
}

impl fmt::Display for SubAreaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<String> for SubAreaType {
	fn from(raw: String) -> Self {
		Self::parse(&raw)
	}
}

impl From<&str> for SubAreaType {
	fn from(raw: &str) -> Self {
		Self::parse(raw)
	}
}

impl From<SubAreaType> for String {
	fn from(kind: SubAreaType) -> Self {
		match kind {
			SubAreaType::Custom(name) => name,
			known => known.as_str().to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomClassification {
	#[serde(default, alias = "subAreaType")]
	pub sub_area_type: Option<SubAreaType>,
	#[serde(default, alias = "isSubArea")]
	pub is_sub_area: bool,
	#[serde(default = "default_true", alias = "materialApplicable")]
	pub material_applicable: bool,
	#[serde(default, alias = "userConfirmed")]
	pub user_confirmed: bool,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		alias = "detectionConfidence"
	)]
	pub detection_confidence: Option<String>,
}

impl RoomClassification {
	/// A sub-area classification the user explicitly chose.
	#[must_use]
	pub fn confirmed_sub_area(kind: SubAreaType, material_applicable: bool) -> Self {
		Self {
			sub_area_type: Some(kind),
			is_sub_area: true,
			material_applicable,
			user_confirmed: true,
			detection_confidence: None,
		}
	}

	/// The user stated this room stands on its own.
	#[must_use]
	pub const fn confirmed_standalone() -> Self {
		Self {
			sub_area_type: None,
			is_sub_area: false,
			material_applicable: true,
			user_confirmed: true,
			detection_confidence: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubArea {
	#[serde(rename = "type")]
	pub kind: SubAreaType,
	pub measurements: Measurements,
	#[serde(default = "default_true", alias = "materialApplicable")]
	pub material_applicable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MainArea {
	pub measurements: Measurements,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlainRoom {
	pub name: String,
	pub measurements: Measurements,
	pub classification: Option<RoomClassification>,
}

impl PlainRoom {
	#[must_use]
	pub fn new(name: impl Into<String>, measurements: Measurements) -> Self {
		Self {
			name: name.into(),
			measurements,
			classification: None,
		}
	}

	#[must_use]
	pub fn with_classification(mut self, classification: RoomClassification) -> Self {
		self.classification = Some(classification);
		self
	}
}

/// A room built out of a main area plus one or more sub-areas.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRoom {
	pub name: String,
	pub main_area: MainArea,
	pub sub_areas: Vec<SubArea>,
	pub total_measurements: Measurements,
}

/// A room in a [`Location`], either as measured or as the product of a sub-area merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomWire", into = "RoomWire")]
pub enum Room {
	Plain(PlainRoom),
	Merged(MergedRoom),
}

impl Room {
	#[must_use]
	pub fn name(&self) -> &str {
		match self {
			Self::Plain(room) => &room.name,
			Self::Merged(room) => &room.name,
		}
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		match self {
			Self::Plain(room) => room.name = name.into(),
			Self::Merged(room) => room.name = name.into(),
		}
	}

	/// The measurements downstream consumers see: the room's own, or the merged totals.
	#[must_use]
	pub const fn effective_measurements(&self) -> &Measurements {
		match self {
			Self::Plain(room) => &room.measurements,
			Self::Merged(room) => &room.total_measurements,
		}
	}

	pub fn openings_mut(&mut self) -> &mut Vec<Opening> {
		match self {
			Self::Plain(room) => &mut room.measurements.openings,
			Self::Merged(room) => &mut room.total_measurements.openings,
		}
	}

	#[must_use]
	pub const fn classification(&self) -> Option<&RoomClassification> {
		match self {
			Self::Plain(room) => room.classification.as_ref(),
			Self::Merged(_) => None,
		}
	}

	#[must_use]
	pub fn is_sub_area(&self) -> bool {
		self.classification().is_some_and(|c| c.is_sub_area)
	}

	#[must_use]
	pub const fn is_merged(&self) -> bool {
		matches!(self, Self::Merged(_))
	}
}

impl From<PlainRoom> for Room {
	fn from(room: PlainRoom) -> Self {
		Self::Plain(room)
	}
}

impl From<MergedRoom> for Room {
	fn from(room: MergedRoom) -> Self {
		Self::Merged(room)
	}
}

/// A named group of rooms, usually a floor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
	#[serde(rename = "location", alias = "name")]
	pub name: String,
	#[serde(default)]
	pub rooms: Vec<Room>,
}

impl Location {
	#[must_use]
	pub fn new(name: impl Into<String>, rooms: Vec<Room>) -> Self {
		Self {
			name: name.into(),
			rooms,
		}
	}
}

/// On-the-wire shape of a room. Plain and merged rooms share one JSON object,
/// told apart by `is_merged`.
#[derive(Serialize, Deserialize)]
struct RoomWire {
	#[serde(default)]
	name: String,
	#[serde(default, skip_serializing_if = "is_false", alias = "isMerged")]
	is_merged: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	measurements: Option<Measurements>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	classification: Option<RoomClassification>,
	#[serde(default, skip_serializing_if = "Option::is_none", alias = "mainArea")]
	main_area: Option<MainArea>,
	#[serde(default, skip_serializing_if = "Option::is_none", alias = "subAreas")]
	sub_areas: Option<Vec<SubArea>>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		alias = "totalMeasurements"
	)]
	total_measurements: Option<Measurements>,
}

impl TryFrom<RoomWire> for Room {
	type Error = Error;

	fn try_from(wire: RoomWire) -> Result<Self, Self::Error> {
		let RoomWire {
			name,
			is_merged,
			measurements,
			classification,
			main_area,
			sub_areas,
			total_measurements,
		} = wire;

		if is_merged {
			let Some(main_area) = main_area else {
				return Err(Error::MalformedRoom {
					name,
					reason: "merged room without a main area",
				});
			};
			let sub_areas = sub_areas.unwrap_or_default();
			let total_measurements = total_measurements.unwrap_or_else(|| {
				let mut totals = crate::merge::sum_measurements(&main_area.measurements, &sub_areas);
				totals.openings = main_area.measurements.openings.clone();
				totals
			});

			Ok(Self::Merged(MergedRoom {
				name,
				main_area,
				sub_areas,
				total_measurements,
			}))
		} else {
			let Some(measurements) = measurements else {
				return Err(Error::MalformedRoom {
					name,
					reason: "room without measurements",
				});
			};

			Ok(Self::Plain(PlainRoom {
				name,
				measurements,
				classification,
			}))
		}
	}
}

impl From<Room> for RoomWire {
	fn from(room: Room) -> Self {
		match room {
			Room::Plain(PlainRoom {
				name,
				measurements,
				classification,
			}) => Self {
				name,
				is_merged: false,
				measurements: Some(measurements),
				classification,
				main_area: None,
				sub_areas: None,
				total_measurements: None,
			},
			Room::Merged(MergedRoom {
				name,
				main_area,
				sub_areas,
				total_measurements,
			}) => Self {
				name,
				is_merged: true,
				measurements: None,
				classification: None,
				main_area: Some(main_area),
				sub_areas: Some(sub_areas),
				total_measurements: Some(total_measurements),
			},
		}
	}
}

fn canonical_key(raw: &str) -> String {
	raw.trim()
		.to_lowercase()
		.chars()
		.map(|c| if c == ' ' || c == '-' { '_' } else { c })
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sub_area_type_parses_spellings() {
		assert_eq!(SubAreaType::parse("Walk-in Shower"), SubAreaType::WalkInShower);
		assert_eq!(SubAreaType::parse("walk_in_shower"), SubAreaType::WalkInShower);
		assert_eq!(SubAreaType::parse("SHOWER BOOTH"), SubAreaType::ShowerBooth);
		assert_eq!(
			SubAreaType::parse(" reading nook "),
			SubAreaType::Custom("reading nook".to_string())
		);
	}

	#[test]
	fn plain_room_json_shape() {
		let json = r#"{
			"name": "Kitchen",
			"measurements": {
				"height": 8.0,
				"floor_area_sqft": 120.0,
				"openings": [{ "type": "door", "size": "3' X 6'8\"", "opens_to": "Hall" }]
			}
		}"#;

		let room: Room = serde_json::from_str(json).expect("valid plain room");

		let Room::Plain(plain) = &room else {
			panic!("expected a plain room");
		};
		assert_eq!(plain.name, "Kitchen");
		assert!((plain.measurements.floor_area_sqft - 120.0).abs() < f64::EPSILON);
		assert_eq!(plain.measurements.openings[0].opens_to.as_deref(), Some("Hall"));

		let value = serde_json::to_value(&room).expect("serializable");
		assert!(value.get("is_merged").is_none());
		assert!(value.get("main_area").is_none());
	}

	#[test]
	fn camel_case_measurements_keep_their_values() {
		let json = r#"{
			"name": "Kitchen",
			"measurements": {
				"height": 8.0,
				"wallAreaSqft": 300.0,
				"ceilingAreaSqft": 120.0,
				"floorAreaSqft": 120.0,
				"wallsAndCeilingAreaSqft": 420.0,
				"flooringAreaSy": 13.33,
				"ceilingPerimeterLf": 44.0,
				"floorPerimeterLf": 44.0,
				"openings": [{ "type": "door", "size": "3' X 6'8\"", "opensTo": "Hall" }]
			}
		}"#;

		let room: Room = serde_json::from_str(json).expect("valid plain room");

		let measurements = room.effective_measurements();
		assert!((measurements.height - 8.0).abs() < f64::EPSILON);
		assert!((measurements.wall_area_sqft - 300.0).abs() < f64::EPSILON);
		assert!((measurements.ceiling_area_sqft - 120.0).abs() < f64::EPSILON);
		assert!((measurements.floor_area_sqft - 120.0).abs() < f64::EPSILON);
		assert!((measurements.walls_and_ceiling_area_sqft - 420.0).abs() < f64::EPSILON);
		assert!((measurements.flooring_area_sy - 13.33).abs() < f64::EPSILON);
		assert!((measurements.ceiling_perimeter_lf - 44.0).abs() < f64::EPSILON);
		assert!((measurements.floor_perimeter_lf - 44.0).abs() < f64::EPSILON);
		assert_eq!(measurements.openings[0].opens_to.as_deref(), Some("Hall"));
	}

	#[test]
	fn merged_room_json_shape() {
		let json = r#"{
			"name": "Bedroom",
			"isMerged": true,
			"mainArea": { "measurements": { "floor_area_sqft": 100.0 } },
			"subAreas": [
				{ "type": "closet", "measurements": { "floor_area_sqft": 20.0 }, "materialApplicable": true }
			]
		}"#;

		let room: Room = serde_json::from_str(json).expect("valid merged room");

		let Room::Merged(merged) = &room else {
			panic!("expected a merged room");
		};
		assert_eq!(merged.sub_areas[0].kind, SubAreaType::Closet);
		assert!((merged.total_measurements.floor_area_sqft - 120.0).abs() < f64::EPSILON);

		let value = serde_json::to_value(&room).expect("serializable");
		assert_eq!(value["is_merged"], serde_json::Value::Bool(true));
		assert_eq!(value["sub_areas"][0]["type"], "closet");
	}

	#[test]
	fn merged_flag_without_main_area_is_rejected() {
		let json = r#"{ "name": "Broken", "is_merged": true }"#;

		assert!(serde_json::from_str::<Room>(json).is_err());
	}

	#[test]
	fn location_uses_backend_key() {
		let json = r#"{ "location": "1st Floor", "rooms": [] }"#;

		let location: Location = serde_json::from_str(json).expect("valid location");

		assert_eq!(location.name, "1st Floor");
		assert_eq!(
			serde_json::to_value(&location).expect("serializable")["location"],
			"1st Floor"
		);
	}
}
