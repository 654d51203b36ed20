use pe_measurement_processor::{process_measurements, FileType, ProcessorConfig, ProcessorError};
use pe_room_model::{detect_issues, OpeningType};

use tracing_test::traced_test;

const TAKEOFF: &str = "\
ROOM ATTRIBUTES
Main Level
Living Room, 210 sq ft, 15 x 14
Kitchen, 132 sq ft, 12 x 11
Powder Room, 24 sq ft, 6 x 4
Kitchen Cabinets (24\"), 18
2nd Floor
Bedroom, 168 sq ft, 14 x 12
Bedroom, 130 sq ft, 13 x 10
Bathroom, 60 sq ft, 10 x 6
Total Finished Area, 724
";

#[test]
#[traced_test]
fn csv_takeoff_becomes_a_location_tree() {
	let locations = process_measurements(TAKEOFF, FileType::Csv, &ProcessorConfig::default())
		.expect("csv takeoffs always produce rooms");

	let floors = locations
		.iter()
		.map(|location| location.name.as_str())
		.collect::<Vec<_>>();
	assert_eq!(floors, ["2nd Floor", "Main Level"]);

	let bedrooms = locations[0]
		.rooms
		.iter()
		.map(|room| room.name())
		.filter(|name| name.starts_with("Bedroom"))
		.collect::<Vec<_>>();
	assert_eq!(bedrooms, ["Bedroom #1", "Bedroom #2"]);

	// Numbered rooms are not reported as duplicates.
	assert!(detect_issues(&locations).is_empty());

	let living = &locations[1].rooms[0];
	assert_eq!(living.name(), "Living Room");
	assert_eq!(
		living.effective_measurements().openings[0].kind,
		OpeningType::OpenWall
	);

	assert!(logs_contain("format='csv_table'"));
}

#[test]
#[traced_test]
fn broken_json_upload_is_rejected() {
	let raw = format!("{{ \"measurements\": [{}", "\n".repeat(12));

	assert!(matches!(
		process_measurements(&raw, FileType::Json, &ProcessorConfig::default()),
		Err(ProcessorError::InvalidJson(_))
	));
}
