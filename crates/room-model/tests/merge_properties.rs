use pe_room_model::{
	filter_openings_for_sub_area, merge_rooms, normalize_room_name, unmerge_room, Draft, Location,
	MergeKind, MergeOutcome, Measurements, Opening, OpeningType, PlainRoom, Room,
	RoomClassification, SubAreaType,
};

use tracing_test::traced_test;

fn assert_close(actual: f64, expected: f64) {
	assert!(
		(actual - expected).abs() < 1e-9,
		"expected {expected}, got {actual}"
	);
}

fn measured(floor_area_sqft: f64, height: f64, perimeter: f64, openings: Vec<Opening>) -> Measurements {
	Measurements {
		height,
		wall_area_sqft: perimeter * height,
		ceiling_area_sqft: floor_area_sqft,
		floor_area_sqft,
		walls_and_ceiling_area_sqft: perimeter * height + floor_area_sqft,
		flooring_area_sy: floor_area_sqft / 9.0,
		ceiling_perimeter_lf: perimeter,
		floor_perimeter_lf: perimeter,
		openings,
	}
}

fn sub_area(name: &str, kind: SubAreaType, measurements: Measurements) -> Room {
	let material_applicable = kind.default_material_applicable();

	Room::Plain(
		PlainRoom::new(name, measurements)
			.with_classification(RoomClassification::confirmed_sub_area(kind, material_applicable)),
	)
}

fn bedroom_suite() -> Location {
	Location::new(
		"2nd Floor",
		vec![
			Room::Plain(PlainRoom::new(
				"Bedroom",
				measured(
					150.0,
					9.0,
					50.0,
					vec![
						Opening::new(OpeningType::Door, "3' X 6'8\"").opening_to("Hall"),
						Opening::new(OpeningType::Window, "4' X 3'").opening_to("Exterior"),
					],
				),
			)),
			sub_area(
				"Closet",
				SubAreaType::Closet,
				measured(
					24.0,
					8.0,
					20.0,
					vec![
						Opening::new(OpeningType::Door, "2'6\" X 6'8\"").opening_to("Hall"),
						Opening::new(OpeningType::Window, "2' X 2'"),
					],
				),
			),
			sub_area("Cabinet", SubAreaType::Cabinet, measured(6.0, 7.0, 10.0, Vec::new())),
		],
	)
}

#[test]
#[traced_test]
fn unmerge_then_remerge_restores_the_merged_room() {
	let mut locations = vec![bedroom_suite()];

	assert_eq!(
		merge_rooms(&mut locations, 0, 0, 1),
		MergeOutcome::Merged(MergeKind::SubArea)
	);
	assert_eq!(
		merge_rooms(&mut locations, 0, 0, 1),
		MergeOutcome::Merged(MergeKind::SubArea)
	);
	assert_eq!(locations[0].rooms.len(), 1);

	let original = locations[0].rooms[0].clone();
	let Room::Merged(merged) = &original else {
		panic!("expected a merged room");
	};
	assert_eq!(merged.sub_areas.len(), 2);
	assert_close(merged.total_measurements.floor_area_sqft, 180.0);
	assert_close(merged.total_measurements.height, 9.0);
	assert_close(merged.total_measurements.floor_perimeter_lf, 50.0);

	assert!(unmerge_room(&mut locations, 0, 0));
	assert_eq!(locations[0].rooms.len(), 3);

	assert!(merge_rooms(&mut locations, 0, 0, 1).is_merged());
	assert!(merge_rooms(&mut locations, 0, 0, 1).is_merged());

	assert_eq!(locations[0].rooms, vec![original]);
}

#[test]
#[traced_test]
fn remerge_keeps_a_door_to_the_sub_area_once_its_name_is_gone() {
	let mut locations = vec![Location::new(
		"2nd Floor",
		vec![
			Room::Plain(PlainRoom::new(
				"Bedroom",
				measured(
					150.0,
					9.0,
					50.0,
					vec![
						Opening::new(OpeningType::Door, "3' X 6'8\"").opening_to("Hall"),
						Opening::new(OpeningType::Door, "2' X 6'8\"").opening_to("Closet"),
					],
				),
			)),
			sub_area("Closet", SubAreaType::Closet, measured(24.0, 8.0, 20.0, Vec::new())),
		],
	)];

	assert!(merge_rooms(&mut locations, 0, 0, 1).is_merged());
	let Room::Merged(before) = locations[0].rooms[0].clone() else {
		panic!("expected a merged room");
	};
	assert!(before
		.total_measurements
		.openings
		.iter()
		.all(|opening| opening.opens_to.as_deref() != Some("Closet")));

	assert!(unmerge_room(&mut locations, 0, 0));
	assert!(merge_rooms(&mut locations, 0, 0, 1).is_merged());
	let Room::Merged(after) = locations[0].rooms[0].clone() else {
		panic!("expected a merged room");
	};

	// Totals, main area and sub-areas come back as they were.
	assert_eq!(after.name, before.name);
	assert_eq!(after.main_area, before.main_area);
	assert_eq!(after.sub_areas, before.sub_areas);
	assert_eq!(
		Measurements {
			openings: Vec::new(),
			..after.total_measurements.clone()
		},
		Measurements {
			openings: Vec::new(),
			..before.total_measurements.clone()
		}
	);

	// The unmerged rooms are named "Bedroom #1" and "Bedroom #2", so the closet door no
	// longer reads as internal and is kept in the remerged totals.
	assert_eq!(
		after
			.total_measurements
			.openings
			.iter()
			.filter(|opening| opening.opens_to.as_deref() == Some("Closet"))
			.count(),
		1
	);
}

#[test]
#[traced_test]
fn internal_connections_are_removed() {
	let mut locations = vec![Location::new(
		"1st Floor",
		vec![
			Room::Plain(PlainRoom::new(
				"Bathroom",
				measured(
					60.0,
					8.0,
					32.0,
					vec![
						Opening::new(OpeningType::Door, "2'6\" X 6'8\"").opening_to("Bathroom2"),
						Opening::new(OpeningType::Door, "2'8\" X 6'8\"").opening_to("Hall"),
					],
				),
			)),
			sub_area(
				"Bathroom2",
				SubAreaType::parse("water closet"),
				measured(
					20.0,
					8.0,
					18.0,
					vec![Opening::new(OpeningType::Door, "2'6\" X 6'8\"").opening_to("BATHROOM")],
				),
			),
		],
	)];

	assert!(merge_rooms(&mut locations, 0, 1, 0).is_merged());

	let openings = &locations[0].rooms[0].effective_measurements().openings;
	assert_eq!(
		openings,
		&vec![Opening::new(OpeningType::Door, "2'8\" X 6'8\"").opening_to("Hall")]
	);
	assert!(openings
		.iter()
		.filter_map(|opening| opening.opens_to.as_deref())
		.all(|target| normalize_room_name(target) != "bathroom"));
}

#[test]
#[traced_test]
fn repeated_openings_appear_once() {
	let window = || Opening::new(OpeningType::Window, "4' X 3'").opening_to("Exterior");

	let mut locations = vec![Location::new(
		"1st Floor",
		vec![
			Room::Plain(PlainRoom::new("Den", measured(100.0, 8.0, 40.0, vec![window()]))),
			Room::Plain(PlainRoom::new("Study", measured(80.0, 8.0, 36.0, vec![window()]))),
		],
	)];

	assert_eq!(
		merge_rooms(&mut locations, 0, 0, 1),
		MergeOutcome::Merged(MergeKind::Flat)
	);
	assert_eq!(
		locations[0].rooms[0].effective_measurements().openings,
		vec![window()]
	);
}

#[test]
fn sub_area_types_filter_openings() {
	let openings = vec![
		Opening::new(OpeningType::Door, "2'0\" X 6'8\""),
		Opening::new(OpeningType::Window, "2x2"),
	];

	assert!(filter_openings_for_sub_area(&openings, &"bathtub".into()).is_empty());
	assert_eq!(
		filter_openings_for_sub_area(&openings, &"closet".into()),
		vec![Opening::new(OpeningType::Door, "2'0\" X 6'8\"")]
	);
}

#[test]
#[traced_test]
fn flat_merge_recomputes_square_yards() {
	let mut locations = vec![Location::new(
		"1st Floor",
		vec![
			Room::Plain(PlainRoom::new(
				"Living Room",
				Measurements {
					floor_area_sqft: 100.0,
					flooring_area_sy: 11.11,
					..Default::default()
				},
			)),
			Room::Plain(PlainRoom::new(
				"Living Room",
				Measurements {
					floor_area_sqft: 120.0,
					flooring_area_sy: 13.33,
					..Default::default()
				},
			)),
		],
	)];

	assert!(merge_rooms(&mut locations, 0, 0, 1).is_merged());

	let total = locations[0].rooms[0].effective_measurements();
	assert_close(total.floor_area_sqft, 220.0);
	assert_close(total.flooring_area_sy, 220.0 / 9.0);
}

#[test]
#[traced_test]
fn out_of_range_merge_changes_nothing() {
	let mut locations = vec![bedroom_suite()];
	let before = locations.clone();

	assert!(!merge_rooms(&mut locations, 0, 1, 3).is_merged());
	assert!(!merge_rooms(&mut locations, 0, 42, 0).is_merged());
	assert!(!merge_rooms(&mut locations, 5, 0, 1).is_merged());
	assert_eq!(locations, before);
	assert!(logs_contain("Skipping merge"));

	let mut draft = Draft::new(before);
	assert!(!draft.merge_rooms(0, 0, 3).is_merged());
	assert!(!draft.is_dirty());
}
