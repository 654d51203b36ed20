//!
//! # Room Model
//!
//! The measurement tree of a pre-estimate session, as locations holding rooms, and the edits a
//! user makes to it before it is saved:
//! - Spotting blank and repeated room names, and rooms that look like sub-areas;
//! - Merging rooms, either flat or by attaching a sub-area to its parent room;
//! - Splitting merged rooms back apart;
//! - Keeping openings consistent, dropping the ones internal to a merged room and the ones a
//!   sub-area type can't have;
//!
//! Edits go through a [`Draft`], which only ever swaps in a fully edited copy of the tree.
//!
//! ```
//! use pe_room_model::{Draft, Location, Measurements, PlainRoom, Room};
//!
//! let mut draft = Draft::new(vec![Location::new(
//! 	"1st Floor",
//! 	vec![
//! 		Room::Plain(PlainRoom::new("Living Room #1", Measurements::default())),
//! 		Room::Plain(PlainRoom::new("Living Room #2", Measurements::default())),
//! 	],
//! )]);
//!
//! assert!(draft.merge_rooms(0, 0, 1).is_merged());
//! draft.commit();
//!
//! assert_eq!(draft.committed()[0].rooms[0].name(), "Living Room");
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod detector;
mod draft;
mod error;
mod merge;
mod model;
mod names;
mod openings;
mod persistence;
mod unmerge;

pub use detector::{
	detect_issues, detect_sub_area_candidates, find_merge_target, suggest_classification, Issue,
	MergeTarget, SubAreaCandidate,
};
pub use draft::Draft;
pub use error::Error;
pub use merge::{merge_rooms, MergeKind, MergeOutcome, SkipReason};
pub use model::{
	Location, MainArea, Measurements, MergedRoom, Opening, OpeningType, PlainRoom, Room,
	RoomClassification, SubArea, SubAreaType, DEFAULT_SUB_AREA_TYPE,
};
pub use names::{normalize_room_name, strip_number_suffix, InternalNames};
pub use openings::{
	filter_openings_for_sub_area, find_invalid_openings, reconcile_openings,
	split_openings_for_sub_area, valid_opening_types, InvalidOpenings, InvalidOpeningsChoice,
};
pub use persistence::{
	from_json_str, session_cache_key, to_json_string, SaveMeasurementsRequest,
	SaveMeasurementsResponse,
};
pub use unmerge::unmerge_room;
