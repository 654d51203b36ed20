//!
//! # Measurement Processor
//!
//! Turns the text pulled out of an uploaded takeoff (a CSV export, a PDF table, OCR of a
//! sketch, or a JSON document) into the location tree a pre-estimate session starts from.
//!
//! Processing runs in three steps:
//! - The layout of the text is detected with [`DataFormat::detect`];
//! - A [`RoomExtractor`] for that layout reads it into [`IntermediateRoom`]s;
//! - [`build_locations`] groups them by floor and derives every measurement, estimating
//!   openings for rooms that list none.
//!
//! ```
//! use pe_measurement_processor::{process_measurements, FileType, ProcessorConfig};
//!
//! let locations = process_measurements(
//! 	"1st Floor\nKitchen: 12 x 10\nLiving Room: 15 x 12",
//! 	FileType::Image,
//! 	&ProcessorConfig::default(),
//! )
//! .expect("ocr text always yields rooms");
//!
//! assert_eq!(locations[0].rooms.len(), 2);
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

use pe_room_model::Location;
use tracing::info;

mod calculator;
mod config;
mod error;
mod estimate;
mod extract;
mod format;
mod intermediate;
mod text;
mod transform;

pub use calculator::{calculate_measurements, default_opening_size};
pub use config::ProcessorConfig;
pub use error::{ProcessorError, Result};
pub use estimate::estimate_openings;
pub use extract::{extractor_for, JsonExtractor, OcrExtractor, RoomExtractor, TableExtractor};
pub use format::{DataFormat, FileType};
pub use intermediate::{IntermediateRoom, RawDimensions, RawOpening, DEFAULT_FLOOR};
pub use text::{clean_room_name, extract_floor_name, title_case};
pub use transform::{build_locations, floor_sort_key};

/// Detects the layout of `raw`, extracts its rooms and builds the location tree.
pub fn process_measurements(
	raw: &str,
	file_type: FileType,
	config: &ProcessorConfig,
) -> Result<Vec<Location>> {
	let format = DataFormat::detect(raw, file_type);
	info!("Processing measurement data as <format='{format}'>");

	let rooms = extractor_for(format).extract(raw, config)?;

	Ok(build_locations(rooms))
}
