mod json;
mod ocr;
mod table;

pub use json::JsonExtractor;
pub use ocr::OcrExtractor;
pub use table::TableExtractor;

use crate::{config::ProcessorConfig, format::DataFormat, intermediate::IntermediateRoom, Result};

/// Pulls rooms out of one layout of extracted text.
pub trait RoomExtractor {
	fn extract(&self, raw: &str, config: &ProcessorConfig) -> Result<Vec<IntermediateRoom>>;
}

/// The extractor that reads `format`. PDF tables share the CSV table reader.
#[must_use]
pub fn extractor_for(format: DataFormat) -> &'static dyn RoomExtractor {
	match format {
		DataFormat::CsvTable | DataFormat::PdfTable => &TableExtractor,
		DataFormat::ImageOcr => &OcrExtractor,
		DataFormat::JsonData => &JsonExtractor,
	}
}
