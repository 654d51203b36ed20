use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ProcessorError;

const TABLE_MARKERS: [&str; 5] = [
	"ROOM ATTRIBUTES",
	"PLAN ATTRIBUTES",
	"GROUND SURFACE",
	"VOLUME",
	"ROOM SCHEDULE",
];

const PDF_MARKERS: [&str; 3] = ["AREA CALCULATIONS", "ROOM SCHEDULE", "TAKEOFF"];

/// Lines below which text is assumed to come from OCR of a photo or sketch.
const OCR_LINE_THRESHOLD: usize = 10;

/// Kind of file the raw text was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
	#[default]
	Csv,
	Image,
	Pdf,
	Json,
}

impl FileType {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Csv => "csv",
			Self::Image => "image",
			Self::Pdf => "pdf",
			Self::Json => "json",
		}
	}
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FileType {
	type Err = ProcessorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"csv" => Ok(Self::Csv),
			"image" | "png" | "jpg" | "jpeg" => Ok(Self::Image),
			"pdf" => Ok(Self::Pdf),
			"json" => Ok(Self::Json),
			_ => Err(ProcessorError::UnknownFileType(s.to_string())),
		}
	}
}

/// Layout of the extracted text, which decides how rooms are pulled out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
	CsvTable,
	PdfTable,
	ImageOcr,
	JsonData,
}

impl DataFormat {
	/// Checks run in order: table markers, then PDF origin, then JSON uploads, then OCR-sized
	/// text, then text that parses as JSON. Anything left is read as a table.
	#[must_use]
	pub fn detect(raw: &str, file_type: FileType) -> Self {
		let upper = raw.to_uppercase();

		if TABLE_MARKERS.iter().any(|marker| upper.contains(marker)) {
			return Self::CsvTable;
		}

		if file_type == FileType::Pdf || PDF_MARKERS.iter().any(|marker| upper.contains(marker)) {
			return Self::PdfTable;
		}

		if file_type == FileType::Json {
			return Self::JsonData;
		}

		if file_type == FileType::Image || raw.split('\n').count() < OCR_LINE_THRESHOLD {
			return Self::ImageOcr;
		}

		if serde_json::from_str::<serde_json::Value>(raw).is_ok() {
			return Self::JsonData;
		}

		Self::CsvTable
	}

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CsvTable => "csv_table",
			Self::PdfTable => "pdf_table",
			Self::ImageOcr => "image_ocr",
			Self::JsonData => "json_data",
		}
	}
}

impl fmt::Display for DataFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn long_json() -> String {
		let rooms = (0..6)
			.map(|idx| {
				format!(
					"\t\t{{ \"room\": \"Room {idx}\", \"dimensions\": {{ \"length\": 10, \"width\": 10 }} }}"
				)
			})
			.collect::<Vec<_>>()
			.join(",\n");
		format!("{{\n\t\"measurements\": [\n{rooms}\n\t]\n}}")
	}

	#[test]
	fn table_markers_win_over_file_type() {
		assert_eq!(
			DataFormat::detect("Room Attributes\nKitchen, 120", FileType::Image),
			DataFormat::CsvTable
		);
	}

	#[test]
	fn pdf_origin_and_takeoff_text_are_pdf_tables() {
		assert_eq!(DataFormat::detect("Kitchen, 120", FileType::Pdf), DataFormat::PdfTable);
		assert_eq!(
			DataFormat::detect("Takeoff summary\nKitchen, 120", FileType::Csv),
			DataFormat::PdfTable
		);
	}

	#[test]
	fn short_text_is_ocr_and_long_json_is_json() {
		assert_eq!(DataFormat::detect("Kitchen 12 x 10", FileType::Csv), DataFormat::ImageOcr);
		assert_eq!(DataFormat::detect(&long_json(), FileType::Csv), DataFormat::JsonData);
		assert_eq!(DataFormat::detect("{}", FileType::Json), DataFormat::JsonData);

		let long_text = "Kitchen, 120\n".repeat(12);
		assert_eq!(DataFormat::detect(&long_text, FileType::Csv), DataFormat::CsvTable);
	}

	#[test]
	fn file_type_names() {
		assert_eq!("PDF".parse::<FileType>().ok(), Some(FileType::Pdf));
		assert_eq!("jpeg".parse::<FileType>().ok(), Some(FileType::Image));
		assert!("docx".parse::<FileType>().is_err());
	}
}
