//! CLI-specific configuration management

use anyhow::Result;
use pe_measurement_processor::{FileType, ProcessorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// CLI configuration stored in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
	/// Session edited when `--session` is not given
	pub current_session: Option<Uuid>,
	/// File type assumed when it can't be told from the file extension
	#[serde(default)]
	pub default_file_type: FileType,
	/// Fallback dimensions for rooms the takeoff leaves incomplete
	#[serde(default)]
	pub processor: ProcessorConfig,
}

impl CliConfig {
	/// Get the CLI config file path
	pub fn config_path(data_dir: &Path) -> PathBuf {
		data_dir.join("cli.json")
	}

	/// Load CLI config from the data directory
	pub fn load(data_dir: &Path) -> Result<Self> {
		let config_path = Self::config_path(data_dir);

		if config_path.exists() {
			let json = std::fs::read_to_string(&config_path)?;
			let config: Self = serde_json::from_str(&json)?;
			Ok(config)
		} else {
			let config = Self::default();
			config.save(data_dir)?;
			Ok(config)
		}
	}

	/// Save CLI config to the data directory
	pub fn save(&self, data_dir: &Path) -> Result<()> {
		std::fs::create_dir_all(data_dir)?;

		let config_path = Self::config_path(data_dir);
		let json = serde_json::to_string_pretty(self)?;
		std::fs::write(&config_path, json)?;
		Ok(())
	}

	pub fn set_current_session(&mut self, session_id: Uuid, data_dir: &Path) -> Result<()> {
		self.current_session = Some(session_id);
		self.save(data_dir)
	}

	pub fn clear_current_session(&mut self, data_dir: &Path) -> Result<()> {
		self.current_session = None;
		self.save(data_dir)
	}

	/// Every settable key with its current value, in display order.
	pub fn entries(&self) -> Vec<(&'static str, String)> {
		vec![
			(
				"current_session",
				self.current_session
					.map_or_else(|| "(not set)".to_string(), |id| id.to_string()),
			),
			("default_file_type", self.default_file_type.to_string()),
			(
				"processor.default_height",
				self.processor.default_height.to_string(),
			),
			(
				"processor.default_length",
				self.processor.default_length.to_string(),
			),
			(
				"processor.default_width",
				self.processor.default_width.to_string(),
			),
			(
				"processor.aspect_ratio",
				self.processor.aspect_ratio.to_string(),
			),
		]
	}

	pub fn get(&self, key: &str) -> Option<String> {
		self.entries()
			.into_iter()
			.find(|(name, _)| *name == key)
			.map(|(_, value)| value)
	}

	/// Parses `value` into the field behind `key`. Does not save.
	pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"current_session" => self.current_session = Some(value.parse()?),
			"default_file_type" => self.default_file_type = value.parse()?,
			"processor.default_height" => self.processor.default_height = positive(key, value)?,
			"processor.default_length" => self.processor.default_length = positive(key, value)?,
			"processor.default_width" => self.processor.default_width = positive(key, value)?,
			"processor.aspect_ratio" => self.processor.aspect_ratio = positive(key, value)?,
			_ => return Err(anyhow::anyhow!("Cannot set key: {}", key)),
		}
		Ok(())
	}
}

fn positive(key: &str, value: &str) -> Result<f64> {
	let parsed = value.parse::<f64>()?;
	if parsed > 0.0 && parsed.is_finite() {
		Ok(parsed)
	} else {
		anyhow::bail!("{key} must be a positive number, got {value}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn first_load_writes_defaults() {
		let data_dir = tempdir().unwrap();

		let config = CliConfig::load(data_dir.path()).unwrap();

		assert!(CliConfig::config_path(data_dir.path()).exists());
		assert_eq!(config.current_session, None);
		assert_eq!(config.default_file_type, FileType::Csv);
		assert_eq!(config.get("processor.default_height").as_deref(), Some("8"));
	}

	#[test]
	fn set_validates_values() {
		let mut config = CliConfig::default();

		config.set("default_file_type", "pdf").unwrap();
		config.set("processor.aspect_ratio", "1.5").unwrap();

		assert_eq!(config.default_file_type, FileType::Pdf);
		assert!((config.processor.aspect_ratio - 1.5).abs() < f64::EPSILON);
		assert!(config.set("processor.default_height", "-2").is_err());
		assert!(config.set("default_file_type", "docx").is_err());
		assert!(config.set("colour", "blue").is_err());
	}

	#[test]
	fn saved_session_survives_reload() {
		let data_dir = tempdir().unwrap();
		let id = Uuid::new_v4();

		let mut config = CliConfig::load(data_dir.path()).unwrap();
		config.set_current_session(id, data_dir.path()).unwrap();

		assert_eq!(
			CliConfig::load(data_dir.path()).unwrap().current_session,
			Some(id)
		);
	}
}
