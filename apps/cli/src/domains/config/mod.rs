use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use crate::{config::CliConfig, util::prelude::*};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
	/// Show all configuration
	Show,
	/// Get a configuration value
	Get {
		/// Configuration key (e.g., "default_file_type", "processor.default_height")
		key: String,
	},
	/// Set a configuration value
	Set {
		/// Configuration key
		key: String,
		/// Configuration value
		value: String,
	},
	/// Forget the current session without deleting it
	ClearSession,
}

pub fn run(data_dir: &Path, cmd: ConfigCmd) -> Result<()> {
	let mut config = CliConfig::load(data_dir)?;

	match cmd {
		ConfigCmd::Show => {
			let mut rows = table(vec!["Key", "Value"]);
			for (key, value) in config.entries() {
				rows.add_row(vec![key.to_string(), value]);
			}

			println!("{rows}");
			println!();
			println!(
				"Config file: {}",
				CliConfig::config_path(data_dir).display()
			);
		}
		ConfigCmd::Get { key } => {
			let value = config
				.get(&key)
				.ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
			println!("{value}");
		}
		ConfigCmd::Set { key, value } => {
			config.set(&key, &value)?;
			config.save(data_dir)?;
			println!("Set {key} = {value}");
		}
		ConfigCmd::ClearSession => {
			config.clear_current_session(data_dir)?;
			println!("Cleared current session");
		}
	}

	Ok(())
}
