use anyhow::{Context as _, Result};
use clap::Subcommand;
use pe_measurement_processor::{process_measurements, FileType};
use pe_room_model::{from_json_str, SaveMeasurementsRequest};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::{
	context::Context,
	session::Session,
	util::{output::print_locations, prelude::*},
};

#[derive(Subcommand, Debug)]
pub enum SessionCmd {
	/// Extract rooms from a takeoff file and start a new session with them
	Process {
		/// Text extracted from a CSV, PDF, image or JSON takeoff
		file: PathBuf,
		/// Kind of file the text came from (csv, image, pdf, json)
		#[arg(long)]
		file_type: Option<FileType>,
	},
	/// Show the rooms of the current session
	Show,
	/// List stored sessions
	Sessions,
	/// Make a stored session the current one
	Use { session_id: Uuid },
	/// Print the save request body for the current session
	Export {
		/// Write the body to a file instead of stdout
		#[arg(long, short)]
		out: Option<PathBuf>,
	},
	/// Replace the rooms of the current session with a save request body or a bare location list
	Import { file: PathBuf },
}

pub fn run(ctx: &Context, cmd: SessionCmd) -> Result<()> {
	match cmd {
		SessionCmd::Process { file, file_type } => {
			let config = ctx.config()?;
			let file_type = file_type
				.or_else(|| file_type_from_extension(&file))
				.unwrap_or(config.default_file_type);

			let raw = std::fs::read_to_string(&file)
				.with_context(|| format!("Failed to read {}", file.display()))?;

			let locations = process_measurements(&raw, file_type, &config.processor)?;
			let mut session = Session::new(locations, file_type, Some(file));
			let path = ctx.save_session(&mut session)?;

			info!("Started session <id='{}'> at {}", session.id, path.display());

			print_output!(ctx, &session, |s: &Session| {
				println!(
					"Session {} created with {} rooms across {} locations",
					s.id,
					s.room_count(),
					s.measurement_data.len()
				);
				println!();
				print_locations(&s.measurement_data);
			});
		}
		SessionCmd::Show => {
			let session = ctx.load_session()?;
			print_output!(ctx, &session, |s: &Session| {
				println!("Session {} (updated {})", s.id, s.updated_at.to_rfc3339());
				println!();
				print_locations(&s.measurement_data);
			});
		}
		SessionCmd::Sessions => {
			let sessions = ctx.sessions.list()?;
			let current = ctx.config()?.current_session;

			print_output!(ctx, &sessions, |sessions: &Vec<Session>| {
				if sessions.is_empty() {
					println!("No sessions found");
					return;
				}

				let mut rows = table(vec!["", "Id", "Source", "Rooms", "Updated"]);
				for session in sessions {
					rows.add_row(vec![
						if current == Some(session.id) { "*" } else { "" }.to_string(),
						session.id.to_string(),
						session
							.source_file
							.as_ref()
							.map_or_else(|| session.file_type.to_string(), |p| p.display().to_string()),
						session.room_count().to_string(),
						session.updated_at.to_rfc3339(),
					]);
				}
				println!("{rows}");
			});
		}
		SessionCmd::Use { session_id } => {
			let session = ctx.sessions.load(session_id)?;
			ctx.config()?
				.set_current_session(session.id, &ctx.data_dir)?;

			println!(
				"Switched to session {} with {} rooms",
				session.id,
				session.room_count()
			);
		}
		SessionCmd::Export { out } => {
			let session = ctx.load_session()?;
			let request = SaveMeasurementsRequest::from(session.measurement_data);
			let body = serde_json::to_string_pretty(&request)?;

			match out {
				Some(path) => {
					std::fs::write(&path, body)
						.with_context(|| format!("Failed to write {}", path.display()))?;
					println!("Wrote save request to {}", path.display());
				}
				None => println!("{body}"),
			}
		}
		SessionCmd::Import { file } => {
			let raw = std::fs::read_to_string(&file)
				.with_context(|| format!("Failed to read {}", file.display()))?;

			let locations = serde_json::from_str::<SaveMeasurementsRequest>(&raw)
				.map(|request| request.measurement_data)
				.or_else(|_| from_json_str(&raw))?;

			let mut session = ctx.load_session()?;
			session.measurement_data = locations;
			ctx.save_session(&mut session)?;

			print_output!(ctx, &session, |s: &Session| {
				println!("Imported {} rooms into session {}", s.room_count(), s.id);
				println!();
				print_locations(&s.measurement_data);
			});
		}
	}

	Ok(())
}

fn file_type_from_extension(file: &Path) -> Option<FileType> {
	file.extension()
		.and_then(|ext| ext.to_str())
		.and_then(|ext| ext.parse().ok())
}
