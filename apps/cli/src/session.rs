//! Sessions persisted as JSON files in the data directory

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use pe_measurement_processor::FileType;
use pe_room_model::{session_cache_key, Location};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("session not found <id='{0}'>")]
	NotFound(Uuid),
	#[error("file I/O error: {source}; path: '{}'", .path.display())]
	FileIO {
		path: Box<Path>,
		#[source]
		source: io::Error,
	},
	#[error("session file is not valid json; path: '{}'", .path.display())]
	Json {
		path: Box<Path>,
		#[source]
		source: serde_json::Error,
	},
}

impl SessionError {
	fn file_io(path: impl AsRef<Path>, source: io::Error) -> Self {
		Self::FileIO {
			path: path.as_ref().into(),
			source,
		}
	}

	fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
		Self::Json {
			path: path.as_ref().into(),
			source,
		}
	}
}

/// One measurement editing session: the committed tree plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
	pub id: Uuid,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_file: Option<PathBuf>,
	pub file_type: FileType,
	#[serde(rename = "measurementData", alias = "measurement_data")]
	pub measurement_data: Vec<Location>,
}

impl Session {
	pub fn new(
		measurement_data: Vec<Location>,
		file_type: FileType,
		source_file: Option<PathBuf>,
	) -> Self {
		let now = Utc::now();

		Self {
			id: Uuid::new_v4(),
			created_at: now,
			updated_at: now,
			source_file,
			file_type,
			measurement_data,
		}
	}

	pub fn room_count(&self) -> usize {
		self.measurement_data
			.iter()
			.map(|location| location.rooms.len())
			.sum()
	}
}

/// Session files under `<data_dir>/sessions`, named by their cache key.
#[derive(Debug, Clone)]
pub struct SessionStore {
	dir: PathBuf,
}

impl SessionStore {
	pub fn new(data_dir: &Path) -> Self {
		Self {
			dir: data_dir.join("sessions"),
		}
	}

	pub fn path_for(&self, id: Uuid) -> PathBuf {
		self.dir.join(format!("{}.json", session_cache_key(id)))
	}

	pub fn load(&self, id: Uuid) -> Result<Session, SessionError> {
		let path = self.path_for(id);

		let json = match fs::read_to_string(&path) {
			Ok(json) => json,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SessionError::NotFound(id)),
			Err(e) => return Err(SessionError::file_io(&path, e)),
		};

		debug!("Loaded session <id='{id}'> from {}", path.display());

		serde_json::from_str(&json).map_err(|e| SessionError::json(&path, e))
	}

	/// Writes the session, bumping its `updated_at`.
	pub fn save(&self, session: &mut Session) -> Result<PathBuf, SessionError> {
		fs::create_dir_all(&self.dir).map_err(|e| SessionError::file_io(&self.dir, e))?;

		session.updated_at = Utc::now();

		let path = self.path_for(session.id);
		let json = serde_json::to_string_pretty(session).map_err(|e| SessionError::json(&path, e))?;
		fs::write(&path, json).map_err(|e| SessionError::file_io(&path, e))?;

		info!(
			"Saved session <id='{}'> with {} rooms",
			session.id,
			session.room_count()
		);

		Ok(path)
	}

	/// Every stored session, oldest first. Unreadable files are skipped.
	pub fn list(&self) -> Result<Vec<Session>, SessionError> {
		let entries = match fs::read_dir(&self.dir) {
			Ok(entries) => entries,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(SessionError::file_io(&self.dir, e)),
		};

		let mut sessions = entries
			.filter_map(Result::ok)
			.map(|entry| entry.path())
			.filter(|path| path.extension().is_some_and(|ext| ext == "json"))
			.filter_map(|path| {
				let json = fs::read_to_string(&path).ok()?;
				serde_json::from_str::<Session>(&json)
					.map_err(|e| debug!("Skipping unreadable session file {}: {e}", path.display()))
					.ok()
			})
			.collect::<Vec<_>>();

		sessions.sort_by_key(|session| session.created_at);

		Ok(sessions)
	}
}
