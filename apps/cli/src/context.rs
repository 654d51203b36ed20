use anyhow::Result;
use pe_room_model::Draft;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::{
	config::CliConfig,
	session::{Session, SessionStore},
};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

#[derive(Debug, Clone)]
pub struct Context {
	pub format: OutputFormat,
	pub data_dir: PathBuf,
	pub sessions: SessionStore,
	session_id: Option<Uuid>,
}

impl Context {
	pub fn new(format: OutputFormat, data_dir: PathBuf, session_id: Option<Uuid>) -> Self {
		Self {
			format,
			sessions: SessionStore::new(&data_dir),
			data_dir,
			session_id,
		}
	}

	pub fn config(&self) -> Result<CliConfig> {
		CliConfig::load(&self.data_dir)
	}

	/// The session named with `--session`, falling back to the one recorded in the config.
	pub fn require_session_id(&self) -> Result<Uuid> {
		if let Some(id) = self.session_id {
			return Ok(id);
		}

		self.config()?.current_session.ok_or_else(|| {
			anyhow::anyhow!(
				"No session selected. Use 'pre-estimate process <file>' to start one or pass --session."
			)
		})
	}

	pub fn load_session(&self) -> Result<Session> {
		let id = self.require_session_id()?;
		Ok(self.sessions.load(id)?)
	}

	/// Saves `session` and makes it the current one.
	pub fn save_session(&self, session: &mut Session) -> Result<PathBuf> {
		let path = self.sessions.save(session)?;

		let mut config = self.config()?;
		if config.current_session != Some(session.id) {
			config.set_current_session(session.id, &self.data_dir)?;
		}

		Ok(path)
	}

	/// Runs `edit` against a draft of the current session and saves it if anything changed.
	pub fn edit_session<T>(&self, edit: impl FnOnce(&mut Draft) -> Result<T>) -> Result<T> {
		let mut session = self.load_session()?;
		let mut draft = Draft::new(std::mem::take(&mut session.measurement_data));

		let out = edit(&mut draft)?;

		if draft.is_dirty() {
			draft.commit();
			session.measurement_data = draft.into_committed();
			self.save_session(&mut session)?;
		} else {
			debug!("Nothing changed in session <id='{}'>", session.id);
		}

		Ok(out)
	}
}
