use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("malformed room <name='{name}'>: {reason}")]
	MalformedRoom { name: String, reason: &'static str },
	#[error("unknown opening type: {0}")]
	UnknownOpeningType(String),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
