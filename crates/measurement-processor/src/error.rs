#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
	#[error("measurement data is not valid json: {0}")]
	InvalidJson(#[from] serde_json::Error),
	#[error("unknown file type: {0}")]
	UnknownFileType(String),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
