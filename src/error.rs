use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("no root element was configured")]
	MissingRoot,

	#[error("root element `{0}` was not found")]
	RootNotFound(String),

	#[error("method `{0}` is not defined")]
	MissingMethod(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
