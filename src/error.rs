use std::{io, path::PathBuf};

use nix::errno::Errno;
use rustyline::error::ReadlineError;
use thiserror::Error;

pub type ShResult<T> = Result<T, ShErr>;

/// Every way a command line can fail.
///
/// The first group is reported to the user and the session carries on.
/// `Sys`, `Io` and `Readline` are failures the session has no recovery path for,
/// the top level loop quits when it sees one of them.
#[derive(Debug, Error)]
pub enum ShErr {
	#[error("Too few arguments")]
	TooFewArgs,
	#[error("Too many arguments")]
	TooManyArgs,
	#[error("Invalid argument")]
	InvalidArg,
	#[error("Requested line of history does not exist")]
	NoHistory,
	#[error("Alias not found")]
	NoAlias,
	#[error("Cannot override default commands")]
	NoOverride,
	#[error("Alias is recursive; unable to resolve")]
	RecursiveAlias,
	#[error("Unable to open file: {}", .0.display())]
	FileError(PathBuf),
	#[error("Alias file is in incorrect format")]
	BadFormat,
	#[error("Invalid syntax")]
	BadSyntax,
	#[error("No job exists with that ID")]
	NoJob,
	#[error("Error in child process: {0}")]
	ProcessError(String),
	#[error("Recursion in script.  Exiting script mode")]
	RecursiveScript,
	#[error("Cannot read and write to the same file")]
	RecursiveRedirection,

	#[error("System call failed: {0}")]
	Sys(#[from] Errno),
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
	#[error("Line editor failed: {0}")]
	Readline(#[from] ReadlineError),
}

impl ShErr {
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self::FileError(path.into())
	}

	pub fn process(detail: impl Into<String>) -> Self {
		Self::ProcessError(detail.into())
	}

	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::Sys(_) | Self::Io(_) | Self::Readline(_))
	}

	/// Stable numeric kind, also used as the exit status after a fatal error
	pub fn code(&self) -> i32 {
		match self {
			Self::TooFewArgs => 1,
			Self::TooManyArgs => 2,
			Self::InvalidArg => 3,
			Self::NoHistory => 4,
			Self::NoAlias => 5,
			Self::NoOverride => 6,
			Self::RecursiveAlias => 7,
			Self::FileError(_) => 8,
			Self::BadFormat => 9,
			Self::BadSyntax => 10,
			Self::NoJob => 11,
			Self::ProcessError(_) => 12,
			Self::RecursiveScript => 13,
			Self::RecursiveRedirection => 14,
			Self::Sys(_) => 15,
			Self::Io(_) => 16,
			Self::Readline(_) => 17,
		}
	}
}
