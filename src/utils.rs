use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

use bitflags::bitflags;

use crate::prelude::*;

/// Permissions for files created by output redirection
pub const REDIR_FILE_MODE: u32 = 0o600;

bitflags! {
	#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
	pub struct ExecFlags: u8 {
		/// The current line came from script replay and stays out of history
		const NO_HISTORY = 0b0001;
		/// The current line asked to run without waiting
		const BACKGROUND = 0b0010;
	}
}

/// Keeps close-on-exec copies of the session's stdin and stdout and puts them back
/// when dropped, so a redirection never outlives the command cycle that made it.
#[derive(Debug)]
pub struct StdioGuard {
	stdin: OwnedFd,
	stdout: OwnedFd,
}

impl StdioGuard {
	pub fn save() -> ShResult<Self> {
		Ok(Self {
			stdin: io::stdin().as_fd().try_clone_to_owned()?,
			stdout: io::stdout().as_fd().try_clone_to_owned()?,
		})
	}

	pub fn restore(&self) -> ShResult<()> {
		io::stdout().flush()?;
		dup2(self.stdin.as_raw_fd(), STDIN_FILENO)?;
		dup2(self.stdout.as_raw_fd(), STDOUT_FILENO)?;
		Ok(())
	}
}

impl Drop for StdioGuard {
	fn drop(&mut self) {
		if let Err(e) = self.restore() {
			error!("failed to restore standard streams: {e}");
		}
	}
}

/// At most one input and one output file for a command line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Redirs {
	pub input: Option<PathBuf>,
	pub output: Option<PathBuf>,
}

impl Redirs {
	pub fn is_empty(&self) -> bool {
		self.input.is_none() && self.output.is_none()
	}

	/// Open both files, then move them onto this process's stdin and stdout.
	/// Nothing is redirected unless both files opened.
	pub fn activate(&self) -> ShResult<()> {
		if self.is_empty() {
			return Ok(())
		}
		let input = self.input.as_deref()
			.map(|path| File::open(path).map_err(|_| ShErr::file(path)))
			.transpose()?;
		let output = self.output.as_deref()
			.map(|path| {
				OpenOptions::new()
					.write(true)
					.create(true)
					.truncate(true)
					.mode(REDIR_FILE_MODE)
					.open(path)
					.map_err(|_| ShErr::file(path))
			})
			.transpose()?;

		io::stdout().flush()?;
		if let Some(file) = input {
			debug!("stdin <- {:?}", self.input);
			dup2(file.as_raw_fd(), STDIN_FILENO)?;
		}
		if let Some(file) = output {
			debug!("stdout -> {:?}", self.output);
			dup2(file.as_raw_fd(), STDOUT_FILENO)?;
		}
		Ok(())
	}
}
