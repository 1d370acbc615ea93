pub use std::{
	collections::{
		BTreeMap,
		HashMap,
		VecDeque
	},
	env,
	ffi::CString,
	fmt::{
		self,
		Display
	},
	fs,
	io::{
		self,
		Write
	},
	os::fd::{
		AsFd,
		AsRawFd,
		OwnedFd,
		RawFd
	},
	path::{
		Path,
		PathBuf
	}
};

pub use libc::{
	STDIN_FILENO,
	STDOUT_FILENO,
	STDERR_FILENO
};
pub use log::{
	debug,
	error,
	info,
	trace,
	warn
};
pub use nix::{
	errno::Errno,
	fcntl::OFlag,
	sys::{
		signal::{kill, Signal},
		wait::{waitpid, WaitPidFlag, WaitStatus}
	},
	unistd::{
		dup2,
		fork,
		pipe2,
		ForkResult,
		Pid
	}
};

pub use crate::{
	error::{ShErr, ShResult},
	execute::Flow,
	shellenv::Shell,
	utils::ExecFlags
};
