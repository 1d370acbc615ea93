use std::os::raw::c_char;

use crate::prelude::*;

/// Exit status of a child that found nothing to run
pub const NOT_FOUND_STATUS: i32 = 127;

/// Everything a child needs to replace itself, built before forking so the child
/// never has to allocate.
struct ExecImage {
	candidates: Vec<CString>,
	argv: Vec<CString>,
	argv_ptrs: Vec<*const c_char>,
	not_found: Vec<u8>,
}

impl ExecImage {
	fn prepare(segment: &[String], search_path: &str) -> ShResult<Self> {
		let name = segment.first().ok_or(ShErr::TooFewArgs)?;
		let argv = segment.iter()
			.map(|arg| CString::new(arg.as_str()).map_err(|_| ShErr::InvalidArg))
			.collect::<ShResult<Vec<_>>>()?;

		let candidates = if name.contains('/') {
			vec![CString::new(name.as_str()).map_err(|_| ShErr::InvalidArg)?]
		} else {
			search_path.split(':')
				.map(|dir| if dir.is_empty() { "." } else { dir })
				.map(|dir| CString::new(format!("{dir}/{name}")).map_err(|_| ShErr::InvalidArg))
				.collect::<ShResult<Vec<_>>>()?
		};

		let mut argv_ptrs: Vec<*const c_char> = argv.iter().map(|arg| arg.as_ptr()).collect();
		argv_ptrs.push(std::ptr::null());

		Ok(Self {
			candidates,
			argv,
			argv_ptrs,
			not_found: format!("toysh: command not found: {name}\n").into_bytes(),
		})
	}

	/// Runs in the child. Only async-signal-safe calls from here on.
	fn exec(&self) -> ! {
		debug_assert_eq!(self.argv.len() + 1, self.argv_ptrs.len());
		unsafe {
			for path in &self.candidates {
				if libc::access(path.as_ptr(), libc::X_OK) == 0 {
					// Only returns on failure, in which case keep looking
					libc::execv(path.as_ptr(), self.argv_ptrs.as_ptr());
				}
			}
			libc::write(STDERR_FILENO, self.not_found.as_ptr().cast(), self.not_found.len());
			libc::_exit(NOT_FOUND_STATUS)
		}
	}
}

fn exec_child(image: &ExecImage, stdin: Option<RawFd>, stdout: Option<RawFd>, handed: &[Option<RawFd>]) -> ! {
	unsafe {
		if let Some(fd) = stdin {
			libc::dup2(fd, STDIN_FILENO);
		}
		if let Some(fd) = stdout {
			libc::dup2(fd, STDOUT_FILENO);
		}
		for fd in handed.iter().flatten() {
			libc::close(*fd);
		}
	}
	image.exec()
}

/// Spawn one process per segment, left to right, each segment's stdout feeding the
/// next one's stdin. Returns the pids in spawn order without waiting on them.
pub fn spawn_pipeline(segments: &[Vec<String>]) -> ShResult<Vec<Pid>> {
	let search_path = env::var("PATH").unwrap_or_default();
	let images = segments.iter()
		.map(|segment| ExecImage::prepare(segment, &search_path))
		.collect::<ShResult<Vec<_>>>()?;
	if images.is_empty() {
		return Err(ShErr::TooFewArgs)
	}

	// Anything still buffered would otherwise land after the children's output
	io::stdout().flush()?;

	let mut pids = Vec::with_capacity(images.len());
	let mut upstream: Option<OwnedFd> = None;
	let mut queue = images.iter().peekable();

	while let Some(image) = queue.next() {
		let downstream = if queue.peek().is_some() {
			match pipe2(OFlag::O_CLOEXEC) {
				Ok(pipe) => Some(pipe),
				Err(e) => {
					drop(upstream.take());
					abandon(&pids);
					return Err(e.into())
				}
			}
		} else {
			None
		};

		match unsafe { fork() } {
			Ok(ForkResult::Child) => {
				let stdin = upstream.as_ref().map(|r| r.as_raw_fd());
				let stdout = downstream.as_ref().map(|(_, w)| w.as_raw_fd());
				let handed = [stdin, downstream.as_ref().map(|(r, _)| r.as_raw_fd()), stdout];
				exec_child(image, stdin, stdout, &handed)
			}
			Ok(ForkResult::Parent { child }) => {
				debug!("spawned {child} for {:?}", image.argv);
				pids.push(child);
				drop(upstream.take());
				upstream = downstream.map(|(r_pipe, w_pipe)| {
					drop(w_pipe);
					r_pipe
				});
			}
			Err(e) => {
				drop(downstream);
				drop(upstream.take());
				abandon(&pids);
				return Err(e.into())
			}
		}
	}
	Ok(pids)
}

/// Wait out children of a pipeline that could not be completed
fn abandon(pids: &[Pid]) {
	warn!("pipeline setup failed, waiting on {} spawned process(es)", pids.len());
	for pid in pids {
		if let Err(e) = wait_pid(*pid) {
			warn!("lost track of {pid}: {e}");
		}
	}
}

/// Blocking wait that retries when interrupted by a signal
pub fn wait_pid(pid: Pid) -> ShResult<WaitStatus> {
	loop {
		match waitpid(pid, None) {
			Err(Errno::EINTR) => continue,
			result => return result.map_err(Into::into)
		}
	}
}

/// Wait on every pid in order. The first failure is reported, but only after
/// all of them have been collected.
pub fn wait_all(pids: &[Pid]) -> ShResult<()> {
	let mut failure = None;
	for pid in pids {
		let status = match wait_pid(*pid) {
			Ok(status) => status,
			Err(ShErr::Sys(Errno::ECHILD)) => {
				warn!("{pid} was already reaped");
				continue
			}
			Err(e) => return Err(e)
		};
		trace!("{pid} finished: {status:?}");
		let problem = match status {
			WaitStatus::Exited(_, 0) => None,
			WaitStatus::Exited(_, code) => Some(format!("process {pid} exited with status {code}")),
			WaitStatus::Signaled(_, signal, _) => Some(format!("process {pid} was killed by {signal:?}")),
			_ => None
		};
		if failure.is_none() {
			failure = problem;
		}
	}
	match failure {
		Some(detail) => Err(ShErr::process(detail)),
		None => Ok(())
	}
}
