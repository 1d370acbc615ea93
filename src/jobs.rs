use chrono::{DateTime, Local};

use crate::{execute::pipeline, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
	Running,
	Done,
}

impl Display for JobStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			JobStatus::Running => f.pad("Running"),
			JobStatus::Done => f.pad("Done"),
		}
	}
}

/// A pipeline launched in the background. `pids` are in spawn order.
#[derive(Debug, Clone)]
pub struct Job {
	id: usize,
	pids: Vec<Pid>,
	command: String,
	started: DateTime<Local>,
}

impl Job {
	pub fn id(&self) -> usize {
		self.id
	}
	pub fn pids(&self) -> &[Pid] {
		&self.pids
	}
	pub fn command(&self) -> &str {
		&self.command
	}
	pub fn started(&self) -> DateTime<Local> {
		self.started
	}
	pub fn leader(&self) -> Option<Pid> {
		self.pids.first().copied()
	}

	/// Non-blocking check on the last process of the pipeline
	fn poll(&self) -> JobStatus {
		let Some(last) = self.pids.last() else {
			return JobStatus::Done
		};
		match waitpid(*last, Some(WaitPidFlag::WNOHANG)) {
			Ok(WaitStatus::StillAlive) => JobStatus::Running,
			Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => JobStatus::Done,
			Ok(_) => JobStatus::Running,
			Err(e) => {
				debug!("polling job {} ({last}): {e}", self.id);
				JobStatus::Done
			}
		}
	}
}

/// One row of a `backjobs` listing
#[derive(Debug, Clone)]
pub struct JobReport {
	pub id: usize,
	pub pid: Option<Pid>,
	pub command: String,
	pub status: JobStatus,
	pub started: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct JobTable {
	jobs: BTreeMap<usize, Job>,
	last_id: usize,
	/// Pids from finished or killed jobs that have not been reaped yet
	orphans: Vec<Pid>,
}

impl JobTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn parse_id(arg: &str) -> ShResult<usize> {
		arg.parse::<usize>().map_err(|_| ShErr::InvalidArg)
	}

	pub fn register(&mut self, pids: Vec<Pid>, command: impl Into<String>) -> usize {
		self.last_id += 1;
		let job = Job {
			id: self.last_id,
			pids,
			command: command.into(),
			started: Local::now(),
		};
		info!("job [{}] started: {:?} '{}'", job.id, job.pids, job.command);
		self.jobs.insert(job.id, job);
		self.last_id
	}

	pub fn get(&self, id: usize) -> Option<&Job> {
		self.jobs.get(&id)
	}

	/// Report every job in id order. Jobs found to be finished are reported once, then dropped.
	pub fn list(&mut self) -> Vec<JobReport> {
		let mut reports = Vec::with_capacity(self.jobs.len());
		let mut finished = vec![];
		for job in self.jobs.values() {
			let status = job.poll();
			if status == JobStatus::Done {
				finished.push(job.id);
			}
			reports.push(JobReport {
				id: job.id,
				pid: job.leader(),
				command: job.command.clone(),
				status,
				started: job.started,
			});
		}
		for id in finished {
			if let Some(mut job) = self.jobs.remove(&id) {
				job.pids.pop();
				self.orphans.extend(job.pids);
			}
		}
		self.reap_orphans();
		reports
	}

	/// Take a job out of the table and block until all of its processes exit
	pub fn foreground(&mut self, id: usize) -> ShResult<Job> {
		let job = self.jobs.remove(&id).ok_or(ShErr::NoJob)?;
		info!("job [{id}] moved to the foreground");
		for pid in &job.pids {
			match pipeline::wait_pid(*pid) {
				Ok(status) => trace!("{pid} finished: {status:?}"),
				Err(ShErr::Sys(Errno::ECHILD)) => trace!("{pid} was already reaped"),
				Err(e) => return Err(e)
			}
		}
		Ok(job)
	}

	/// SIGTERM every process of a job, last spawned first
	pub fn terminate(&mut self, id: usize) -> ShResult<Job> {
		let job = self.jobs.remove(&id).ok_or(ShErr::NoJob)?;
		for pid in job.pids.iter().rev() {
			match kill(*pid, Signal::SIGTERM) {
				Ok(()) | Err(Errno::ESRCH) => {}
				Err(e) => warn!("could not signal {pid}: {e}")
			}
		}
		info!("job [{id}] terminated");
		self.orphans.extend(job.pids.iter().copied());
		self.reap_orphans();
		Ok(job)
	}

	/// Collect whatever queued pids have exited, without blocking
	pub fn reap_orphans(&mut self) {
		self.orphans.retain(|pid| {
			match waitpid(*pid, Some(WaitPidFlag::WNOHANG)) {
				Ok(WaitStatus::StillAlive) | Err(Errno::EINTR) => true,
				Ok(status) => {
					trace!("reaped {pid}: {status:?}");
					!matches!(status, WaitStatus::Exited(..) | WaitStatus::Signaled(..))
				}
				Err(_) => false
			}
		});
	}

	pub fn orphan_count(&self) -> usize {
		self.orphans.len()
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}
}
