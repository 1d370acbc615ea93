use crate::{interp::parse, prelude::*};

use super::pipeline;

/// Run a command line that names no internal command: redirect, spawn, then
/// either wait or register a background job.
pub fn exec_external(argv: Vec<String>, shell: &mut Shell) -> ShResult<Flow> {
	let plan = parse::parse_pipeline(&argv)?;
	plan.redirs.activate()?;
	let pids = pipeline::spawn_pipeline(&plan.segments)?;

	if shell.flags().contains(ExecFlags::BACKGROUND) {
		let leader = pids.first().copied();
		let command = shell.command_text().to_string();
		let id = shell.jobs_mut().register(pids, command);
		if let Some(pid) = leader {
			eprintln!("[{id}] {pid}");
		}
	} else {
		pipeline::wait_all(&pids)?;
	}
	Ok(Flow::Continue)
}
