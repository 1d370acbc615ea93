use crate::{jobs::{JobReport, JobTable}, prelude::*};

use super::expect_args;

pub const JOB_HEADER: &str = "Job | PID |  Command  | Status |   Start Time";
const TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

fn format_report(report: &JobReport) -> String {
	let pid = report.pid.map(|pid| pid.to_string()).unwrap_or_else(|| "-".into());
	format!(
		"{:>3}{:>7}{:>10}{:>11}{:>28}\n",
		report.id,
		pid,
		report.command,
		report.status,
		report.started.format(TIME_FORMAT).to_string()
	)
}

pub fn backjobs(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	expect_args(argv, 0, 0)?;
	let mut listing = format!("{JOB_HEADER}\n");
	for report in shell.jobs_mut().list() {
		listing.push_str(&format_report(&report));
	}
	shell.write_out(&listing)?;
	Ok(Flow::Continue)
}

pub fn frontjob(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	let id = JobTable::parse_id(&args[0])?;
	shell.jobs_mut().foreground(id)?;
	Ok(Flow::Continue)
}

pub fn cull(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	let id = JobTable::parse_id(&args[0])?;
	shell.jobs_mut().terminate(id)?;
	Ok(Flow::Continue)
}
