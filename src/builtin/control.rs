use crate::prelude::*;

/// Prints its arguments and ends the cycle
pub fn output(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let text = argv.get(1..).unwrap_or_default().join(" ");
	shell.write_out(&format!("{text}\n"))?;
	Ok(Flow::EndCycle)
}

pub fn stop(_argv: &[String], _shell: &mut Shell) -> ShResult<Flow> {
	info!("stop requested");
	Ok(Flow::Exit)
}
