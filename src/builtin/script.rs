use crate::prelude::*;

use super::expect_args;

/// `usescript file` queues the file's lines ahead of interactive input
pub fn execute(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	shell.scripts_mut().push(Path::new(&args[0]))?;
	Ok(Flow::Continue)
}
