use crate::prelude::*;

use super::expect_args;

pub fn set_name(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	shell.settings_mut().set_name(args[0].as_str())?;
	Ok(Flow::Continue)
}

pub fn set_delimiter(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	shell.settings_mut().set_delimiter(args[0].as_str())?;
	Ok(Flow::Continue)
}
