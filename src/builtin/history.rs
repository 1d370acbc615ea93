use crate::prelude::*;

use super::expect_args;

pub const CLEAR_FLAG: &str = "-c";

/// `history` lists the buffer oldest first, `history -c` empties it
pub fn execute(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 0, 1)?;
	if let Some(flag) = args.first() {
		if flag != CLEAR_FLAG {
			return Err(ShErr::InvalidArg)
		}
		shell.history_mut().clear();
		return Ok(Flow::Continue)
	}

	let listing = if shell.history().is_empty() {
		"No history to display\n".to_string()
	} else {
		shell.history().iter()
			.enumerate()
			.map(|(i, line)| format!("{}: {line}\n", i + 1))
			.collect()
	};
	shell.write_out(&listing)?;
	Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
	use insta::assert_snapshot;

	use crate::shellenv::tests::capture;
	use super::*;

	#[test]
	fn lists_itself_last() {
		let (mut shell, out) = capture();
		shell.exec_line("newname ll ls -l   $ long listing").unwrap();
		shell.exec_line("history").unwrap();
		assert_snapshot!(out.take().trim_end(), @r"
		1: newname ll ls -l
		2: history
		");
	}

	#[test]
	fn clear() {
		let (mut shell, out) = capture();
		shell.exec_line("newnames").unwrap();
		shell.exec_line("history -c").unwrap();
		assert!(shell.history().is_empty());
		out.take();

		assert!(matches!(shell.exec_line("history -x"), Err(ShErr::InvalidArg)));
		assert!(matches!(shell.exec_line("history -c now"), Err(ShErr::TooManyArgs)));
	}
}
