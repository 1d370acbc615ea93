use crate::{builtin::Builtin, prelude::*};

use super::external;

/// What a command name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	Internal(Builtin),
	External,
}

impl Command {
	pub fn resolve(name: &str) -> Self {
		match Builtin::from_name(name) {
			Some(builtin) => Command::Internal(builtin),
			None => Command::External,
		}
	}
}

pub fn dispatch(argv: Vec<String>, shell: &mut Shell) -> ShResult<Flow> {
	let Some(name) = argv.first() else {
		return Err(ShErr::TooFewArgs)
	};
	match Command::resolve(name) {
		Command::Internal(builtin) => {
			trace!("running internal command {}", builtin.name());
			builtin.execute(&argv, shell)
		}
		Command::External => external::exec_external(argv, shell),
	}
}
