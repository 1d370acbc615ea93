use crate::prelude::*;

pub mod alias;
pub mod cond;
pub mod control;
pub mod history;
pub mod job;
pub mod man;
pub mod script;
pub mod settings;

pub const BUILTINS: [&str; 16] = [
	"setshellname", "setterminator", "history", "newname", "newnames", "savenewnames", "readnewnames", "man", "stop", "backjobs", "frontjob", "cond", "notcond", "cull", "usescript", "output",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
	SetShellName,
	SetTerminator,
	History,
	Newname,
	Newnames,
	SaveNewnames,
	ReadNewnames,
	Man,
	Stop,
	Backjobs,
	Frontjob,
	Cond,
	Notcond,
	Cull,
	Usescript,
	Output,
}

impl Builtin {
	pub const ALL: [Builtin; 16] = [
		Builtin::SetShellName, Builtin::SetTerminator, Builtin::History, Builtin::Newname, Builtin::Newnames, Builtin::SaveNewnames, Builtin::ReadNewnames, Builtin::Man, Builtin::Stop, Builtin::Backjobs, Builtin::Frontjob, Builtin::Cond, Builtin::Notcond, Builtin::Cull, Builtin::Usescript, Builtin::Output,
	];

	pub fn from_name(name: &str) -> Option<Self> {
		BUILTINS.iter()
			.position(|builtin| *builtin == name)
			.map(|i| Self::ALL[i])
	}

	pub fn name(self) -> &'static str {
		BUILTINS[self as usize]
	}

	pub fn execute(self, argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
		match self {
			Builtin::SetShellName => settings::set_name(argv, shell),
			Builtin::SetTerminator => settings::set_delimiter(argv, shell),
			Builtin::History => history::execute(argv, shell),
			Builtin::Newname => alias::newname(argv, shell),
			Builtin::Newnames => alias::newnames(argv, shell),
			Builtin::SaveNewnames => alias::save(argv, shell),
			Builtin::ReadNewnames => alias::read(argv, shell),
			Builtin::Man => man::execute(argv, shell),
			Builtin::Stop => control::stop(argv, shell),
			Builtin::Backjobs => job::backjobs(argv, shell),
			Builtin::Frontjob => job::frontjob(argv, shell),
			Builtin::Cond => cond::cond(argv, shell),
			Builtin::Notcond => cond::notcond(argv, shell),
			Builtin::Cull => job::cull(argv, shell),
			Builtin::Usescript => script::execute(argv, shell),
			Builtin::Output => control::output(argv, shell),
		}
	}
}

pub fn is_builtin(name: &str) -> bool {
	BUILTINS.contains(&name)
}

/// Split off the command name and check the argument count
pub fn expect_args(argv: &[String], min: usize, max: usize) -> ShResult<&[String]> {
	let args = argv.get(1..).unwrap_or_default();
	if args.len() < min {
		return Err(ShErr::TooFewArgs)
	}
	if args.len() > max {
		return Err(ShErr::TooManyArgs)
	}
	Ok(args)
}
