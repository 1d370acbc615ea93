use std::os::unix::fs::PermissionsExt;
use std::str::FromStr;

use crate::prelude::*;

const OPEN: &str = "(";
const CLOSE: &str = ")";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCheck {
	/// `checke`, a regular file exists
	Exists,
	/// `checkd`
	Dir,
	Read,
	Write,
	Exec,
}

impl FromStr for FileCheck {
	type Err = ShErr;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"checke" => Ok(Self::Exists),
			"checkd" => Ok(Self::Dir),
			"checkr" => Ok(Self::Read),
			"checkw" => Ok(Self::Write),
			"checkx" => Ok(Self::Exec),
			_ => Err(ShErr::InvalidArg)
		}
	}
}

impl FileCheck {
	/// Anything that cannot be stat'ed fails every check. Permissions are the owner's bits.
	pub fn holds(self, path: &Path) -> bool {
		let Ok(meta) = fs::metadata(path) else {
			return false
		};
		let mode = meta.permissions().mode();
		match self {
			FileCheck::Exists => meta.is_file(),
			FileCheck::Dir => meta.is_dir(),
			FileCheck::Read => mode & 0o400 != 0,
			FileCheck::Write => mode & 0o200 != 0,
			FileCheck::Exec => mode & 0o100 != 0,
		}
	}
}

/// How the condition was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondSyntax {
	/// `cond ( checke file ) cmd`
	Spaced = 1,
	/// `cond (checke file) cmd`
	Packed = 2,
	/// `cond checke file cmd`
	Bare = 3,
}

impl CondSyntax {
	/// Tokens taken up by the condition, the command name included
	pub fn width(self) -> usize {
		match self {
			CondSyntax::Spaced => 5,
			CondSyntax::Packed | CondSyntax::Bare => 3,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
	pub syntax: CondSyntax,
	pub passed: bool,
}

impl Verdict {
	/// Signed form of the verdict: the magnitude names the syntax, the sign the outcome
	pub fn discriminator(&self) -> i32 {
		let magnitude = self.syntax as i32;
		if self.passed { magnitude } else { -magnitude }
	}
}

/// Evaluate the condition at the front of a `cond`/`notcond` line
pub fn evaluate(argv: &[String]) -> ShResult<Verdict> {
	if argv.len() < 3 {
		return Err(ShErr::TooFewArgs)
	}
	let (syntax, check, file) = if argv[1] == OPEN {
		if argv.len() < 5 {
			return Err(ShErr::TooFewArgs)
		}
		if argv[4] != CLOSE {
			return Err(ShErr::BadSyntax)
		}
		(CondSyntax::Spaced, argv[2].as_str(), argv[3].as_str())
	} else if let Some(check) = argv[1].strip_prefix(OPEN) {
		let Some(file) = argv[2].strip_suffix(CLOSE) else {
			return Err(ShErr::BadSyntax)
		};
		(CondSyntax::Packed, check, file)
	} else {
		if argv[2].ends_with(CLOSE) || argv.get(3).is_some_and(|token| token == CLOSE) {
			return Err(ShErr::BadSyntax)
		}
		(CondSyntax::Bare, argv[1].as_str(), argv[2].as_str())
	};

	let check = check.parse::<FileCheck>()?;
	let passed = check.holds(Path::new(file));
	trace!("{check:?} {file} -> {passed}");
	Ok(Verdict { syntax, passed })
}

/// Dispatch what follows the condition when the verdict matches `wanted`
fn run_if(argv: &[String], shell: &mut Shell, wanted: bool) -> ShResult<Flow> {
	let verdict = evaluate(argv)?;
	let rest = argv.get(verdict.syntax.width()..).unwrap_or_default();
	if rest.is_empty() {
		return Err(ShErr::TooFewArgs)
	}
	if verdict.passed == wanted {
		shell.dispatch(rest.to_vec())
	} else {
		Ok(Flow::Continue)
	}
}

pub fn cond(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	run_if(argv, shell, true)
}

pub fn notcond(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	run_if(argv, shell, false)
}
