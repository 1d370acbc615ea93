use crate::prelude::*;

use super::expect_args;

/// `newname key value...` defines an alias, `newname key` deletes one
pub fn newname(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, usize::MAX)?;
	let (key, values) = args.split_first().ok_or(ShErr::TooFewArgs)?;
	if values.is_empty() {
		let removed = shell.aliases_mut().remove(key)?;
		debug!("removed alias {removed}");
	} else {
		shell.aliases_mut().insert(key, values)?;
	}
	Ok(Flow::Continue)
}

/// Lists aliases, oldest first
pub fn newnames(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	expect_args(argv, 0, 0)?;
	let listing = if shell.aliases().is_empty() {
		"No aliases.  Use the newname command to enter a new alias\n".to_string()
	} else {
		shell.aliases().iter()
			.enumerate()
			.map(|(i, alias)| format!("{}: {alias}\n", i + 1))
			.collect()
	};
	shell.write_out(&listing)?;
	Ok(Flow::Continue)
}

pub fn save(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	shell.aliases().save(Path::new(&args[0]))?;
	Ok(Flow::Continue)
}

pub fn read(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, 1)?;
	shell.aliases_mut().load(Path::new(&args[0]))?;
	Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
	use insta::assert_snapshot;

	use crate::shellenv::tests::capture;
	use super::*;

	#[test]
	fn define_list_delete() {
		let (mut shell, out) = capture();
		shell.exec_line("newname ll ls -l").unwrap();
		shell.exec_line("newname up cd ..").unwrap();
		shell.exec_line("newnames").unwrap();
		assert_snapshot!(out.take().trim_end(), @r"
		1: ll ls -l
		2: up cd ..
		");

		shell.exec_line("newname ll").unwrap();
		assert!(shell.aliases().get("ll").is_none());
		assert!(matches!(shell.exec_line("newname ll"), Err(ShErr::NoAlias)));
	}

	#[test]
	fn empty_listing() {
		let (mut shell, out) = capture();
		shell.exec_line("newnames").unwrap();
		assert_snapshot!(out.take().trim_end(), @"No aliases.  Use the newname command to enter a new alias");
	}

	#[test]
	fn argument_checks() {
		let (mut shell, _out) = capture();
		assert!(matches!(shell.exec_line("newname"), Err(ShErr::TooFewArgs)));
		assert!(matches!(shell.exec_line("newnames extra"), Err(ShErr::TooManyArgs)));
		assert!(matches!(shell.exec_line("savenewnames"), Err(ShErr::TooFewArgs)));
		assert!(matches!(shell.exec_line("readnewnames a b"), Err(ShErr::TooManyArgs)));
		assert!(matches!(shell.exec_line("newname cull ls"), Err(ShErr::NoOverride)));
	}

	#[test]
	fn newname_is_not_expanded() {
		let (mut shell, _out) = capture();
		shell.exec_line("newname l ls").unwrap();
		shell.exec_line("newname l pwd").unwrap();
		assert_eq!(shell.aliases().get("l").unwrap().values(), &["pwd".to_string()][..]);
	}

	#[test]
	fn save_and_read_back() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("names");
		let (mut shell, _out) = capture();
		shell.exec_line("newname ll ls -l").unwrap();
		shell.exec_line(&format!("savenewnames {}", file.display())).unwrap();

		let (mut fresh, _out) = capture();
		fresh.exec_line(&format!("readnewnames {}", file.display())).unwrap();
		assert_eq!(fresh.aliases().len(), 1);
	}
}
