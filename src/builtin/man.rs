use once_cell::sync::Lazy;

use crate::{execute::external, prelude::*};

use super::{expect_args, Builtin};

pub static HELP: Lazy<HashMap<Builtin, &'static str>> = Lazy::new(|| {
	let mut help = HashMap::new();

	help.insert(Builtin::SetShellName, "\
setshellname NAME
    Change the name shown in the prompt. The setting is saved to the config file.");
	help.insert(Builtin::SetTerminator, "\
setterminator DELIM
    Change the delimiter shown at the end of the prompt. The setting is saved to the config file.");
	help.insert(Builtin::History, "\
history [-c]
    List recent command lines, oldest first. -c clears the list.
    !N re-runs line N of the listing.");
	help.insert(Builtin::Newname, "\
newname KEY [VALUE...]
    Define KEY as an alias for VALUE. With no value, delete the alias.
    The oldest alias is dropped when the table is full.");
	help.insert(Builtin::Newnames, "\
newnames
    List every alias, oldest first.");
	help.insert(Builtin::SaveNewnames, "\
savenewnames FILE
    Write every alias to FILE, one per line.");
	help.insert(Builtin::ReadNewnames, "\
readnewnames FILE
    Add the aliases in FILE. Nothing is added if any line is malformed.");
	help.insert(Builtin::Man, "\
man COMMAND
    Show help for an internal command, or the system manual page for anything else.");
	help.insert(Builtin::Stop, "\
stop
    Leave the shell.");
	help.insert(Builtin::Backjobs, "\
backjobs
    List background jobs. Finished jobs are shown once, then forgotten.");
	help.insert(Builtin::Frontjob, "\
frontjob ID
    Wait for background job ID to finish.");
	help.insert(Builtin::Cond, "\
cond ( CHECK FILE ) COMMAND...
cond (CHECK FILE) COMMAND...
cond CHECK FILE COMMAND...
    Run COMMAND when the check passes. CHECK is one of
    checke (regular file exists), checkd (directory exists),
    checkr, checkw, checkx (owner may read, write, execute).");
	help.insert(Builtin::Notcond, "\
notcond CONDITION COMMAND...
    Like cond, but runs COMMAND when the check fails.");
	help.insert(Builtin::Cull, "\
cull ID
    Terminate every process of background job ID.");
	help.insert(Builtin::Usescript, "\
usescript FILE
    Run each line of FILE as if it were typed. A script may not run itself, directly or indirectly.");
	help.insert(Builtin::Output, "\
output TEXT...
    Print TEXT as written, without alias expansion.");

	help
});

pub fn execute(argv: &[String], shell: &mut Shell) -> ShResult<Flow> {
	let args = expect_args(argv, 1, usize::MAX)?;
	let help = Builtin::from_name(&args[0]).and_then(|builtin| HELP.get(&builtin));
	match help {
		Some(text) => {
			shell.write_out(&format!("{text}\n"))?;
			Ok(Flow::Continue)
		}
		None => external::exec_external(argv.to_vec(), shell)
	}
}
