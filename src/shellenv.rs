use crate::{
	alias::{AliasTable, DEFAULT_ALIAS_CAPACITY},
	builtin::Builtin,
	config::{Settings, DEFAULT_CONFIG_PATH},
	execute::dispatch,
	history::{History, DEFAULT_HISTORY_CAPACITY},
	interp::{expand, token::{self, Line}},
	jobs::JobTable,
	prelude::*,
	prompt::LineReader,
	script::ScriptStack,
	utils::StdioGuard,
};

/// Marks a command line to be run in the background
pub const BACKGROUND_MARKER: char = '-';

/// The interpreter session. Owns every piece of state a command line can touch.
pub struct Shell {
	settings: Settings,
	command_count: usize,
	aliases: AliasTable,
	history: History,
	jobs: JobTable,
	scripts: ScriptStack,
	flags: ExecFlags,
	/// The current line after history substitution, used to label background jobs
	command_text: String,
	out: Box<dyn Write>,
}

impl Default for Shell {
	fn default() -> Self {
		Self::new(
			Settings::with_defaults(DEFAULT_CONFIG_PATH),
			DEFAULT_ALIAS_CAPACITY,
			DEFAULT_HISTORY_CAPACITY
		)
	}
}

impl Shell {
	pub fn new(settings: Settings, alias_capacity: usize, history_capacity: usize) -> Self {
		Self {
			settings,
			command_count: 0,
			aliases: AliasTable::new(alias_capacity),
			history: History::new(history_capacity),
			jobs: JobTable::new(),
			scripts: ScriptStack::new(),
			flags: ExecFlags::empty(),
			command_text: String::new(),
			out: Box::new(io::stdout()),
		}
	}

	/// Send internal command output somewhere other than stdout
	pub fn with_output(mut self, out: impl Write + 'static) -> Self {
		self.out = Box::new(out);
		self
	}

	pub fn prompt(&self) -> String {
		format!("{}[{}]{}", self.settings.name(), self.command_count, self.settings.delimiter())
	}

	/// One full read-evaluate step. Standard streams are back in place by the time this returns.
	pub fn run_cycle(&mut self, reader: &mut dyn LineReader) -> ShResult<Flow> {
		let _stdio = StdioGuard::save()?;
		self.jobs.reap_orphans();

		let result = match self.next_line(reader) {
			Ok(Some(line)) => self.exec_line(&line),
			Ok(None) => Ok(Flow::Exit),
			Err(e) => Err(e),
		};
		self.flags.remove(ExecFlags::BACKGROUND);
		if let Err(e) = &result {
			debug!("line failed: {e:?}");
			self.recover();
		}
		result
	}

	/// Next non-empty line, from the running script if there is one
	fn next_line(&mut self, reader: &mut dyn LineReader) -> ShResult<Option<String>> {
		loop {
			if let Some(line) = self.scripts.next_line() {
				self.flags.insert(ExecFlags::NO_HISTORY);
				let echo = format!("{}{line}\n", self.prompt());
				self.write_out(&echo)?;
				if !token::strip_line(&line).is_empty() {
					return Ok(Some(line))
				}
				continue
			}

			self.flags.remove(ExecFlags::NO_HISTORY);
			let prompt = self.prompt();
			match reader.read_line(&prompt)? {
				None => return Ok(None),
				Some(line) if token::strip_line(&line).is_empty() => continue,
				Some(line) => return Ok(Some(line)),
			}
		}
	}

	/// Run a single command line
	pub fn exec_line(&mut self, raw: &str) -> ShResult<Flow> {
		let mut text = token::strip_line(raw).to_string();
		let line = match token::lex_line(&text)? {
			Line::Recall(args) => {
				text = self.history.recall(&args)?;
				debug!("recalled '{text}'");
				token::lex_line(&text)?
			}
			line => line
		};
		if matches!(line, Line::Empty) {
			return Ok(Flow::Continue)
		}
		if !self.flags.contains(ExecFlags::NO_HISTORY) {
			self.history.record(text.as_str());
		}
		let Line::Command(argv) = line else {
			return Err(ShErr::BadSyntax)
		};

		self.command_count += 1;
		self.command_text = text;

		match Builtin::from_name(&argv[0]) {
			Some(Builtin::Output) => return Builtin::Output.execute(&argv, self),
			Some(Builtin::Newname) => return self.dispatch(argv),
			_ => {}
		}

		let argv = expand::expand_aliases(argv, &self.aliases)?;
		let argv = self.strip_background(argv)?;
		self.dispatch(argv)
	}

	/// A trailing `-`, on its own or stuck to the last token, sends the line to the background
	fn strip_background(&mut self, mut argv: Vec<String>) -> ShResult<Vec<String>> {
		if let Some(last) = argv.last_mut() {
			if last.ends_with(BACKGROUND_MARKER) {
				self.flags.insert(ExecFlags::BACKGROUND);
				last.pop();
				if last.is_empty() {
					argv.pop();
				}
			}
		}
		if argv.is_empty() {
			return Err(ShErr::TooFewArgs)
		}
		Ok(argv)
	}

	pub fn dispatch(&mut self, argv: Vec<String>) -> ShResult<Flow> {
		dispatch::dispatch(argv, self)
	}

	/// Forget any script in progress after a failed line
	pub fn recover(&mut self) {
		self.scripts.clear();
		self.flags.remove(ExecFlags::NO_HISTORY);
	}

	pub fn write_out(&mut self, text: &str) -> ShResult<()> {
		self.out.write_all(text.as_bytes())?;
		self.out.flush()?;
		Ok(())
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}
	pub fn settings_mut(&mut self) -> &mut Settings {
		&mut self.settings
	}
	pub fn command_count(&self) -> usize {
		self.command_count
	}
	pub fn command_text(&self) -> &str {
		&self.command_text
	}
	pub fn flags(&self) -> ExecFlags {
		self.flags
	}
	pub fn aliases(&self) -> &AliasTable {
		&self.aliases
	}
	pub fn aliases_mut(&mut self) -> &mut AliasTable {
		&mut self.aliases
	}
	pub fn history(&self) -> &History {
		&self.history
	}
	pub fn history_mut(&mut self) -> &mut History {
		&mut self.history
	}
	pub fn jobs(&self) -> &JobTable {
		&self.jobs
	}
	pub fn jobs_mut(&mut self) -> &mut JobTable {
		&mut self.jobs
	}
	pub fn scripts(&self) -> &ScriptStack {
		&self.scripts
	}
	pub fn scripts_mut(&mut self) -> &mut ScriptStack {
		&mut self.scripts
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::{cell::RefCell, rc::Rc};

	use serial_test::serial;

	use super::*;

	/// Cloneable in-memory sink for internal command output
	#[derive(Clone, Default)]
	pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

	impl SharedBuf {
		pub fn take(&self) -> String {
			String::from_utf8(std::mem::take(&mut *self.0.borrow_mut())).unwrap()
		}
	}

	impl Write for SharedBuf {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.borrow_mut().extend_from_slice(buf);
			Ok(buf.len())
		}
		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	pub fn capture_with(settings: Settings) -> (Shell, SharedBuf) {
		let out = SharedBuf::default();
		let shell = Shell::new(settings, DEFAULT_ALIAS_CAPACITY, DEFAULT_HISTORY_CAPACITY)
			.with_output(out.clone());
		(shell, out)
	}

	pub fn capture() -> (Shell, SharedBuf) {
		capture_with(Settings::with_defaults("/nonexistent/config.ini"))
	}

	fn lines(items: &[&str]) -> VecDeque<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn history_recall() {
		let (mut shell, out) = capture();
		shell.exec_line("output one").unwrap();
		shell.exec_line("output two").unwrap();
		shell.exec_line("!1").unwrap();
		shell.exec_line("! 2").unwrap();
		assert_eq!(out.take(), "one\ntwo\none\ntwo\n");
		assert_eq!(shell.history().iter().collect::<Vec<_>>(), vec!["output one", "output two", "output one", "output two"]);

		assert!(matches!(shell.exec_line("!0"), Err(ShErr::NoHistory)));
		assert!(matches!(shell.exec_line("!5"), Err(ShErr::NoHistory)));
		assert!(matches!(shell.exec_line("!x"), Err(ShErr::InvalidArg)));
		assert!(matches!(shell.exec_line("!"), Err(ShErr::TooFewArgs)));
	}

	#[test]
	fn recursive_alias_is_reported() {
		let (mut shell, _out) = capture();
		shell.exec_line("newname a b").unwrap();
		shell.exec_line("newname b a").unwrap();
		assert!(matches!(shell.exec_line("a"), Err(ShErr::RecursiveAlias)));
	}

	#[test]
	fn alias_can_name_an_internal_command() {
		let (mut shell, out) = capture();
		shell.exec_line("newname say output").unwrap();
		shell.exec_line("say hello").unwrap();
		assert_eq!(out.take(), "hello\n");
	}

	#[test]
	fn background_marker() {
		let (mut shell, _out) = capture();
		let argv = shell.strip_background(vec!["sleep".into(), "1-".into()]).unwrap();
		assert_eq!(argv, vec!["sleep", "1"]);
		assert!(shell.flags().contains(ExecFlags::BACKGROUND));

		let argv = shell.strip_background(vec!["sleep".into(), "1".into(), "-".into()]).unwrap();
		assert_eq!(argv, vec!["sleep", "1"]);

		assert!(matches!(shell.exec_line("-"), Err(ShErr::TooFewArgs)));
	}

	#[test]
	fn counter_and_prompt() {
		let (mut shell, _out) = capture();
		assert_eq!(shell.prompt(), "toysh[0]>");
		shell.exec_line("   $ just a comment").unwrap();
		shell.exec_line("newnames").unwrap();
		assert_eq!(shell.prompt(), "toysh[1]>");
	}

	#[test]
	#[serial]
	fn cycle_reads_until_exit() {
		let (mut shell, out) = capture();
		let mut input = lines(&["", "output hi", "stop", "output never"]);
		assert_eq!(shell.run_cycle(&mut input).unwrap(), Flow::EndCycle);
		assert_eq!(shell.run_cycle(&mut input).unwrap(), Flow::Exit);
		assert_eq!(out.take(), "hi\n");

		let mut empty: VecDeque<String> = VecDeque::new();
		assert_eq!(shell.run_cycle(&mut empty).unwrap(), Flow::Exit);
	}

	#[test]
	#[serial]
	fn script_lines_are_echoed_and_not_recorded() {
		let dir = tempfile::tempdir().unwrap();
		let script = dir.path().join("greet");
		fs::write(&script, "output hello\n\noutput bye\n").unwrap();

		let (mut shell, out) = capture();
		let mut input = lines(&[&format!("usescript {}", script.display())]);
		for _ in 0..3 {
			shell.run_cycle(&mut input).unwrap();
		}
		assert_eq!(
			out.take(),
			"toysh[1]>output hello\nhello\ntoysh[2]>\ntoysh[2]>output bye\nbye\n"
		);
		assert_eq!(shell.history().len(), 1);
	}

	#[test]
	#[serial]
	fn error_in_script_clears_every_frame() {
		let dir = tempfile::tempdir().unwrap();
		let inner = dir.path().join("inner");
		let outer = dir.path().join("outer");
		fs::write(&inner, "cull nope\noutput unreachable\n").unwrap();
		fs::write(&outer, format!("usescript {}\noutput also unreachable\n", inner.display())).unwrap();

		let (mut shell, _out) = capture();
		let mut input = lines(&[&format!("usescript {}", outer.display())]);
		shell.run_cycle(&mut input).unwrap();
		shell.run_cycle(&mut input).unwrap();
		assert_eq!(shell.scripts().depth(), 2);
		assert!(matches!(shell.run_cycle(&mut input), Err(ShErr::InvalidArg)));
		assert!(shell.scripts().is_empty());
		assert!(!shell.flags().contains(ExecFlags::NO_HISTORY));
	}

	#[test]
	#[serial]
	fn mutual_script_recursion() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a");
		let b = dir.path().join("b");
		fs::write(&a, format!("usescript {}\n", b.display())).unwrap();
		fs::write(&b, format!("usescript {}\n", a.display())).unwrap();

		let (mut shell, _out) = capture();
		let mut input = lines(&[&format!("usescript {}", a.display())]);
		shell.run_cycle(&mut input).unwrap();
		shell.run_cycle(&mut input).unwrap();
		assert!(matches!(shell.run_cycle(&mut input), Err(ShErr::RecursiveScript)));
		assert!(shell.scripts().is_empty());
	}
}
