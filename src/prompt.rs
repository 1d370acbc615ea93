use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Config, EditMode, Editor};

use crate::prelude::*;

/// Where interactive lines come from. `None` means end of input.
pub trait LineReader {
	fn read_line(&mut self, prompt: &str) -> ShResult<Option<String>>;
}

/// Terminal line editing through rustyline
pub struct Prompt {
	rl: Editor<(), DefaultHistory>,
}

impl Prompt {
	pub fn new(history_size: usize) -> ShResult<Self> {
		let config = Config::builder()
			.max_history_size(history_size)?
			.auto_add_history(true)
			.edit_mode(EditMode::Emacs)
			.build();
		let mut rl = Editor::with_config(config)?;
		rl.set_history_ignore_space(true);
		Ok(Self { rl })
	}
}

impl LineReader for Prompt {
	fn read_line(&mut self, prompt: &str) -> ShResult<Option<String>> {
		match self.rl.readline(prompt) {
			Ok(line) => Ok(Some(line)),
			// ^C abandons the current line only
			Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
			Err(ReadlineError::Eof) => Ok(None),
			Err(e) => Err(e.into())
		}
	}
}

/// Input for non-interactive runs: a fixed list of lines, then end of input
impl LineReader for VecDeque<String> {
	fn read_line(&mut self, _prompt: &str) -> ShResult<Option<String>> {
		Ok(self.pop_front())
	}
}
