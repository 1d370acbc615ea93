use crate::prelude::*;

/// Lines of one script that have not been run yet
#[derive(Debug, Clone)]
struct ScriptFrame {
	name: PathBuf,
	lines: VecDeque<String>,
}

/// Nested script replay. The top frame feeds the session until it runs dry.
///
/// A frame stays on the stack while its last line is executing, so that line
/// cannot start the same script again.
#[derive(Debug, Default)]
pub struct ScriptStack {
	frames: Vec<ScriptFrame>,
}

fn identity(path: &Path) -> PathBuf {
	fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl ScriptStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, path: &Path) -> bool {
		let name = identity(path);
		self.frames.iter().any(|frame| frame.name == name)
	}

	pub fn push(&mut self, path: &Path) -> ShResult<()> {
		if self.contains(path) {
			warn!("script {} is already running", path.display());
			return Err(ShErr::RecursiveScript)
		}
		let text = fs::read_to_string(path).map_err(|_| ShErr::file(path))?;
		let lines: VecDeque<String> = text.lines().map(String::from).collect();
		info!("running script {} ({} lines, depth {})", path.display(), lines.len(), self.frames.len() + 1);
		self.frames.push(ScriptFrame { name: identity(path), lines });
		Ok(())
	}

	pub fn next_line(&mut self) -> Option<String> {
		while let Some(top) = self.frames.last_mut() {
			if let Some(line) = top.lines.pop_front() {
				return Some(line)
			}
			if let Some(done) = self.frames.pop() {
				debug!("script {} finished", done.name.display());
			}
		}
		None
	}

	pub fn clear(&mut self) {
		if !self.frames.is_empty() {
			debug!("abandoning {} script frame(s)", self.frames.len());
		}
		self.frames.clear();
	}

	pub fn depth(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, body).unwrap();
		path
	}

	#[test]
	fn replays_nested_frames_in_order() {
		let dir = tempfile::tempdir().unwrap();
		let outer = script(dir.path(), "outer", "one\ntwo\n");
		let inner = script(dir.path(), "inner", "a\nb\n");

		let mut stack = ScriptStack::new();
		stack.push(&outer).unwrap();
		assert_eq!(stack.next_line().as_deref(), Some("one"));
		stack.push(&inner).unwrap();
		assert_eq!(stack.depth(), 2);

		let rest: Vec<String> = std::iter::from_fn(|| stack.next_line()).collect();
		assert_eq!(rest, vec!["a", "b", "two"]);
		assert!(stack.is_empty());
	}

	#[test]
	fn last_line_cannot_restart_its_own_script() {
		let dir = tempfile::tempdir().unwrap();
		let path = script(dir.path(), "self", "usescript self\n");

		let mut stack = ScriptStack::new();
		stack.push(&path).unwrap();
		assert!(stack.next_line().is_some());
		assert!(matches!(stack.push(&path), Err(ShErr::RecursiveScript)));
	}

	#[test]
	fn same_file_by_another_name() {
		let dir = tempfile::tempdir().unwrap();
		let path = script(dir.path(), "s", "true\n");
		let detour = dir.path().join(".").join("s");

		let mut stack = ScriptStack::new();
		stack.push(&path).unwrap();
		assert!(matches!(stack.push(&detour), Err(ShErr::RecursiveScript)));
	}

	#[test]
	fn recursion_is_checked_before_reading() {
		let mut stack = ScriptStack::new();
		stack.frames.push(ScriptFrame { name: PathBuf::from("/gone/script"), lines: VecDeque::new() });
		assert!(matches!(stack.push(Path::new("/gone/script")), Err(ShErr::RecursiveScript)));
		assert!(matches!(stack.push(Path::new("/gone/other")), Err(ShErr::FileError(_))));
	}

	#[test]
	fn clear_drops_everything() {
		let dir = tempfile::tempdir().unwrap();
		let path = script(dir.path(), "s", "a\nb\n");
		let mut stack = ScriptStack::new();
		stack.push(&path).unwrap();
		stack.clear();
		assert_eq!(stack.next_line(), None);
	}
}
