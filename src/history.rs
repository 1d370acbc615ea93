use crate::prelude::*;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded record of the most recent command lines, oldest first.
#[derive(Debug, Clone)]
pub struct History {
	entries: VecDeque<String>,
	capacity: usize,
}

impl Default for History {
	fn default() -> Self {
		Self::new(DEFAULT_HISTORY_CAPACITY)
	}
}

impl History {
	pub fn new(capacity: usize) -> Self {
		Self { entries: VecDeque::with_capacity(capacity), capacity }
	}

	pub fn record(&mut self, line: impl Into<String>) {
		if self.capacity == 0 {
			return
		}
		if self.entries.len() == self.capacity {
			self.entries.pop_front();
		}
		self.entries.push_back(line.into());
	}

	/// Fetch an entry by its 1-based position, as numbered by the `history` listing.
	pub fn get(&self, index: usize) -> ShResult<&str> {
		index.checked_sub(1)
			.and_then(|i| self.entries.get(i))
			.map(String::as_str)
			.ok_or(ShErr::NoHistory)
	}

	/// Resolve the arguments of a `!N` recall into the stored line.
	pub fn recall(&self, args: &[String]) -> ShResult<String> {
		let arg = match args {
			[] => return Err(ShErr::TooFewArgs),
			[arg] => arg,
			_ => return Err(ShErr::TooManyArgs),
		};
		let index = arg.parse::<i64>().map_err(|_| ShErr::InvalidArg)?;
		let index = usize::try_from(index).map_err(|_| ShErr::NoHistory)?;
		self.get(index).map(str::to_string)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	fn filled(count: usize) -> History {
		let mut history = History::new(3);
		for i in 1..=count {
			history.record(format!("cmd{i}"));
		}
		history
	}

	#[test]
	fn evicts_oldest_when_full() {
		let history = filled(5);
		assert_eq!(history.len(), history.capacity());
		assert_eq!(history.iter().collect::<Vec<_>>(), vec!["cmd3", "cmd4", "cmd5"]);
	}

	#[test]
	fn get_is_one_based() {
		let history = filled(3);
		assert_eq!(history.get(1).unwrap(), "cmd1");
		assert_eq!(history.get(3).unwrap(), "cmd3");
		assert!(matches!(history.get(0), Err(ShErr::NoHistory)));
		assert!(matches!(history.get(4), Err(ShErr::NoHistory)));
	}

	#[test]
	fn recall_checks_arguments() {
		let history = filled(2);
		assert_eq!(history.recall(&args(&["2"])).unwrap(), "cmd2");
		assert!(matches!(history.recall(&args(&[])), Err(ShErr::TooFewArgs)));
		assert!(matches!(history.recall(&args(&["1", "2"])), Err(ShErr::TooManyArgs)));
		assert!(matches!(history.recall(&args(&["two"])), Err(ShErr::InvalidArg)));
		assert!(matches!(history.recall(&args(&["-1"])), Err(ShErr::NoHistory)));
		assert!(matches!(history.recall(&args(&["0"])), Err(ShErr::NoHistory)));
		assert!(matches!(history.recall(&args(&["3"])), Err(ShErr::NoHistory)));
	}

	#[test]
	fn zero_capacity_records_nothing() {
		let mut history = History::new(0);
		history.record("ls");
		assert!(history.is_empty());
	}
}
