use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};

use crate::{builtin, interp::token, prelude::*};

pub const DEFAULT_ALIAS_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
	key: String,
	values: Vec<String>,
}

impl Alias {
	pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
		Self { key: key.into(), values }
	}
	pub fn key(&self) -> &str {
		&self.key
	}
	pub fn values(&self) -> &[String] {
		&self.values
	}
}

impl Display for Alias {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.key)?;
		for value in &self.values {
			write!(f, " {value}")?;
		}
		Ok(())
	}
}

/// Insertion-ordered alias store. The front of the queue is the oldest entry
/// and is the one evicted when a new key arrives at capacity.
#[derive(Debug, Clone)]
pub struct AliasTable {
	entries: VecDeque<Alias>,
	capacity: usize,
}

impl Default for AliasTable {
	fn default() -> Self {
		Self::new(DEFAULT_ALIAS_CAPACITY)
	}
}

impl AliasTable {
	pub fn new(capacity: usize) -> Self {
		Self { entries: VecDeque::with_capacity(capacity), capacity: capacity.max(1) }
	}

	pub fn get(&self, key: &str) -> Option<&Alias> {
		self.entries.iter().find(|alias| alias.key == key)
	}

	/// Checks a definition without touching the table.
	pub fn validate(key: &str, values: &[String]) -> ShResult<()> {
		if values.is_empty() {
			return Err(ShErr::TooFewArgs)
		}
		if builtin::is_builtin(key) {
			return Err(ShErr::NoOverride)
		}
		if values.iter().any(|value| value == key) {
			return Err(ShErr::RecursiveAlias)
		}
		Ok(())
	}

	pub fn insert(&mut self, key: &str, values: &[String]) -> ShResult<()> {
		Self::validate(key, values)?;
		self.insert_unchecked(Alias::new(key, values.to_vec()));
		Ok(())
	}

	fn insert_unchecked(&mut self, alias: Alias) {
		if let Some(pos) = self.entries.iter().position(|existing| existing.key == alias.key) {
			if self.entries[pos] == alias {
				return
			}
			self.entries.remove(pos);
		}
		if self.entries.len() >= self.capacity {
			if let Some(evicted) = self.entries.pop_front() {
				debug!("alias table full, evicting '{}'", evicted.key);
			}
		}
		trace!("defining alias {alias}");
		self.entries.push_back(alias);
	}

	pub fn remove(&mut self, key: &str) -> ShResult<Alias> {
		let pos = self.entries.iter()
			.position(|alias| alias.key == key)
			.ok_or(ShErr::NoAlias)?;
		self.entries.remove(pos).ok_or(ShErr::NoAlias)
	}

	/// Merge definitions from an alias file. Nothing is inserted unless every line is valid.
	pub fn load(&mut self, path: &Path) -> ShResult<usize> {
		let file = File::open(path).map_err(|_| ShErr::file(path))?;
		let mut parsed = vec![];
		for line in BufReader::new(file).lines() {
			let line = line.map_err(|_| ShErr::file(path))?;
			let mut fields = token::lex_fields(&line)?;
			if fields.len() < 2 {
				return Err(ShErr::BadFormat)
			}
			let key = fields.remove(0);
			Self::validate(&key, &fields)?;
			parsed.push(Alias::new(key, fields));
		}
		let count = parsed.len();
		for alias in parsed {
			self.insert_unchecked(alias);
		}
		info!("read {count} aliases from {}", path.display());
		Ok(count)
	}

	pub fn save(&self, path: &Path) -> ShResult<()> {
		let file = File::create(path).map_err(|_| ShErr::file(path))?;
		let mut writer = BufWriter::new(file);
		for alias in &self.entries {
			writeln!(writer, "{alias}").map_err(|_| ShErr::file(path))?;
		}
		writer.flush().map_err(|_| ShErr::file(path))?;
		info!("wrote {} aliases to {}", self.entries.len(), path.display());
		Ok(())
	}

	pub fn iter(&self) -> impl Iterator<Item = &Alias> {
		self.entries.iter()
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
