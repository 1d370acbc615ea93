use crate::{interp::token, prelude::*};

pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_NAME: &str = "toysh";
pub const DEFAULT_DELIMITER: &str = ">";

/// Prompt settings, persisted as `name delimiter` on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	name: String,
	delimiter: String,
	path: PathBuf,
}

impl Settings {
	pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
		Self {
			name: DEFAULT_NAME.into(),
			delimiter: DEFAULT_DELIMITER.into(),
			path: path.into(),
		}
	}

	/// Read the settings file, falling back to defaults if it is missing or malformed
	pub fn load(path: impl Into<PathBuf>) -> Self {
		let mut settings = Self::with_defaults(path);
		let text = match fs::read_to_string(&settings.path) {
			Ok(text) => text,
			Err(e) => {
				info!("no settings at {} ({e}), using defaults", settings.path.display());
				return settings
			}
		};
		match token::lex_fields(&text).as_deref() {
			Ok([name, delimiter]) => {
				settings.name = name.clone();
				settings.delimiter = delimiter.clone();
			}
			_ => warn!("ignoring malformed settings file {}", settings.path.display())
		}
		settings
	}

	pub fn save(&self) -> ShResult<()> {
		fs::write(&self.path, format!("{} {}\n", self.name, self.delimiter))
			.map_err(|_| ShErr::file(&self.path))?;
		debug!("saved settings to {}", self.path.display());
		Ok(())
	}

	pub fn set_name(&mut self, name: impl Into<String>) -> ShResult<()> {
		self.name = name.into();
		self.save()
	}

	pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> ShResult<()> {
		self.delimiter = delimiter.into();
		self.save()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn delimiter(&self) -> &str {
		&self.delimiter
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}
