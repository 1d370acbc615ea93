use crate::{prelude::*, utils::Redirs};

pub const INPUT_MARKER: &str = "[";
pub const OUTPUT_MARKER: &str = "]";
pub const PIPE_MARKER: &str = "@";

/// One command line split into pipeline segments, plus where the
/// pipeline as a whole reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdPlan {
	pub segments: Vec<Vec<String>>,
	pub redirs: Redirs,
}

/// Where `path` would land on disk. A file that does not exist yet is resolved
/// through its parent directory.
fn resolve(path: &Path) -> PathBuf {
	if let Ok(real) = fs::canonicalize(path) {
		return real
	}
	let Some(name) = path.file_name() else {
		return path.to_path_buf()
	};
	let parent = match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	};
	fs::canonicalize(parent)
		.map(|dir| dir.join(name))
		.unwrap_or_else(|_| path.to_path_buf())
}

fn same_file(a: Option<&PathBuf>, b: &Path) -> bool {
	a.is_some_and(|a| a == b || resolve(a) == resolve(b))
}

/// Split `tokens` on the redirection and pipe markers.
///
/// The first token is always a command name, so markers are only recognized from
/// the second token onward. The token following `[` or `]` is always a filename,
/// even if it looks like a marker.
pub fn parse_pipeline(tokens: &[String]) -> ShResult<CmdPlan> {
	let Some((first, rest)) = tokens.split_first() else {
		return Err(ShErr::TooFewArgs)
	};
	let mut redirs = Redirs::default();
	let mut segments = vec![];
	let mut current = vec![first.clone()];
	let mut rest = rest.iter();

	while let Some(token) = rest.next() {
		match token.as_str() {
			INPUT_MARKER => {
				let path = PathBuf::from(rest.next().ok_or(ShErr::TooFewArgs)?);
				if same_file(redirs.output.as_ref(), &path) {
					return Err(ShErr::RecursiveRedirection)
				}
				redirs.input = Some(path);
			}
			OUTPUT_MARKER => {
				let path = PathBuf::from(rest.next().ok_or(ShErr::TooFewArgs)?);
				if same_file(redirs.input.as_ref(), &path) {
					return Err(ShErr::RecursiveRedirection)
				}
				redirs.output = Some(path);
			}
			PIPE_MARKER => {
				if current.is_empty() {
					return Err(ShErr::BadSyntax)
				}
				segments.push(std::mem::take(&mut current));
			}
			_ => current.push(token.clone()),
		}
	}
	if current.is_empty() {
		return Err(ShErr::BadSyntax)
	}
	segments.push(current);

	trace!("parsed {} segment(s), redirs: {redirs:?}", segments.len());
	Ok(CmdPlan { segments, redirs })
}
