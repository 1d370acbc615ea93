use crate::{pest_ext::{PairExt, Parser, Rule, ToyParse}, prelude::*};

pub const COMMENT_MARKER: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
	Empty,
	/// `!N`, carrying the tokens that followed the `!`
	Recall(Vec<String>),
	Command(Vec<String>),
}

/// Drop everything from the comment marker onward, then surrounding blanks.
pub fn strip_line(raw: &str) -> &str {
	let code = match raw.split_once(COMMENT_MARKER) {
		Some((code, _)) => code,
		None => raw,
	};
	code.trim()
}

pub fn lex_line(input: &str) -> ShResult<Line> {
	let stripped = strip_line(input);
	if stripped.is_empty() {
		return Ok(Line::Empty)
	}
	let line = ToyParse::parse(Rule::line, stripped)
		.map_err(|e| {
			debug!("failed to lex '{stripped}': {e}");
			ShErr::BadSyntax
		})?
		.next()
		.and_then(|pair| pair.step(1))
		.ok_or(ShErr::BadSyntax)?;

	match line.as_rule() {
		Rule::recall => Ok(Line::Recall(line.words())),
		Rule::command => Ok(Line::Command(line.words())),
		_ => Ok(Line::Empty)
	}
}

/// Whitespace split with no special characters
pub fn lex_fields(input: &str) -> ShResult<Vec<String>> {
	let fields = ToyParse::parse(Rule::fields, input)
		.map_err(|e| {
			debug!("failed to split '{input}': {e}");
			ShErr::BadSyntax
		})?
		.next()
		.ok_or(ShErr::BadSyntax)?;
	Ok(fields.words())
}
