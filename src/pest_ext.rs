use pest::iterators::Pair;

pub use pest::Parser;

/// Line grammar.
///
/// `line` is what the prompt and script replay feed in, after comments are stripped.
/// A leading `!` turns the line into a history recall, `!3` and `! 3` both work.
/// `fields` is plain whitespace splitting, used for alias files where nothing is special.
#[derive(pest_derive::Parser)]
#[grammar_inline = r##"
WHITESPACE = _{ WHITE_SPACE }

word    = @{ (!WHITE_SPACE ~ ANY)+ }

recall  =  { "!" ~ word* }
command =  { word+ }

line    =  { SOI ~ (recall | command)? ~ EOI }
fields  =  { SOI ~ word* ~ EOI }
"##]
pub struct ToyParse;

pub trait PairExt<'a> {
	fn words(self) -> Vec<String>;
	fn step(self, count: usize) -> Option<Pair<'a,Rule>>;
}

impl<'a> PairExt<'a> for Pair<'a,Rule> {
	/// Collects the text of every `word` directly below this pair
	fn words(self) -> Vec<String> {
		self.into_inner()
			.filter(|pair| pair.as_rule() == Rule::word)
			.map(|pair| pair.as_str().to_string())
			.collect()
	}

	/// Goes straight down, a certain number of times.
	fn step(self, count: usize) -> Option<Pair<'a, Rule>> {
		let mut current = self;

		for _ in 0..count {
			current = current.into_inner().next()?;
		}

		Some(current)
	}
}
