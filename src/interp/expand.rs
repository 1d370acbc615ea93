use crate::{alias::AliasTable, prelude::*};

/// A token waiting to be checked, along with every alias key that was
/// substituted on the way to producing it.
#[derive(Debug, Clone)]
struct Pending {
	token: String,
	chain: Vec<String>,
}

impl Pending {
	fn fresh(token: String) -> Self {
		Self { token, chain: vec![] }
	}
}

/// Substitute aliases until no token names one.
///
/// A token that expands to several words is replaced by the first one, the rest are
/// spliced in right after it, and the same position is checked again. Any substitution
/// that would bring back a key already used along the same chain is a cycle.
pub fn expand_aliases(tokens: Vec<String>, table: &AliasTable) -> ShResult<Vec<String>> {
	if table.is_empty() {
		return Ok(tokens)
	}
	let mut work: Vec<Pending> = tokens.into_iter().map(Pending::fresh).collect();
	let mut cursor = 0;

	while cursor < work.len() {
		let Some(alias) = table.get(&work[cursor].token) else {
			cursor += 1;
			continue
		};

		let mut chain = work[cursor].chain.clone();
		chain.push(alias.key().to_string());
		if alias.values().iter().any(|value| chain.contains(value)) {
			debug!("alias cycle through {chain:?}");
			return Err(ShErr::RecursiveAlias)
		}

		let mut values = alias.values().iter();
		let Some(head) = values.next() else {
			return Err(ShErr::TooFewArgs)
		};
		let tail: Vec<Pending> = values
			.map(|value| Pending { token: value.clone(), chain: chain.clone() })
			.collect();
		work[cursor] = Pending { token: head.clone(), chain };
		work.splice(cursor + 1..cursor + 1, tail);
	}

	Ok(work.into_iter().map(|pending| pending.token).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(line: &str) -> Vec<String> {
		line.split_whitespace().map(String::from).collect()
	}

	fn table(defs: &[(&str, &str)]) -> AliasTable {
		let mut table = AliasTable::new(10);
		for (key, value) in defs {
			table.insert(key, &words(value)).unwrap();
		}
		table
	}

	#[test]
	fn no_aliases_is_identity() {
		let out = expand_aliases(words("ls -l"), &AliasTable::default()).unwrap();
		assert_eq!(out, words("ls -l"));
	}

	#[test]
	fn chain_resolves() {
		let aliases = table(&[("a", "b x"), ("b", "ls -l")]);
		assert_eq!(expand_aliases(words("a /tmp"), &aliases).unwrap(), words("ls -l x /tmp"));
	}

	#[test]
	fn every_token_is_a_candidate() {
		let aliases = table(&[("home", "/root")]);
		assert_eq!(expand_aliases(words("ls home home"), &aliases).unwrap(), words("ls /root /root"));
	}

	#[test]
	fn spliced_tokens_are_expanded_too() {
		let aliases = table(&[("both", "one two"), ("two", "2")]);
		assert_eq!(expand_aliases(words("echo both"), &aliases).unwrap(), words("echo one 2"));
	}

	#[test]
	fn two_step_cycle() {
		let aliases = table(&[("a", "b"), ("b", "a")]);
		assert!(matches!(expand_aliases(words("a"), &aliases), Err(ShErr::RecursiveAlias)));
	}

	#[test]
	fn cycle_through_continuation_token() {
		let aliases = table(&[("a", "b"), ("b", "echo a")]);
		assert!(matches!(expand_aliases(words("a"), &aliases), Err(ShErr::RecursiveAlias)));
	}

	#[test]
	fn sibling_tokens_do_not_form_a_cycle() {
		let aliases = table(&[("a", "x"), ("b", "y")]);
		assert_eq!(expand_aliases(words("b a"), &aliases).unwrap(), words("y x"));
	}
}
