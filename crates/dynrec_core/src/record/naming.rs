use std::collections::HashMap;

/// Camel-case a source key into a field identifier.
///
/// Every non-alphanumeric character separates words; each word's first letter is upper-cased
/// and the rest kept. Names that would be empty or start with a digit get an `X` prefix.
pub fn to_field_name(key: &str) -> String {
	let mut out = String::with_capacity(key.len() + 1);
	let mut word_start = true;
	for ch in key.chars() {
		if !ch.is_alphanumeric() {
			word_start = true;
			continue;
		}
		if word_start {
			out.extend(ch.to_uppercase());
			word_start = false;
		} else {
			out.push(ch);
		}
	}

	if out.chars().next().is_none_or(|ch| ch.is_numeric()) {
		out.insert(0, 'X');
	}
	out
}

/// Memoized key → field name table shared by the schema and data passes of one decode.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
	names: HashMap<String, String>,
}

impl NameTable {
	pub(crate) fn field_name(&mut self, key: &str) -> &str {
		if !self.names.contains_key(key) {
			self.names.insert(key.to_owned(), to_field_name(key));
		}
		&self.names[key]
	}
}
