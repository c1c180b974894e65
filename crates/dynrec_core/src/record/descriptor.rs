use std::borrow::Cow;

use crate::record::{Kind, RecordType, Shape};

/// One named field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Field identifier, unique within a record type.
	pub name: Box<str>,
	/// Declared slot shape.
	pub shape: Shape,
	/// Optional serialization tag text such as `json:"user_id"`.
	pub tag: Option<Box<str>>,
}

impl FieldDescriptor {
	/// Untagged field.
	pub fn new(name: impl Into<String>, shape: Shape) -> Self {
		Self {
			name: name.into().into_boxed_str(),
			shape,
			tag: None,
		}
	}

	/// Attach a tag; empty text clears it.
	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		let tag = tag.into();
		self.tag = if tag.is_empty() { None } else { Some(tag.into_boxed_str()) };
		self
	}

	/// Kind of the field, looking through pointers.
	pub fn kind(&self) -> Kind {
		self.shape.kind()
	}

	/// Whether the field is pointer-wrapped.
	pub fn is_pointer(&self) -> bool {
		self.shape.is_pointer()
	}

	/// Element shape for map, slice, and channel fields.
	pub fn element(&self) -> Option<&Shape> {
		self.shape.element()
	}

	/// Key shape for map fields.
	pub fn key(&self) -> Option<&Shape> {
		self.shape.key()
	}

	/// Nested record type for record fields.
	pub fn record_type(&self) -> Option<&RecordType> {
		self.shape.record_type()
	}

	/// Look up `key:"value"` in the tag text, with escapes inside the quotes resolved.
	pub fn tag_value(&self, key: &str) -> Option<Cow<'_, str>> {
		let mut rest = self.tag.as_deref()?.trim_start();
		while !rest.is_empty() {
			let colon = rest.find(':')?;
			let name = &rest[..colon];
			let quoted = rest[colon + 1..].strip_prefix('"')?;
			let end = closing_quote(quoted)?;
			if name == key {
				return Some(unescape(&quoted[..end]));
			}
			rest = quoted[end + 1..].trim_start();
		}
		None
	}
}

fn closing_quote(input: &str) -> Option<usize> {
	let mut escaped = false;
	for (idx, ch) in input.char_indices() {
		match ch {
			'\\' if !escaped => escaped = true,
			'"' if !escaped => return Some(idx),
			_ => escaped = false,
		}
	}
	None
}

fn unescape(raw: &str) -> Cow<'_, str> {
	if !raw.contains('\\') {
		return Cow::Borrowed(raw);
	}

	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			out.push(ch);
			continue;
		}
		match chars.next() {
			Some('n') => out.push('\n'),
			Some('r') => out.push('\r'),
			Some('t') => out.push('\t'),
			Some('0') => out.push('\0'),
			Some('u') => match unicode_escape(&mut chars) {
				Some(decoded) => out.push(decoded),
				None => out.push_str("\\u"),
			},
			Some(other) => out.push(other),
			None => out.push('\\'),
		}
	}
	Cow::Owned(out)
}

/// Decode the `{XXXX}` tail of a `\u{XXXX}` escape.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
	let rest = chars.as_str();
	let digits = rest.strip_prefix('{')?;
	let close = digits.find('}')?;
	let decoded = u32::from_str_radix(&digits[..close], 16).ok().and_then(char::from_u32)?;
	*chars = digits[close + 1..].chars();
	Some(decoded)
}
