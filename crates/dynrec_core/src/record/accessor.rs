use std::borrow::Cow;
use std::collections::HashMap;

use crate::record::{FieldDescriptor, Instance, Kind, RecordError, Result, Shape, Value, ValueMap};

/// Anything exposing named fields to an [`Accessor`].
pub trait FieldSource {
	/// Names of all exposed fields.
	fn field_names(&self) -> Vec<&str>;
	/// Declaration of a named field, `None` when absent or not exposed.
	fn field_descriptor(&self, name: &str) -> Option<FieldDescriptor>;
	/// Current value of a named field, `None` when absent or not exposed.
	fn field_value(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl FieldSource for Instance {
	fn field_names(&self) -> Vec<&str> {
		self.record_type().fields().map(|field| &*field.name).collect()
	}

	fn field_descriptor(&self, name: &str) -> Option<FieldDescriptor> {
		self.record_type().field(name).cloned()
	}

	fn field_value(&self, name: &str) -> Option<Cow<'_, Value>> {
		self.get(name).map(Cow::Borrowed)
	}
}

/// Plain mappings expose their entries; descriptors are derived from the stored values.
impl FieldSource for ValueMap {
	fn field_names(&self) -> Vec<&str> {
		self.keys().map(String::as_str).collect()
	}

	fn field_descriptor(&self, name: &str) -> Option<FieldDescriptor> {
		self.get(name).map(|value| FieldDescriptor::new(name, Shape::of_sample(value)))
	}

	fn field_value(&self, name: &str) -> Option<Cow<'_, Value>> {
		self.get(name).map(Cow::Borrowed)
	}
}

impl Value {
	/// Record-like view of this value for wrapping in an [`Accessor`].
	pub fn as_field_source(&self) -> Option<&dyn FieldSource> {
		match self {
			Self::Record(instance) => Some(instance as &dyn FieldSource),
			Self::Map(map) => Some(map as &dyn FieldSource),
			_ => None,
		}
	}
}

/// Cached, by-name reader over one record value of statically unknown shape.
///
/// Descriptors and values are memoized on first read and never invalidated; the borrowed
/// source cannot change while the accessor is alive. Simple getters degrade to zero values
/// instead of failing, so pair them with [`Accessor::is_kind`] when the distinction matters.
pub struct Accessor<'a> {
	source: &'a dyn FieldSource,
	value_cache: HashMap<Box<str>, Option<Cow<'a, Value>>>,
	raw_cache: HashMap<Box<str>, Option<FieldDescriptor>>,
}

impl<'a> Accessor<'a> {
	/// Wrap a field source.
	pub fn new(source: &'a dyn FieldSource) -> Self {
		Self {
			source,
			value_cache: HashMap::new(),
			raw_cache: HashMap::new(),
		}
	}

	/// Names of all exposed fields.
	pub fn field_names(&self) -> Vec<&'a str> {
		let source = self.source;
		source.field_names()
	}

	/// Declaration of a named field.
	pub fn descriptor(&mut self, name: &str) -> Option<&FieldDescriptor> {
		if !self.raw_cache.contains_key(name) {
			let source = self.source;
			self.raw_cache.insert(name.into(), source.field_descriptor(name));
		}
		self.raw_cache.get(name).and_then(Option::as_ref)
	}

	/// Field value, `None` when the field is absent or not exposed.
	pub fn get(&mut self, name: &str) -> Option<&Value> {
		if !self.value_cache.contains_key(name) {
			let source = self.source;
			self.value_cache.insert(name.into(), source.field_value(name));
		}
		self.value_cache.get(name).and_then(|slot| slot.as_deref())
	}

	/// Whether the field exists.
	pub fn has_field(&mut self, name: &str) -> bool {
		self.descriptor(name).is_some()
	}

	/// String field value, empty on absence or kind mismatch.
	pub fn get_string(&mut self, name: &str) -> String {
		self.get(name).and_then(Value::as_str).map(str::to_owned).unwrap_or_default()
	}

	/// Integer field value, zero on absence or kind mismatch. Integral floats convert.
	pub fn get_int64(&mut self, name: &str) -> i64 {
		self.get(name).and_then(Value::as_i64).unwrap_or_default()
	}

	/// Float field value, zero on absence or kind mismatch. Integers widen.
	pub fn get_float64(&mut self, name: &str) -> f64 {
		self.get(name).and_then(Value::as_f64).unwrap_or_default()
	}

	/// Boolean field value, false on absence or kind mismatch.
	pub fn get_bool(&mut self, name: &str) -> bool {
		self.get(name).and_then(Value::as_bool).unwrap_or_default()
	}

	/// Declared kind of a field.
	pub fn kind(&mut self, name: &str) -> Option<Kind> {
		self.descriptor(name).map(FieldDescriptor::kind)
	}

	/// Whether the field exists with the given kind.
	pub fn is_kind(&mut self, name: &str, kind: Kind) -> bool {
		self.kind(name) == Some(kind)
	}

	/// Whether the field is a nested record.
	pub fn is_record(&mut self, name: &str) -> bool {
		self.is_kind(name, Kind::Record)
	}

	/// Whether the field is a slice.
	pub fn is_slice(&mut self, name: &str) -> bool {
		self.is_kind(name, Kind::Slice)
	}

	/// Whether the field is a map.
	pub fn is_map(&mut self, name: &str) -> bool {
		self.is_kind(name, Kind::Map)
	}

	/// Whether the field is a function.
	pub fn is_func(&mut self, name: &str) -> bool {
		self.is_kind(name, Kind::Func)
	}

	/// Whether the field is a channel of any direction.
	pub fn is_chan(&mut self, name: &str) -> bool {
		self.kind(name).is_some_and(Kind::is_chan)
	}

	/// Whether the field is pointer-wrapped.
	pub fn is_pointer(&mut self, name: &str) -> bool {
		self.descriptor(name).is_some_and(FieldDescriptor::is_pointer)
	}

	/// Whether the field exists and currently holds null.
	pub fn is_nil(&mut self, name: &str) -> bool {
		self.get(name).is_some_and(Value::is_null)
	}

	/// Accessor over a nested record or map field.
	pub fn record(&mut self, name: &str) -> Result<Accessor<'_>> {
		let value = self.get(name).ok_or_else(|| RecordError::MissingField { field: name.to_owned() })?;
		let source = value.as_field_source().ok_or_else(|| RecordError::NotRecord { field: name.to_owned() })?;
		Ok(Accessor::new(source))
	}

	/// Apply `f` to an accessor over each element of a slice field, in index order.
	///
	/// Elements that are not record-like contribute `None`. A null slice yields no results.
	pub fn map_over_slice<R, F>(&mut self, name: &str, mut f: F) -> Result<Vec<Option<R>>>
	where
		F: FnMut(usize, &mut Accessor<'_>) -> R,
	{
		if !self.is_slice(name) {
			return Err(RecordError::NotSlice { field: name.to_owned() });
		}

		let items = match self.get(name) {
			Some(Value::Slice(items)) => items.as_slice(),
			_ => &[][..],
		};

		let mut out = Vec::with_capacity(items.len());
		for (idx, item) in items.iter().enumerate() {
			match item.as_field_source() {
				Some(source) => {
					let mut element = Accessor::new(source);
					out.push(Some(f(idx, &mut element)));
				}
				None => {
					tracing::trace!(field = name, index = idx, kind = item.kind_name(), "slice element is not record-like");
					out.push(None);
				}
			}
		}
		Ok(out)
	}
}

#[cfg(test)]
mod tests;
