use std::sync::Arc;

use crate::record::assign::assign;
use crate::record::shape::write_record_body;
use crate::record::{FieldDescriptor, Instance, Result, ValueMap};

/// Display name given to record types unless the builder overrides it.
pub const DEFAULT_DISPLAY_NAME: &str = "DynamicStruct";

/// Compiled, immutable record schema.
///
/// Fields are sorted by name. Cloning shares the compiled schema, and equality compares
/// field sets only, ignoring the display name.
#[derive(Debug, Clone)]
pub struct RecordType {
	inner: Arc<RecordTypeInner>,
}

#[derive(Debug)]
struct RecordTypeInner {
	name: Box<str>,
	fields: Vec<FieldDescriptor>,
}

impl RecordType {
	/// Wrap fields already sorted and validated by the builder.
	pub(crate) fn from_sorted_fields(name: Box<str>, fields: Vec<FieldDescriptor>) -> Self {
		debug_assert!(fields.windows(2).all(|pair| pair[0].name < pair[1].name));
		Self {
			inner: Arc::new(RecordTypeInner { name, fields }),
		}
	}

	/// Record type without fields.
	pub fn empty(name: impl Into<String>) -> Self {
		Self::from_sorted_fields(name.into().into_boxed_str(), Vec::new())
	}

	/// Cosmetic display name.
	pub fn name(&self) -> &str {
		&self.inner.name
	}

	/// Fields in name order.
	pub fn fields(&self) -> std::slice::Iter<'_, FieldDescriptor> {
		self.inner.fields.iter()
	}

	/// Number of fields.
	pub fn field_count(&self) -> usize {
		self.inner.fields.len()
	}

	/// Field descriptor by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.field_index(name).map(|idx| &self.inner.fields[idx])
	}

	pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
		self.inner.fields.binary_search_by(|field| (*field.name).cmp(name)).ok()
	}

	pub(crate) fn field_at(&self, idx: usize) -> &FieldDescriptor {
		&self.inner.fields[idx]
	}

	/// Allocate an instance with every slot at its zero value.
	pub fn new_instance(&self) -> Instance {
		let slots = self.inner.fields.iter().map(|field| field.shape.zero_value()).collect();
		Instance::from_slots(self.clone(), slots)
	}

	/// Populate an instance from a string-keyed mapping.
	///
	/// Keys without a matching field are ignored and fields without a key keep their zero
	/// value. A present value of an incompatible kind fails with `DecodeMismatch`.
	///
	/// Slots hold values of their declared kind, not the input's: an integral `Float` given
	/// to an `int` field is stored as `Int`, and an `Int` given to a `float64` field is stored
	/// as `Float`. Reading the slot back returns the converted value.
	pub fn decode_map(&self, values: &ValueMap) -> Result<Instance> {
		self.decode_map_at(values, "")
	}

	pub(crate) fn decode_map_at(&self, values: &ValueMap, prefix: &str) -> Result<Instance> {
		let mut slots = Vec::with_capacity(self.inner.fields.len());
		for field in &self.inner.fields {
			let slot = match values.get(&*field.name) {
				Some(value) => {
					let path = if prefix.is_empty() {
						field.name.to_string()
					} else {
						format!("{prefix}.{}", field.name)
					};
					assign(&field.shape, value, &path)?
				}
				None => field.shape.zero_value(),
			};
			slots.push(slot);
		}

		for key in values.keys() {
			if self.field_index(key).is_none() {
				tracing::trace!(record = %self.inner.name, key = %key, "ignoring key without a matching field");
			}
		}

		Ok(Instance::from_slots(self.clone(), slots))
	}

	/// Deterministic declaration text, one line per field in name order.
	pub fn definition(&self) -> String {
		let mut out = String::new();
		out.push_str(&self.inner.name);
		out.push(' ');
		write_record_body(&mut out, self, 0);
		out.push('\n');
		out
	}
}

impl PartialEq for RecordType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner) || self.inner.fields == other.inner.fields
	}
}

impl Eq for RecordType {}

#[cfg(test)]
mod tests;
