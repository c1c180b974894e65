use crate::record::assign::assign;
use crate::record::{FieldDescriptor, RecordError, RecordType, Result, Value};

/// Value conforming to a [`RecordType`]: one slot per field, in the type's field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
	record_type: RecordType,
	slots: Vec<Value>,
}

impl Instance {
	pub(crate) fn from_slots(record_type: RecordType, slots: Vec<Value>) -> Self {
		debug_assert_eq!(record_type.field_count(), slots.len());
		Self { record_type, slots }
	}

	/// Type this instance was created from.
	pub fn record_type(&self) -> &RecordType {
		&self.record_type
	}

	/// Slot value by field name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.record_type.field_index(name).map(|idx| &self.slots[idx])
	}

	/// Replace a slot after the same kind check `decode_map` applies.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		let idx = self.record_type.field_index(name).ok_or_else(|| RecordError::MissingField { field: name.to_owned() })?;
		let field = self.record_type.field_at(idx);
		let value = value.into();
		self.slots[idx] = assign(&field.shape, &value, &field.name)?;
		Ok(())
	}

	/// Field descriptors paired with their slot values.
	pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
		self.record_type.fields().zip(self.slots.iter())
	}

	/// Number of slots.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the instance has no slots.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}
