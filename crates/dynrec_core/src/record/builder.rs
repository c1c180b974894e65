use std::collections::BTreeMap;

use crate::record::{ChanDir, DEFAULT_DISPLAY_NAME, FieldDescriptor, Instance, RecordError, RecordType, Result, Shape};

/// Accumulates field descriptors keyed by name and compiles them into a [`RecordType`].
///
/// Add order does not matter: compiled fields are sorted by name, so two builders holding
/// the same field set produce equal types with identical definitions. Re-adding a name
/// replaces the earlier descriptor.
#[derive(Debug, Clone, Default)]
pub struct RecordTypeBuilder {
	name: Option<String>,
	fields: BTreeMap<String, FieldDescriptor>,
}

impl RecordTypeBuilder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the cosmetic display name of the compiled type.
	pub fn set_display_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.name = Some(name.into());
		self
	}

	/// Add or replace a field; the last add of a name wins.
	pub fn add_field(&mut self, field: FieldDescriptor) -> &mut Self {
		let name = field.name.to_string();
		if let Some(previous) = self.fields.get(&name)
			&& previous.shape != field.shape
		{
			tracing::trace!(field = %name, from = %previous.kind(), to = %field.kind(), "replacing field shape");
		}
		self.fields.insert(name, field);
		self
	}

	/// Add a `bool` field.
	pub fn add_bool(&mut self, name: &str, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::Bool, tag)
	}

	/// Add an `int` field.
	pub fn add_int(&mut self, name: &str, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::Int, tag)
	}

	/// Add a `float64` field.
	pub fn add_float64(&mut self, name: &str, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::Float64, tag)
	}

	/// Add a `string` field.
	pub fn add_string(&mut self, name: &str, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::String, tag)
	}

	/// Add an untyped field.
	pub fn add_any(&mut self, name: &str, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::Any, tag)
	}

	/// Add a map field keyed by `key` holding `value`.
	pub fn add_map(&mut self, name: &str, key: Shape, value: Shape, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::map(key, value), tag)
	}

	/// Add a function field.
	pub fn add_func(&mut self, name: &str, args: Vec<Shape>, returns: Vec<Shape>, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::func(args, returns), tag)
	}

	/// Add a bidirectional channel field.
	pub fn add_chan_both(&mut self, name: &str, elem: Shape, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::chan(ChanDir::Both, elem), tag)
	}

	/// Add a send-only channel field.
	pub fn add_chan_send(&mut self, name: &str, elem: Shape, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::chan(ChanDir::Send, elem), tag)
	}

	/// Add a receive-only channel field.
	pub fn add_chan_recv(&mut self, name: &str, elem: Shape, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::chan(ChanDir::Recv, elem), tag)
	}

	/// Add a nested record field shaped like `sample`.
	pub fn add_record(&mut self, name: &str, sample: &Instance, is_pointer: bool, tag: Option<&str>) -> &mut Self {
		self.add_nested_record_type(name, sample.record_type(), is_pointer, tag)
	}

	/// Add a slice field of `elem`.
	pub fn add_slice(&mut self, name: &str, elem: Shape, tag: Option<&str>) -> &mut Self {
		self.add_shape(name, Shape::slice(elem), tag)
	}

	/// Add a nested record field of a compiled type.
	pub fn add_nested_record_type(&mut self, name: &str, record_type: &RecordType, is_pointer: bool, tag: Option<&str>) -> &mut Self {
		let shape = Shape::Record(record_type.clone());
		self.add_shape(name, if is_pointer { Shape::pointer(shape) } else { shape }, tag)
	}

	/// Drop a field; absent names are ignored.
	pub fn remove(&mut self, name: &str) -> &mut Self {
		self.fields.remove(name);
		self
	}

	/// Whether a field with this name is present.
	pub fn exists(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Number of distinct field names.
	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Validate and compile the accumulated fields.
	pub fn build(&self) -> Result<RecordType> {
		let fields: Vec<FieldDescriptor> = self.fields.values().cloned().collect();
		for field in &fields {
			validate_name(&field.name)?;
			validate_shape(&field.name, &field.shape)?;
		}
		if let Some(pair) = fields.windows(2).find(|pair| pair[0].name == pair[1].name) {
			return Err(RecordError::ConflictingField {
				name: pair[0].name.to_string(),
				first: pair[0].kind().as_str(),
				second: pair[1].kind().as_str(),
			});
		}

		let name = self.name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME);
		tracing::debug!(record = name, fields = fields.len(), "compiled record type");
		Ok(RecordType::from_sorted_fields(name.into(), fields))
	}

	fn add_shape(&mut self, name: &str, shape: Shape, tag: Option<&str>) -> &mut Self {
		let field = FieldDescriptor::new(name, shape);
		self.add_field(match tag {
			Some(tag) => field.with_tag(tag),
			None => field,
		})
	}
}

fn validate_name(name: &str) -> Result<()> {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return Err(RecordError::EmptyFieldName);
	};
	if !(first.is_alphabetic() || first == '_') || !chars.all(|ch| ch.is_alphanumeric() || ch == '_') {
		return Err(RecordError::InvalidFieldName { name: name.to_owned() });
	}
	Ok(())
}

fn validate_shape(field: &str, shape: &Shape) -> Result<()> {
	match shape {
		Shape::Bool | Shape::Int | Shape::Float64 | Shape::String | Shape::Any => Ok(()),
		Shape::Map { key, value } => {
			let kind = key.kind();
			if !kind.is_scalar() {
				return Err(RecordError::InvalidMapKey {
					field: field.to_owned(),
					kind: kind.as_str(),
				});
			}
			validate_shape(field, value)
		}
		Shape::Slice(elem) | Shape::Chan { elem, .. } | Shape::Pointer(elem) => validate_shape(field, elem),
		Shape::Func { args, returns } => args.iter().chain(returns).try_for_each(|item| validate_shape(field, item)),
		Shape::Record(record_type) => {
			if record_type.field_count() == 0 {
				return Err(RecordError::EmptyNestedRecord { field: field.to_owned() });
			}
			Ok(())
		}
	}
}
