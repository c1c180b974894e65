use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::record::naming::NameTable;
use crate::record::{
	Accessor, DEFAULT_DISPLAY_NAME, FieldDescriptor, Instance, RecordError, RecordType, RecordTypeBuilder, Result, Shape, Value, ValueMap,
};

/// How nested objects are typed during inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestPolicy {
	/// Nested objects become nested record types.
	#[default]
	Nested,
	/// Nested objects stay untyped `map[string]any` values.
	Flatten,
}

/// Input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
	/// JSON text.
	Json,
	/// YAML text.
	Yaml,
}

impl Format {
	/// Lowercase format name, also the default tag key.
	pub fn name(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}

	/// Guess from a file extension; anything but `.yaml`/`.yml` is JSON.
	pub fn from_path(path: &Path) -> Self {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Self::Yaml,
			_ => Self::Json,
		}
	}
}

/// Default inference depth ceiling, equal to `serde_json`'s recursion limit.
pub const DEFAULT_MAX_DEPTH: u32 = 128;

/// Inference behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferOptions {
	/// Nested object handling.
	pub nest: NestPolicy,
	/// Attach a tag carrying the original key to every field.
	pub use_tags: bool,
	/// Tag name override; defaults to the input format name.
	pub tag_key: Option<String>,
	/// Display name of the root record type.
	pub display_name: String,
	/// Maximum nesting depth walked in the input tree. The default matches the recursion
	/// limit of the JSON parser, so any document it accepts is within range.
	pub max_depth: u32,
}

impl Default for InferOptions {
	fn default() -> Self {
		Self {
			nest: NestPolicy::Nested,
			use_tags: true,
			tag_key: None,
			display_name: DEFAULT_DISPLAY_NAME.to_owned(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl InferOptions {
	/// Preset that keeps nested objects as untyped maps.
	pub fn flat() -> Self {
		Self {
			nest: NestPolicy::Flatten,
			..Self::default()
		}
	}

	/// Load options from a YAML (or JSON) file; missing keys keep their defaults.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		serde_yaml::from_slice(&bytes).map_err(|err| RecordError::MalformedInput {
			format: "yaml",
			detail: err.to_string(),
		})
	}
}

/// Derive a record type from an untyped tree.
///
/// Objects map to records field by field. Arrays take the shape of their first element, and
/// an empty array gives a record type without fields. Any other root is `UnsupportedKind`.
pub fn derive_record_type(node: &Value, format: Format, options: &InferOptions) -> Result<RecordType> {
	Inference::new(format, options).record_type_for(node, 0)
}

/// Infers a record type from one JSON/YAML document and decodes the document into it.
///
/// Decoding consumes the decoder; create a new one per input.
#[derive(Debug, Clone)]
pub struct SchemaDecoder {
	format: Format,
	options: InferOptions,
	tree: Value,
}

impl SchemaDecoder {
	/// Parse JSON bytes.
	pub fn from_json(bytes: &[u8], options: InferOptions) -> Result<Self> {
		let tree = serde_json::from_slice::<serde_json::Value>(bytes).map_err(|err| RecordError::MalformedInput {
			format: "json",
			detail: err.to_string(),
		})?;
		Ok(Self::from_value(Value::from_json(tree), Format::Json, options))
	}

	/// Parse YAML bytes.
	pub fn from_yaml(bytes: &[u8], options: InferOptions) -> Result<Self> {
		let tree = serde_yaml::from_slice::<serde_yaml::Value>(bytes).map_err(|err| RecordError::MalformedInput {
			format: "yaml",
			detail: err.to_string(),
		})?;
		Ok(Self::from_value(Value::from_yaml(tree), Format::Yaml, options))
	}

	/// Parse bytes in the given format.
	pub fn from_bytes(bytes: &[u8], format: Format, options: InferOptions) -> Result<Self> {
		match format {
			Format::Json => Self::from_json(bytes, options),
			Format::Yaml => Self::from_yaml(bytes, options),
		}
	}

	/// Wrap an already-parsed tree.
	pub fn from_value(tree: Value, format: Format, options: InferOptions) -> Self {
		tracing::debug!(format = format.name(), root = tree.kind_name(), "input unmarshaled");
		Self { format, options, tree }
	}

	/// Parsed input tree.
	pub fn tree(&self) -> &Value {
		&self.tree
	}

	/// Inferred record type, without decoding.
	pub fn record_type(&self) -> Result<RecordType> {
		derive_record_type(&self.tree, self.format, &self.options)
	}

	/// Infer the record type and decode every root record into it.
	pub fn decode(self) -> Result<Decoded> {
		let mut inference = Inference::new(self.format, &self.options);
		let record_type = inference.record_type_for(&self.tree, 0)?;

		let (instances, is_array) = match &self.tree {
			Value::Map(map) => (vec![inference.decode_root(map, &record_type)?], false),
			Value::Slice(items) => {
				let mut instances = Vec::with_capacity(items.len());
				inference.decode_items(items, &record_type, "", &mut instances)?;
				(instances, true)
			}
			other => return Err(unsupported_root(other)),
		};

		tracing::debug!(record = record_type.name(), instances = instances.len(), is_array, "input compiled");
		Ok(Decoded {
			record_type,
			instances,
			is_array,
		})
	}
}

/// Result of a [`SchemaDecoder`] run.
#[derive(Debug, Clone)]
pub struct Decoded {
	record_type: RecordType,
	instances: Vec<Instance>,
	is_array: bool,
}

impl Decoded {
	/// Inferred record type.
	pub fn record_type(&self) -> &RecordType {
		&self.record_type
	}

	/// Decoded root records; one for an object root, one per element for an array root.
	/// Null array elements decode as zero-valued records.
	pub fn instances(&self) -> &[Instance] {
		&self.instances
	}

	/// First decoded record.
	pub fn first(&self) -> Option<&Instance> {
		self.instances.first()
	}

	/// Whether the input root was an array.
	pub fn is_array(&self) -> bool {
		self.is_array
	}

	/// Accessor over the first decoded record.
	pub fn accessor(&self) -> Option<Accessor<'_>> {
		self.first().map(|instance| Accessor::new(instance))
	}

	/// Accessors over every decoded record.
	pub fn accessors(&self) -> impl Iterator<Item = Accessor<'_>> {
		self.instances.iter().map(|instance| Accessor::new(instance))
	}

	/// Decoded data as a value: a record for an object root, a slice for an array root.
	pub fn into_value(mut self) -> Value {
		if self.is_array {
			Value::Slice(self.instances.into_iter().map(Value::Record).collect())
		} else {
			self.instances.pop().map_or(Value::Null, Value::Record)
		}
	}
}

struct Inference<'o> {
	options: &'o InferOptions,
	tag_key: &'o str,
	names: NameTable,
}

impl<'o> Inference<'o> {
	fn new(format: Format, options: &'o InferOptions) -> Self {
		Self {
			options,
			tag_key: options.tag_key.as_deref().unwrap_or(format.name()),
			names: NameTable::default(),
		}
	}

	fn record_type_for(&mut self, node: &Value, depth: u32) -> Result<RecordType> {
		self.check_depth(depth)?;
		let options = self.options;
		match node {
			Value::Map(map) => self.record_type_for_map(map, &options.display_name, depth),
			// TODO: merge element shapes across the whole array behind an opt-in policy; only the
			// first element is inspected today and later elements are decoded against its shape.
			Value::Slice(items) => match items.first() {
				Some(first) => self.record_type_for(first, depth + 1),
				None => Ok(RecordType::empty(options.display_name.as_str())),
			},
			other => Err(unsupported_root(other)),
		}
	}

	fn record_type_for_map(&mut self, map: &ValueMap, display_name: &str, depth: u32) -> Result<RecordType> {
		let mut builder = RecordTypeBuilder::new();
		builder.set_display_name(display_name);
		let mut claimed: BTreeMap<String, &str> = BTreeMap::new();
		for (key, value) in map {
			let name = self.names.field_name(key).to_owned();
			if let Some(kept) = claimed.get(&name) {
				tracing::warn!(field = %name, kept = %kept, dropped = %key, "source keys collide after camel-casing; keeping the first");
				continue;
			}
			claimed.insert(name.clone(), key);
			let shape = self.shape_for(value, &name, depth + 1)?;
			tracing::trace!(key = %key, field = %name, kind = %shape.kind(), "inferred field");

			let field = FieldDescriptor::new(name, shape);
			builder.add_field(if self.options.use_tags {
				field.with_tag(format!("{}:{:?}", self.tag_key, key))
			} else {
				field
			});
		}
		builder.build()
	}

	fn shape_for(&mut self, value: &Value, field: &str, depth: u32) -> Result<Shape> {
		self.check_depth(depth)?;
		Ok(match value {
			Value::Map(map) if self.options.nest == NestPolicy::Nested && !map.is_empty() => {
				Shape::Record(self.record_type_for_map(map, field, depth)?)
			}
			Value::Slice(items) => match items.first() {
				Some(first) => Shape::slice(self.shape_for(first, field, depth + 1)?),
				None => Shape::slice(Shape::Any),
			},
			other => Shape::of_sample(other),
		})
	}

	fn decode_root(&mut self, map: &ValueMap, record_type: &RecordType) -> Result<Instance> {
		let renamed = self.camel_case_map(map, record_type);
		record_type.decode_map(&renamed)
	}

	fn decode_items(&mut self, items: &[Value], record_type: &RecordType, prefix: &str, out: &mut Vec<Instance>) -> Result<()> {
		for (idx, item) in items.iter().enumerate() {
			match item {
				Value::Map(map) => {
					if idx > 0 && map.keys().any(|key| record_type.field(self.names.field_name(key)).is_none()) {
						tracing::warn!(index = idx, "array element has keys outside the shape inferred from the first element");
					}
					out.push(self.decode_root(map, record_type)?);
				}
				Value::Slice(nested) => self.decode_items(nested, record_type, &format!("{prefix}[{idx}]"), out)?,
				Value::Null => {
					tracing::debug!(index = idx, "null array element decoded as zero-valued record");
					out.push(record_type.new_instance());
				}
				other => {
					return Err(RecordError::UnsupportedKind {
						found: format!("{} at {prefix}[{idx}]", other.kind_name()),
					});
				}
			}
		}
		Ok(())
	}

	/// Rename object keys to field names wherever the shape says a record is expected.
	fn camel_case_keys(&mut self, value: &Value, shape: &Shape) -> Value {
		match (shape.pointee(), value) {
			(Shape::Record(record_type), Value::Map(map)) => Value::Map(self.camel_case_map(map, record_type)),
			(Shape::Slice(elem), Value::Slice(items)) => Value::Slice(items.iter().map(|item| self.camel_case_keys(item, elem)).collect()),
			_ => value.clone(),
		}
	}

	fn camel_case_map(&mut self, map: &ValueMap, record_type: &RecordType) -> ValueMap {
		let mut out = ValueMap::new();
		for (key, value) in map {
			let name = self.names.field_name(key).to_owned();
			let Some(field) = record_type.field(&name) else {
				tracing::debug!(key = %key, record = record_type.name(), "dropping key absent from inferred shape");
				continue;
			};
			if out.contains_key(&name) {
				tracing::debug!(key = %key, field = %name, "dropping key colliding with an earlier key");
				continue;
			}
			let renamed = self.camel_case_keys(value, &field.shape);
			out.insert(name, renamed);
		}
		out
	}

	fn check_depth(&self, depth: u32) -> Result<()> {
		if depth > self.options.max_depth {
			return Err(RecordError::DecodeDepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Ok(())
	}
}

fn unsupported_root(node: &Value) -> RecordError {
	RecordError::UnsupportedKind {
		found: format!("{} root (expected object or array of objects)", node.kind_name()),
	}
}
