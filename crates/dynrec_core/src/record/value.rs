use std::collections::BTreeMap;

use crate::record::Instance;

/// String-keyed mapping as produced by JSON/YAML objects.
pub type ValueMap = BTreeMap<String, Value>;

/// Runtime value held by a record slot or an untyped input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Null or nil.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// 64-bit float scalar.
	Float(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// String-keyed mapping.
	Map(ValueMap),
	/// Ordered sequence.
	Slice(Vec<Value>),
	/// Record instance.
	Record(Instance),
}

impl Value {
	/// Stable lowercase label of the runtime kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float64",
			Self::String(_) => "string",
			Self::Map(_) => "map",
			Self::Slice(_) => "slice",
			Self::Record(_) => "record",
		}
	}

	/// Whether the value is null.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow as boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Integer view; integral floats convert.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			Self::Float(value) => float_to_i64(*value),
			_ => None,
		}
	}

	/// Float view; integers widen.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float(value) => Some(*value),
			Self::Int(value) => Some(*value as f64),
			_ => None,
		}
	}

	/// Borrow as string slice.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow as mapping.
	pub fn as_map(&self) -> Option<&ValueMap> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow as sequence.
	pub fn as_slice(&self) -> Option<&[Value]> {
		match self {
			Self::Slice(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow as record instance.
	pub fn as_record(&self) -> Option<&Instance> {
		match self {
			Self::Record(instance) => Some(instance),
			_ => None,
		}
	}

	/// Convert a JSON tree. Every number becomes `Float`, matching JSON's single numeric type.
	pub fn from_json(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(number) => Self::Float(number.as_f64().unwrap_or_default()),
			serde_json::Value::String(value) => Self::String(value.into_boxed_str()),
			serde_json::Value::Array(items) => Self::Slice(items.into_iter().map(Self::from_json).collect()),
			serde_json::Value::Object(map) => Self::Map(map.into_iter().map(|(key, value)| (key, Self::from_json(value))).collect()),
		}
	}

	/// Convert a YAML tree. Integers stay `Int`; mapping keys are rendered to text.
	pub fn from_yaml(value: serde_yaml::Value) -> Self {
		match value {
			serde_yaml::Value::Null => Self::Null,
			serde_yaml::Value::Bool(value) => Self::Bool(value),
			serde_yaml::Value::Number(number) => match number.as_i64() {
				Some(value) => Self::Int(value),
				None => Self::Float(number.as_f64().unwrap_or_default()),
			},
			serde_yaml::Value::String(value) => Self::String(value.into_boxed_str()),
			serde_yaml::Value::Sequence(items) => Self::Slice(items.into_iter().map(Self::from_yaml).collect()),
			serde_yaml::Value::Mapping(mapping) => {
				let mut out = ValueMap::new();
				for (key, value) in mapping {
					let Some(key) = yaml_key_text(&key) else {
						tracing::warn!(kind = ?key, "skipping yaml mapping entry with non-scalar key");
						continue;
					};
					out.insert(key, Self::from_yaml(value));
				}
				Self::Map(out)
			}
			serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
		}
	}

	/// Convert to a JSON tree. Records become objects in field order; non-finite floats become null.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Null => serde_json::Value::Null,
			Self::Bool(value) => serde_json::Value::Bool(*value),
			Self::Int(value) => serde_json::Value::from(*value),
			Self::Float(value) => serde_json::Number::from_f64(*value).map_or(serde_json::Value::Null, serde_json::Value::Number),
			Self::String(value) => serde_json::Value::String(value.to_string()),
			Self::Map(map) => serde_json::Value::Object(map.iter().map(|(key, value)| (key.clone(), value.to_json())).collect()),
			Self::Slice(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
			Self::Record(instance) => serde_json::Value::Object(
				instance
					.fields()
					.map(|(field, value)| (field.name.to_string(), value.to_json()))
					.collect(),
			),
		}
	}
}

pub(crate) fn float_to_i64(value: f64) -> Option<i64> {
	if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
		Some(value as i64)
	} else {
		None
	}
}

fn yaml_key_text(key: &serde_yaml::Value) -> Option<String> {
	match key {
		serde_yaml::Value::String(text) => Some(text.clone()),
		serde_yaml::Value::Number(number) => Some(number.to_string()),
		serde_yaml::Value::Bool(value) => Some(value.to_string()),
		serde_yaml::Value::Null => Some("null".to_owned()),
		serde_yaml::Value::Tagged(tagged) => yaml_key_text(&tagged.value),
		serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::Slice(items)
	}
}

impl From<ValueMap> for Value {
	fn from(map: ValueMap) -> Self {
		Self::Map(map)
	}
}

impl From<Instance> for Value {
	fn from(instance: Instance) -> Self {
		Self::Record(instance)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		Self::from_json(value)
	}
}

impl From<serde_yaml::Value> for Value {
	fn from(value: serde_yaml::Value) -> Self {
		Self::from_yaml(value)
	}
}

#[cfg(test)]
mod tests;
