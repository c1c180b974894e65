use crate::record::value::float_to_i64;
use crate::record::{RecordError, Result, Shape, Value, ValueMap};

/// Check `value` against `shape` and produce the value stored in the slot at `path`.
///
/// Null assigns the shape's zero value. Ints widen to floats and integral floats narrow to
/// ints; every other mismatch is a `DecodeMismatch`.
pub(crate) fn assign(shape: &Shape, value: &Value, path: &str) -> Result<Value> {
	if value.is_null() {
		return Ok(shape.zero_value());
	}

	match shape {
		Shape::Pointer(inner) => assign(inner, value, path),
		Shape::Any => Ok(value.clone()),
		Shape::Bool => match value {
			Value::Bool(_) => Ok(value.clone()),
			_ => Err(mismatch(shape, value, path)),
		},
		Shape::Int => match value {
			Value::Int(_) => Ok(value.clone()),
			Value::Float(item) => float_to_i64(*item).map(Value::Int).ok_or_else(|| mismatch(shape, value, path)),
			_ => Err(mismatch(shape, value, path)),
		},
		Shape::Float64 => match value {
			Value::Float(_) => Ok(value.clone()),
			Value::Int(item) => Ok(Value::Float(*item as f64)),
			_ => Err(mismatch(shape, value, path)),
		},
		Shape::String => match value {
			Value::String(_) => Ok(value.clone()),
			_ => Err(mismatch(shape, value, path)),
		},
		Shape::Map { key, value: value_shape } => {
			let Value::Map(map) = value else {
				return Err(mismatch(shape, value, path));
			};
			let mut out = ValueMap::new();
			for (entry_key, entry_value) in map {
				let entry_path = format!("{path}[{entry_key:?}]");
				check_key(key, entry_key, &entry_path)?;
				out.insert(entry_key.clone(), assign(value_shape, entry_value, &entry_path)?);
			}
			Ok(Value::Map(out))
		}
		Shape::Slice(elem) => {
			let Value::Slice(items) = value else {
				return Err(mismatch(shape, value, path));
			};
			let mut out = Vec::with_capacity(items.len());
			for (idx, item) in items.iter().enumerate() {
				out.push(assign(elem, item, &format!("{path}[{idx}]"))?);
			}
			Ok(Value::Slice(out))
		}
		Shape::Record(record_type) => match value {
			Value::Map(map) => record_type.decode_map_at(map, path).map(Value::Record),
			Value::Record(instance) if instance.record_type() == record_type => Ok(value.clone()),
			_ => Err(mismatch(shape, value, path)),
		},
		Shape::Chan { .. } | Shape::Func { .. } => Err(mismatch(shape, value, path)),
	}
}

/// Map keys are stored as text; a non-string key shape restricts which texts parse.
fn check_key(key: &Shape, text: &str, path: &str) -> Result<()> {
	let accepted = match key.pointee() {
		Shape::String | Shape::Any => true,
		Shape::Int => text.parse::<i64>().is_ok(),
		Shape::Float64 => text.parse::<f64>().is_ok(),
		Shape::Bool => text.parse::<bool>().is_ok(),
		_ => false,
	};
	if accepted {
		Ok(())
	} else {
		Err(RecordError::DecodeMismatch {
			field: path.to_owned(),
			expected: key.kind().as_str(),
			got: "string key",
		})
	}
}

fn mismatch(shape: &Shape, value: &Value, path: &str) -> RecordError {
	RecordError::DecodeMismatch {
		field: path.to_owned(),
		expected: shape.kind().as_str(),
		got: value.kind_name(),
	}
}
