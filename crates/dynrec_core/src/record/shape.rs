use std::fmt;

use crate::record::{RecordType, Value};

/// Top-level classification of a field shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Boolean scalar.
	Bool,
	/// Signed integer scalar.
	Int,
	/// 64-bit float scalar.
	Float64,
	/// UTF-8 string scalar.
	String,
	/// Keyed collection.
	Map,
	/// Ordered sequence.
	Slice,
	/// Send-only channel.
	ChanSend,
	/// Receive-only channel.
	ChanRecv,
	/// Bidirectional channel.
	ChanBoth,
	/// Function value.
	Func,
	/// Nested record.
	Record,
	/// Untyped slot accepting any value.
	Any,
}

impl Kind {
	/// Stable lowercase label used in errors and listings.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float64 => "float64",
			Self::String => "string",
			Self::Map => "map",
			Self::Slice => "slice",
			Self::ChanSend => "chan_send",
			Self::ChanRecv => "chan_recv",
			Self::ChanBoth => "chan",
			Self::Func => "func",
			Self::Record => "record",
			Self::Any => "any",
		}
	}

	/// Whether values of this kind can key a map.
	pub fn is_scalar(self) -> bool {
		matches!(self, Self::Bool | Self::Int | Self::Float64 | Self::String | Self::Any)
	}

	/// Whether this is one of the channel kinds.
	pub fn is_chan(self) -> bool {
		matches!(self, Self::ChanSend | Self::ChanRecv | Self::ChanBoth)
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
	/// Send and receive.
	Both,
	/// Send only.
	Send,
	/// Receive only.
	Recv,
}

/// Recursive type description of one slot.
///
/// Composite variants carry their element (and key) shapes, so a map, slice, channel, or
/// function shape can never be missing its element description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
	/// Boolean scalar.
	Bool,
	/// Signed integer scalar.
	Int,
	/// 64-bit float scalar.
	Float64,
	/// UTF-8 string scalar.
	String,
	/// Untyped slot.
	Any,
	/// Keyed collection.
	Map {
		/// Key shape, must be scalar.
		key: Box<Shape>,
		/// Value shape.
		value: Box<Shape>,
	},
	/// Ordered sequence.
	Slice(Box<Shape>),
	/// Channel of elements.
	Chan {
		/// Permitted direction.
		dir: ChanDir,
		/// Element shape.
		elem: Box<Shape>,
	},
	/// Function signature.
	Func {
		/// Argument shapes.
		args: Vec<Shape>,
		/// Return shapes.
		returns: Vec<Shape>,
	},
	/// Nested record of a compiled type.
	Record(RecordType),
	/// Nullable indirection to another shape.
	Pointer(Box<Shape>),
}

impl Shape {
	/// Map shape from key and value shapes.
	pub fn map(key: Shape, value: Shape) -> Self {
		Self::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// Slice shape from an element shape.
	pub fn slice(elem: Shape) -> Self {
		Self::Slice(Box::new(elem))
	}

	/// Channel shape from direction and element shape.
	pub fn chan(dir: ChanDir, elem: Shape) -> Self {
		Self::Chan { dir, elem: Box::new(elem) }
	}

	/// Function shape from argument and return shapes.
	pub fn func(args: Vec<Shape>, returns: Vec<Shape>) -> Self {
		Self::Func { args, returns }
	}

	/// Pointer to `inner`; pointers do not stack.
	pub fn pointer(inner: Shape) -> Self {
		match inner {
			Self::Pointer(_) => inner,
			other => Self::Pointer(Box::new(other)),
		}
	}

	/// Derive a shape from a sample value.
	///
	/// Null samples give `Any`, maps give `map[string]any`, and slices take the shape of their
	/// first element.
	pub fn of_sample(sample: &Value) -> Self {
		match sample {
			Value::Null => Self::Any,
			Value::Bool(_) => Self::Bool,
			Value::Int(_) => Self::Int,
			Value::Float(_) => Self::Float64,
			Value::String(_) => Self::String,
			Value::Map(_) => Self::map(Self::String, Self::Any),
			Value::Slice(items) => Self::slice(items.first().map_or(Self::Any, Self::of_sample)),
			Value::Record(instance) => Self::Record(instance.record_type().clone()),
		}
	}

	/// Kind of the shape, looking through pointers.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Bool => Kind::Bool,
			Self::Int => Kind::Int,
			Self::Float64 => Kind::Float64,
			Self::String => Kind::String,
			Self::Any => Kind::Any,
			Self::Map { .. } => Kind::Map,
			Self::Slice(_) => Kind::Slice,
			Self::Chan { dir: ChanDir::Both, .. } => Kind::ChanBoth,
			Self::Chan { dir: ChanDir::Send, .. } => Kind::ChanSend,
			Self::Chan { dir: ChanDir::Recv, .. } => Kind::ChanRecv,
			Self::Func { .. } => Kind::Func,
			Self::Record(_) => Kind::Record,
			Self::Pointer(inner) => inner.kind(),
		}
	}

	/// Whether the shape is a pointer.
	pub fn is_pointer(&self) -> bool {
		matches!(self, Self::Pointer(_))
	}

	/// Shape behind any pointer indirection.
	pub fn pointee(&self) -> &Shape {
		match self {
			Self::Pointer(inner) => inner.pointee(),
			other => other,
		}
	}

	/// Element shape of a map, slice, or channel.
	pub fn element(&self) -> Option<&Shape> {
		match self.pointee() {
			Self::Map { value, .. } => Some(&**value),
			Self::Slice(elem) | Self::Chan { elem, .. } => Some(&**elem),
			_ => None,
		}
	}

	/// Key shape of a map.
	pub fn key(&self) -> Option<&Shape> {
		match self.pointee() {
			Self::Map { key, .. } => Some(&**key),
			_ => None,
		}
	}

	/// Nested record type, if record-shaped.
	pub fn record_type(&self) -> Option<&RecordType> {
		match self.pointee() {
			Self::Record(record_type) => Some(record_type),
			_ => None,
		}
	}

	/// Zero value stored in a fresh slot of this shape.
	pub(crate) fn zero_value(&self) -> Value {
		match self {
			Self::Bool => Value::Bool(false),
			Self::Int => Value::Int(0),
			Self::Float64 => Value::Float(0.0),
			Self::String => Value::String("".into()),
			Self::Record(record_type) => Value::Record(record_type.new_instance()),
			Self::Any | Self::Map { .. } | Self::Slice(_) | Self::Chan { .. } | Self::Func { .. } | Self::Pointer(_) => Value::Null,
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = String::new();
		write_shape(&mut out, self, 0);
		f.write_str(&out)
	}
}

/// Append the declaration text of `shape`; nested records open brace blocks at `depth + 1`.
pub(crate) fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
	match shape {
		Shape::Bool => out.push_str("bool"),
		Shape::Int => out.push_str("int"),
		Shape::Float64 => out.push_str("float64"),
		Shape::String => out.push_str("string"),
		Shape::Any => out.push_str("any"),
		Shape::Map { key, value } => {
			out.push_str("map[");
			write_shape(out, key, depth);
			out.push(']');
			write_shape(out, value, depth);
		}
		Shape::Slice(elem) => {
			out.push_str("[]");
			write_shape(out, elem, depth);
		}
		Shape::Chan { dir, elem } => {
			out.push_str(match dir {
				ChanDir::Both => "chan ",
				ChanDir::Send => "chan<- ",
				ChanDir::Recv => "<-chan ",
			});
			write_shape(out, elem, depth);
		}
		Shape::Func { args, returns } => {
			out.push_str("func(");
			write_list(out, args, depth);
			out.push(')');
			match returns.as_slice() {
				[] => {}
				[single] => {
					out.push(' ');
					write_shape(out, single, depth);
				}
				many => {
					out.push_str(" (");
					write_list(out, many, depth);
					out.push(')');
				}
			}
		}
		Shape::Record(record_type) => {
			out.push_str("struct ");
			write_record_body(out, record_type, depth);
		}
		Shape::Pointer(inner) => {
			out.push('*');
			write_shape(out, inner, depth);
		}
	}
}

/// Append `{`, one line per field at `depth + 1`, and the closing brace at `depth`.
pub(crate) fn write_record_body(out: &mut String, record_type: &RecordType, depth: usize) {
	out.push_str("{\n");
	for field in record_type.fields() {
		push_indent(out, depth + 1);
		out.push_str(&field.name);
		out.push(' ');
		write_shape(out, &field.shape, depth + 1);
		if let Some(tag) = field.tag.as_deref() {
			out.push_str(" `");
			out.push_str(tag);
			out.push('`');
		}
		out.push('\n');
	}
	push_indent(out, depth);
	out.push('}');
}

fn write_list(out: &mut String, shapes: &[Shape], depth: usize) {
	for (idx, shape) in shapes.iter().enumerate() {
		if idx > 0 {
			out.push_str(", ");
		}
		write_shape(out, shape, depth);
	}
}

fn push_indent(out: &mut String, depth: usize) {
	for _ in 0..depth {
		out.push('\t');
	}
}

#[cfg(test)]
mod tests;
