use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors produced while building record types, decoding values, and reading fields.
#[derive(Debug, Error)]
pub enum RecordError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// A field was declared with an empty name.
	#[error("field name must not be empty")]
	EmptyFieldName,
	/// A field name is not a valid identifier.
	#[error("invalid field name: {name:?}")]
	InvalidFieldName {
		/// Offending field name.
		name: String,
	},
	/// A nested record source carries no fields.
	#[error("nested record for field {field} has no fields")]
	EmptyNestedRecord {
		/// Field holding the nested record.
		field: String,
	},
	/// A map field was declared with a non-scalar key shape.
	#[error("map field {field} has unsupported key kind {kind}")]
	InvalidMapKey {
		/// Map field name.
		field: String,
		/// Rejected key kind.
		kind: &'static str,
	},
	/// The same field name was declared twice with different shapes.
	#[error("field {name} declared as both {first} and {second}")]
	ConflictingField {
		/// Conflicting field name.
		name: String,
		/// Kind of the first declaration.
		first: &'static str,
		/// Kind of the later declaration.
		second: &'static str,
	},
	/// A value is incompatible with the kind of the slot it was assigned to.
	#[error("decode field {field}: expected {expected}, got {got}")]
	DecodeMismatch {
		/// Dotted/indexed path of the offending slot.
		field: String,
		/// Kind the slot accepts.
		expected: &'static str,
		/// Kind of the supplied value.
		got: &'static str,
	},
	/// Input nesting exceeded the configured inference depth.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Named field does not exist on the record.
	#[error("missing field {field}")]
	MissingField {
		/// Requested field name.
		field: String,
	},
	/// Field exists but is not slice-shaped.
	#[error("field {field} is not a slice")]
	NotSlice {
		/// Requested field name.
		field: String,
	},
	/// Field exists but is not record-shaped.
	#[error("field {field} is not a record")]
	NotRecord {
		/// Requested field name.
		field: String,
	},
	/// Input tree has a shape with no record mapping.
	#[error("unsupported input kind: {found}")]
	UnsupportedKind {
		/// Description of the rejected node.
		found: String,
	},
	/// Input bytes could not be parsed.
	#[error("malformed {format} input: {detail}")]
	MalformedInput {
		/// Input format name.
		format: &'static str,
		/// Parser message.
		detail: String,
	},
}

impl RecordError {
	/// Whether the error rejects the shape of the input itself (root scalar, null, unparsable bytes).
	pub fn is_unsupported_kind(&self) -> bool {
		matches!(self, Self::UnsupportedKind { .. } | Self::MalformedInput { .. })
	}
}
