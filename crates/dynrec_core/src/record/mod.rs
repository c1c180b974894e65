mod accessor;
mod assign;
mod builder;
mod descriptor;
mod error;
mod infer;
mod instance;
mod naming;
mod record_type;
mod shape;
mod value;

/// Cached by-name field reader and the source trait it reads through.
pub use accessor::{Accessor, FieldSource};
/// Field-by-field record type builder.
pub use builder::RecordTypeBuilder;
/// Single field declaration.
pub use descriptor::FieldDescriptor;
/// Error and result aliases.
pub use error::{RecordError, Result};
/// Schema inference from untyped JSON/YAML trees.
pub use infer::{DEFAULT_MAX_DEPTH, Decoded, Format, InferOptions, NestPolicy, SchemaDecoder, derive_record_type};
/// Record instance storage.
pub use instance::Instance;
/// Source-key to field-name conversion.
pub use naming::to_field_name;
/// Compiled record type.
pub use record_type::{DEFAULT_DISPLAY_NAME, RecordType};
/// Field shape descriptors.
pub use shape::{ChanDir, Kind, Shape};
/// Runtime value types.
pub use value::{Value, ValueMap};
