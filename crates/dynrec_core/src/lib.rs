//! Runtime-built record types: describe named, typed fields at runtime, decode loosely-typed
//! JSON/YAML into instances of them, and read fields back by name.

/// Record type construction, value model, schema inference, and field accessors.
pub mod record;
