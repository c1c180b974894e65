use std::borrow::Cow;

use crate::record::{
	Accessor, FieldDescriptor, FieldSource, Instance, Kind, RecordError, RecordType, RecordTypeBuilder, Shape, Value, ValueMap,
};

fn pet(name: &str, legs: i64) -> Value {
	let mut map = ValueMap::new();
	map.insert("Name".to_owned(), Value::from(name));
	map.insert("Legs".to_owned(), Value::Int(legs));
	Value::Map(map)
}

fn owner() -> Instance {
	let pet_type = RecordTypeBuilder::new()
		.add_string("Name", None)
		.add_int("Legs", None)
		.build()
		.expect("pet builds");
	let record_type: RecordType = RecordTypeBuilder::new()
		.add_string("Name", None)
		.add_float64("Age", None)
		.add_bool("Active", None)
		.add_any("Nickname", None)
		.add_nested_record_type("Best", &pet_type, true, None)
		.add_slice("Pets", Shape::Record(pet_type), None)
		.add_slice("Scores", Shape::Any, None)
		.add_map("Labels", Shape::String, Shape::String, None)
		.add_chan_recv("Events", Shape::Int, None)
		.build()
		.expect("owner builds");

	let mut values = ValueMap::new();
	values.insert("Name".to_owned(), Value::from("Ann"));
	values.insert("Age".to_owned(), Value::Float(30.0));
	values.insert("Active".to_owned(), Value::Bool(true));
	values.insert("Nickname".to_owned(), Value::Null);
	values.insert("Best".to_owned(), pet("Rex", 4));
	values.insert("Pets".to_owned(), Value::Slice(vec![pet("Rex", 4), pet("Tweety", 2)]));
	values.insert("Scores".to_owned(), Value::Slice(vec![pet("Solo", 1), Value::Int(7), pet("Duo", 2)]));
	record_type.decode_map(&values).expect("owner decodes")
}

#[test]
fn getters_read_typed_values() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	assert_eq!(accessor.get_string("Name"), "Ann");
	assert_eq!(accessor.get_float64("Age"), 30.0);
	assert_eq!(accessor.get_int64("Age"), 30);
	assert!(accessor.get_bool("Active"));
}

#[test]
fn getters_degrade_to_zero_values() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	assert_eq!(accessor.get_string("Age"), "");
	assert_eq!(accessor.get_int64("Name"), 0);
	assert_eq!(accessor.get_float64("Missing"), 0.0);
	assert!(!accessor.get_bool("Missing"));
	assert!(accessor.get("Missing").is_none());
	assert!(!accessor.has_field("Missing"));
}

#[test]
fn kind_predicates_follow_descriptors() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	assert!(accessor.is_record("Best"));
	assert!(accessor.is_pointer("Best"));
	assert!(accessor.is_slice("Pets"));
	assert!(accessor.is_map("Labels"));
	assert!(accessor.is_chan("Events"));
	assert!(!accessor.is_func("Events"));
	assert!(accessor.is_kind("Name", Kind::String));
	assert_eq!(accessor.kind("Missing"), None);
	assert!(accessor.is_nil("Nickname"));
	assert!(accessor.is_nil("Labels"));
	assert!(!accessor.is_nil("Name"));
	assert!(!accessor.is_nil("Missing"));
}

#[test]
fn nested_record_accessor() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	let mut best = accessor.record("Best").expect("best is a record");
	assert_eq!(best.get_string("Name"), "Rex");
	assert_eq!(best.get_int64("Legs"), 4);

	assert!(matches!(accessor.record("Name"), Err(RecordError::NotRecord { .. })));
	assert!(matches!(accessor.record("Missing"), Err(RecordError::MissingField { .. })));
}

#[test]
fn map_over_slice_visits_elements_in_order() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	let names = accessor
		.map_over_slice("Pets", |idx, pet| format!("{idx}:{}", pet.get_string("Name")))
		.expect("pets is a slice");
	assert_eq!(names, [Some("0:Rex".to_owned()), Some("1:Tweety".to_owned())]);
}

#[test]
fn map_over_slice_substitutes_non_record_elements() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	let legs = accessor
		.map_over_slice("Scores", |_, item| item.get_int64("Legs"))
		.expect("scores is a slice");
	assert_eq!(legs, [Some(1), None, Some(2)]);
}

#[test]
fn map_over_slice_rejects_non_slices() {
	let instance = owner();
	let mut accessor = Accessor::new(&instance);
	let err = accessor.map_over_slice("Name", |_, _| ()).expect_err("name is not a slice");
	assert!(matches!(err, RecordError::NotSlice { ref field } if field == "Name"));
	assert!(accessor.map_over_slice("Missing", |_, _| ()).is_err());
}

#[test]
fn map_values_are_accessible() {
	let mut map = ValueMap::new();
	map.insert("city".to_owned(), Value::from("Oslo"));
	map.insert("zip".to_owned(), Value::Int(150));
	let mut accessor = Accessor::new(&map);

	assert_eq!(accessor.field_names(), ["city", "zip"]);
	assert_eq!(accessor.get_string("city"), "Oslo");
	assert!(accessor.is_kind("zip", Kind::Int));
}

struct Counting {
	reads: std::cell::Cell<usize>,
	value: Value,
}

impl FieldSource for Counting {
	fn field_names(&self) -> Vec<&str> {
		vec!["Only"]
	}

	fn field_descriptor(&self, name: &str) -> Option<FieldDescriptor> {
		(name == "Only").then(|| FieldDescriptor::new(name, Shape::Int))
	}

	fn field_value(&self, name: &str) -> Option<Cow<'_, Value>> {
		self.reads.set(self.reads.get() + 1);
		(name == "Only").then(|| Cow::Borrowed(&self.value))
	}
}

#[test]
fn values_are_read_once_per_name() {
	let source = Counting {
		reads: std::cell::Cell::new(0),
		value: Value::Int(9),
	};
	let mut accessor = Accessor::new(&source);
	assert_eq!(accessor.get_int64("Only"), 9);
	assert_eq!(accessor.get_int64("Only"), 9);
	assert!(accessor.get("Other").is_none());
	assert!(accessor.get("Other").is_none());
	assert_eq!(source.reads.get(), 2);
}
