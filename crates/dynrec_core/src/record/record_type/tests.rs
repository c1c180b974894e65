use crate::record::{RecordError, RecordType, RecordTypeBuilder, Shape, Value, ValueMap};

fn person_type() -> RecordType {
	let address = RecordTypeBuilder::new()
		.add_string("Street", None)
		.add_int("Zip", None)
		.build()
		.expect("address builds");
	RecordTypeBuilder::new()
		.set_display_name("Person")
		.add_string("Name", Some("json:\"name\""))
		.add_int("Age", None)
		.add_float64("Height", None)
		.add_nested_record_type("Address", &address, false, None)
		.add_slice("Tags", Shape::String, None)
		.build()
		.expect("person builds")
}

fn map(entries: &[(&str, Value)]) -> ValueMap {
	entries.iter().map(|(key, value)| ((*key).to_owned(), value.clone())).collect()
}

#[test]
fn decode_map_fills_present_fields_and_zeroes_the_rest() {
	let record_type = person_type();
	let instance = record_type
		.decode_map(&map(&[("Name", Value::from("Ann")), ("Age", Value::Float(30.0)), ("Unknown", Value::Bool(true))]))
		.expect("decode succeeds");

	assert_eq!(instance.get("Name"), Some(&Value::from("Ann")));
	assert_eq!(instance.get("Age"), Some(&Value::Int(30)));
	assert_eq!(instance.get("Height"), Some(&Value::Float(0.0)));
	assert_eq!(instance.get("Tags"), Some(&Value::Null));
	assert_eq!(instance.get("Unknown"), None);

	let Some(Value::Record(address)) = instance.get("Address") else {
		panic!("nested record should be zero-valued, not null");
	};
	assert_eq!(address.get("Zip"), Some(&Value::Int(0)));
}

#[test]
fn decode_map_reports_mismatch_with_field_path() {
	let record_type = person_type();
	let err = record_type
		.decode_map(&map(&[("Age", Value::from("thirty"))]))
		.expect_err("string into int must fail");
	assert!(matches!(
		err,
		RecordError::DecodeMismatch { ref field, expected: "int", got: "string" } if field == "Age"
	));

	let address = map(&[("Zip", Value::Float(1.5))]);
	let err = record_type
		.decode_map(&map(&[("Address", Value::Map(address))]))
		.expect_err("fractional zip must fail");
	assert!(matches!(err, RecordError::DecodeMismatch { ref field, .. } if field == "Address.Zip"));

	let err = record_type
		.decode_map(&map(&[("Tags", Value::Slice(vec![Value::from("a"), Value::Int(2)]))]))
		.expect_err("int inside string slice must fail");
	assert!(matches!(err, RecordError::DecodeMismatch { ref field, .. } if field == "Tags[1]"));
}

#[test]
fn null_values_assign_zero() {
	let record_type = person_type();
	let instance = record_type
		.decode_map(&map(&[("Name", Value::Null), ("Tags", Value::Null)]))
		.expect("decode succeeds");
	assert_eq!(instance.get("Name"), Some(&Value::from("")));
	assert_eq!(instance.get("Tags"), Some(&Value::Null));
}

#[test]
fn definition_lists_fields_in_name_order() {
	let expected = "Person {\n\tAddress struct {\n\t\tStreet string\n\t\tZip int\n\t}\n\tAge int\n\tHeight float64\n\tName string `json:\"name\"`\n\tTags []string\n}\n";
	assert_eq!(person_type().definition(), expected);
}

#[test]
fn new_instance_is_zero_valued() {
	let record_type = person_type();
	let instance = record_type.new_instance();
	assert_eq!(instance.len(), 5);
	assert_eq!(instance.get("Name"), Some(&Value::from("")));
	assert_eq!(instance.get("Height"), Some(&Value::Float(0.0)));
}

#[test]
fn equality_ignores_display_name() {
	let left = RecordTypeBuilder::new().set_display_name("A").add_int("Id", None).build().expect("builds");
	let right = RecordTypeBuilder::new().set_display_name("B").add_int("Id", None).build().expect("builds");
	assert_eq!(left, right);
	assert_ne!(left, RecordType::empty("A"));
}

#[test]
fn instance_set_applies_kind_check() {
	let mut instance = person_type().new_instance();
	instance.set("Age", 41_i64).expect("int into int");
	assert_eq!(instance.get("Age"), Some(&Value::Int(41)));

	let err = instance.set("Age", "old").expect_err("string into int must fail");
	assert!(matches!(err, RecordError::DecodeMismatch { .. }));

	let err = instance.set("Missing", true).expect_err("unknown field");
	assert!(matches!(err, RecordError::MissingField { ref field } if field == "Missing"));
}

#[test]
fn slots_store_their_declared_numeric_kind() {
	let record_type = person_type();
	let instance = record_type
		.decode_map(&map(&[("Age", Value::Float(30.0)), ("Height", Value::Int(2))]))
		.expect("lossless numeric conversions");
	assert_eq!(instance.get("Age"), Some(&Value::Int(30)));
	assert_eq!(instance.get("Height"), Some(&Value::Float(2.0)));
}
