use serde_json::json;

use crate::record::{RecordTypeBuilder, Value, ValueMap};

#[test]
fn json_numbers_become_floats() {
	let value = Value::from_json(json!({ "age": 30, "ratio": 0.5 }));
	let map = value.as_map().expect("object converts to map");
	assert_eq!(map["age"], Value::Float(30.0));
	assert_eq!(map["ratio"], Value::Float(0.5));
}

#[test]
fn yaml_integers_stay_integers() {
	let yaml: serde_yaml::Value = serde_yaml::from_str("count: 3\nratio: 0.25\n1: one\n").expect("yaml parses");
	let value = Value::from_yaml(yaml);
	let map = value.as_map().expect("mapping converts to map");
	assert_eq!(map["count"], Value::Int(3));
	assert_eq!(map["ratio"], Value::Float(0.25));
	assert_eq!(map["1"], Value::from("one"));
}

#[test]
fn yaml_tagged_values_unwrap() {
	let yaml: serde_yaml::Value = serde_yaml::from_str("value: !custom 7\n").expect("yaml parses");
	let value = Value::from_yaml(yaml);
	assert_eq!(value.as_map().expect("map")["value"], Value::Int(7));
}

#[test]
fn numeric_views_convert_losslessly_only() {
	assert_eq!(Value::Float(4.0).as_i64(), Some(4));
	assert_eq!(Value::Float(4.5).as_i64(), None);
	assert_eq!(Value::Int(2).as_f64(), Some(2.0));
	assert_eq!(Value::from("2").as_i64(), None);
}

#[test]
fn records_serialize_in_field_order() {
	let record_type = RecordTypeBuilder::new()
		.add_string("Name", None)
		.add_int("Age", None)
		.build()
		.expect("record type builds");
	let mut values = ValueMap::new();
	values.insert("Name".to_owned(), Value::from("Ann"));
	values.insert("Age".to_owned(), Value::Int(30));
	let instance = record_type.decode_map(&values).expect("decode succeeds");

	let json = Value::Record(instance).to_json();
	assert_eq!(json, json!({ "Age": 30, "Name": "Ann" }));
	assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
}
