use crate::record::{ChanDir, Kind, RecordTypeBuilder, Shape, Value, ValueMap};

#[test]
fn composite_shapes_render_as_declarations() {
	assert_eq!(Shape::map(Shape::String, Shape::slice(Shape::Int)).to_string(), "map[string][]int");
	assert_eq!(Shape::chan(ChanDir::Send, Shape::Bool).to_string(), "chan<- bool");
	assert_eq!(Shape::chan(ChanDir::Recv, Shape::Bool).to_string(), "<-chan bool");
	assert_eq!(Shape::chan(ChanDir::Both, Shape::Any).to_string(), "chan any");
	assert_eq!(Shape::pointer(Shape::Float64).to_string(), "*float64");
}

#[test]
fn func_shapes_render_returns_by_arity() {
	assert_eq!(Shape::func(vec![], vec![]).to_string(), "func()");
	assert_eq!(Shape::func(vec![Shape::Int, Shape::String], vec![Shape::Bool]).to_string(), "func(int, string) bool");
	assert_eq!(Shape::func(vec![Shape::Int], vec![Shape::Int, Shape::Bool]).to_string(), "func(int) (int, bool)");
}

#[test]
fn record_shapes_render_brace_blocks() {
	let nested = RecordTypeBuilder::new().add_string("City", None).build().expect("nested builds");
	assert_eq!(Shape::Record(nested).to_string(), "struct {\n\tCity string\n}");
}

#[test]
fn pointers_do_not_stack_and_report_pointee_kind() {
	let shape = Shape::pointer(Shape::pointer(Shape::slice(Shape::Int)));
	assert!(shape.is_pointer());
	assert_eq!(shape.kind(), Kind::Slice);
	assert_eq!(shape.element(), Some(&Shape::Int));
	assert_eq!(shape.to_string(), "*[]int");
}

#[test]
fn samples_map_to_shapes() {
	assert_eq!(Shape::of_sample(&Value::Null), Shape::Any);
	assert_eq!(Shape::of_sample(&Value::Float(1.5)), Shape::Float64);
	assert_eq!(Shape::of_sample(&Value::Slice(vec![Value::Int(1), Value::from("x")])), Shape::slice(Shape::Int));
	assert_eq!(Shape::of_sample(&Value::Slice(Vec::new())), Shape::slice(Shape::Any));
	assert_eq!(Shape::of_sample(&Value::Map(ValueMap::new())), Shape::map(Shape::String, Shape::Any));
}

#[test]
fn zero_values_follow_kind() {
	let nested = RecordTypeBuilder::new().add_int("Count", None).build().expect("nested builds");
	assert_eq!(Shape::String.zero_value(), Value::from(""));
	assert_eq!(Shape::Int.zero_value(), Value::Int(0));
	assert_eq!(Shape::slice(Shape::Int).zero_value(), Value::Null);
	assert_eq!(Shape::pointer(Shape::Record(nested.clone())).zero_value(), Value::Null);

	let Value::Record(instance) = Shape::Record(nested).zero_value() else {
		panic!("expected zero-valued nested record");
	};
	assert_eq!(instance.get("Count"), Some(&Value::Int(0)));
}

#[test]
fn only_scalar_kinds_key_maps() {
	assert!(Kind::String.is_scalar());
	assert!(Kind::Any.is_scalar());
	assert!(!Kind::Slice.is_scalar());
	assert!(Kind::ChanRecv.is_chan());
	assert!(!Kind::Func.is_chan());
}
