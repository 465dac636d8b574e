use prost::{
    Message,
    encoding::{WireType, encode_key, encode_varint},
};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    descriptor_proto::ExtensionRange,
    field_descriptor_proto::{Label, Type},
};
use protoschema::{
    CompileOptions, Error, compile_descriptor_set, compile_descriptor_set_with_options,
    core::{FieldShape, PresencePolicy, ScalarKind, SymbolicName, SymbolicType, format_file_schema},
};

fn field(name: &str, number: i32, typ: Type, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(typ.into()),
        label: Some(label.into()),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, Type::Message, Label::Optional)
    }
}

fn proto_file(name: &str, messages: Vec<DescriptorProto>, deps: &[&str]) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some("shop".to_string()),
        dependency: deps.iter().map(|d| d.to_string()).collect(),
        message_type: messages,
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

fn encode(files: Vec<FileDescriptorProto>) -> Vec<u8> {
    FileDescriptorSet { file: files }.encode_to_vec()
}

fn two_file_set() -> Vec<u8> {
    let money = DescriptorProto {
        name: Some("Money".to_string()),
        field: vec![
            field("currency", 1, Type::String, Label::Optional),
            field("units", 2, Type::Int64, Label::Optional),
        ],
        ..Default::default()
    };
    let order = DescriptorProto {
        name: Some("Order".to_string()),
        field: vec![
            message_field("total", 1, ".shop.Money"),
            field("skus", 2, Type::String, Label::Repeated),
        ],
        ..Default::default()
    };
    encode(vec![
        proto_file("money.proto", vec![money], &[]),
        proto_file("order.proto", vec![order], &["money.proto"]),
    ])
}

#[test]
fn compiles_every_file_in_input_order() {
    let files = compile_descriptor_set(&two_file_set()).unwrap();

    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["money.proto", "order.proto"]);

    let order = &files[1].messages[0];
    assert_eq!(order.name.to_string(), "Shop.Order");
    assert_eq!(
        order.fields[0].ty,
        SymbolicType::Message(SymbolicName::new(vec![
            "Shop".to_string(),
            "Money".to_string()
        ]))
    );
    assert_eq!(order.fields[1].shape, FieldShape::Repeated);
    assert_eq!(order.fields[1].ty, SymbolicType::Scalar(ScalarKind::String));
}

#[test]
fn output_is_deterministic_across_runs() {
    let data = two_file_set();
    let first = compile_descriptor_set(&data).unwrap();
    let second = compile_descriptor_set(&data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn formatted_output_lists_declarations() -> Result<(), Box<dyn std::error::Error>> {
    let files = compile_descriptor_set(&two_file_set())?;
    let text = format_file_schema(&files[1])?;
    let expected = "\
file: order.proto
package: shop
syntax: proto3
message Shop.Order
    total = 1: optional Shop.Money
    skus = 2: repeated string
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn presence_policy_is_forwarded() {
    let counter = DescriptorProto {
        name: Some("Counter".to_string()),
        field: vec![FieldDescriptorProto {
            oneof_index: Some(0),
            proto3_optional: Some(true),
            ..field("count", 1, Type::Int32, Label::Optional)
        }],
        oneof_decl: vec![prost_types::OneofDescriptorProto {
            name: Some("_count".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let data = encode(vec![proto_file("counter.proto", vec![counter], &[])]);

    let aware = compile_descriptor_set(&data).unwrap();
    assert!(aware[0].messages[0].shape.members[0].shape.is_nullable());

    let options = CompileOptions::default().with_presence_policy(PresencePolicy::AlwaysDefault);
    let legacy = compile_descriptor_set_with_options(&data, &options).unwrap();
    assert!(!legacy[0].messages[0].shape.members[0].shape.is_nullable());
}

fn length_delimited(tag: u32, payload: &[u8], buf: &mut Vec<u8>) {
    encode_key(tag, WireType::LengthDelimited, buf);
    encode_varint(payload.len() as u64, buf);
    buf.extend_from_slice(payload);
}

/// Like [`two_file_set`], plus a `FileOptions` host and an `acme.options.file`
/// string extension (50000) set to `prefix` on `order.proto` only.
fn prefixed_order_set(prefix: &str) -> Vec<u8> {
    let descriptor = FileDescriptorProto {
        name: Some("google/protobuf/descriptor.proto".to_string()),
        package: Some("google.protobuf".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("FileOptions".to_string()),
            extension_range: vec![ExtensionRange {
                start: Some(1000),
                end: Some(536_870_912),
                ..Default::default()
            }],
            ..Default::default()
        }],
        syntax: Some("proto2".to_string()),
        ..Default::default()
    };
    let acme = FileDescriptorProto {
        name: Some("acme/options.proto".to_string()),
        package: Some("acme.options".to_string()),
        dependency: vec!["google/protobuf/descriptor.proto".to_string()],
        extension: vec![FieldDescriptorProto {
            extendee: Some(".google.protobuf.FileOptions".to_string()),
            ..field("file", 50000, Type::String, Label::Optional)
        }],
        syntax: Some("proto2".to_string()),
        ..Default::default()
    };
    let money = DescriptorProto {
        name: Some("Money".to_string()),
        field: vec![field("units", 1, Type::Int64, Label::Optional)],
        ..Default::default()
    };
    let order = DescriptorProto {
        name: Some("Order".to_string()),
        field: vec![message_field("total", 1, ".shop.Money")],
        ..Default::default()
    };

    let mut data = Vec::new();
    for proto in [
        descriptor,
        acme,
        proto_file("money.proto", vec![money], &[]),
    ] {
        length_delimited(1, &proto.encode_to_vec(), &mut data);
    }
    let mut options = Vec::new();
    length_delimited(50000, prefix.as_bytes(), &mut options);
    let mut order_bytes =
        proto_file("order.proto", vec![order], &["money.proto", "acme/options.proto"])
            .encode_to_vec();
    length_delimited(8, &options, &mut order_bytes);
    length_delimited(1, &order_bytes, &mut data);
    data
}

#[test]
fn prefix_extension_overrides_symbolic_names_per_file() {
    let options = CompileOptions::default().with_module_prefix_extension("acme.options.file");
    let files = compile_descriptor_set_with_options(&prefixed_order_set("My.Shop"), &options).unwrap();

    let order = files.iter().find(|f| f.name == "order.proto").unwrap();
    assert_eq!(order.module_prefix.as_deref(), Some("My.Shop"));
    assert_eq!(order.messages[0].name.to_string(), "My.Shop.Order");
    assert_eq!(
        order.messages[0].fields[0].ty,
        SymbolicType::Message(SymbolicName::new(vec!["Shop".to_string(), "Money".to_string()]))
    );

    let money = files.iter().find(|f| f.name == "money.proto").unwrap();
    assert_eq!(money.module_prefix, None);
    assert_eq!(money.messages[0].name.to_string(), "Shop.Money");
}

#[test]
fn prefix_extension_is_ignored_without_configuration() {
    let files = compile_descriptor_set(&prefixed_order_set("My.Shop")).unwrap();
    let order = files.iter().find(|f| f.name == "order.proto").unwrap();
    assert_eq!(order.module_prefix, None);
    assert_eq!(order.messages[0].name.to_string(), "Shop.Order");
}

#[test]
fn unknown_prefix_extension_leaves_package_naming() {
    let options = CompileOptions::default().with_module_prefix_extension("acme.options.file");
    let files = compile_descriptor_set_with_options(&two_file_set(), &options).unwrap();
    assert_eq!(files[0].module_prefix, None);
    assert_eq!(files[0].messages[0].name.to_string(), "Shop.Money");
}

#[test]
fn invalid_schema_data_returns_error() {
    let err = compile_descriptor_set(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, Error::SchemaParse { .. }));
}
