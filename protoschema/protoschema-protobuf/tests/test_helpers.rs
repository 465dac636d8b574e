//! Shared helpers for building protobuf descriptors in tests.
#![allow(dead_code)]

use protoschema_core::{FileSchema, PresencePolicy};
use protoschema_protobuf::{TypeTable, compile_file};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MessageOptions, OneofDescriptorProto,
    descriptor_proto::ExtensionRange,
    field_descriptor_proto::{Label, Type},
};

/// Create a file descriptor with the given package, syntax and top-level
/// declarations.
pub fn file(
    name: &str,
    package: &str,
    syntax: &str,
    messages: Vec<DescriptorProto>,
    enums: Vec<EnumDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: (!package.is_empty()).then(|| package.to_string()),
        message_type: messages,
        enum_type: enums,
        syntax: Some(syntax.to_string()),
        ..Default::default()
    }
}

/// Create a message descriptor with the given fields.
pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

/// Create a scalar field descriptor.
pub fn scalar_field(name: &str, number: i32, typ: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(typ.into()),
        label: Some(Label::Optional.into()),
        ..Default::default()
    }
}

/// Create a repeated (list) field descriptor.
pub fn repeated_field(name: &str, number: i32, typ: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        label: Some(Label::Repeated.into()),
        ..scalar_field(name, number, typ)
    }
}

/// Create a message-typed field descriptor.
pub fn message_field(
    name: &str,
    number: i32,
    type_name: &str,
    label: Label,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(Type::Message.into()),
        type_name: Some(type_name.to_string()),
        label: Some(label.into()),
        ..Default::default()
    }
}

/// Create an enum-typed field descriptor.
pub fn enum_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        r#type: Some(Type::Enum.into()),
        type_name: Some(type_name.to_string()),
        label: Some(Label::Optional.into()),
        ..Default::default()
    }
}

/// Attach a oneof index to a field.
pub fn in_oneof(field: FieldDescriptorProto, oneof_index: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        oneof_index: Some(oneof_index),
        ..field
    }
}

/// Attach a raw default value text to a field.
pub fn with_default(field: FieldDescriptorProto, default: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        default_value: Some(default.to_string()),
        ..field
    }
}

/// Create a simple enum descriptor.
pub fn simple_enum(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .map(|(n, num)| EnumValueDescriptorProto {
                name: Some(n.to_string()),
                number: Some(*num),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Create a map entry message (protobuf encodes maps as repeated message
/// fields with a special map_entry option).
pub fn map_entry_message(name: &str, key: FieldDescriptorProto, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![key, value],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create a proto3 optional scalar field descriptor.
///
/// Caller is responsible for ensuring the containing message has a matching
/// oneof declaration at `oneof_index`.
pub fn proto3_optional_scalar_field(
    name: &str,
    number: i32,
    typ: Type,
    oneof_index: i32,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        oneof_index: Some(oneof_index),
        proto3_optional: Some(true),
        ..scalar_field(name, number, typ)
    }
}

/// Create a oneof declaration.
pub fn oneof(name: &str) -> OneofDescriptorProto {
    OneofDescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Create an extension range.
pub fn extension_range(start: i32, end: i32) -> ExtensionRange {
    ExtensionRange {
        start: Some(start),
        end: Some(end),
        ..Default::default()
    }
}

/// Build a type table from `files` (no module prefixes) and compile the
/// file named `name`.
pub fn compile_one(files: &[FileDescriptorProto], name: &str) -> Result<FileSchema, protoschema_core::CompileError> {
    let table = files
        .iter()
        .fold(TypeTable::builder(), |builder, f| builder.add_file(f, None))
        .build();
    let target = files
        .iter()
        .find(|f| f.name() == name)
        .expect("target file must be among inputs");
    compile_file(target, &table, PresencePolicy::PresenceAware)
}
