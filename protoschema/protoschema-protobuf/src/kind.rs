//! Mapping from descriptor type tags to scalar kinds.

use protoschema_core::{CompileError, ScalarKind};
use prost_types::{FieldDescriptorProto, field_descriptor_proto::Type};

/// Decode the field's type tag.
pub(crate) fn wire_type(field: &FieldDescriptorProto) -> Result<Type, CompileError> {
    field
        .r#type
        .and_then(|tag| Type::try_from(tag).ok())
        .ok_or_else(|| CompileError::UnknownFieldType {
            field: field.name().to_string(),
            value: field.r#type,
        })
}

/// Scalar kind of a type tag, or `None` for enum, message and group.
pub(crate) fn scalar_kind(ty: Type) -> Option<ScalarKind> {
    let kind = match ty {
        Type::Double => ScalarKind::Double,
        Type::Float => ScalarKind::Float,
        Type::Int32 => ScalarKind::Int32,
        Type::Int64 => ScalarKind::Int64,
        Type::Uint32 => ScalarKind::Uint32,
        Type::Uint64 => ScalarKind::Uint64,
        Type::Sint32 => ScalarKind::Sint32,
        Type::Sint64 => ScalarKind::Sint64,
        Type::Fixed32 => ScalarKind::Fixed32,
        Type::Fixed64 => ScalarKind::Fixed64,
        Type::Sfixed32 => ScalarKind::Sfixed32,
        Type::Sfixed64 => ScalarKind::Sfixed64,
        Type::Bool => ScalarKind::Bool,
        Type::String => ScalarKind::String,
        Type::Bytes => ScalarKind::Bytes,
        Type::Enum | Type::Message | Type::Group => return None,
    };
    Some(kind)
}
