use protoschema_core::{CompileError, SymbolicType};
use prost_types::{FieldDescriptorProto, field_descriptor_proto::Type};

use crate::{
    context::CompilationContext,
    kind::{scalar_kind, wire_type},
};

/// Resolve the value type of `field`.
///
/// Scalars map directly to their kind. Enum, message and group references
/// are looked up by their fully-qualified `type_name` in the context's
/// visible types and fail with [`CompileError::UnresolvedType`] when absent.
pub fn resolve_field_type(
    field: &FieldDescriptorProto,
    ctx: &CompilationContext<'_>,
) -> Result<SymbolicType, CompileError> {
    let ty = wire_type(field)?;
    if let Some(kind) = scalar_kind(ty) {
        return Ok(SymbolicType::Scalar(kind));
    }

    let symbol = ctx.resolve_type_name(field.type_name())?.symbol.clone();
    match ty {
        Type::Enum => Ok(SymbolicType::Enum(symbol)),
        _ => Ok(SymbolicType::Message(symbol)),
    }
}
