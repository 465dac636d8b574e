use protoschema_core::{CompileError, ExtensionSchema};
use prost_types::FieldDescriptorProto;

use crate::{classifier::classify_plain, context::CompilationContext};

/// Compile an `extend` field declared in the scope of `ctx`.
///
/// The extendee is resolved like any other type reference.
pub fn compile_extension(
    field: &FieldDescriptorProto,
    ctx: &CompilationContext<'_>,
) -> Result<ExtensionSchema, CompileError> {
    let extendee = ctx.resolve_type_name(field.extendee())?.symbol.clone();
    Ok(ExtensionSchema {
        extendee,
        field: classify_plain(field, ctx)?,
    })
}
