//! Message compilation: the depth-first walk over a message tree.

use protoschema_core::{CompileError, ExtensionRange, MessageSchema, OneofGroup, TypeShape};
use prost_types::DescriptorProto;
use tracing::trace;

use crate::{
    classifier::{NestedMaps, classify, is_map_entry},
    context::CompilationContext,
    enums::compile_enum,
    extension::compile_extension,
};

/// Compile `message`, declared in the scope of `ctx`, and all of its
/// nested types.
///
/// Runs three phases in order: field resolution, oneof/extension assembly,
/// then nested recursion (enums first, then non-map-entry messages). The
/// first error anywhere in the subtree aborts the walk.
pub fn compile_message(
    message: &DescriptorProto,
    ctx: &CompilationContext<'_>,
) -> Result<MessageSchema, CompileError> {
    let full_name = ctx.qualified_name(message.name());
    let name = ctx.resolve_type_name(&full_name)?.symbol.clone();
    let scope = ctx.enter_message(message.name());
    trace!(message = %full_name, fields = message.field.len(), "compiling message");

    let nested_maps = NestedMaps::build(message, &scope)?;
    let fields = message
        .field
        .iter()
        .map(|field| classify(message, field, &nested_maps, &scope))
        .collect::<Result<Vec<_>, _>>()?;

    let oneofs = oneof_groups(message);
    let extension_ranges = message
        .extension_range
        .iter()
        .map(|r| ExtensionRange::new(r.start(), r.end()))
        .collect::<Vec<_>>();
    let extensions = message
        .extension
        .iter()
        .map(|field| compile_extension(field, &scope))
        .collect::<Result<Vec<_>, _>>()?;

    let nested_enums = message
        .enum_type
        .iter()
        .map(|e| compile_enum(e, &scope))
        .collect::<Result<Vec<_>, _>>()?;
    let nested_messages = message
        .nested_type
        .iter()
        .filter(|m| !is_map_entry(m))
        .map(|m| compile_message(m, &scope))
        .collect::<Result<Vec<_>, _>>()?;

    let shape = TypeShape::derive(&fields, &oneofs, &extension_ranges, ctx.policy());
    Ok(MessageSchema {
        name,
        full_name,
        syntax: ctx.syntax(),
        fields,
        oneofs,
        extension_ranges,
        extensions,
        nested_enums,
        nested_messages,
        deprecated: message
            .options
            .as_ref()
            .is_some_and(|o| o.deprecated()),
        shape,
    })
}

/// Oneof groups in declaration order, skipping the synthetic oneofs that
/// back proto3 `optional` fields.
fn oneof_groups(message: &DescriptorProto) -> Vec<OneofGroup> {
    message
        .oneof_decl
        .iter()
        .enumerate()
        .filter(|(index, _)| !is_synthetic_oneof(message, *index))
        .map(|(index, decl)| OneofGroup {
            name: decl.name().to_string(),
            index,
        })
        .collect()
}

fn is_synthetic_oneof(message: &DescriptorProto, index: usize) -> bool {
    let mut members = message
        .field
        .iter()
        .filter(|f| f.oneof_index.and_then(|i| usize::try_from(i).ok()) == Some(index))
        .peekable();
    members.peek().is_some() && members.all(|f| f.proto3_optional())
}
