use protoschema_core::{CompileError, EnumSchema, EnumValue};
use prost_types::EnumDescriptorProto;

use crate::context::CompilationContext;

/// Compile an enum declared in the scope of `ctx`.
pub fn compile_enum(
    desc: &EnumDescriptorProto,
    ctx: &CompilationContext<'_>,
) -> Result<EnumSchema, CompileError> {
    let full_name = ctx.qualified_name(desc.name());
    let name = ctx.resolve_type_name(&full_name)?.symbol.clone();
    let options = desc.options.as_ref();

    Ok(EnumSchema {
        name,
        full_name,
        values: desc
            .value
            .iter()
            .map(|v| EnumValue {
                name: v.name().to_string(),
                number: v.number(),
            })
            .collect(),
        allow_alias: options.is_some_and(|o| o.allow_alias()),
        deprecated: options.is_some_and(|o| o.deprecated()),
    })
}
