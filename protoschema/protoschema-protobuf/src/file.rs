use protoschema_core::{CompileError, FileSchema, PresencePolicy};
use prost_types::FileDescriptorProto;
use tracing::debug;

use crate::{
    context::CompilationContext, enums::compile_enum, extension::compile_extension,
    message::compile_message, type_table::TypeTable,
};

/// Compile one file against a frozen [`TypeTable`].
///
/// Only types declared by the file, its dependencies, and their public
/// re-exports are visible. Top-level enums are compiled before top-level
/// messages, each in declaration order.
pub fn compile_file(
    file: &FileDescriptorProto,
    table: &TypeTable,
    policy: PresencePolicy,
) -> Result<FileSchema, CompileError> {
    let scope = table.scope(file.name());
    let module_prefix = table.module_prefix(file.name());
    let ctx = CompilationContext::new(file, &scope, policy);
    debug!(file = file.name(), visible_types = scope.len(), "compiling file");

    let enums = file
        .enum_type
        .iter()
        .map(|e| compile_enum(e, &ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let messages = file
        .message_type
        .iter()
        .map(|m| compile_message(m, &ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let extensions = file
        .extension
        .iter()
        .map(|f| compile_extension(f, &ctx))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        file = file.name(),
        enums = enums.len(),
        messages = messages.len(),
        "compiled file"
    );
    Ok(FileSchema {
        name: file.name().to_string(),
        package: Some(ctx.package())
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        syntax: ctx.syntax(),
        module_prefix: module_prefix.map(str::to_string),
        enums,
        messages,
        extensions,
    })
}
