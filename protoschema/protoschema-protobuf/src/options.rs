//! File-options collaborator: reads a module-prefix override from a custom
//! extension on `google.protobuf.FileOptions`.

use prost_reflect::{FileDescriptor, Value};

/// Extract the module-prefix override of `file`.
///
/// `extension` is the fully-qualified name of a `FileOptions` extension
/// known to the file's pool. A string-typed extension is used directly; a
/// message-typed extension contributes its `module_prefix` string field.
/// Returns `None` when the extension is unknown, unset, or empty.
pub fn resolve_options(file: &FileDescriptor, extension: &str) -> Option<String> {
    let extension = file.parent_pool().get_extension_by_name(extension)?;
    let options = file.options();
    if !options.has_extension(&extension) {
        return None;
    }

    let value = options.get_extension(&extension);
    let prefix = match &*value {
        Value::String(prefix) => prefix.clone(),
        Value::Message(message) => message
            .get_field_by_name("module_prefix")?
            .as_str()?
            .to_string(),
        _ => return None,
    };
    Some(prefix).filter(|p| !p.is_empty())
}
