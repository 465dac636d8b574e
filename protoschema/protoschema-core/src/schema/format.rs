use std::fmt::{Error, Result, Write as _};

use super::{
    Declaration, EnumSchema, ExtensionSchema, FieldSchema, FieldShape, FileSchema, MessageSchema,
    Presence, Syntax,
};

/// Format a compiled file in a readable, line-oriented style.
///
/// Declarations are rendered flat, in [`FileSchema::declarations`] order,
/// followed by the file-level `extend` blocks.
pub fn format_file_schema(file: &FileSchema) -> std::result::Result<String, Error> {
    let mut out = String::new();

    writeln!(out, "file: {}", file.name)?;
    if let Some(package) = &file.package {
        writeln!(out, "package: {package}")?;
    }
    writeln!(out, "syntax: {}", file.syntax.as_str())?;
    if let Some(prefix) = &file.module_prefix {
        writeln!(out, "module_prefix: {prefix}")?;
    }

    for decl in file.declarations() {
        match decl {
            Declaration::Enum(e) => format_enum(e, &mut out)?,
            Declaration::Message(m) => format_message(m, &mut out)?,
        }
    }
    for ext in &file.extensions {
        format_extension(ext, file.syntax, 0, &mut out)?;
    }

    Ok(out)
}

fn format_enum(schema: &EnumSchema, out: &mut String) -> Result {
    write!(out, "enum {}", schema.name)?;
    let mut flags = Vec::new();
    if schema.allow_alias {
        flags.push("allow_alias".to_string());
    }
    if schema.deprecated {
        flags.push("deprecated".to_string());
    }
    write_flags(&flags, out)?;
    for value in &schema.values {
        writeln!(out, "    {} = {}", value.name, value.number)?;
    }
    Ok(())
}

fn format_message(schema: &MessageSchema, out: &mut String) -> Result {
    write!(out, "message {}", schema.name)?;
    let flags = if schema.deprecated {
        vec!["deprecated".to_string()]
    } else {
        vec![]
    };
    write_flags(&flags, out)?;

    for field in &schema.fields {
        format_field(field, schema.syntax, 4, out)?;
    }
    for group in &schema.oneofs {
        writeln!(out, "    oneof {} = {}", group.name, group.index)?;
    }
    for range in &schema.extension_ranges {
        writeln!(out, "    extensions {} to {}", range.start, range.end)?;
    }
    for ext in &schema.extensions {
        format_extension(ext, schema.syntax, 4, out)?;
    }
    Ok(())
}

fn format_extension(
    ext: &ExtensionSchema,
    syntax: Syntax,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}extend {}", ext.extendee)?;
    format_field(&ext.field, syntax, indent + 4, out)
}

fn format_field(field: &FieldSchema, syntax: Syntax, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    let ty = &field.ty;
    write!(out, "{pad}{} = {}: ", field.name, field.number)?;
    match &field.shape {
        FieldShape::Plain(Presence::Explicit) => write!(out, "optional {ty}")?,
        FieldShape::Plain(Presence::Implicit) => write!(out, "{ty}")?,
        FieldShape::Plain(Presence::Required) => write!(out, "required {ty}")?,
        FieldShape::Repeated => write!(out, "repeated {ty}")?,
        FieldShape::OneofMember(index) => write!(out, "oneof({index}) {ty}")?,
        FieldShape::Map { key, value } => write!(out, "map<{}, {value}>", key.type_name())?,
    }

    let mut flags = Vec::new();
    if let Some(default) = &field.default {
        flags.push(format!("default = {default}"));
    }
    if field.is_packed(syntax) {
        flags.push("packed".to_string());
    }
    if field.options.deprecated {
        flags.push("deprecated".to_string());
    }
    if let Some(json_name) = &field.options.json_name {
        flags.push(format!("json_name = {json_name:?}"));
    }
    write_flags(&flags, out)
}

fn write_flags(flags: &[String], out: &mut String) -> Result {
    if flags.is_empty() {
        writeln!(out)
    } else {
        writeln!(out, " [{}]", flags.join(", "))
    }
}
