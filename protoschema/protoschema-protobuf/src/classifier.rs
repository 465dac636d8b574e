//! Field classification: decides once whether a field is a map, a oneof
//! member, or a plain/repeated field.

use std::collections::HashMap;

use protoschema_core::{
    CompileError, FieldOptions, FieldSchema, FieldShape, Presence, ScalarKind, SymbolicType, Syntax,
};
use prost_types::{
    DescriptorProto, FieldDescriptorProto,
    field_descriptor_proto::{Label, Type},
};
use tracing::trace;

use crate::{
    context::CompilationContext, default_value::resolve_default, kind::wire_type,
    naming::default_json_name, resolver::resolve_field_type,
};

/// Key and value types of a synthetic map-entry message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub key: ScalarKind,
    pub value: SymbolicType,
}

/// Map-entry types declared directly inside one message, keyed by their
/// fully-qualified proto name.
#[derive(Debug, Clone, Default)]
pub struct NestedMaps {
    entries: HashMap<String, MapEntry>,
}

impl NestedMaps {
    /// Scan the immediate nested types of `message` for map entries.
    ///
    /// `scope` is the context inside `message`. Entries are detected by the
    /// `map_entry` message option only; key is field number 1, value is
    /// field number 2.
    pub fn build(
        message: &DescriptorProto,
        scope: &CompilationContext<'_>,
    ) -> Result<Self, CompileError> {
        let mut entries = HashMap::new();
        for nested in message.nested_type.iter().filter(|m| is_map_entry(m)) {
            let full_name = scope.qualified_name(nested.name());
            let entry = map_entry(&full_name, nested, scope)?;
            entries.insert(full_name, entry);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, full_name: &str) -> Option<&MapEntry> {
        self.entries.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .as_ref()
        .is_some_and(|options| options.map_entry())
}

fn map_entry(
    full_name: &str,
    entry: &DescriptorProto,
    scope: &CompilationContext<'_>,
) -> Result<MapEntry, CompileError> {
    let invalid = |detail: &str| CompileError::InvalidMapEntry {
        entry: full_name.to_string(),
        detail: detail.to_string(),
    };
    let field_by_number = |number: i32| entry.field.iter().find(|f| f.number() == number);

    let key_field = field_by_number(1).ok_or_else(|| invalid("missing key field"))?;
    let value_field = field_by_number(2).ok_or_else(|| invalid("missing value field"))?;

    let SymbolicType::Scalar(key) = resolve_field_type(key_field, scope)? else {
        return Err(invalid("key is not a scalar type"));
    };
    let value = resolve_field_type(value_field, scope)?;
    Ok(MapEntry { key, value })
}

/// Classify one declared field of `message`.
///
/// A field whose type is a map entry of `nested_maps` becomes a map field
/// regardless of its wire label. Otherwise a field with a oneof index
/// becomes a member of that oneof (proto3 `optional` fields excepted), and
/// everything else keeps its declared label.
pub fn classify(
    message: &DescriptorProto,
    field: &FieldDescriptorProto,
    nested_maps: &NestedMaps,
    ctx: &CompilationContext<'_>,
) -> Result<FieldSchema, CompileError> {
    if let Some(entry) = nested_maps.get(field.type_name()) {
        trace!(field = field.name(), entry = field.type_name(), "map field");
        return Ok(FieldSchema {
            name: field.name().to_string(),
            number: field.number(),
            ty: entry.value.clone(),
            shape: FieldShape::Map {
                key: entry.key,
                value: entry.value.clone(),
            },
            default: None,
            options: field_options(field),
        });
    }

    let oneof = field
        .oneof_index
        .filter(|_| !field.proto3_optional() && !message.oneof_decl.is_empty())
        .and_then(|index| usize::try_from(index).ok());
    build_field(field, oneof, ctx)
}

/// Classify a field declared outside any message body, such as an
/// extension.
///
/// Extensions always track presence, so a singular non-required extension
/// is `Explicit` whatever the file syntax.
pub(crate) fn classify_plain(
    field: &FieldDescriptorProto,
    ctx: &CompilationContext<'_>,
) -> Result<FieldSchema, CompileError> {
    let mut schema = build_field(field, None, ctx)?;
    if schema.shape == FieldShape::Plain(Presence::Implicit) {
        schema.shape = FieldShape::Plain(Presence::Explicit);
    }
    Ok(schema)
}

fn build_field(
    field: &FieldDescriptorProto,
    oneof: Option<usize>,
    ctx: &CompilationContext<'_>,
) -> Result<FieldSchema, CompileError> {
    let wire = wire_type(field)?;
    let ty = resolve_field_type(field, ctx)?;
    let shape = match oneof {
        Some(index) => FieldShape::OneofMember(index),
        None => match field.label() {
            Label::Repeated => FieldShape::Repeated,
            Label::Required => FieldShape::Plain(Presence::Required),
            Label::Optional => FieldShape::Plain(singular_presence(field, wire, ctx.syntax())),
        },
    };
    let default = resolve_default(wire, field.default_value.as_deref()).map_err(|source| {
        CompileError::InvalidDefault {
            field: field.name().to_string(),
            source,
        }
    })?;

    Ok(FieldSchema {
        name: field.name().to_string(),
        number: field.number(),
        ty,
        shape,
        default,
        options: field_options(field),
    })
}

fn singular_presence(field: &FieldDescriptorProto, wire: Type, syntax: Syntax) -> Presence {
    let is_message = matches!(wire, Type::Message | Type::Group);
    if syntax == Syntax::Proto3 && !is_message && !field.proto3_optional() {
        Presence::Implicit
    } else {
        Presence::Explicit
    }
}

fn field_options(field: &FieldDescriptorProto) -> FieldOptions {
    let options = field.options.as_ref();
    let json_name = field
        .json_name
        .as_deref()
        .filter(|name| *name != default_json_name(field.name()))
        .map(str::to_string);
    FieldOptions {
        packed: options.and_then(|o| o.packed),
        deprecated: options.is_some_and(|o| o.deprecated()),
        json_name,
    }
}
