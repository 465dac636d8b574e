use std::fmt::{Display, Formatter, Result};

use super::TypeShape;

/// Protobuf scalar kinds, named after their `.proto` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Sint32 => "sint32",
            ScalarKind::Sint64 => "sint64",
            ScalarKind::Fixed32 => "fixed32",
            ScalarKind::Fixed64 => "fixed64",
            ScalarKind::Sfixed32 => "sfixed32",
            ScalarKind::Sfixed64 => "sfixed64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
        }
    }

    /// Whether repeated values of this kind may use packed encoding.
    pub fn is_packable(&self) -> bool {
        !matches!(self, ScalarKind::String | ScalarKind::Bytes)
    }
}

/// Syntax dialect declared by a `.proto` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    #[default]
    Proto2,
    Proto3,
}

impl Syntax {
    /// Interpret the descriptor's `syntax` string. Anything other than
    /// `"proto3"` follows proto2 semantics.
    pub fn from_descriptor(syntax: &str) -> Self {
        if syntax == "proto3" {
            Syntax::Proto3
        } else {
            Syntax::Proto2
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Proto2 => "proto2",
            Syntax::Proto3 => "proto3",
        }
    }
}

/// Target-addressable name standing in for a fully-qualified proto type name.
///
/// Segments are ordered outermost first, e.g. `["Pkg", "Outer", "Inner"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicName(Vec<String>);

impl SymbolicName {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

}

impl Display for SymbolicName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.0.join("."))
    }
}

/// Resolved value type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicType {
    Scalar(ScalarKind),
    Enum(SymbolicName),
    Message(SymbolicName),
}

impl SymbolicType {
    pub fn is_message(&self) -> bool {
        matches!(self, SymbolicType::Message(_))
    }
}

impl Display for SymbolicType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SymbolicType::Scalar(kind) => f.write_str(kind.type_name()),
            SymbolicType::Enum(name) | SymbolicType::Message(name) => Display::fmt(name, f),
        }
    }
}

/// Field label as it would be written in a `.proto` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Optional,
    Required,
    Repeated,
}

/// Presence discipline of a singular, non-oneof field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Presence is tracked: proto2 `optional`, proto3 `optional`, and
    /// singular message fields.
    Explicit,
    /// proto3 singular scalar without `optional`; unset equals the default.
    Implicit,
    /// proto2 `required`.
    Required,
}

/// Shape of a field, decided once during classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape {
    Plain(Presence),
    Repeated,
    /// Member of the oneof group with the given ordinal.
    OneofMember(usize),
    /// Synthetic map field; the value type is also the field's
    /// [`FieldSchema::ty`].
    Map { key: ScalarKind, value: SymbolicType },
}

/// Typed default value literal.
///
/// Equality is structural; floats compare by bit pattern so a `nan`
/// default equals itself.
#[derive(Debug, Clone)]
pub enum Literal {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// `string` / `bytes` default, verbatim.
    Str(String),
    /// Enum member name, verbatim.
    EnumMember(String),
    /// Numeric default text that could not be parsed.
    Raw(String),
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::UInt(a), Literal::UInt(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Str(a), Literal::Str(b))
            | (Literal::EnumMember(a), Literal::EnumMember(b))
            | (Literal::Raw(a), Literal::Raw(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::UInt(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Str(v) => write!(f, "{v:?}"),
            Literal::EnumMember(v) | Literal::Raw(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldOptions {
    /// Explicit `[packed = ...]` option, if any.
    pub packed: Option<bool>,
    pub deprecated: bool,
    /// Set only when it differs from the default lowerCamel JSON name.
    pub json_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub number: i32,
    pub ty: SymbolicType,
    pub shape: FieldShape,
    pub default: Option<Literal>,
    pub options: FieldOptions,
}

impl FieldSchema {
    /// Label as seen by emission. Map and oneof fields are never `Repeated`.
    pub fn label(&self) -> Label {
        match self.shape {
            FieldShape::Repeated => Label::Repeated,
            FieldShape::Plain(Presence::Required) => Label::Required,
            _ => Label::Optional,
        }
    }

    pub fn oneof_index(&self) -> Option<usize> {
        match self.shape {
            FieldShape::OneofMember(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.shape, FieldShape::Map { .. })
    }

    /// Whether the field uses packed encoding, honoring the proto3
    /// packed-by-default rule when no explicit option is set.
    pub fn is_packed(&self, syntax: Syntax) -> bool {
        if self.shape != FieldShape::Repeated {
            return false;
        }
        let packable = match &self.ty {
            SymbolicType::Scalar(kind) => kind.is_packable(),
            SymbolicType::Enum(_) => true,
            SymbolicType::Message(_) => false,
        };
        packable && self.options.packed.unwrap_or(syntax == Syntax::Proto3)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofGroup {
    pub name: String,
    /// Ordinal in the message's `oneof_decl` list.
    pub index: usize,
}

/// Half-open `[start, end)` span of extension field numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRange {
    pub start: i32,
    pub end: i32,
}

impl ExtensionRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, number: i32) -> bool {
        self.start <= number && number < self.end
    }
}

/// An `extend` declaration attaching `field` to `extendee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSchema {
    pub extendee: SymbolicName,
    pub field: FieldSchema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: SymbolicName,
    /// Fully-qualified proto name, e.g. `.pkg.Outer.Kind`.
    pub full_name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
    pub allow_alias: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    pub name: SymbolicName,
    /// Fully-qualified proto name, e.g. `.pkg.Outer`.
    pub full_name: String,
    pub syntax: Syntax,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
    pub oneofs: Vec<OneofGroup>,
    pub extension_ranges: Vec<ExtensionRange>,
    pub extensions: Vec<ExtensionSchema>,
    pub nested_enums: Vec<EnumSchema>,
    /// Nested messages, excluding synthetic map entries.
    pub nested_messages: Vec<MessageSchema>,
    pub deprecated: bool,
    pub shape: TypeShape,
}

impl MessageSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields belonging to `group`, in declaration order.
    pub fn oneof_fields<'a>(
        &'a self,
        group: &'a OneofGroup,
    ) -> impl Iterator<Item = &'a FieldSchema> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.oneof_index() == Some(group.index))
    }

    fn collect_declarations<'a>(&'a self, out: &mut Vec<Declaration<'a>>) {
        out.push(Declaration::Message(self));
        out.extend(self.nested_enums.iter().map(Declaration::Enum));
        for nested in &self.nested_messages {
            nested.collect_declarations(out);
        }
    }
}

/// One top-level declaration in the flattened output of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration<'a> {
    Enum(&'a EnumSchema),
    Message(&'a MessageSchema),
}

impl Declaration<'_> {
    pub fn name(&self) -> &SymbolicName {
        match self {
            Declaration::Enum(e) => &e.name,
            Declaration::Message(m) => &m.name,
        }
    }
}

/// Compiled contents of one `.proto` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSchema {
    pub name: String,
    pub package: Option<String>,
    pub syntax: Syntax,
    pub module_prefix: Option<String>,
    pub enums: Vec<EnumSchema>,
    pub messages: Vec<MessageSchema>,
    pub extensions: Vec<ExtensionSchema>,
}

impl FileSchema {
    /// Flatten the nested schema tree into declaration order.
    ///
    /// Top-level enums come first, then each top-level message followed by
    /// its nested enums and its nested messages (pre-order).
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let mut out: Vec<Declaration<'_>> = self.enums.iter().map(Declaration::Enum).collect();
        for message in &self.messages {
            message.collect_declarations(&mut out);
        }
        out
    }
}
