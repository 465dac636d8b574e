//! Resolved schema intermediate representation.

mod format;
mod shape;
mod types;

pub use format::format_file_schema;
pub use shape::{Alternative, ShapeMember, TypeShape, ValueShape};
pub use types::{
    Declaration, EnumSchema, EnumValue, ExtensionRange, ExtensionSchema, FieldOptions,
    FieldSchema, FieldShape, FileSchema, Label, Literal, MessageSchema, OneofGroup, Presence,
    ScalarKind, SymbolicName, SymbolicType, Syntax,
};
