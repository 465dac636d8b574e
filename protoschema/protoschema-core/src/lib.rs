//! Target-independent schema model for compiled protobuf descriptors.
//!
//! This crate provides the resolved intermediate representation
//! ([`MessageSchema`] / [`FieldSchema`] / [`EnumSchema`]), the derived
//! [`TypeShape`] used for static-typing declarations, and the error types
//! shared by the resolution engine.

mod error;
mod policy;
mod schema;

pub use error::{CompileError, InvalidDefault};
pub use policy::PresencePolicy;
pub use schema::{
    Alternative, Declaration, EnumSchema, EnumValue, ExtensionRange, ExtensionSchema, FieldOptions,
    FieldSchema, FieldShape, FileSchema, Label, Literal, MessageSchema, OneofGroup, Presence,
    ScalarKind, ShapeMember, SymbolicName, SymbolicType, Syntax, TypeShape, ValueShape,
    format_file_schema,
};
