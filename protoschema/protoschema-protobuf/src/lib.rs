//! Protobuf descriptor resolution engine for protoschema.
//!
//! The engine turns `prost_types::FileDescriptorProto` trees into
//! [`FileSchema`](protoschema_core::FileSchema) values in two steps:
//!
//! 1. [`TypeTable`] pre-scans every input file and freezes a mapping from
//!    fully-qualified proto names to symbolic names.
//! 2. [`compile_file`] walks one file depth-first, classifying each field
//!    against the file's visible slice of that table.
//!
//! The table is read-only once built, so files can be compiled in parallel.

mod classifier;
mod context;
mod default_value;
mod enums;
mod extension;
mod file;
mod kind;
mod message;
mod naming;
mod options;
mod resolver;
mod type_table;

pub use classifier::{MapEntry, NestedMaps, classify};
pub use context::CompilationContext;
pub use default_value::resolve_default;
pub use enums::compile_enum;
pub use extension::compile_extension;
pub use file::compile_file;
pub use message::compile_message;
pub use options::resolve_options;
pub use resolver::resolve_field_type;
pub use type_table::{FileScope, TypeEntry, TypeTable, TypeTableBuilder};
