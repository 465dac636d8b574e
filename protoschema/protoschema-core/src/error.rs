//! Error types for the resolution layer.

/// Error returned while compiling a file's descriptors into schemas.
///
/// Every variant is fatal for the file being compiled; there is no partial
/// output.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A message or enum reference has no entry in the file's visible types.
    #[error("unresolved type '{type_name}' referenced from '{file}'")]
    UnresolvedType { type_name: String, file: String },

    /// A field's default value text cannot be represented in its type.
    #[error("invalid default for field '{field}': {source}")]
    InvalidDefault {
        field: String,
        #[source]
        source: InvalidDefault,
    },

    /// A nested type flagged as a map entry does not have a usable key/value pair.
    #[error("invalid map entry '{entry}': {detail}")]
    InvalidMapEntry { entry: String, detail: String },

    /// The field's type tag is missing or outside the known range.
    #[error("unknown type tag {value:?} on field '{field}'")]
    UnknownFieldType { field: String, value: Option<i32> },
}

/// A boolean default that is neither `"true"` nor `"false"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{text}' is not a boolean literal")]
pub struct InvalidDefault {
    pub text: String,
}
