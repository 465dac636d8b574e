//! Error types for the descriptor-set driver.

use protoschema_core::CompileError;

/// Errors produced by [`compile_descriptor_set`](crate::compile_descriptor_set).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input bytes are not a valid serialized `FileDescriptorSet`.
    #[error("failed to parse descriptor set: {source}")]
    SchemaParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A file failed to compile. Carries the first failure in input order.
    #[error("failed to compile '{file}': {source}")]
    Compile {
        file: String,
        #[source]
        source: CompileError,
    },
}
