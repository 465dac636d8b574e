//! Descriptor-set driver: decode, pre-scan, then compile every file.

use prost_reflect::{DescriptorPool, FileDescriptor};
use protoschema_core::{FileSchema, PresencePolicy};
use protoschema_protobuf::{TypeTable, compile_file, resolve_options};
use rayon::prelude::*;
use tracing::debug;

use crate::Error;

/// Options for [`compile_descriptor_set_with_options`].
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub presence_policy: PresencePolicy,
    /// Fully-qualified name of a `google.protobuf.FileOptions` extension
    /// carrying a module-prefix override, e.g. `"acme.options.file"`.
    pub module_prefix_extension: Option<String>,
}

impl CompileOptions {
    pub fn with_presence_policy(mut self, policy: PresencePolicy) -> Self {
        self.presence_policy = policy;
        self
    }

    pub fn with_module_prefix_extension(mut self, extension: impl Into<String>) -> Self {
        self.module_prefix_extension = Some(extension.into());
        self
    }
}

/// Compile every file of a serialized `google.protobuf.FileDescriptorSet`
/// with default options.
pub fn compile_descriptor_set(schema_data: &[u8]) -> Result<Vec<FileSchema>, Error> {
    compile_descriptor_set_with_options(schema_data, &CompileOptions::default())
}

/// Compile every file of a serialized `google.protobuf.FileDescriptorSet`.
///
/// All files are registered in the type table before any of them is
/// compiled, so references may point at files appearing later in the set.
/// Files are then compiled in parallel; the output keeps input order.
pub fn compile_descriptor_set_with_options(
    schema_data: &[u8],
    options: &CompileOptions,
) -> Result<Vec<FileSchema>, Error> {
    let pool = DescriptorPool::decode(schema_data).map_err(|e| Error::SchemaParse {
        source: Box::new(e),
    })?;
    let files: Vec<FileDescriptor> = pool.files().collect();
    let prefixes: Vec<Option<String>> = files
        .iter()
        .map(|file| {
            options
                .module_prefix_extension
                .as_deref()
                .and_then(|extension| resolve_options(file, extension))
        })
        .collect();

    let table = files
        .iter()
        .zip(&prefixes)
        .fold(TypeTable::builder(), |builder, (file, prefix)| {
            builder.add_file(file.file_descriptor_proto(), prefix.as_deref())
        })
        .build();
    debug!(files = files.len(), types = table.len(), "compiling descriptor set");

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            compile_file(file.file_descriptor_proto(), &table, options.presence_policy).map_err(
                |source| Error::Compile {
                    file: file.name().to_string(),
                    source,
                },
            )
        })
        .collect();
    results.into_iter().collect()
}
