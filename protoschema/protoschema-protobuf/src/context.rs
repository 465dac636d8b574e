//! Per-file compilation state threaded through the recursive walk.

use protoschema_core::{CompileError, PresencePolicy, Syntax};
use prost_types::FileDescriptorProto;

use crate::type_table::{FileScope, TypeEntry};

/// Immutable compilation context for one file.
///
/// Entering a nested message yields a child context with the message name
/// appended to the namespace; the parent is never mutated, so sibling
/// subtrees cannot observe each other's namespace.
#[derive(Debug, Clone)]
pub struct CompilationContext<'a> {
    package: &'a str,
    syntax: Syntax,
    namespace: Vec<String>,
    types: &'a FileScope<'a>,
    policy: PresencePolicy,
}

impl<'a> CompilationContext<'a> {
    pub fn new(
        file: &'a FileDescriptorProto,
        types: &'a FileScope<'a>,
        policy: PresencePolicy,
    ) -> Self {
        Self {
            package: file.package(),
            syntax: Syntax::from_descriptor(file.syntax()),
            namespace: Vec::new(),
            types,
            policy,
        }
    }

    /// Child context for the body of message `name`.
    pub fn enter_message(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.namespace.push(name.to_string());
        child
    }

    /// Fully-qualified proto name of `name` declared in the current scope,
    /// e.g. `.pkg.Outer.name`.
    pub fn qualified_name(&self, name: &str) -> String {
        let mut out = String::new();
        for segment in std::iter::once(self.package)
            .filter(|p| !p.is_empty())
            .chain(self.namespace.iter().map(String::as_str))
            .chain(std::iter::once(name))
        {
            out.push('.');
            out.push_str(segment);
        }
        out
    }

    /// Look up a fully-qualified type name among the file's visible types.
    pub fn resolve_type_name(&self, full_name: &str) -> Result<&'a TypeEntry, CompileError> {
        self.types
            .get(full_name)
            .ok_or_else(|| CompileError::UnresolvedType {
                type_name: full_name.to_string(),
                file: self.types.file().to_string(),
            })
    }

    pub fn file_name(&self) -> &str {
        self.types.file()
    }

    pub fn package(&self) -> &str {
        self.package
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn policy(&self) -> PresencePolicy {
        self.policy
    }
}
