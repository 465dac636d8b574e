//! Global type table: fully-qualified proto type name to symbolic name.
//!
//! The table is built by a separate pre-scan over every input file and is
//! immutable afterwards. Per-file compilation only sees a [`FileScope`], the
//! slice of the table visible through the file's imports.

use std::collections::{HashMap, HashSet, hash_map::Entry};

use protoschema_core::SymbolicName;
use prost_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto};
use tracing::{debug, warn};

use crate::naming::{prefix_segments, symbol_for};

/// A registered message or enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub symbol: SymbolicName,
    /// Name of the `.proto` file that declares the type.
    pub file: String,
}

#[derive(Debug, Clone, Default)]
struct FileImports {
    dependencies: Vec<String>,
    public_dependencies: Vec<String>,
    module_prefix: Option<String>,
}

/// Frozen mapping from fully-qualified proto type name (e.g. `.pkg.Msg`) to
/// its [`TypeEntry`].
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<String, TypeEntry>,
    files: HashMap<String, FileImports>,
}

/// Builder for [`TypeTable`].
#[derive(Debug, Default)]
pub struct TypeTableBuilder {
    table: TypeTable,
}

impl TypeTable {
    /// Create a builder for [`TypeTable`].
    pub fn builder() -> TypeTableBuilder {
        TypeTableBuilder::default()
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeEntry> {
        self.types.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Module-prefix override registered for `file`.
    pub fn module_prefix(&self, file: &str) -> Option<&str> {
        self.files.get(file)?.module_prefix.as_deref()
    }

    /// Files whose types are visible from `file`: the file itself, its
    /// direct dependencies, and public dependencies re-exported by those.
    pub fn visible_files<'a>(&'a self, file: &'a str) -> HashSet<&'a str> {
        let mut visible = HashSet::new();
        visible.insert(file);
        let Some(imports) = self.files.get(file) else {
            return visible;
        };

        let mut pending: Vec<&str> = imports.dependencies.iter().map(String::as_str).collect();
        while let Some(dep) = pending.pop() {
            if !visible.insert(dep) {
                continue;
            }
            if let Some(dep_imports) = self.files.get(dep) {
                pending.extend(dep_imports.public_dependencies.iter().map(String::as_str));
            }
        }
        visible
    }

    /// Slice of the table visible from `file`.
    pub fn scope(&self, file: &str) -> FileScope<'_> {
        let visible = self.visible_files(file);
        let types = self
            .types
            .iter()
            .filter(|(_, entry)| visible.contains(entry.file.as_str()))
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        FileScope {
            file: file.to_string(),
            types,
        }
    }
}

impl TypeTableBuilder {
    /// Register every message and enum declared in `file`, including nested
    /// ones, under the file's symbolic prefix.
    pub fn add_file(mut self, file: &FileDescriptorProto, module_prefix: Option<&str>) -> Self {
        let prefix = prefix_segments(file.package(), module_prefix);
        let scope = match file.package() {
            "" => String::new(),
            package => format!(".{package}"),
        };

        let mut registrar = Registrar {
            types: &mut self.table.types,
            file: file.name(),
            prefix: &prefix,
        };
        let mut path = Vec::new();
        for message in &file.message_type {
            registrar.message(&scope, &mut path, message);
        }
        for enum_type in &file.enum_type {
            registrar.enumeration(&scope, &path, enum_type);
        }

        let public_dependencies = file
            .public_dependency
            .iter()
            .filter_map(|&i| usize::try_from(i).ok())
            .filter_map(|i| file.dependency.get(i).cloned())
            .collect();
        self.table.files.insert(
            file.name().to_string(),
            FileImports {
                dependencies: file.dependency.clone(),
                public_dependencies,
                module_prefix: module_prefix.map(str::to_string),
            },
        );
        self
    }

    pub fn build(self) -> TypeTable {
        debug!(
            types = self.table.types.len(),
            files = self.table.files.len(),
            "type table frozen"
        );
        self.table
    }
}

struct Registrar<'a> {
    types: &'a mut HashMap<String, TypeEntry>,
    file: &'a str,
    prefix: &'a [String],
}

impl<'a> Registrar<'a> {
    fn message(&mut self, scope: &str, path: &mut Vec<&'a str>, message: &'a DescriptorProto) {
        let full_name = format!("{scope}.{}", message.name());
        path.push(message.name());
        self.insert(full_name.clone(), path);

        for nested in &message.nested_type {
            self.message(&full_name, path, nested);
        }
        for enum_type in &message.enum_type {
            self.enumeration(&full_name, path, enum_type);
        }
        path.pop();
    }

    fn enumeration(&mut self, scope: &str, path: &[&'a str], enum_type: &'a EnumDescriptorProto) {
        let mut path = path.to_vec();
        path.push(enum_type.name());
        self.insert(format!("{scope}.{}", enum_type.name()), &path);
    }

    fn insert(&mut self, full_name: String, path: &[&str]) {
        match self.types.entry(full_name) {
            Entry::Occupied(existing) => {
                warn!(
                    type_name = existing.key().as_str(),
                    kept = existing.get().file.as_str(),
                    ignored = self.file,
                    "duplicate type name; keeping first registration"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(TypeEntry {
                    symbol: symbol_for(self.prefix, path),
                    file: self.file.to_string(),
                });
            }
        }
    }
}

/// Types visible from one file, borrowed from a [`TypeTable`].
#[derive(Debug, Clone)]
pub struct FileScope<'t> {
    file: String,
    types: HashMap<&'t str, &'t TypeEntry>,
}

impl<'t> FileScope<'t> {
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn get(&self, full_name: &str) -> Option<&'t TypeEntry> {
        self.types.get(full_name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
