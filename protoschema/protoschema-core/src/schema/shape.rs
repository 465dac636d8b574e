//! Type-shape derivation: a structural description of a message's value
//! type that an emission backend renders into its own typing syntax.

use super::{ExtensionRange, FieldSchema, FieldShape, OneofGroup, Presence, ScalarKind};
use crate::{PresencePolicy, SymbolicName, SymbolicType};

/// Structural type of a member value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
    Scalar(ScalarKind),
    Enum(SymbolicName),
    Message(SymbolicName),
    List(Box<ValueShape>),
    Map {
        key: ScalarKind,
        value: Box<ValueShape>,
    },
    Nullable(Box<ValueShape>),
    /// Tagged alternatives of a oneof group.
    OneOf(Vec<Alternative>),
}

impl ValueShape {
    fn element(ty: &SymbolicType) -> Self {
        match ty {
            SymbolicType::Scalar(kind) => ValueShape::Scalar(*kind),
            SymbolicType::Enum(name) => ValueShape::Enum(name.clone()),
            SymbolicType::Message(name) => ValueShape::Message(name.clone()),
        }
    }

    fn nullable(self) -> Self {
        ValueShape::Nullable(Box::new(self))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, ValueShape::Nullable(_))
    }
}

/// One alternative of a [`ValueShape::OneOf`], tagged by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub tag: String,
    pub shape: ValueShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMember {
    pub name: String,
    pub shape: ValueShape,
}

/// Derived shape summary of a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeShape {
    pub members: Vec<ShapeMember>,
    /// The message declares extension ranges and needs open storage for
    /// extension values.
    pub extension_slot: bool,
}

impl TypeShape {
    /// Derive the shape of a message from its classified fields.
    ///
    /// Non-oneof fields become one member each, in declaration order. A oneof
    /// group becomes a single nullable member named after the group, placed
    /// where its first field appears.
    pub fn derive(
        fields: &[FieldSchema],
        oneofs: &[OneofGroup],
        extension_ranges: &[ExtensionRange],
        policy: PresencePolicy,
    ) -> Self {
        let mut members = Vec::with_capacity(fields.len());
        let mut emitted_groups = Vec::new();

        for field in fields {
            let shape = match &field.shape {
                FieldShape::OneofMember(index) => {
                    let Some(group) = oneofs.iter().find(|g| g.index == *index) else {
                        members.push(ShapeMember {
                            name: field.name.clone(),
                            shape: ValueShape::element(&field.ty).nullable(),
                        });
                        continue;
                    };
                    if emitted_groups.contains(index) {
                        continue;
                    }
                    emitted_groups.push(*index);
                    members.push(ShapeMember {
                        name: group.name.clone(),
                        shape: oneof_shape(fields, *index),
                    });
                    continue;
                }
                FieldShape::Repeated => ValueShape::List(Box::new(ValueShape::element(&field.ty))),
                FieldShape::Map { key, value } => ValueShape::Map {
                    key: *key,
                    value: Box::new(ValueShape::element(value)),
                },
                FieldShape::Plain(presence) => plain_shape(&field.ty, *presence, policy),
            };
            members.push(ShapeMember {
                name: field.name.clone(),
                shape,
            });
        }

        Self {
            members,
            extension_slot: !extension_ranges.is_empty(),
        }
    }

    pub fn member(&self, name: &str) -> Option<&ShapeMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

fn oneof_shape(fields: &[FieldSchema], index: usize) -> ValueShape {
    let alternatives = fields
        .iter()
        .filter(|f| f.oneof_index() == Some(index))
        .map(|f| Alternative {
            tag: f.name.clone(),
            shape: ValueShape::element(&f.ty),
        })
        .collect();
    ValueShape::OneOf(alternatives).nullable()
}

fn plain_shape(ty: &SymbolicType, presence: Presence, policy: PresencePolicy) -> ValueShape {
    let element = ValueShape::element(ty);
    if ty.is_message() {
        return element.nullable();
    }
    match (presence, policy) {
        (Presence::Explicit, PresencePolicy::PresenceAware) => element.nullable(),
        _ => element,
    }
}
