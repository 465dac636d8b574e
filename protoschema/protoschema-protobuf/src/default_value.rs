use protoschema_core::{InvalidDefault, Literal};
use prost_types::field_descriptor_proto::Type;

/// Convert a descriptor's `default_value` text into a typed literal.
///
/// Numeric text that does not parse is passed through as [`Literal::Raw`].
/// Booleans accept exactly `"true"` / `"false"`. Messages and groups never
/// carry defaults.
pub fn resolve_default(ty: Type, raw: Option<&str>) -> Result<Option<Literal>, InvalidDefault> {
    let Some(text) = raw.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let literal = match ty {
        Type::Int32 | Type::Int64 | Type::Sint32 | Type::Sint64 | Type::Sfixed32 | Type::Sfixed64 => {
            text.parse().map_or_else(|_| raw_literal(text), Literal::Int)
        }
        Type::Uint32 | Type::Uint64 | Type::Fixed32 | Type::Fixed64 => {
            text.parse().map_or_else(|_| raw_literal(text), Literal::UInt)
        }
        Type::Float | Type::Double => text.parse().map_or_else(|_| raw_literal(text), Literal::Float),
        Type::Bool => match text {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            _ => {
                return Err(InvalidDefault {
                    text: text.to_string(),
                });
            }
        },
        Type::String | Type::Bytes => Literal::Str(text.to_string()),
        Type::Enum => Literal::EnumMember(text.to_string()),
        Type::Message | Type::Group => return Ok(None),
    };
    Ok(Some(literal))
}

fn raw_literal(text: &str) -> Literal {
    Literal::Raw(text.to_string())
}
