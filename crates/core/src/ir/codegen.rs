//! Code generation from schema IR to TypeScript IR.

use crate::config::UnknownType;

use super::emit::Emit;
use super::types::{
    Definition, PrimitiveKind, PropertyNode, Shape, TsInterface, TsMember, TsPrimitive, TsType,
};
use super::utils::ref_to_type_name;

/// Resolve a property node to a TypeScript type.
///
/// Depends only on the node itself: references resolve to the pointer's final
/// segment whether or not a definition of that name exists.
pub fn resolve_type(node: &PropertyNode, unknown: UnknownType) -> TsType {
    match &node.shape {
        Shape::Reference(pointer) => ref_to_type_name(pointer).map_or_else(
            || unknown_type(unknown),
            |name| TsType::Ref(name.to_string()),
        ),
        Shape::Primitive { kind, .. } => TsType::Primitive(match kind {
            PrimitiveKind::Integer | PrimitiveKind::Number => TsPrimitive::Number,
            PrimitiveKind::String => TsPrimitive::String,
            PrimitiveKind::Boolean => TsPrimitive::Boolean,
        }),
        Shape::Enum(values) if values.is_empty() => unknown_type(unknown),
        Shape::Enum(values) => TsType::Union(values.iter().cloned().map(TsType::Literal).collect()),
        Shape::Array(element) => TsType::Array(Box::new(resolve_type(element, unknown))),
        Shape::Unknown => unknown_type(unknown),
    }
}

/// Resolve a property node straight to its type expression text.
pub fn resolve_type_expression(node: &PropertyNode, unknown: UnknownType) -> String {
    resolve_type(node, unknown).emit()
}

/// Build the interface declaration for one named definition.
pub fn synthesize_interface(name: &str, definition: &Definition, unknown: UnknownType) -> TsInterface {
    let members = definition
        .properties
        .iter()
        .map(|(property, node)| TsMember {
            name: property.clone(),
            ty: resolve_type(node, unknown),
            optional: !definition.is_required(property),
            doc: node.description.clone(),
        })
        .collect();

    TsInterface {
        name: name.to_string(),
        members,
    }
}

const fn unknown_type(unknown: UnknownType) -> TsType {
    TsType::Primitive(match unknown {
        UnknownType::Any => TsPrimitive::Any,
        UnknownType::Unknown => TsPrimitive::Unknown,
    })
}
