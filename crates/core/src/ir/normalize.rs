//! Normalization from schema documents to schema IR.
//!
//! This module handles all the document-specific logic:
//! - Choosing between Swagger 2.0 `definitions` and OpenAPI 3.x `components.schemas`
//! - Lowering raw property schemas into one explicit [`Shape`] each
//! - Merging several documents and tracking duplicate names

use tracing::debug;

use crate::document::{
    DefinitionMap, Items, RawDefinition, RawSchema, SchemaDocument, SchemaNode, SchemaType,
};

use super::types::{Definition, Definitions, PrimitiveKind, PropertyNode, Shape};

/// Normalize one document into its definitions.
///
/// `definitions` wins when present and non-empty, then `components.schemas`;
/// a document with neither yields no definitions.
pub fn normalize_document(document: &SchemaDocument) -> Definitions {
    normalize_documents(std::slice::from_ref(document))
}

/// Normalize several documents into one set of definitions, in input order.
///
/// A name defined by an earlier document is replaced by the later definition and
/// recorded as a duplicate, as is a name repeated within one document.
pub fn normalize_documents(documents: &[SchemaDocument]) -> Definitions {
    let mut definitions = Definitions::default();

    for document in documents {
        let Some(source) = select_definitions(document) else {
            debug!(
                version = document.version().as_deref().unwrap_or("unversioned"),
                "Document has no definitions or component schemas."
            );
            continue;
        };

        debug!(
            version = document.version().as_deref().unwrap_or("unversioned"),
            count = source.len(),
            "Normalizing document definitions."
        );

        definitions
            .duplicates
            .extend(source.duplicates().iter().cloned());

        for (name, raw) in source {
            if definitions
                .entries
                .insert(name.clone(), lower_definition(raw))
                .is_some()
            {
                definitions.duplicates.push(name.clone());
            }
        }
    }

    definitions
}

fn select_definitions(document: &SchemaDocument) -> Option<&DefinitionMap> {
    if let Some(legacy) = document.definitions.as_ref().filter(|map| !map.is_empty()) {
        return Some(legacy);
    }
    document
        .components
        .as_ref()
        .and_then(|components| components.schemas.as_ref())
}

/// Lower one raw definition. The definition's own `type` is not consulted: a
/// definition without properties becomes an empty declaration.
pub fn lower_definition(raw: &RawDefinition) -> Definition {
    let properties = raw
        .properties
        .iter()
        .flatten()
        .map(|(name, schema)| (name.clone(), lower_property(schema)))
        .collect();

    let required = raw
        .required
        .as_ref()
        .map(|required| required.names().into_iter().collect())
        .unwrap_or_default();

    Definition {
        properties,
        required,
    }
}

/// Lower one raw property schema. First match wins:
/// `$ref`, then the primitive kinds (a string with `enum` becomes [`Shape::Enum`]),
/// then `array`, then [`Shape::Unknown`]. Boolean schemas and other values that are
/// not schema objects are [`Shape::Unknown`].
pub fn lower_property(node: &SchemaNode) -> PropertyNode {
    match node {
        SchemaNode::Schema(schema) => PropertyNode {
            shape: lower_shape(schema),
            description: schema.description.clone(),
        },
        SchemaNode::Bool(_) | SchemaNode::Other(_) => PropertyNode::unknown(),
    }
}

fn lower_shape(schema: &RawSchema) -> Shape {
    // $ref nodes are opaque to their sibling keywords
    if let Some(ref_path) = &schema.ref_path {
        return Shape::Reference(ref_path.clone());
    }

    let Some(keyword) = type_keyword(schema.schema_type.as_ref()) else {
        if schema.one_of.is_some() || schema.any_of.is_some() || schema.all_of.is_some() {
            debug!("Composition keywords are not mapped; using the unknown type.");
        }
        return Shape::Unknown;
    };

    if keyword == "array" {
        let element = match &schema.items {
            Some(Items::Single(items)) => lower_property(items),
            // positional item schemas have no single element type
            Some(Items::Tuple(_)) | None => PropertyNode::unknown(),
        };
        return Shape::Array(Box::new(element));
    }

    match PrimitiveKind::from_keyword(keyword) {
        Some(PrimitiveKind::String) => match &schema.enum_values {
            Some(values) => Shape::Enum(values.iter().map(enum_literal).collect()),
            None => Shape::Primitive {
                kind: PrimitiveKind::String,
                format: schema.format.clone(),
            },
        },
        Some(kind) => Shape::Primitive {
            kind,
            format: schema.format.clone(),
        },
        None => Shape::Unknown,
    }
}

/// The effective type keyword. A type array counts only when it has exactly one
/// non-null entry.
fn type_keyword(schema_type: Option<&SchemaType>) -> Option<&str> {
    match schema_type? {
        SchemaType::Single(keyword) => Some(keyword.as_str()),
        SchemaType::Other(_) => None,
        SchemaType::Multiple(keywords) => {
            let mut non_null = keywords.iter().filter(|keyword| *keyword != "null");
            match (non_null.next(), non_null.next()) {
                (Some(keyword), None) => Some(keyword.as_str()),
                _ => None,
            }
        }
    }
}

fn enum_literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::Components;

    fn schema(json: &str) -> SchemaNode {
        serde_json::from_str(json).unwrap()
    }

    fn named(names: &[&str]) -> DefinitionMap {
        names
            .iter()
            .map(|name| ((*name).to_string(), RawDefinition::default()))
            .collect()
    }

    #[test]
    fn test_ref_wins_over_type() {
        let node = lower_property(&schema(
            r##"{ "$ref": "#/definitions/User", "type": "string" }"##,
        ));
        assert_eq!(node.shape, Shape::Reference("#/definitions/User".to_string()));
    }

    #[test]
    fn test_primitive_keeps_format() {
        let node = lower_property(&schema(r#"{ "type": "integer", "format": "int64" }"#));
        assert_eq!(
            node.shape,
            Shape::Primitive {
                kind: PrimitiveKind::Integer,
                format: Some("int64".to_string())
            }
        );
    }

    #[test]
    fn test_string_enum_keeps_order_and_duplicates() {
        let node = lower_property(&schema(
            r#"{ "type": "string", "enum": ["b", "a", "b", 1, true] }"#,
        ));
        assert_eq!(
            node.shape,
            Shape::Enum(vec![
                "b".to_string(),
                "a".to_string(),
                "b".to_string(),
                "1".to_string(),
                "true".to_string()
            ])
        );
    }

    #[test]
    fn test_enum_without_string_type_is_ignored() {
        let node = lower_property(&schema(r#"{ "type": "integer", "enum": [1, 2] }"#));
        assert!(matches!(
            node.shape,
            Shape::Primitive {
                kind: PrimitiveKind::Integer,
                ..
            }
        ));

        let node = lower_property(&schema(r#"{ "enum": ["a"] }"#));
        assert_eq!(node.shape, Shape::Unknown);
    }

    #[test]
    fn test_array_without_items() {
        let node = lower_property(&schema(r#"{ "type": "array" }"#));
        assert_eq!(node.shape, Shape::Array(Box::new(PropertyNode::unknown())));
    }

    #[test]
    fn test_nested_arrays() {
        let node = lower_property(&schema(
            r#"{ "type": "array", "items": { "type": "array", "items": { "type": "string" } } }"#,
        ));
        assert_eq!(
            node,
            PropertyNode::array(PropertyNode::array(PropertyNode::primitive(
                PrimitiveKind::String
            )))
        );
    }

    #[test]
    fn test_unknown_shapes() {
        for json in [
            r#"{}"#,
            r#"{ "type": "object" }"#,
            r#"{ "type": "file" }"#,
            r##"{ "oneOf": [{ "type": "string" }, { "type": "integer" }] }"##,
            r##"{ "allOf": [{ "$ref": "#/definitions/A" }] }"##,
            r#"{ "type": ["string", "integer"] }"#,
        ] {
            assert_eq!(lower_property(&schema(json)).shape, Shape::Unknown, "{json}");
        }
    }

    #[test]
    fn test_loose_nodes_are_unknown() {
        for json in [
            "true",
            "false",
            r#""string""#,
            "42",
            r#"{ "type": 5 }"#,
            r#"{ "type": { "name": "string" } }"#,
            r#"{ "type": ["string", 5] }"#,
        ] {
            assert_eq!(lower_property(&schema(json)), PropertyNode::unknown(), "{json}");
        }
    }

    #[test]
    fn test_tuple_and_boolean_items() {
        let node = lower_property(&schema(
            r#"{ "type": "array", "items": [{ "type": "string" }, { "type": "integer" }] }"#,
        ));
        assert_eq!(node, PropertyNode::array(PropertyNode::unknown()));

        let node = lower_property(&schema(r#"{ "type": "array", "items": true }"#));
        assert_eq!(node, PropertyNode::array(PropertyNode::unknown()));
    }

    #[test]
    fn test_required_skips_non_string_entries() {
        let raw: RawDefinition = serde_json::from_str(
            r#"{ "required": ["id", 7], "properties": { "id": {}, "name": {} } }"#,
        )
        .unwrap();
        let definition = lower_definition(&raw);
        assert!(definition.is_required("id"));
        assert!(!definition.is_required("name"));
    }

    #[test]
    fn test_nullable_type_array() {
        let node = lower_property(&schema(r#"{ "type": ["string", "null"] }"#));
        assert_eq!(node, PropertyNode::primitive(PrimitiveKind::String));
    }

    #[test]
    fn test_description_is_carried() {
        let node = lower_property(&schema(
            r#"{ "type": "string", "description": "display name" }"#,
        ));
        assert_eq!(node.description.as_deref(), Some("display name"));
    }

    #[test]
    fn test_lower_definition_required_set() {
        let raw: RawDefinition = serde_json::from_str(
            r#"{ "required": ["id"], "properties": { "id": { "type": "integer" }, "name": { "type": "string" } } }"#,
        )
        .unwrap();
        let definition = lower_definition(&raw);
        assert!(definition.is_required("id"));
        assert!(!definition.is_required("name"));
        let names: Vec<_> = definition.properties.keys().cloned().collect();
        assert_eq!(names, ["id", "name"]);
    }

    #[test]
    fn test_prefers_legacy_definitions() {
        let document = SchemaDocument {
            definitions: Some(named(&["Legacy"])),
            components: Some(Components {
                schemas: Some(named(&["Nested"])),
            }),
            ..SchemaDocument::default()
        };
        let definitions = normalize_document(&document);
        let names: Vec<_> = definitions.entries.keys().cloned().collect();
        assert_eq!(names, ["Legacy"]);
    }

    #[test]
    fn test_empty_legacy_falls_back_to_components() {
        let document = SchemaDocument {
            definitions: Some(DefinitionMap::default()),
            components: Some(Components {
                schemas: Some(named(&["Nested"])),
            }),
            ..SchemaDocument::default()
        };
        let definitions = normalize_document(&document);
        assert!(definitions.entries.contains_key("Nested"));
    }

    #[test]
    fn test_absent_maps_yield_nothing() {
        let definitions = normalize_document(&SchemaDocument::default());
        assert!(definitions.entries.is_empty());
        assert!(definitions.duplicates.is_empty());

        let document = SchemaDocument {
            components: Some(Components { schemas: None }),
            ..SchemaDocument::default()
        };
        assert!(normalize_document(&document).entries.is_empty());
    }

    #[test]
    fn test_merge_reports_cross_document_duplicates() {
        let first = SchemaDocument {
            definitions: Some(named(&["User", "Tag"])),
            ..SchemaDocument::default()
        };
        let second = SchemaDocument {
            components: Some(Components {
                schemas: Some(named(&["Order", "User"])),
            }),
            ..SchemaDocument::default()
        };
        let definitions = normalize_documents(&[first, second]);
        let names: Vec<_> = definitions.entries.keys().cloned().collect();
        assert_eq!(names, ["User", "Tag", "Order"]);
        assert_eq!(definitions.duplicates, ["User"]);
    }

    #[test]
    fn test_in_document_duplicates_are_carried() {
        let document = SchemaDocument {
            definitions: Some(named(&["User", "User"])),
            ..SchemaDocument::default()
        };
        let definitions = normalize_document(&document);
        assert_eq!(definitions.entries.len(), 1);
        assert_eq!(definitions.duplicates, ["User"]);
    }
}
