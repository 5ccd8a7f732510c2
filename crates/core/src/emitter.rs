//! TypeScript block builder for schema documents.
//!
//! The pipeline is:
//! 1. Normalize: SchemaDocument -> Definitions (document shapes resolved here)
//! 2. Codegen: Definition -> TsInterface
//! 3. Emit: TsInterface -> String (via Emit trait)
//! 4. Inspect: Definitions -> Diagnostics (never changes the emitted code)

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::document::SchemaDocument;
use crate::ir::utils::{is_identifier, is_valid_type_name, ref_to_type_name};
use crate::ir::{
    Definition, Definitions, Emit, PropertyNode, Shape, normalize_document, normalize_documents,
    synthesize_interface,
};

/// One generated declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeBlock {
    /// The definition's key; also the declared interface name.
    pub name: String,
    /// The complete `export interface` declaration.
    pub code: String,
}

/// Generated blocks plus everything noticed while generating them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// One block per definition, in output order.
    pub blocks: Vec<TypeBlock>,
    /// Non-fatal findings, in output order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate one block per definition with the default configuration.
pub fn generate(document: &SchemaDocument) -> Vec<TypeBlock> {
    generate_with(document, &GeneratorConfig::default()).blocks
}

/// Generate blocks and diagnostics for one document.
pub fn generate_with(document: &SchemaDocument, config: &GeneratorConfig) -> Generation {
    build(&normalize_document(document), config)
}

/// Generate blocks and diagnostics for several documents merged in order.
pub fn generate_documents(documents: &[SchemaDocument], config: &GeneratorConfig) -> Generation {
    build(&normalize_documents(documents), config)
}

fn build(definitions: &Definitions, config: &GeneratorConfig) -> Generation {
    let mut ordered: Vec<(&String, &Definition)> = definitions.entries.iter().collect();
    if config.sort_definitions {
        ordered.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    let blocks: Vec<TypeBlock> = ordered
        .iter()
        .map(|&(name, definition)| {
            debug!(
                name = %name,
                properties = definition.properties.len(),
                "Synthesizing interface."
            );
            TypeBlock {
                name: name.clone(),
                code: synthesize_interface(name, definition, config.unknown_type).emit(),
            }
        })
        .collect();

    let mut diagnostics: Vec<Diagnostic> = definitions
        .duplicates
        .iter()
        .map(|name| Diagnostic::DuplicateDefinition { name: name.clone() })
        .collect();
    for &(name, definition) in &ordered {
        inspect_definition(
            name,
            definition,
            &definitions.entries,
            config.check_references,
            &mut diagnostics,
        );
    }

    debug!(
        blocks = blocks.len(),
        diagnostics = diagnostics.len(),
        "Generated TypeScript blocks."
    );

    Generation {
        blocks,
        diagnostics,
    }
}

fn inspect_definition(
    name: &str,
    definition: &Definition,
    known: &IndexMap<String, Definition>,
    check_references: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if !is_valid_type_name(name) {
        diagnostics.push(Diagnostic::InvalidTypeName {
            name: name.to_string(),
        });
    }

    for (property, node) in &definition.properties {
        if !is_identifier(property) {
            diagnostics.push(Diagnostic::QuotedPropertyName {
                definition: name.to_string(),
                property: property.clone(),
            });
        }

        let Some(pointer) = referenced_pointer(node) else {
            continue;
        };
        match ref_to_type_name(pointer) {
            None => diagnostics.push(Diagnostic::MalformedReference {
                definition: name.to_string(),
                property: property.clone(),
                pointer: pointer.to_string(),
            }),
            Some(target) if check_references && !known.contains_key(target) => {
                diagnostics.push(Diagnostic::UnresolvedReference {
                    definition: name.to_string(),
                    property: property.clone(),
                    target: target.to_string(),
                });
            }
            Some(_) => {}
        }
    }
}

/// The pointer of a reference node, looking through any array nesting.
fn referenced_pointer(node: &PropertyNode) -> Option<&str> {
    match &node.shape {
        Shape::Reference(pointer) => Some(pointer),
        Shape::Array(element) => referenced_pointer(element),
        Shape::Primitive { .. } | Shape::Enum(_) | Shape::Unknown => None,
    }
}
