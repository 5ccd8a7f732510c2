//! Intermediate Representation for schema to TypeScript code generation.
//!
//! Two layers:
//! 1. Schema IR: [`Definition`] and [`PropertyNode`], with every document corner case
//!    resolved during normalization (one explicit variant per property shape)
//! 2. TypeScript IR: [`TsType`] and [`TsInterface`], turned into text by [`Emit`]
//!
//! ## Module Structure
//!
//! - `types`: both IR layers
//! - `normalize`: schema document -> schema IR
//! - `codegen`: schema IR -> TypeScript IR (type resolution, interface synthesis)
//! - `emit`: TypeScript IR -> code strings (via the `Emit` trait)
//! - `utils`: reference naming and identifier quoting

mod codegen;
mod emit;
mod normalize;
mod types;
pub mod utils;

pub use codegen::{resolve_type, resolve_type_expression, synthesize_interface};
pub use emit::Emit;
pub use normalize::{lower_definition, lower_property, normalize_document, normalize_documents};
pub use types::{
    Definition, Definitions, PrimitiveKind, PropertyNode, Shape, TsInterface, TsMember,
    TsPrimitive, TsType,
};
