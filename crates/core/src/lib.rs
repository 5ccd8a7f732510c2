//! Swagger / OpenAPI schema to TypeScript interface generator.
//!
//! The pipeline is a pure transformation:
//! 1. Parse: JSON or YAML text -> [`SchemaDocument`]
//! 2. Normalize: [`SchemaDocument`] -> [`ir::Definitions`] (Swagger 2.0 `definitions`
//!    or OpenAPI 3.x `components.schemas`, lowered into the typed IR)
//! 3. Codegen: each [`ir::Definition`] -> [`ir::TsInterface`]
//! 4. Emit: [`ir::TsInterface`] -> declaration text (via [`ir::Emit`])
//!
//! The result is an ordered list of [`TypeBlock`]s plus any [`Diagnostic`]s found on
//! the way. Generation never fails; only parsing a document can.

mod config;
mod diagnostics;
pub mod document;
mod emitter;
mod error;
pub mod ir;

pub use config::{GeneratorConfig, UnknownType};
pub use diagnostics::{Diagnostic, Severity};
pub use document::{DocumentFormat, SchemaDocument};
pub use emitter::{Generation, TypeBlock, generate, generate_documents, generate_with};
pub use error::DocumentError;
