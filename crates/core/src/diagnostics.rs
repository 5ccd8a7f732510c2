//! Non-fatal findings reported next to the generated blocks.

use std::fmt;

/// How much attention a diagnostic deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The output is as intended but differs from the input text.
    Note,
    /// The output may not be what the document author meant.
    Warning,
}

/// A finding about the input. Diagnostics never change the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A definition name appeared more than once; the last definition won.
    DuplicateDefinition {
        /// Repeated name.
        name: String,
    },
    /// A definition name is not a valid TypeScript interface name. It is emitted as is.
    InvalidTypeName {
        /// Offending name.
        name: String,
    },
    /// A property name is not an identifier and was emitted as a quoted key.
    QuotedPropertyName {
        /// Owning definition.
        definition: String,
        /// Property name.
        property: String,
    },
    /// A `$ref` pointer has no final segment; the unknown type was emitted.
    MalformedReference {
        /// Owning definition.
        definition: String,
        /// Property name.
        property: String,
        /// The pointer as written.
        pointer: String,
    },
    /// A `$ref` names a definition that is not in the input.
    UnresolvedReference {
        /// Owning definition.
        definition: String,
        /// Property name.
        property: String,
        /// Referenced name.
        target: String,
    },
}

impl Diagnostic {
    /// Severity of this finding.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::QuotedPropertyName { .. } => Severity::Note,
            Self::DuplicateDefinition { .. }
            | Self::InvalidTypeName { .. }
            | Self::MalformedReference { .. }
            | Self::UnresolvedReference { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => f.write_str("note"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDefinition { name } => {
                write!(f, "definition '{name}' is defined more than once; the last one wins")
            }
            Self::InvalidTypeName { name } => {
                write!(f, "definition '{name}' is not a valid TypeScript type name")
            }
            Self::QuotedPropertyName {
                definition,
                property,
            } => write!(f, "{definition}.{property}: emitted as a quoted property key"),
            Self::MalformedReference {
                definition,
                property,
                pointer,
            } => write!(
                f,
                "{definition}.{property}: reference '{pointer}' has no type name"
            ),
            Self::UnresolvedReference {
                definition,
                property,
                target,
            } => write!(
                f,
                "{definition}.{property}: referenced type '{target}' is not defined"
            ),
        }
    }
}
