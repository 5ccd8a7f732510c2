//! IR types for code generation.
//!
//! Schema side:
//! - PropertyNode / Shape: one property's structure
//! - Definition: one named object shape
//!
//! TypeScript side:
//! - TsType: type expressions (primitives, arrays, unions, literals, references)
//! - TsInterface / TsMember: `export interface` declarations

use indexmap::IndexMap;
use std::collections::HashSet;

// =============================================================================
// Schema IR
// =============================================================================

/// Primitive schema kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `string`
    String,
    /// `boolean`
    Boolean,
}

impl PrimitiveKind {
    /// Map a `type` keyword to a primitive kind. `array`, `object` and anything
    /// unrecognised have no primitive kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// The structure of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// integer, number, string or boolean. `format` is carried but does not change the type.
    Primitive {
        /// Primitive kind.
        kind: PrimitiveKind,
        /// Format hint such as `int64` or `date-time`.
        format: Option<String>,
    },
    /// `$ref` pointer to another definition, e.g. `#/definitions/UserDTO`.
    Reference(String),
    /// Array of the element node.
    Array(Box<PropertyNode>),
    /// String enum values in document order, duplicates included.
    Enum(Vec<String>),
    /// Anything no other variant describes.
    Unknown,
}

/// One property of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNode {
    /// Structure of the property.
    pub shape: Shape,
    /// Human-readable description, emitted as a doc comment.
    pub description: Option<String>,
}

impl PropertyNode {
    /// Node without a description.
    pub const fn new(shape: Shape) -> Self {
        Self {
            shape,
            description: None,
        }
    }

    /// Primitive node without a format hint.
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(Shape::Primitive { kind, format: None })
    }

    /// Reference node.
    pub fn reference(pointer: impl Into<String>) -> Self {
        Self::new(Shape::Reference(pointer.into()))
    }

    /// Array node.
    pub fn array(element: Self) -> Self {
        Self::new(Shape::Array(Box::new(element)))
    }

    /// String enum node.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Shape::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// Unknown node.
    pub const fn unknown() -> Self {
        Self::new(Shape::Unknown)
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One named object shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    /// Properties in emission order.
    pub properties: IndexMap<String, PropertyNode>,
    /// Names of required properties; any other property is optional.
    pub required: HashSet<String>,
}

impl Definition {
    /// Whether the property is in the required set.
    pub fn is_required(&self, property: &str) -> bool {
        self.required.contains(property)
    }
}

/// All definitions of one or more documents, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    /// Definitions in document order.
    pub entries: IndexMap<String, Definition>,
    /// Names that were defined more than once; the last definition won.
    pub duplicates: Vec<String>,
}

// =============================================================================
// TypeScript IR
// =============================================================================

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`
    Any,
    /// `unknown`
    Unknown,
}

impl TsPrimitive {
    /// The TypeScript keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
            Self::Unknown => "unknown",
        }
    }
}

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive type
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// String literal type: "foo"
    Literal(String),
    /// Named type reference: UserDTO
    Ref(String),
}

/// Interface member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsMember {
    /// Property key, unquoted.
    pub name: String,
    /// Member type.
    pub ty: TsType,
    /// Emit the `?` marker.
    pub optional: bool,
    /// Doc comment text.
    pub doc: Option<String>,
}

/// `export interface Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsInterface {
    /// Declared name, verbatim.
    pub name: String,
    /// Members in emission order.
    pub members: Vec<TsMember>,
}
