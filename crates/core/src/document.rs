//! Schema document structs for serde deserialization.
//!
//! Only the parts of Swagger 2.0 and OpenAPI 3.x that describe named object shapes
//! are modelled. Everything else (paths, parameters, responses, security) is ignored
//! by serde, and no keyword is validated against the meta-schema.

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::DocumentError;

/// Root of a Swagger 2.0 or OpenAPI 3.x document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    /// Swagger 2.0 version marker (`"2.0"`).
    #[serde(default, deserialize_with = "deserialize_version")]
    pub swagger: Option<String>,
    /// OpenAPI 3.x version marker (`"3.0.3"`, `"3.1.0"`, ...).
    #[serde(default, deserialize_with = "deserialize_version")]
    pub openapi: Option<String>,
    /// Swagger 2.0 schema map.
    pub definitions: Option<DefinitionMap>,
    /// OpenAPI 3.x reusable components.
    pub components: Option<Components>,
}

/// OpenAPI 3.x components section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// OpenAPI 3.x schema map.
    pub schemas: Option<DefinitionMap>,
}

/// Named schema objects in document order.
///
/// A name that appears more than once keeps its first position and its last value;
/// every repeated name is recorded in [`DefinitionMap::duplicates`].
#[derive(Debug, Clone, Default)]
pub struct DefinitionMap {
    entries: IndexMap<String, RawDefinition>,
    duplicates: Vec<String>,
}

/// One named schema object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDefinition {
    /// Declared type of the object itself (usually `object`).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Names of the properties that must be present.
    pub required: Option<Required>,
    /// Property schemas in document order.
    pub properties: Option<IndexMap<String, SchemaNode>>,
}

/// A property schema as written.
///
/// OpenAPI 3.1 allows `true`/`false` in place of a schema object, and generators emit
/// other stray values; those are kept so lowering can map them to the unknown type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// A schema object.
    Schema(Box<RawSchema>),
    /// A boolean schema (`true` accepts anything, `false` nothing).
    Bool(bool),
    /// Any other value.
    Other(serde_json::Value),
}

/// The `items` keyword of an array schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Tuple-style list of positional schemas.
    Tuple(Vec<SchemaNode>),
    /// One schema for every element.
    Single(SchemaNode),
}

/// Property schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    /// The type keyword (string, number, integer, boolean, array, object, ...).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Format hint (e.g., int64, date-time, uuid).
    pub format: Option<String>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Item schema for array types.
    pub items: Option<Items>,

    /// Enum values. Strings are taken verbatim, other scalars by their JSON text.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Human-readable description, rendered as a doc comment.
    pub description: Option<String>,

    /// Union composition (not mapped to a type).
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<SchemaNode>>,

    /// Union composition (not mapped to a type).
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<SchemaNode>>,

    /// Intersection composition (not mapped to a type).
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<SchemaNode>>,
}

/// Schema type can be a single type or an array of types (OpenAPI 3.1 nullable).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
    /// Anything else (`"type": 5`); never matches a type keyword.
    Other(serde_json::Value),
}

/// The `required` keyword of a definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Required {
    /// List of required property names.
    Names(Vec<String>),
    /// A stray boolean, as some generators emit; carries no property names.
    Flag(bool),
    /// Any other value, e.g. a list with non-string entries.
    Other(serde_json::Value),
}

impl Required {
    /// The property names this keyword lists. Non-string list entries are skipped.
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Names(names) => names.clone(),
            Self::Other(serde_json::Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
            Self::Flag(_) | Self::Other(_) => Vec::new(),
        }
    }
}

/// Text encoding of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON text.
    #[default]
    Json,
    /// YAML text.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Pick the format from an HTTP `Content-Type` value; anything without `yaml` is JSON.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.to_ascii_lowercase().contains("yaml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl SchemaDocument {
    /// Parse a document from JSON text. A top-level `null` is an empty document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Option<Self> = serde_json::from_str(json)?;
        Ok(document.unwrap_or_default())
    }

    /// Parse a document from YAML text. A top-level `null` is an empty document.
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        let document: Option<Self> = serde_yaml::from_str(yaml)?;
        Ok(document.unwrap_or_default())
    }

    /// Parse a document in the given format.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        match format {
            DocumentFormat::Json => Self::from_json(text),
            DocumentFormat::Yaml => Self::from_yaml(text),
        }
    }

    /// Version label for logging, e.g. `swagger 2.0` or `openapi 3.0.3`.
    pub fn version(&self) -> Option<String> {
        self.swagger
            .as_ref()
            .map(|v| format!("swagger {v}"))
            .or_else(|| self.openapi.as_ref().map(|v| format!("openapi {v}")))
    }
}

impl DefinitionMap {
    /// Insert a definition. Returns `true` when the name was already present.
    pub fn insert(&mut self, name: String, definition: RawDefinition) -> bool {
        match self.entries.get_mut(&name) {
            Some(existing) => {
                *existing = definition;
                self.duplicates.push(name);
                true
            }
            None => {
                self.entries.insert(name, definition);
                false
            }
        }
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&RawDefinition> {
        self.entries.get(name)
    }

    /// Iterate over `(name, definition)` pairs in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RawDefinition> {
        self.entries.iter()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names that appeared more than once, once per repeat, in the order seen.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

impl<'a> IntoIterator for &'a DefinitionMap {
    type Item = (&'a String, &'a RawDefinition);
    type IntoIter = indexmap::map::Iter<'a, String, RawDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, RawDefinition)> for DefinitionMap {
    fn from_iter<I: IntoIterator<Item = (String, RawDefinition)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (name, definition) in iter {
            map.insert(name, definition);
        }
        map
    }
}

impl<'de> Deserialize<'de> for DefinitionMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DefinitionMapVisitor;

        impl<'de> Visitor<'de> for DefinitionMapVisitor {
            type Value = DefinitionMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of schema names to schema objects")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = DefinitionMap::default();
                while let Some((name, node)) = access.next_entry::<String, DefinitionNode>()? {
                    let definition = match node {
                        DefinitionNode::Definition(definition) => definition,
                        DefinitionNode::Other(value) => {
                            debug!(%name, %value, "Definition is not a schema object; declaring it empty.");
                            RawDefinition::default()
                        }
                    };
                    map.insert(name, definition);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DefinitionMapVisitor)
    }
}

/// A named definition as written; anything that is not a schema object becomes an
/// empty declaration.
#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionNode {
    Definition(RawDefinition),
    Other(serde_json::Value),
}

/// Version markers are strings in JSON but often bare numbers in YAML (`swagger: 2.0`).
fn deserialize_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Version>::deserialize(deserializer)?.map(|version| match version {
        Version::Text(text) => text,
        Version::Number(number) => number.to_string(),
    }))
}
