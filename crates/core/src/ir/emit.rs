//! Text rendering of the TypeScript IR.
//!
//! Every decision is made before this point; emission only concatenates.
//! Members are indented two spaces and a description becomes a single
//! `/** ... */` line above its member.

use super::types::{TsInterface, TsMember, TsPrimitive, TsType};
use super::utils::{property_key, string_literal};

/// Render an IR node as TypeScript source.
pub trait Emit {
    /// The node's TypeScript text.
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        self.keyword().to_string()
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.emit(),
            // `"a" | "b"[]` would make only the last member an array
            Self::Array(element) => match element.as_ref() {
                Self::Union(members) if members.len() > 1 => format!("({})[]", element.emit()),
                _ => format!("{}[]", element.emit()),
            },
            Self::Union(members) => members
                .iter()
                .map(Emit::emit)
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Literal(value) => string_literal(value),
            Self::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsMember {
    fn emit(&self) -> String {
        let marker = if self.optional { "?" } else { "" };
        let line = format!("  {}{marker}: {};", property_key(&self.name), self.ty.emit());
        match &self.doc {
            Some(doc) => format!("  /** {doc} */\n{line}"),
            None => line,
        }
    }
}

impl Emit for TsInterface {
    fn emit(&self) -> String {
        let header = format!("export interface {}", self.name);
        if self.members.is_empty() {
            return format!("{header} {{}}");
        }
        let lines: Vec<String> = self.members.iter().map(Emit::emit).collect();
        format!("{header} {{\n{}\n}}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TsType {
        TsType::Primitive(TsPrimitive::String)
    }

    fn literals(values: &[&str]) -> TsType {
        TsType::Union(
            values
                .iter()
                .map(|value| TsType::Literal((*value).to_string()))
                .collect(),
        )
    }

    fn member(name: &str, ty: TsType, optional: bool) -> TsMember {
        TsMember {
            name: name.to_string(),
            ty,
            optional,
            doc: None,
        }
    }

    #[test]
    fn test_primitive_keywords() {
        let rendered: Vec<_> = [
            TsPrimitive::String,
            TsPrimitive::Number,
            TsPrimitive::Boolean,
            TsPrimitive::Any,
            TsPrimitive::Unknown,
        ]
        .iter()
        .map(Emit::emit)
        .collect();
        assert_eq!(rendered, ["string", "number", "boolean", "any", "unknown"]);
    }

    #[test]
    fn test_literal_is_escaped() {
        assert_eq!(TsType::Literal("ok".to_string()).emit(), r#""ok""#);
        assert_eq!(TsType::Literal(r#"a"b"#.to_string()).emit(), r#""a\"b""#);
        assert_eq!(TsType::Literal("a\nb".to_string()).emit(), r#""a\nb""#);
    }

    #[test]
    fn test_member_key_with_line_break() {
        assert_eq!(
            member("two\nlines", string(), true).emit(),
            r#"  "two\nlines"?: string;"#
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(TsType::Array(Box::new(string())).emit(), "string[]");
        assert_eq!(
            TsType::Array(Box::new(TsType::Array(Box::new(TsType::Ref("Cell".to_string()))))).emit(),
            "Cell[][]"
        );
    }

    #[test]
    fn test_array_of_union_is_parenthesised() {
        assert_eq!(
            TsType::Array(Box::new(literals(&["a", "b"]))).emit(),
            r#"("a" | "b")[]"#
        );
        assert_eq!(
            TsType::Array(Box::new(literals(&["solo"]))).emit(),
            r#""solo"[]"#
        );
    }

    #[test]
    fn test_member_keys() {
        assert_eq!(member("id", string(), false).emit(), "  id: string;");
        assert_eq!(
            member("x-rate-limit", TsType::Primitive(TsPrimitive::Number), true).emit(),
            r#"  "x-rate-limit"?: number;"#
        );
    }

    #[test]
    fn test_member_doc_is_verbatim() {
        let documented = TsMember {
            doc: Some(r#"uses <b>html</b> & "quotes""#.to_string()),
            ..member("a", string(), false)
        };
        assert_eq!(
            documented.emit(),
            "  /** uses <b>html</b> & \"quotes\" */\n  a: string;"
        );
    }

    #[test]
    fn test_interface_without_members() {
        let interface = TsInterface {
            name: "Marker".to_string(),
            members: Vec::new(),
        };
        assert_eq!(interface.emit(), "export interface Marker {}");
    }

    #[test]
    fn test_interface_layout() {
        let interface = TsInterface {
            name: "User".to_string(),
            members: vec![
                member("id", TsType::Primitive(TsPrimitive::Number), false),
                TsMember {
                    doc: Some("display name".to_string()),
                    ..member("name", string(), true)
                },
                member("owner", TsType::Ref("UserDTO".to_string()), true),
            ],
        };
        assert_eq!(
            interface.emit(),
            "export interface User {\n  id: number;\n  /** display name */\n  name?: string;\n  owner?: UserDTO;\n}"
        );
    }
}
