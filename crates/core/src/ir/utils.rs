//! Naming helpers shared by codegen, emission and the diagnostics pass.

use std::borrow::Cow;

/// Words that cannot follow `export interface`: predefined type names first,
/// then reserved words.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "any", "bigint", "boolean", "never", "null", "number", "object", "string", "symbol",
    "undefined", "unknown", "void",
    // reserved words
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "while", "with", "yield",
];

/// Final segment of a `$ref` pointer.
///
/// `"#/definitions/UserDTO"` -> `Some("UserDTO")`, `"UserDTO"` -> `Some("UserDTO")`.
/// `None` when that segment is empty (`"#/definitions/"`, `""`).
pub fn ref_to_type_name(pointer: &str) -> Option<&str> {
    pointer.rsplit('/').next().filter(|name| !name.is_empty())
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || matches!(first, '_' | '$'))
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$'))
}

/// Whether a name can be declared as `export interface <name>` unchanged.
pub fn is_valid_type_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_TYPE_NAMES.contains(&name)
}

/// Double-quoted string literal. Quotes, backslashes, line terminators and other
/// control characters are escaped so the literal always stays on one line.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str(r"\\"),
            '"' => literal.push_str(r#"\""#),
            '\n' => literal.push_str(r"\n"),
            '\r' => literal.push_str(r"\r"),
            '\t' => literal.push_str(r"\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                literal.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Property key as written in a member line: bare when it is an identifier,
/// otherwise a string literal. Reserved words stay bare; they are legal keys.
pub fn property_key(name: &str) -> Cow<'_, str> {
    if is_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(string_literal(name))
    }
}
