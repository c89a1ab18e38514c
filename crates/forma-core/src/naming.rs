//! Identifier and class-name utilities.
//!
//! All functions are pure string transforms. Punctuation is treated as a word
//! separator, so `"Submit Button!"`, `"submit-button"` and `"submit_button"`
//! all produce the same words.

use convert_case::{Case, Casing};

/// Words that cannot be used as identifiers in generated scripts.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Replace every non-alphanumeric run with a single space.
fn words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_numeric())
}

/// Convert to PascalCase.
///
/// A result that would start with a digit is prefixed with `C`.
pub fn to_pascal_case(s: &str) -> String {
    let cleaned = words(s);
    if cleaned.is_empty() {
        return String::new();
    }
    let pascal = cleaned.to_case(Case::Pascal);
    if starts_with_digit(&pascal) {
        format!("C{}", pascal)
    } else {
        pascal
    }
}

/// Convert to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert to kebab-case.
///
/// A result that would start with a digit is prefixed with `c-`.
pub fn to_kebab_case(s: &str) -> String {
    let cleaned = words(s);
    if cleaned.is_empty() {
        return String::new();
    }
    let kebab = cleaned.to_case(Case::Kebab);
    if starts_with_digit(&kebab) {
        format!("c-{}", kebab)
    } else {
        kebab
    }
}

/// Whether `ident` is a reserved word in generated scripts.
pub fn is_reserved(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident)
}

/// camelCase identifier that never collides with a reserved word.
///
/// Returns `fallback` when `name` has no usable characters.
pub fn safe_identifier(name: Option<&str>, fallback: &str) -> String {
    let ident = name.map(to_camel_case).unwrap_or_default();
    let ident = if ident.is_empty() {
        fallback.to_string()
    } else {
        ident
    };
    if is_reserved(&ident) {
        format!("_{}", ident)
    } else {
        ident
    }
}

/// PascalCase component name, or `fallback` when `name` has no usable characters.
pub fn component_name(name: Option<&str>, fallback: &str) -> String {
    let pascal = name.map(to_pascal_case).unwrap_or_default();
    if pascal.is_empty() {
        fallback.to_string()
    } else {
        pascal
    }
}

/// Stylesheet class name for a node name (`item` when unnamed).
pub fn class_name(name: Option<&str>) -> String {
    let kebab = name.map(to_kebab_case).unwrap_or_default();
    if kebab.is_empty() {
        "item".to_string()
    } else {
        kebab
    }
}

/// Escape literal text for embedding in JSX markup.
pub fn escape_jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape literal text for embedding in HTML or template markup.
pub fn escape_html_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
