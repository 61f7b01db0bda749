//! Shared helpers for TypeScript text emission.

/// Check if a key needs quoting in property position.
///
/// Returns true if the name is empty, starts with a digit, or contains
/// characters outside `[A-Za-z0-9_$]`. The dynamic path sentinel always
/// needs quoting because of its leading colon.
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            .unwrap_or(false)
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a double-quoted TypeScript string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a key if it is not a plain identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Indentation prefix for a nesting level (2 spaces per level).
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("foo"));
        assert!(!needs_quoting("_foo"));
        assert!(!needs_quoting("$foo"));
        assert!(!needs_quoting("foo123"));

        assert!(needs_quoting(""));
        assert!(needs_quoting("123foo"));
        assert!(needs_quoting(":param"));
        assert!(needs_quoting("foo-bar"));
        assert!(needs_quoting("foo.bar"));
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("hello"), "hello");
        assert_eq!(escape_js_string("hel\"lo"), "hel\\\"lo");
        assert_eq!(escape_js_string("hel\\lo"), "hel\\\\lo");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("users"), "users");
        assert_eq!(quote_if_needed(":param"), "\":param\"");
        assert_eq!(quote_if_needed("123"), "\"123\"");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "    ");
    }
}
