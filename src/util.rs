//! Formatting helpers for the text output.
//!
//! Name lists are written in the shape of a Python list literal
//! (`['Baby mole', "Lil' zik"]`), matching the existing contents
//! of the output file.

/// Renders names as a Python-style list literal.
///
/// Examples:
/// - []                      -> "[]"
/// - ["Baby mole"]           -> "['Baby mole']"
/// - ["Lil' zik", "Kraken"]  -> "[\"Lil' zik\", 'Kraken']"
///
pub fn py_list<S: AsRef<str>>(names: &[S]) -> String {
    let inner: Vec<String> = names.iter().map(|n| py_str(n.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

/// Quotes a single string the way Python's `repr` does for
/// text and control characters.
///
/// Single quotes are preferred; double quotes are used when the
/// text contains `'` but no `"`. Control characters other than
/// `\n`, `\r` and `\t` are written as `\xNN`.
pub fn py_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
