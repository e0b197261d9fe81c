//! Java literal fragments embedded into the generated sources.

use std::fmt::Write;

/// Wrap `s` into a Java string literal.
pub fn string_literal(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 2);
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            _ => buf.push(c),
        }
    }
    buf.push('"');
    buf
}

/// Build a `new String[]{...}` initializer, keeping the order of `items`.
pub fn string_array<S: AsRef<str>>(items: &[S]) -> String {
    let mut buf = String::from("new String[]{");
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            buf.push(',');
        }
        write!(&mut buf, "{}", string_literal(item.as_ref())).unwrap();
    }
    buf.push('}');
    buf
}
