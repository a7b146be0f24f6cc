//! Query name <-> record field name mapping.
//!
//! Only the first character is folded, and only for ASCII letters.
//! `fooBar` looks up `FooBar`; `URL` is reported as `uRL`.

use std::borrow::Cow;

/// Uppercase the first letter, for looking up a declared field.
pub fn capitalize(name: &str) -> Cow<'_, str> {
    match name.as_bytes().first() {
        Some(c) if c.is_ascii_lowercase() => {
            let mut folded = String::with_capacity(name.len());
            folded.push(c.to_ascii_uppercase() as char);
            folded.push_str(&name[1..]);
            Cow::Owned(folded)
        }
        _ => Cow::Borrowed(name),
    }
}

/// Lowercase the first letter, for reporting a declared field.
pub fn uncapitalize(name: &str) -> Cow<'_, str> {
    match name.as_bytes().first() {
        Some(c) if c.is_ascii_uppercase() => {
            let mut folded = String::with_capacity(name.len());
            folded.push(c.to_ascii_lowercase() as char);
            folded.push_str(&name[1..]);
            Cow::Owned(folded)
        }
        _ => Cow::Borrowed(name),
    }
}
