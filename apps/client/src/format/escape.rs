//! Escaping for free text that ends up in the typeset resume.
//!
//! The typesetting backend treats `%` and `.` specially, so stored text
//! carries `\%` and `\.`. Forms always hold the unescaped text; `escape`
//! runs on save and `unescape` on load, and `unescape(escape(s)) == s` for
//! every `s`.

const ESCAPED: &[char] = &['%', '.'];

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Drops exactly one backslash in front of each escaped character.
/// Text saved before escaping existed passes through untouched.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.peek().copied() {
                if ESCAPED.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
