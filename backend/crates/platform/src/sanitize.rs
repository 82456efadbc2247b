//! Input Sanitization
//!
//! Two flavors for untrusted text: [`sanitize_input`] strips characters
//! that carry meaning in shells or markup and is applied before storage of
//! identifiers (usernames, emails); [`sanitize_html`] entity-escapes text
//! that will be rendered in HTML. Both are pure and total.

/// Maximum length of sanitized input, in characters
pub const MAX_INPUT_LENGTH: usize = 1000;

/// Characters removed entirely by [`sanitize_input`]
const STRIPPED_CHARS: &[char] = &['<', '>', '"', '\'', ';', '&', '|', '`', '$'];

/// Strip dangerous characters from untrusted input.
///
/// Removes angle brackets, quotes, and shell metacharacters, trims
/// surrounding whitespace, and truncates to [`MAX_INPUT_LENGTH`]
/// characters. Idempotent: a second pass is a no-op.
pub fn sanitize_input(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    let truncated: String = stripped.trim().chars().take(MAX_INPUT_LENGTH).collect();

    // Truncation can expose trailing whitespace that the earlier trim
    // could not see; drop it so a second pass is a no-op.
    truncated.trim_end().to_string()
}

/// HTML-entity-escape text destined for rendering.
///
/// Escapes `<`, `>`, `"`, `'`, and `/`. Replacement entities contain none
/// of the escaped characters, so the substitutions are non-overlapping and
/// order-independent.
pub fn sanitize_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(ch),
        }
    }
    out
}
