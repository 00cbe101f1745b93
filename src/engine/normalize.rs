//! Text canonicalization.
//!
//! The normalized form is a side channel: it supports the benign-context
//! heuristic and diagnostics, and is never fed to the matcher. The matcher
//! scans the original text so match snippets keep their exact casing.

use unicode_normalization::UnicodeNormalization;

/// Invisible formatting characters stripped during normalization.
///
/// Zero-width space/non-joiner/joiner, word joiner, BOM, and the bidi
/// embedding/override/isolate controls.
const INVISIBLE: &[char] = &[
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}', '\u{202A}', '\u{202B}',
    '\u{202C}', '\u{202D}', '\u{202E}', '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
];

/// Canonicalize text for matching-stability.
///
/// Applies, in order: NFKC compatibility normalization, removal of
/// zero-width/invisible formatting characters, CRLF to LF, collapse of
/// space/tab runs to a single space, trim, lowercase. Never fails; empty
/// input yields an empty string.
pub fn normalize(text: &str) -> String {
    let nfkc: String = text.nfkc().collect();

    let mut out = String::with_capacity(nfkc.len());
    let mut pending_space = false;
    for ch in nfkc.replace("\r\n", "\n").chars() {
        if INVISIBLE.contains(&ch) {
            continue;
        }
        if ch == ' ' || ch == '\t' {
            pending_space = true;
            continue;
        }
        if pending_space {
            if !out.is_empty() && !out.ends_with('\n') && ch != '\n' {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(ch);
    }

    out.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize("  Hello World  "), "hello world");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize("a  \t  b"), "a b");
    }

    #[test]
    fn test_strips_zero_width() {
        assert_eq!(normalize("ig\u{200B}no\u{200C}re this"), "ignore this");
        assert_eq!(normalize("\u{FEFF}bom"), "bom");
    }

    #[test]
    fn test_crlf_to_lf() {
        assert_eq!(normalize("line1\r\nline2"), "line1\nline2");
    }

    #[test]
    fn test_nfkc_compatibility() {
        // Fullwidth forms fold to ASCII under NFKC.
        assert_eq!(normalize("ｉｇｎｏｒｅ"), "ignore");
        // Ligatures decompose.
        assert_eq!(normalize("ﬁle"), "file");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \r\n "), "");
    }
}
