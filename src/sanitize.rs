//! Filename sanitization.
//!
//! Output paths are built from untrusted video ids and user-supplied handles,
//! so every path segment passes through [`sanitize`] before touching the
//! filesystem.

/// Characters that are invalid in filenames on at least one supported platform.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Maximum filename length in Unicode codepoints.
const MAX_FILENAME_LEN: usize = 255;

/// Turn arbitrary text into a safe, bounded-length path segment.
///
/// Every run of invalid characters (including ASCII control characters)
/// collapses to a single `_`. Leading and trailing whitespace and `.` are
/// stripped, an empty result becomes `"_"`, and the output is capped at 255
/// codepoints. Pure and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut in_invalid_run = false;
    for c in raw.chars() {
        if c.is_control() || INVALID_CHARS.contains(&c) {
            if !in_invalid_run {
                collapsed.push('_');
                in_invalid_run = true;
            }
        } else {
            collapsed.push(c);
            in_invalid_run = false;
        }
    }

    // Trimming to a fixpoint (rather than whitespace-then-dots once) keeps
    // the function idempotent for inputs like "a. . ".
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        return "_".to_string();
    }

    if trimmed.chars().count() <= MAX_FILENAME_LEN {
        return trimmed.to_string();
    }

    // Truncation can expose a trailing dot or space at the new boundary.
    let truncated: String = trimmed.chars().take(MAX_FILENAME_LEN).collect();
    let retrimmed = truncated.trim_end_matches(|c: char| c.is_whitespace() || c == '.');
    if retrimmed.is_empty() {
        "_".to_string()
    } else {
        retrimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_invalid_runs_with_single_underscore() {
        assert_eq!(sanitize("a/b"), "a_b");
        assert_eq!(sanitize("a//:*b"), "a_b");
        assert_eq!(sanitize("one<two>three"), "one_two_three");
        assert_eq!(sanitize("tab\there"), "tab_here");
    }

    #[test]
    fn test_trims_whitespace_and_dots() {
        assert_eq!(sanitize("  clip  "), "clip");
        assert_eq!(sanitize("..hidden.."), "hidden");
        assert_eq!(sanitize(" .mixed. "), "mixed");
    }

    #[test]
    fn test_empty_inputs_become_underscore() {
        assert_eq!(sanitize(""), "_");
        assert_eq!(sanitize("..."), "_");
        assert_eq!(sanitize("   "), "_");
    }

    #[test]
    fn test_length_is_bounded() {
        let long = "x".repeat(1000);
        assert_eq!(sanitize(&long).chars().count(), 255);

        // Multi-byte codepoints count as one unit.
        let long_unicode = "ü".repeat(1000);
        assert_eq!(sanitize(&long_unicode).chars().count(), 255);
    }

    #[test]
    fn test_truncation_does_not_leave_trailing_dot() {
        let mut input = "x".repeat(254);
        input.push('.');
        input.push_str(&"y".repeat(100));
        let out = sanitize(&input);
        assert!(!out.ends_with('.'));
        assert!(out.chars().count() <= 255);
    }

    #[test]
    fn test_idempotent() {
        let cases = [
            "",
            "...",
            "a. . ",
            "normal name.mp4",
            "bad/../../path",
            "  ..dots and spaces..  ",
            "video<id>:*?",
        ];
        for case in cases {
            let once = sanitize(case);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", case);
        }

        let long = format!("{}...{}", "a".repeat(250), "b".repeat(50));
        let once = sanitize(&long);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_output_never_contains_invalid_characters() {
        let inputs = ["a/b\\c:d*e?f\"g<h>i|j", "\0\0weird\0", "x\u{7f}y"];
        for input in inputs {
            let out = sanitize(input);
            assert!(
                out.chars()
                    .all(|c| !c.is_control() && !INVALID_CHARS.contains(&c)),
                "invalid char survived in {:?}",
                out
            );
        }
    }
}
