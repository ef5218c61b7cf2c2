//! Markup neutralization for text embedded in templated pages.
//!
//! The page template engine treats a bare `<` as the start of a tag. Prose
//! like `value < 100` must therefore be entity-escaped, while real HTML tags,
//! closing tags, comments, and everything inside fenced code stay untouched.

/// Fence state while walking a document line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    InText,
    InCode,
}

impl FenceState {
    fn toggled(self) -> Self {
        match self {
            Self::InText => Self::InCode,
            Self::InCode => Self::InText,
        }
    }
}

const FENCE_MARKER: &str = "```";

fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with(FENCE_MARKER)
}

/// Escape bare `<` characters outside fenced code blocks.
///
/// Lines are split on `\n` and rejoined with `\n`, so `\r\n` endings and a
/// trailing newline come back unchanged. An unterminated fence keeps the rest
/// of the document in code state.
pub fn neutralize_markup(text: &str) -> String {
    let mut state = FenceState::InText;
    let mut out = String::with_capacity(text.len());

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }

        if is_fence_line(line) {
            state = state.toggled();
            out.push_str(line);
            continue;
        }

        match state {
            FenceState::InCode => out.push_str(line),
            FenceState::InText => escape_bare_angles(line, &mut out),
        }
    }

    out
}

/// Append `line` to `out`, replacing each `<` not followed by `/`, an ASCII
/// letter, or `!` with `&lt;`.
fn escape_bare_angles(line: &str, out: &mut String) {
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        let starts_markup = matches!(
            chars.peek(),
            Some(next) if *next == '/' || *next == '!' || next.is_ascii_alphabetic()
        );

        if starts_markup {
            out.push('<');
        } else {
            out.push_str("&lt;");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_bare_less_than() {
        assert_eq!(neutralize_markup("Value must be < 100."), "Value must be &lt; 100.");
        assert_eq!(neutralize_markup("a<=b"), "a&lt;=b");
        assert_eq!(neutralize_markup("<<x"), "&lt;<x");
        assert_eq!(neutralize_markup("ends with <"), "ends with &lt;");
    }

    #[test]
    fn preserves_tags_and_comments() {
        let input = "Use <div> tags, </span> closers or <!-- comments -->.";
        assert_eq!(neutralize_markup(input), input);
    }

    #[test]
    fn non_ascii_letter_after_angle_is_escaped() {
        assert_eq!(neutralize_markup("<é>"), "&lt;é>");
        assert_eq!(neutralize_markup("<3 hearts"), "&lt;3 hearts");
    }

    #[test]
    fn fenced_block_is_byte_identical() {
        let input = "before < 1\n```rust\nif a < b && c <= d { x << 2 }\n```\nafter < 2";
        let expected = "before &lt; 1\n```rust\nif a < b && c <= d { x << 2 }\n```\nafter &lt; 2";
        assert_eq!(neutralize_markup(input), expected);
    }

    #[test]
    fn indented_fence_toggles_state() {
        let input = "- item\n  ```\n  a < b\n  ```\n- c < d";
        let expected = "- item\n  ```\n  a < b\n  ```\n- c &lt; d";
        assert_eq!(neutralize_markup(input), expected);
    }

    #[test]
    fn fence_marker_lines_are_not_escaped() {
        // Both the opening and the closing marker line are structural and
        // pass through untouched, even with a trailing `<`.
        let input = "```html <x
<
``` <-- end
after <";
        assert_eq!(neutralize_markup(input), "```html <x
<
``` <-- end
after &lt;");
    }

    #[test]
    fn unterminated_fence_stays_in_code() {
        let input = "x < 1\n```\na < b\nc < d";
        assert_eq!(neutralize_markup(input), "x &lt; 1\n```\na < b\nc < d");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(neutralize_markup(""), "");
    }

    #[test]
    fn line_endings_survive() {
        assert_eq!(neutralize_markup("a < b\r\nc\n"), "a &lt; b\r\nc\n");
        assert_eq!(neutralize_markup("\n\n"), "\n\n");
    }

    #[test]
    fn braces_are_left_alone() {
        let input = "Config is at {base_path}/config.yaml";
        assert_eq!(neutralize_markup(input), input);
    }
}
