use regex::Regex;
use std::sync::OnceLock;

fn opening_fence() -> &'static Regex {
    static OPENING: OnceLock<Regex> = OnceLock::new();
    OPENING.get_or_init(|| Regex::new(r"^(\s*):::\{").expect("Invalid opening fence regex"))
}

fn closing_fence() -> &'static Regex {
    static CLOSING: OnceLock<Regex> = OnceLock::new();
    CLOSING.get_or_init(|| Regex::new(r"^(\s*):::(\s*)$").expect("Invalid closing fence regex"))
}

/// Rewrite admonition closing fences so their indentation matches the opening
/// fence they pair with.
///
/// An opening fence is a line of the shape `:::{name}` after optional leading
/// whitespace; a closing fence is `:::` alone on a line. Fences pair up
/// last-opened-first-closed. A closing fence with no open fence on the stack
/// is left untouched rather than guessed at (it may be an unrelated construct
/// such as a code fence), and openers still unclosed at end of input are
/// dropped without complaint. Every other line passes through byte-identical,
/// so the function is idempotent.
pub fn balance_admonitions(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut result = Vec::with_capacity(lines.len());

    // Indentation of each opening fence not yet closed, innermost last.
    let mut open_indents: Vec<&str> = Vec::new();

    for line in lines {
        if let Some(caps) = opening_fence().captures(line) {
            open_indents.push(caps.get(1).map_or("", |m| m.as_str()));
            result.push(line.to_string());
        } else if let Some(caps) = closing_fence().captures(line) {
            let current_indent = caps.get(1).map_or("", |m| m.as_str());

            match open_indents.pop() {
                Some(expected_indent) if expected_indent != current_indent => {
                    result.push(format!("{expected_indent}:::"));
                }
                Some(_) => result.push(line.to_string()),
                // No matching opener seen, keep as-is.
                None => result.push(line.to_string()),
            }
        } else {
            result.push(line.to_string());
        }
    }

    result.join("\n")
}
