use regex::Regex;
use std::sync::OnceLock;

const DELIMITER: &str = "---";

/// Whether the content opens with a front-matter delimiter.
pub fn has_frontmatter(content: &str) -> bool {
    content.trim_start().starts_with(DELIMITER)
}

/// Remove a leading YAML front-matter block, including its closing delimiter
/// and any blank lines that follow it. Content without front matter, or with
/// an opening delimiter that is never closed, comes back unchanged.
pub fn strip_frontmatter(content: &str) -> String {
    if !has_frontmatter(content) {
        return content.to_string();
    }

    let Some(start) = content.find(DELIMITER) else {
        return content.to_string();
    };
    let after_opening = start + DELIMITER.len();

    match content[after_opening..].find(DELIMITER) {
        Some(offset) => {
            let after_closing = after_opening + offset + DELIMITER.len();
            content[after_closing..].trim_start().to_string()
        }
        // Opening delimiter with no closing one, leave the file alone
        None => content.to_string(),
    }
}

/// Derive the chapter id used in export paths from a file stem.
///
/// `chapter3` and `appendix1` style stems pass through; abbreviated stems like
/// `ch4` or `APP2` are expanded to `chapter4` / `appendix2`. Anything else is
/// used as-is.
pub fn chapter_id(file_stem: &str) -> String {
    static CHAPTER_ABBREV: OnceLock<Regex> = OnceLock::new();
    static APPENDIX_ABBREV: OnceLock<Regex> = OnceLock::new();
    static NUMBER: OnceLock<Regex> = OnceLock::new();

    let chapter_abbrev = CHAPTER_ABBREV
        .get_or_init(|| Regex::new(r"(?i)^ch\d+").expect("Invalid chapter stem regex"));
    let appendix_abbrev = APPENDIX_ABBREV
        .get_or_init(|| Regex::new(r"(?i)^app\d+").expect("Invalid appendix stem regex"));
    let number = NUMBER.get_or_init(|| Regex::new(r"\d+").expect("Invalid number regex"));

    let lower = file_stem.to_lowercase();
    if lower.starts_with("chapter") || lower.starts_with("appendix") {
        return file_stem.to_string();
    }

    if chapter_abbrev.is_match(file_stem)
        && let Some(digits) = number.find(file_stem)
    {
        return format!("chapter{}", digits.as_str());
    }
    if appendix_abbrev.is_match(file_stem)
        && let Some(digits) = number.find(file_stem)
    {
        return format!("appendix{}", digits.as_str());
    }

    file_stem.to_string()
}

/// Prepend the standard export/download front matter for a chapter. Content
/// that already carries front matter is returned unchanged.
pub fn add_frontmatter(content: &str, chapter: &str) -> String {
    if has_frontmatter(content) {
        return content.to_string();
    }

    let frontmatter = format!(
        r#"---
exports:
  - format: md
    output: exports/{chapter}.md
    id: {chapter}md
  - format: pdf
    template: lapreprint-typst
    output: exports/{chapter}.pdf
    id: {chapter}pdf
  - format: docx
    template: curvenote
    output: exports/{chapter}.docx
    id: {chapter}docx
downloads:
  - id: {chapter}md
    title: markdown
  - id: {chapter}pdf
    title: PDF
  - id: {chapter}docx
    title: docx
---"#
    );

    format!("{frontmatter}\n\n{content}")
}
