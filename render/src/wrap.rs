//! Greedy word wrapping.
//!
//! Words are whitespace-delimited and packed onto a line while they fit.
//! A word longer than the whole budget is cut at the last grapheme that
//! fits in `width` columns and the rest of that word is dropped, so every
//! iteration consumes input and the output never exceeds the budget.
//!
//! Widths are terminal display columns: CJK and other wide characters
//! count as two.

use std::num::NonZeroUsize;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::error::{HelpError, Result};

/// Display width of `text` in terminal columns.
pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wraps `text` into lines of at most `width` display columns.
///
/// # Errors
///
/// Returns [`HelpError::InvalidWrapWidth`] when `width` is zero.
///
/// # Examples
///
/// ```
/// use command_help_render::wrap;
///
/// assert_eq!(wrap("the quick fox", 7).unwrap(), ["the", "quick", "fox"]);
/// // An over-wide word is truncated and its remainder discarded.
/// assert_eq!(wrap("abcdef", 3).unwrap(), ["abc"]);
/// assert!(wrap("text", 0).is_err());
/// ```
pub fn wrap(text: &str, width: usize) -> Result<Vec<String>> {
    let width = NonZeroUsize::new(width).ok_or(HelpError::InvalidWrapWidth)?;
    Ok(wrap_words(text, width))
}

pub(crate) fn wrap_words(text: &str, width: NonZeroUsize) -> Vec<String> {
    let width = width.get();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = display_width(word);

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len == 0 {
            if word_len > width {
                let cut = truncate_to_width(word, width);
                if !cut.is_empty() {
                    lines.push(cut);
                }
                continue;
            }
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// The longest grapheme prefix of `word` that fits in `width` columns.
fn truncate_to_width(word: &str, width: usize) -> String {
    let mut cut = String::new();
    let mut used = 0;
    for grapheme in word.graphemes(true) {
        let g_width = display_width(grapheme);
        if used + g_width > width {
            break;
        }
        cut.push_str(grapheme);
        used += g_width;
    }
    cut
}

/// Wraps multi-paragraph `text` and indents every line after the first.
///
/// Paragraphs are separated by newlines in `text`; a blank paragraph is
/// kept as an empty line. `width` is clamped to at least one column so tiny
/// budgets still make progress.
pub(crate) fn wrap_and_indent(text: &str, indent: usize, width: usize) -> Vec<String> {
    let width = NonZeroUsize::new(width).unwrap_or(NonZeroUsize::MIN);
    let pad = " ".repeat(indent);

    text.lines()
        .flat_map(|paragraph| {
            let wrapped = wrap_words(paragraph, width);
            if wrapped.is_empty() { vec![String::new()] } else { wrapped }
        })
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line
            } else {
                format!("{pad}{line}")
            }
        })
        .collect()
}

/// Fits a free-form line into `width`, keeping its leading indentation.
///
/// Lines that already fit are returned verbatim.
pub(crate) fn fit_line(line: &str, width: usize) -> Vec<String> {
    if display_width(line) <= width {
        return vec![line.to_string()];
    }

    let body = line.trim_start();
    let indent = line.len() - body.len();
    let mut budget = width.saturating_sub(indent);
    let mut prefix = &line[..indent];
    if budget == 0 {
        budget = width;
        prefix = "";
    }

    let budget = NonZeroUsize::new(budget).unwrap_or(NonZeroUsize::MIN);
    wrap_words(body, budget)
        .into_iter()
        .map(|wrapped| format!("{prefix}{wrapped}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_packs_words_greedily() {
        assert_eq!(
            wrap("one two three four", 9).unwrap(),
            ["one two", "three", "four"]
        );
    }

    #[test]
    fn test_wrap_exact_fit() {
        assert_eq!(wrap("ab cd", 5).unwrap(), ["ab cd"]);
    }

    #[test]
    fn test_wrap_truncates_overwide_word_lossily() {
        // The remainder "def" is intentionally dropped.
        assert_eq!(wrap("abcdef", 3).unwrap(), ["abc"]);
        assert_eq!(wrap("xy abcdef z", 3).unwrap(), ["xy", "abc", "z"]);
    }

    #[test]
    fn test_wrap_zero_width_is_rejected() {
        assert!(matches!(wrap("a", 0), Err(HelpError::InvalidWrapWidth)));
    }

    #[test]
    fn test_wrap_width_one_terminates() {
        assert_eq!(wrap("ab c", 1).unwrap(), ["a", "c"]);
    }

    #[test]
    fn test_wrap_normalizes_whitespace() {
        let text = "  lorem   ipsum\tdolor sit\namet  ";
        let lines = wrap(text, 11).unwrap();
        assert!(lines.iter().all(|l| l.chars().count() <= 11));
        assert_eq!(lines.join(" "), "lorem ipsum dolor sit amet");
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 10).unwrap().is_empty());
        assert!(wrap("   ", 10).unwrap().is_empty());
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("héllo wörld", 5).unwrap(), ["héllo", "wörld"]);
    }

    #[test]
    fn test_wrap_measures_display_columns() {
        let lines = wrap("日本語 テキスト 漢字漢字漢字", 6).unwrap();
        assert_eq!(lines, ["日本語", "テキス", "漢字漢"]);
        assert!(lines.iter().all(|l| display_width(l) <= 6));
    }

    #[test]
    fn test_wrap_drops_wide_char_wider_than_budget() {
        assert_eq!(wrap("漢 ab", 1).unwrap(), ["a"]);
    }

    #[test]
    fn test_wrap_and_indent_continuation_lines() {
        let lines = wrap_and_indent("alpha beta gamma", 4, 10);
        assert_eq!(lines, ["alpha beta", "    gamma"]);
    }

    #[test]
    fn test_wrap_and_indent_keeps_paragraphs() {
        let lines = wrap_and_indent("first\nsecond", 2, 20);
        assert_eq!(lines, ["first", "  second"]);
    }

    #[test]
    fn test_wrap_and_indent_keeps_blank_paragraphs() {
        let lines = wrap_and_indent("a\n\nb", 2, 20);
        assert_eq!(lines, ["a", "", "  b"]);
    }

    #[test]
    fn test_wrap_and_indent_clamps_zero_width() {
        let lines = wrap_and_indent("ab", 0, 0);
        assert_eq!(lines, ["a"]);
    }

    #[test]
    fn test_fit_line_preserves_indent() {
        assert_eq!(fit_line("  short", 20), ["  short"]);
        assert_eq!(
            fit_line("  one two three", 10),
            ["  one two", "  three"]
        );
        assert_eq!(fit_line("  説明 文字列", 8), ["  説明", "  文字列"]);
    }
}
