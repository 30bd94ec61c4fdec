//! Overlay compositing of terminal text blocks.
//!
//! Composites a multi-line block of styled text (the overlay) on top of
//! another block (the background) at an arbitrary row and column, measured
//! in visual columns. Background content to the left and right of each
//! overlay line is preserved by escape-sequence-safe truncation, so styled
//! backgrounds survive being cut mid-region. The background grows as needed:
//! overlay rows past the last background line append new lines, and an
//! insertion column past the end of a line pads it with literal spaces.
//!
//! With margin transparency enabled, leading and trailing whitespace in each
//! overlay line is replaced by the background characters at those columns,
//! letting the background show through padded edges of the overlay while
//! interior whitespace still blanks it.
//!
//! # Example
//!
//! ```
//! let bg = "Line 1\nLine 2\nLine 3\nLine 4\nLine 5";
//! let composed = scrim::overlay(bg, "*****", 2, 0, false);
//! assert_eq!(composed, "Line 1\nLine 2\n*****3\nLine 4\nLine 5");
//! ```

use std::borrow::Cow;

use crate::ansi::{
    string_width, text_height, text_width, tokens, truncate, truncate_start, AnsiToken,
};

/// Composite `overlay` onto `bg` so the overlay block is centered on the
/// background block.
///
/// The centering row and column are computed from the blocks' line counts
/// and maximum visual line widths, clamped at zero when the overlay is the
/// larger block, then handed to [`overlay`].
///
/// # Example
///
/// ```
/// let bg = "..........\n..........\n..........";
/// assert_eq!(
///     scrim::overlay_center(bg, "**", false),
///     "..........\n....**....\n..........",
/// );
/// ```
pub fn overlay_center(bg: &str, overlay: &str, ignore_margin_whitespace: bool) -> String {
    let row = (text_height(bg) as isize - text_height(overlay) as isize) / 2;
    let col = (text_width(bg) as isize - text_width(overlay) as isize) / 2;
    self::overlay(
        bg,
        overlay,
        row.max(0) as usize,
        col.max(0) as usize,
        ignore_margin_whitespace,
    )
}

/// Composite `overlay` onto `bg` with the overlay's top-left rune at
/// (`row`, `col`), both zero-indexed; `col` is measured in visual columns.
///
/// Each overlay line replaces the background columns it covers on its target
/// row. Background escape sequences cut by the overlay region are kept whole
/// on whichever side they land. Overlay rows below the last background line
/// append new lines, and a `col` past the end of a background line pads the
/// line with spaces first.
///
/// When `ignore_margin_whitespace` is set, leading and trailing whitespace
/// of each overlay line (in visual columns, on the escape-stripped content)
/// is replaced by the background characters at those columns instead of
/// blanking them.
///
/// # Example
///
/// ```
/// let bg = "Nostrum libero modi velit neque dolores.";
/// assert_eq!(
///     scrim::overlay(bg, "*********", 0, 10, false),
///     "Nostrum li********* velit neque dolores.",
/// );
/// ```
pub fn overlay(
    bg: &str,
    overlay: &str,
    row: usize,
    col: usize,
    ignore_margin_whitespace: bool,
) -> String {
    let mut bg_lines: Vec<String> = bg.split('\n').map(str::to_string).collect();

    for (idx, overlay_line) in overlay.split('\n').enumerate() {
        let target_row = row + idx;

        if bg_lines.len() <= target_row {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                rows = target_row + 1 - bg_lines.len(),
                "growing background to reach overlay row"
            );
            bg_lines.resize_with(target_row + 1, String::new);
        }

        let bg_line = &mut bg_lines[target_row];
        let bg_line_width = string_width(bg_line);
        if bg_line_width < col {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                cols = col - bg_line_width,
                "padding background line to reach insertion column"
            );
            bg_line.push_str(&" ".repeat(col - bg_line_width));
        }

        let overlay_line = if ignore_margin_whitespace {
            Cow::Owned(resolve_margins(bg_line, overlay_line, col))
        } else {
            Cow::Borrowed(overlay_line)
        };

        let bg_left = truncate(bg_line, col);

        let insertion_end = col + string_width(&overlay_line);
        let bg_right = if insertion_end < string_width(bg_line) {
            truncate_start(bg_line, insertion_end)
        } else {
            String::new()
        };

        *bg_line = format!("{bg_left}{overlay_line}{bg_right}");
    }

    bg_lines.join("\n")
}

/// Rewrite an overlay line so its leading and trailing whitespace reveals
/// the background instead of blanking it.
///
/// The whitespace span is found on the escape-stripped content in
/// visual-column units; the rewrite pass then walks the original line,
/// copying escape sequences and interior content verbatim and substituting
/// background characters for each column a margin whitespace rune covers.
fn resolve_margins(bg_line: &str, overlay_line: &str, col: usize) -> String {
    // First and last visual columns occupied by non-whitespace content.
    // None means the line is whitespace from end to end.
    let mut span: Option<(usize, usize)> = None;
    let mut visual_pos = 0;
    for token in tokens(overlay_line) {
        if let AnsiToken::Literal { ch, width } = token {
            if width > 0 && !ch.is_whitespace() {
                let last = visual_pos + width - 1;
                span = Some(match span {
                    Some((first, _)) => (first, last),
                    None => (visual_pos, last),
                });
            }
            visual_pos += width;
        }
    }

    let mut result = String::with_capacity(overlay_line.len());
    let mut visual_pos = 0;
    for token in tokens(overlay_line) {
        match token {
            AnsiToken::Escape(seq) => result.push_str(seq),
            AnsiToken::Literal { ch, width } => {
                let in_margin = match span {
                    Some((first, last)) => visual_pos < first || visual_pos > last,
                    None => true,
                };
                if in_margin && ch.is_whitespace() {
                    // A wide whitespace rune covers several columns; reveal
                    // the background at each of them.
                    for offset in 0..width {
                        result.push_str(&bg_char_at(bg_line, col + visual_pos + offset));
                    }
                } else {
                    result.push(ch);
                }
                visual_pos += width;
            }
        }
    }
    result
}

/// The background character occupying `visual_index`, with any escape
/// sequences encountered before it so the rune keeps its styling.
///
/// Past the end of the line's content the background is blank space, so a
/// single literal space is returned.
fn bg_char_at(line: &str, visual_index: usize) -> String {
    let mut result = String::new();
    let mut cols = 0;
    for token in tokens(line) {
        match token {
            AnsiToken::Escape(seq) => result.push_str(seq),
            AnsiToken::Literal { ch, width } => {
                if cols + width > visual_index {
                    result.push(ch);
                    return result;
                }
                cols += width;
            }
        }
    }
    " ".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bg_char_at_plain() {
        assert_eq!(bg_char_at("Line 1", 0), "L");
        assert_eq!(bg_char_at("Line 1", 4), " ");
        assert_eq!(bg_char_at("Line 1", 5), "1");
    }

    #[test]
    fn test_bg_char_at_beyond_content_is_space() {
        assert_eq!(bg_char_at("ab", 5), " ");
        assert_eq!(bg_char_at("", 0), " ");
        // Accumulated escapes are discarded when no rune covers the column.
        assert_eq!(bg_char_at("a\x1b[31m", 3), " ");
    }

    #[test]
    fn test_bg_char_at_keeps_preceding_escapes() {
        assert_eq!(bg_char_at("ab\x1b[31mcd\x1b[0m", 2), "\x1b[31mc");
        // Only literals count toward the column index.
        assert_eq!(bg_char_at("\x1b[1mx", 0), "\x1b[1mx");
    }

    #[test]
    fn test_bg_char_at_wide_glyph_covers_two_columns() {
        assert_eq!(bg_char_at("日本", 0), "日");
        assert_eq!(bg_char_at("日本", 1), "日");
        assert_eq!(bg_char_at("日本", 2), "本");
    }

    #[test]
    fn test_resolve_margins_leading_and_trailing() {
        assert_eq!(resolve_margins("##########", " ** ", 0), "#**#");
        assert_eq!(resolve_margins("##########", "  ab", 3), "##ab");
    }

    #[test]
    fn test_resolve_margins_interior_whitespace_untouched() {
        assert_eq!(resolve_margins("##########", " a b ", 0), "#a b#");
    }

    #[test]
    fn test_resolve_margins_all_whitespace_line() {
        assert_eq!(resolve_margins("Line 1", "      ", 0), "Line 1");
    }

    #[test]
    fn test_resolve_margins_escapes_copied_verbatim() {
        assert_eq!(
            resolve_margins("##########", "\x1b[31m *\x1b[0m", 0),
            "\x1b[31m#*\x1b[0m"
        );
    }

    #[test]
    fn test_resolve_margins_offset_column() {
        // Margin columns are looked up at absolute background columns.
        assert_eq!(resolve_margins("abcdefgh", " x ", 2), "cxe");
    }

    #[test]
    fn test_resolve_margins_beyond_background_reveals_spaces() {
        assert_eq!(resolve_margins("ab", " x ", 2), " x ");
    }

    #[test]
    fn test_overlay_grows_rows() {
        assert_eq!(overlay("top", "*", 2, 0, false), "top\n\n*");
    }

    #[test]
    fn test_overlay_pads_columns() {
        assert_eq!(overlay("ab", "**", 0, 5, false), "ab   **");
    }

    #[test]
    fn test_overlay_empty_overlay_within_bounds_is_identity() {
        let bg = "Line 1\nLine 2";
        assert_eq!(overlay(bg, "", 0, 0, false), bg);
        assert_eq!(overlay(bg, "", 1, 6, false), bg);
    }

    #[test]
    fn test_overlay_wide_glyph_background() {
        // The glyph straddling the cut is dropped whole on both sides, so
        // the overlay shifts left by the lost column rather than splitting 日.
        assert_eq!(overlay("日本語", "*", 0, 1, false), "*本語");
    }

    #[test]
    fn test_overlay_center_odd_remainder() {
        assert_eq!(overlay_center(".....\n.....\n.....", "#", false), ".....\n..#..\n.....");
    }

    #[test]
    fn test_overlay_center_clamps_oversized_overlay() {
        // Overlay larger than the background clamps to the origin.
        assert_eq!(overlay_center("ab", "12345", false), "12345");
    }
}
