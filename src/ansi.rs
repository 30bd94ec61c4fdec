//! ANSI escape sequence scanning and visual-width measurement.
//!
//! This module is the measurement foundation of the crate: it walks a string
//! rune by rune, distinguishing literal display runes from escape sequences,
//! and builds every width-aware operation on top of that single scan. An
//! escape sequence starts at the introducer rune (`\x1b`), runs through an
//! arbitrary-length body, and ends at the first ASCII-alphabetic rune. The
//! scanner never splits a sequence: each one is yielded as a single token,
//! borrowed verbatim from the input.
//!
//! Display width is measured in terminal columns via [`unicode-width`], so
//! East Asian wide glyphs count as two columns and combining marks as zero.
//!
//! [`unicode-width`]: https://docs.rs/unicode-width
//!
//! # Example
//!
//! ```
//! use scrim::ansi::{string_width, strip_ansi, truncate};
//!
//! let styled = "\x1b[31mRED\x1b[0m text";
//! assert_eq!(string_width(styled), 8);
//! assert_eq!(strip_ansi(styled), "RED text");
//! assert_eq!(truncate(styled, 3), "\x1b[31mRED\x1b[0m");
//! ```

use unicode_width::UnicodeWidthChar;

/// Escape sequence introducer rune.
const ESC: char = '\x1b';

/// A single scanned unit of a terminal string.
///
/// Literal runes carry their display width (0, 1, or 2 columns); escape
/// sequences carry the full sequence text and occupy no columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiToken<'a> {
    /// One display rune and the number of terminal columns it occupies.
    Literal {
        /// The rune itself.
        ch: char,
        /// Display width in columns. Zero for control and combining runes.
        width: usize,
    },
    /// One complete escape sequence, introducer and terminator included.
    Escape(&'a str),
}

/// Iterator over the [`AnsiToken`]s of a string.
///
/// Created by [`tokens`]. The iterator is a two-state machine: in the normal
/// state each rune is yielded as an [`AnsiToken::Literal`]; the introducer
/// rune switches to the in-escape state, which accumulates until the first
/// ASCII-alphabetic rune and yields the whole span as one
/// [`AnsiToken::Escape`]. A sequence left unterminated at the end of the
/// input is still yielded whole, so consumers always see every input byte
/// exactly once.
#[derive(Debug, Clone)]
pub struct AnsiTokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for AnsiTokens<'a> {
    type Item = AnsiToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.input[self.pos..];
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;

        if first == ESC {
            // Everything up to and including the terminator is one token.
            let mut end = rest.len();
            for (idx, ch) in chars {
                if ch.is_ascii_alphabetic() {
                    end = idx + ch.len_utf8();
                    break;
                }
            }
            self.pos += end;
            Some(AnsiToken::Escape(&rest[..end]))
        } else {
            self.pos += first.len_utf8();
            Some(AnsiToken::Literal {
                ch: first,
                width: first.width().unwrap_or(0),
            })
        }
    }
}

/// Scan a string into [`AnsiToken`]s.
///
/// # Example
///
/// ```
/// use scrim::ansi::{tokens, AnsiToken};
///
/// let toks: Vec<_> = tokens("a\x1b[1mb").collect();
/// assert_eq!(
///     toks,
///     vec![
///         AnsiToken::Literal { ch: 'a', width: 1 },
///         AnsiToken::Escape("\x1b[1m"),
///         AnsiToken::Literal { ch: 'b', width: 1 },
///     ]
/// );
/// ```
pub fn tokens(input: &str) -> AnsiTokens<'_> {
    AnsiTokens { input, pos: 0 }
}

/// Visual column width of a string, escape-sequence-aware.
///
/// # Example
///
/// ```
/// use scrim::ansi::string_width;
///
/// assert_eq!(string_width("héllo"), 5);
/// assert_eq!(string_width("日本"), 4);
/// assert_eq!(string_width("\x1b[31mab\x1b[0m"), 2);
/// ```
pub fn string_width(s: &str) -> usize {
    tokens(s)
        .map(|token| match token {
            AnsiToken::Literal { width, .. } => width,
            AnsiToken::Escape(_) => 0,
        })
        .sum()
}

/// Strip escape sequences from text, returning the literal runes only.
///
/// # Example
///
/// ```
/// use scrim::ansi::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[1;31mBold Red\x1b[0m Normal"), "Bold Red Normal");
/// ```
pub fn strip_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for token in tokens(input) {
        if let AnsiToken::Literal { ch, .. } = token {
            result.push(ch);
        }
    }
    result
}

/// First `width` visual columns of a string, escape-sequence-safe.
///
/// Returns the input unchanged when it already fits. Otherwise literal runes
/// are emitted until the next one would overflow `width` — a wide glyph
/// straddling the boundary is dropped whole, never split — while every
/// escape sequence in the input is still emitted in order. A styled region
/// cut by the boundary therefore keeps its closing sequence in the output
/// instead of bleeding its style past the truncation point.
///
/// # Example
///
/// ```
/// use scrim::ansi::truncate;
///
/// assert_eq!(truncate("Normal \x1b[31mRED\x1b[0m end", 9), "Normal \x1b[31mRE\x1b[0m");
/// assert_eq!(truncate("short", 10), "short");
/// ```
pub fn truncate(s: &str, width: usize) -> String {
    if string_width(s) <= width {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut cols = 0;
    let mut full = false;
    for token in tokens(s) {
        match token {
            AnsiToken::Escape(seq) => out.push_str(seq),
            AnsiToken::Literal { ch, width: w } => {
                if full || cols + w > width {
                    full = true;
                    continue;
                }
                cols += w;
                out.push(ch);
            }
        }
    }
    out
}

/// Suffix of a string starting at visual column `cols`, escape-sequence-safe.
///
/// Literal runes occupying the first `cols` columns are dropped — a wide
/// glyph straddling the boundary is dropped whole — while escape sequences
/// from the skipped prefix are emitted, so the suffix keeps whatever styling
/// was active at the cut. The remainder is copied verbatim.
///
/// # Example
///
/// ```
/// use scrim::ansi::truncate_start;
///
/// assert_eq!(truncate_start("Normal \x1b[31mRED\x1b[0m", 9), "\x1b[31mD\x1b[0m");
/// assert_eq!(truncate_start("abcdef", 2), "cdef");
/// ```
pub fn truncate_start(s: &str, cols: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut skipped = 0;
    let mut copying = false;
    for token in tokens(s) {
        match token {
            AnsiToken::Escape(seq) => out.push_str(seq),
            AnsiToken::Literal { ch, width } => {
                if !copying {
                    if skipped < cols {
                        skipped += width;
                        continue;
                    }
                    copying = true;
                }
                out.push(ch);
            }
        }
    }
    out
}

/// Maximum visual line width of a multi-line block.
///
/// # Example
///
/// ```
/// use scrim::ansi::text_width;
///
/// assert_eq!(text_width("ab\nlonger\nc"), 6);
/// ```
pub fn text_width(s: &str) -> usize {
    s.split('\n').map(string_width).max().unwrap_or(0)
}

/// Number of lines in a multi-line block.
///
/// An empty string is one (empty) line, matching how terminal text blocks
/// are rendered.
///
/// # Example
///
/// ```
/// use scrim::ansi::text_height;
///
/// assert_eq!(text_height("one"), 1);
/// assert_eq!(text_height("one\ntwo\nthree"), 3);
/// assert_eq!(text_height(""), 1);
/// ```
pub fn text_height(s: &str) -> usize {
    s.split('\n').count()
}
