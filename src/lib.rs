//! ANSI-aware compositing of terminal text blocks.
//!
//! `scrim` overlays one block of styled terminal text on top of another at
//! an arbitrary row and column, the way a modal or popup sits on a rendered
//! view. It gets three things right that naive string splicing gets wrong:
//!
//! - **Visual-width arithmetic**: columns are terminal cells, not bytes or
//!   runes, so East Asian wide glyphs and combining marks line up.
//! - **Escape-sequence safety**: color and style sequences embedded in
//!   either block are never split by a cut; a styled background region
//!   sliced by the overlay keeps its sequences whole on either side.
//! - **Transparent margins**: optionally, leading and trailing whitespace
//!   in the overlay lets the background show through instead of blanking
//!   it, so padded popups don't punch rectangular holes in the view.
//!
//! The crate renders nothing itself: input and output are plain UTF-8 text
//! with `\n` line separators, suitable for any terminal frontend.
//!
//! # Example
//!
//! ```
//! let bg = "Nostrum libero modi velit neque dolores.";
//! assert_eq!(
//!     scrim::overlay(bg, "*********", 0, 10, false),
//!     "Nostrum li********* velit neque dolores.",
//! );
//!
//! let centered = scrim::overlay_center("..........\n..........\n..........", "**", false);
//! assert_eq!(centered, "..........\n....**....\n..........");
//! ```
//!
//! # Feature Flags
//!
//! - `tracing`: trace-level events when compositing grows or pads the
//!   background canvas.

pub mod ansi;
pub mod overlay;

pub use ansi::{
    string_width, strip_ansi, text_height, text_width, tokens, truncate, truncate_start,
    AnsiToken, AnsiTokens,
};
pub use overlay::{overlay, overlay_center};
