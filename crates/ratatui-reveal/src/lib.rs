//! `ratatui-reveal` renders a paragraph whose characters fade in as the user scrolls past it.
//!
//! The math lives in `ratatui-reveal-core` and is re-exported here. This crate adds the terminal
//! side: colour blending, word wrapping, and a [`paragraph::RevealParagraph`] widget that draws
//! into a `ratatui` buffer.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input, scrolling, and rendering from your app.
//! - No async runtime: everything runs on the main thread.
//! - Progress is borrowed, never owned: the widget reads any [`progress::ProgressSource`].
//!
//! ## Getting started
//!
//! A typical app keeps a [`viewport::ViewportState`] for its page, a
//! [`progress::ScrollTracker`] for the paragraph's rows on that page, and calls
//! [`progress::ScrollTracker::update`] after every scroll before rendering.
//!
//! Useful entry points:
//! - [`paragraph::RevealParagraph`]: the widget.
//! - [`theme::RevealTheme`]: foreground/background colours used for blending.
//! - [`scroll::ScrollBindings`]: keys and mouse wheel to scroll a page.
//! - `crossterm_input` (feature `crossterm`): crossterm event conversion.
pub use ratatui_reveal_core::error;
pub use ratatui_reveal_core::interval;
pub use ratatui_reveal_core::opacity;
pub use ratatui_reveal_core::progress;
pub use ratatui_reveal_core::text;

pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod paragraph;
pub mod render;
pub mod scroll;
pub mod viewport;
pub mod wrapping;
