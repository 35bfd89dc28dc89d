//! `ratatui-reveal-core` holds the framework-free half of the scroll reveal effect.
//!
//! Nothing in this crate touches a terminal. It turns a paragraph into a tree of timing intervals,
//! maps a progress scalar onto per-character opacities, and provides a small observable progress
//! cell that a host event loop can feed from its scroll position.
//!
//! ## Design goals
//!
//! - Pure math: partitioning and opacity mapping are total functions, trivially unit-testable.
//! - Event-loop agnostic: the host decides when to update progress and when to render.
//! - Single-threaded: [`progress::ProgressValue`] is an `Rc`-backed cell, released on drop.
//!
//! ## Getting started
//!
//! Most users should depend on `ratatui-reveal`, which renders [`text::RevealText`] into a
//! `ratatui` buffer. Use this crate directly to drive other renderers.
//!
//! Useful entry points:
//! - [`interval::partition_words`] / [`interval::partition_chars`]: split [0,1] across items.
//! - [`opacity::opacity`]: clamped linear ramp of progress over an interval.
//! - [`text::RevealText`]: paragraph split into words and characters with their intervals.
//! - [`progress::ScrollTracker`]: converts a region's position in a viewport into progress.
//!
//! ```
//! use ratatui_reveal_core::opacity::opacity;
//! use ratatui_reveal_core::text::RevealText;
//!
//! let text = RevealText::new("ab cd");
//! let b = &text.words()[0].chars()[1];
//! assert!((opacity(0.3, b.interval) - 0.2).abs() < 1e-9);
//! ```
pub mod error;
pub mod interval;
pub mod opacity;
pub mod progress;
pub mod text;

pub use error::OffsetParseError;
pub use interval::Interval;
pub use progress::ProgressSource;
pub use progress::ProgressValue;
pub use progress::ScrollTracker;
pub use text::RevealText;
