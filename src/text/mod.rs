//! Plain-text screenplays.
//!
//! Text with no markup is classified line by line with heuristics; see
//! [`PlainTextClassifier`].

pub mod classifier;
pub mod patterns;

pub use classifier::{ClassifierState, PlainTextClassifier, normalize_line_endings};
