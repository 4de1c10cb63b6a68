//! Open Screenplay Format (Fade In) documents.
//!
//! - [`parser`]: streaming XML to paragraph/run conversion
//! - [`classify`]: base style to screenplay element mapping

pub mod classify;
pub mod parser;

pub use classify::{classify_document, classify_paragraph, classify_style};
pub use parser::{OsfParagraph, OsfRun, parse_osf};
