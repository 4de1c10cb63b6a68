//! # screenplay-import
//!
//! Converts screenplays into an ordered list of typed elements (scene
//! headings, action, character cues, dialogue, transitions, ...).
//!
//! Two inputs are understood:
//!
//! - Fade In archives: a ZIP holding an Open Screenplay Format
//!   `document.xml`. The ZIP reader and raw DEFLATE path are built in; the
//!   XML paragraphs are mapped to elements by their base style.
//! - Plain text: each line is classified by a heuristic state machine.
//!
//! ## Example
//!
//! ```
//! use screenplay_import::{ElementKind, import};
//!
//! let elements = import(b"INT. KITCHEN - DAY\nJANE\nHello there.").unwrap();
//! let kinds: Vec<_> = elements.iter().map(|e| e.kind).collect();
//! assert_eq!(kinds, [ElementKind::Slugline, ElementKind::Character, ElementKind::Dialogue]);
//! ```

pub mod cli;
pub mod element;
pub mod error;
pub mod io;
pub mod osf;
pub mod pipeline;
pub mod style;
pub mod text;
pub mod zip;

pub use cli::Cli;
pub use element::{CanonicalElement, ElementKind, Span};
pub use error::{ImportError, Result};
pub use io::{HttpSource, InputSource, LocalFileSource, open_source};
pub use pipeline::{ImportOptions, ImportPipeline, InputFormat, import, looks_like_screenplay};
pub use style::{ScreenplayStyles, StyleDefinition, StyleLookup, build_document, render_plain};
pub use zip::{CentralDirectoryEntry, ZipExtractor};
