//! The pipeline's output type.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Canonical screenplay element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Title,
    Author,
    Contact,
    Draft,
    Slugline,
    Action,
    Character,
    Parenthetical,
    Dialogue,
    Transition,
    Shot,
    Act,
    Insert,
    Sfx,
}

impl ElementKind {
    /// Paragraph style name the document builder resolves this kind to
    pub fn style_name(&self) -> &'static str {
        match self {
            ElementKind::Title => "Title",
            ElementKind::Author => "Author",
            ElementKind::Contact => "Contact",
            ElementKind::Draft => "Draft",
            ElementKind::Slugline => "Scene Heading",
            ElementKind::Action => "Action",
            ElementKind::Character => "Character",
            ElementKind::Parenthetical => "Parenthetical",
            ElementKind::Dialogue => "Dialogue",
            ElementKind::Transition => "Transition",
            ElementKind::Shot => "Shot",
            ElementKind::Act => "Act",
            ElementKind::Insert => "Insert",
            ElementKind::Sfx => "SFX",
        }
    }

    /// Title page kinds
    pub fn is_front_matter(&self) -> bool {
        matches!(
            self,
            ElementKind::Title | ElementKind::Author | ElementKind::Contact | ElementKind::Draft
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_name())
    }
}

/// Formatting attached to a byte range of an element's text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub range: Range<usize>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Explicit point size; only kept on title elements
    pub size: Option<f32>,
}

/// One classified paragraph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalElement {
    pub kind: ElementKind,
    pub text: String,
    /// Empty for plain-text input
    pub runs: Vec<Span>,
}

impl CanonicalElement {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Text covered by a span
    pub fn span_text(&self, span: &Span) -> &str {
        self.text.get(span.range.clone()).unwrap_or("")
    }
}
