//! Style lookup and document assembly.
//!
//! The importer only classifies. Turning elements into a page is the
//! caller's job, which resolves each kind through a [`StyleLookup`].

use serde::Serialize;

use crate::element::{CanonicalElement, ElementKind};

/// Template used when the caller does not name one
pub const DEFAULT_TEMPLATE: &str = "screenplay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Resolved paragraph style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDefinition {
    pub name: &'static str,
    pub alignment: Alignment,
    /// Columns from the left margin
    pub left_indent: usize,
    /// Columns from the right margin
    pub right_indent: usize,
    /// Blank lines before the paragraph
    pub space_before: usize,
    pub uppercase: bool,
}

/// Maps an element kind to a paragraph style for a template.
pub trait StyleLookup {
    fn style_for(&self, kind: ElementKind, template: &str) -> StyleDefinition;
}

/// Standard screenplay page geometry in 10-pitch columns (a 60 column body).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenplayStyles;

impl StyleLookup for ScreenplayStyles {
    fn style_for(&self, kind: ElementKind, _template: &str) -> StyleDefinition {
        let (alignment, left_indent, right_indent, space_before, uppercase) = match kind {
            ElementKind::Title => (Alignment::Center, 0, 0, 0, false),
            ElementKind::Author => (Alignment::Center, 0, 0, 1, false),
            ElementKind::Contact | ElementKind::Draft => (Alignment::Left, 0, 30, 1, false),
            ElementKind::Slugline | ElementKind::Act => (Alignment::Left, 0, 0, 1, true),
            ElementKind::Action | ElementKind::Insert | ElementKind::Sfx => {
                (Alignment::Left, 0, 0, 1, false)
            }
            ElementKind::Shot => (Alignment::Left, 0, 0, 1, true),
            ElementKind::Character => (Alignment::Left, 22, 0, 1, true),
            ElementKind::Parenthetical => (Alignment::Left, 16, 20, 0, false),
            ElementKind::Dialogue => (Alignment::Left, 10, 15, 0, false),
            ElementKind::Transition => (Alignment::Right, 0, 0, 1, true),
        };
        StyleDefinition {
            name: kind.style_name(),
            alignment,
            left_indent,
            right_indent,
            space_before,
            uppercase,
        }
    }
}

/// An element paired with its resolved style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledParagraph {
    pub element: CanonicalElement,
    pub style: StyleDefinition,
}

/// Resolve every element's style, preserving order.
pub fn build_document(
    elements: Vec<CanonicalElement>,
    styles: &dyn StyleLookup,
    template: &str,
) -> Vec<StyledParagraph> {
    elements
        .into_iter()
        .map(|element| StyledParagraph {
            style: styles.style_for(element.kind, template),
            element,
        })
        .collect()
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render styled paragraphs as monospaced text `width` columns wide.
pub fn render_plain(paragraphs: &[StyledParagraph], width: usize) -> String {
    let mut out = String::new();
    for (i, para) in paragraphs.iter().enumerate() {
        let style = &para.style;
        if i > 0 {
            out.push_str(&"\n".repeat(style.space_before));
        }

        let column = width
            .saturating_sub(style.left_indent + style.right_indent)
            .max(1);
        let text = if style.uppercase {
            para.element.text.to_uppercase()
        } else {
            para.element.text.clone()
        };

        for line in wrap(&text, column) {
            let len = line.chars().count();
            let pad = match style.alignment {
                Alignment::Left => style.left_indent,
                Alignment::Center => style.left_indent + column.saturating_sub(len) / 2,
                Alignment::Right => style.left_indent + column.saturating_sub(len),
            };
            out.push_str(&" ".repeat(pad));
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
