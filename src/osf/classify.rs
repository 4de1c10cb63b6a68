//! Fade In style classification.
//!
//! Maps an OSF paragraph's base style and alignment to an [`ElementKind`]
//! and normalizes its text the way the kind is typeset.

use tracing::trace;

use crate::element::{CanonicalElement, ElementKind, Span};

use super::parser::OsfParagraph;

/// Classify a paragraph by its base style and alignment.
///
/// Centered paragraphs are title page text whatever their style: Fade In's
/// title page uses centered "Normal Text".
pub fn classify_style(base_style: Option<&str>, alignment: Option<&str>) -> ElementKind {
    let alignment = alignment.map(|a| a.trim().to_lowercase());
    if alignment.as_deref() == Some("center") {
        return ElementKind::Title;
    }

    let style = base_style.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    match style.as_str() {
        "scene heading" => ElementKind::Slugline,
        "action" | "normal text" => ElementKind::Action,
        "character" => ElementKind::Character,
        "parenthetical" => ElementKind::Parenthetical,
        "dialogue" => ElementKind::Dialogue,
        "transition" => ElementKind::Transition,
        "shot" => ElementKind::Shot,
        _ if alignment.as_deref() == Some("right") => ElementKind::Transition,
        _ => ElementKind::Action,
    }
}

fn forces_uppercase(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Slugline | ElementKind::Character | ElementKind::Transition | ElementKind::Shot
    )
}

/// Classify a paragraph and normalize its text, keeping run formatting
/// attached to the normalized byte ranges.
pub fn classify_paragraph(para: &OsfParagraph) -> CanonicalElement {
    let kind = classify_style(para.base_style.as_deref(), para.alignment.as_deref());
    let upper = forces_uppercase(kind);

    // Each output char remembers the run it came from, so case mapping that
    // changes lengths and the dash substitution keep spans aligned.
    let mut chars: Vec<(char, usize)> = Vec::new();
    for (index, run) in para.runs.iter().enumerate() {
        if upper {
            chars.extend(run.text.chars().flat_map(char::to_uppercase).map(|c| (c, index)));
        } else {
            chars.extend(run.text.chars().map(|c| (c, index)));
        }
    }

    if kind == ElementKind::Slugline {
        // Non-overlapping: the space after a replaced dash cannot start the next match
        let mut i = 1;
        while i + 1 < chars.len() {
            if chars[i].0 == '-' && chars[i - 1].0 == ' ' && chars[i + 1].0 == ' ' {
                chars[i].0 = '\u{2013}';
                i += 3;
            } else {
                i += 1;
            }
        }
    }

    let mut text = String::with_capacity(chars.len());
    let mut runs: Vec<Span> = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (c, index) in chars {
        let at = text.len();
        text.push(c);
        match current {
            Some((run, _)) if run == index => {}
            _ => {
                if let Some((run, start)) = current {
                    runs.push(make_span(para, run, start..at, kind));
                }
                current = Some((index, at));
            }
        }
    }
    if let Some((run, start)) = current {
        runs.push(make_span(para, run, start..text.len(), kind));
    }

    trace!(%kind, text = %text, "classified OSF paragraph");
    CanonicalElement { kind, text, runs }
}

fn make_span(
    para: &OsfParagraph,
    run: usize,
    range: std::ops::Range<usize>,
    kind: ElementKind,
) -> Span {
    let source = &para.runs[run];
    Span {
        range,
        bold: source.bold,
        italic: source.italic,
        underline: source.underline,
        size: if kind == ElementKind::Title {
            source.size
        } else {
            None
        },
    }
}

/// Classify every paragraph, in order.
pub fn classify_document(paragraphs: &[OsfParagraph]) -> Vec<CanonicalElement> {
    paragraphs.iter().map(classify_paragraph).collect()
}
