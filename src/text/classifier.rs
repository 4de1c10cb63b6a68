//! Line classifier for unstructured screenplay text.
//!
//! A single pass over the lines with a small amount of state: whether we
//! are still on the title page, which title page lines have been seen, and
//! whether the previous line opened a dialogue block.

use tracing::{debug, trace};

use crate::element::{CanonicalElement, ElementKind};

use super::patterns::*;

/// Per-document classification state. Never shared across documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierState {
    pub in_title_page: bool,
    pub saw_body_slugline: bool,
    pub saw_title_line: bool,
    pub saw_author_line: bool,
    pub expecting_dialogue: bool,
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self {
            in_title_page: true,
            saw_body_slugline: false,
            saw_title_line: false,
            saw_author_line: false,
            expecting_dialogue: false,
        }
    }
}

/// Plain-text screenplay classifier
#[derive(Debug, Default)]
pub struct PlainTextClassifier {
    state: ClassifierState,
}

impl PlainTextClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Classify one line. Blank lines return `None` and end any dialogue block.
    pub fn classify_line(&mut self, line: &str) -> Option<ElementKind> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.state.expecting_dialogue = false;
            return None;
        }

        let upper = trimmed.to_uppercase();

        if self.state.in_title_page {
            if is_slugline(&upper) || is_act_heading(&upper) || is_known_transition(&upper) {
                debug!(line = trimmed, "leaving title page");
                self.state.in_title_page = false;
            } else {
                return Some(self.classify_title_line(trimmed));
            }
        }

        let kind = self.classify_body_line(trimmed, &upper);
        trace!(%kind, line = trimmed, "classified line");
        Some(kind)
    }

    fn classify_title_line(&mut self, line: &str) -> ElementKind {
        let lower = line.to_lowercase();
        if ["contact", "@", "tel", "phone"].iter().any(|k| lower.contains(k)) {
            ElementKind::Contact
        } else if ["draft", "copyright", "(c)", "\u{a9}"].iter().any(|k| lower.contains(k)) {
            ElementKind::Draft
        } else if !self.state.saw_title_line {
            self.state.saw_title_line = true;
            ElementKind::Title
        } else if !self.state.saw_author_line {
            self.state.saw_author_line = true;
            ElementKind::Author
        } else {
            // Generic front matter
            ElementKind::Action
        }
    }

    fn classify_body_line(&mut self, line: &str, upper: &str) -> ElementKind {
        let expecting = self.state.expecting_dialogue;
        self.state.expecting_dialogue = false;

        if is_slugline(upper) {
            self.state.saw_body_slugline = true;
            ElementKind::Slugline
        } else if is_act_heading(upper) {
            ElementKind::Act
        } else if is_transition(upper) {
            ElementKind::Transition
        } else if is_insert(upper) {
            ElementKind::Insert
        } else if is_sfx(upper) {
            ElementKind::Sfx
        } else if is_shot(upper) {
            ElementKind::Shot
        } else if is_character_cue(line) {
            self.state.expecting_dialogue = true;
            ElementKind::Character
        } else if expecting && is_parenthetical(line) {
            self.state.expecting_dialogue = true;
            ElementKind::Parenthetical
        } else if expecting {
            self.state.expecting_dialogue = true;
            ElementKind::Dialogue
        } else {
            ElementKind::Action
        }
    }

    /// Classify a whole document. Never fails; unrecognized lines are Action.
    pub fn classify(text: &str) -> Vec<CanonicalElement> {
        let mut classifier = Self::new();
        let text = normalize_line_endings(text);

        let elements: Vec<CanonicalElement> = text
            .split('\n')
            .filter_map(|line| {
                classifier
                    .classify_line(line)
                    .map(|kind| CanonicalElement::new(kind, line.trim()))
            })
            .collect();

        debug!(
            elements = elements.len(),
            in_title_page = classifier.state.in_title_page,
            "classified plain text"
        );
        elements
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
