//! Line predicates for plain-text screenplays.
//!
//! All predicates take an already uppercased, trimmed line unless noted.

/// Scene heading prefixes
pub const SLUGLINE_PREFIXES: &[&str] = &["INT.", "EXT.", "INT/EXT.", "EXT/INT.", "I/E.", "EST."];

/// Transitions recognized by exact match
pub const KNOWN_TRANSITIONS: &[&str] = &[
    "FADE IN:",
    "FADE IN.",
    "FADE OUT.",
    "FADE OUT:",
    "FADE OUT",
    "FADE TO BLACK.",
    "FADE TO BLACK:",
    "FADE TO:",
    "CUT TO:",
    "CUT TO BLACK.",
    "SMASH CUT TO:",
    "MATCH CUT TO:",
    "JUMP CUT TO:",
    "DISSOLVE TO:",
    "INTERCUT WITH:",
    "BACK TO:",
    "THE END",
    "THE END.",
];

/// Camera direction prefixes
pub const SHOT_PREFIXES: &[&str] = &[
    "ANGLE ON",
    "CLOSE ON",
    "CLOSE-UP",
    "CLOSEUP",
    "CU ",
    "ECU ",
    "EXTREME CLOSE",
    "WIDE SHOT",
    "WIDE ON",
    "MEDIUM SHOT",
    "TWO SHOT",
    "ESTABLISHING SHOT",
    "AERIAL",
    "POV",
    "TRACKING",
    "DOLLY",
    "PAN",
    "TILT",
    "OVER",
    "ON ",
    "BACK ON",
    "REVERSE ANGLE",
];

/// Sound and voice-over prefixes
const SFX_PREFIXES: &[&str] = &["SFX", "VO", "V.O."];

/// Longest line still treated as a character cue
pub const MAX_CHARACTER_CUE_LEN: usize = 35;

/// Longest line the `...:` transition catch-all applies to
pub const MAX_COLON_TRANSITION_LEN: usize = 30;

/// `prefix` at the start of `line`, not running into a longer word.
fn starts_with_word(line: &str, prefix: &str) -> bool {
    match line.strip_prefix(prefix) {
        Some(rest) => {
            prefix.ends_with(|c: char| !c.is_alphanumeric())
                || !rest.starts_with(|c: char| c.is_alphanumeric())
        }
        None => false,
    }
}

pub fn is_slugline(upper: &str) -> bool {
    SLUGLINE_PREFIXES.iter().any(|p| upper.starts_with(p))
}

pub fn is_act_heading(upper: &str) -> bool {
    upper == "ACT" || upper.starts_with("ACT ")
}

pub fn is_known_transition(upper: &str) -> bool {
    KNOWN_TRANSITIONS.contains(&upper)
}

pub fn is_transition(upper: &str) -> bool {
    upper.ends_with("TO:")
        || is_known_transition(upper)
        || (upper.ends_with(':') && upper.chars().count() <= MAX_COLON_TRANSITION_LEN)
}

pub fn is_insert(upper: &str) -> bool {
    upper.starts_with("INSERT")
}

pub fn is_sfx(upper: &str) -> bool {
    SFX_PREFIXES.iter().any(|p| starts_with_word(upper, p))
}

/// Single-word prefixes must end at a word boundary, which is stricter than
/// a plain prefix test: `PANTING, SHE RUNS.` is not a shot.
pub fn is_shot(upper: &str) -> bool {
    SHOT_PREFIXES.iter().any(|p| starts_with_word(upper, p))
}

/// Character cue test on the trimmed line as written (not uppercased).
pub fn is_character_cue(line: &str) -> bool {
    !line.is_empty()
        && line.chars().count() <= MAX_CHARACTER_CUE_LEN
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || " .'-()".contains(c))
        && line.chars().any(|c| c.is_ascii_alphabetic())
        && line == line.to_uppercase()
}

/// Parenthetical test on the trimmed line as written.
pub fn is_parenthetical(line: &str) -> bool {
    line.starts_with('(') && line.contains(')')
}
