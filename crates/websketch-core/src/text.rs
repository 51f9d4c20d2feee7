//! Text normalization, classification, and the short structural digest.
//!
//! Raw page text never enters the IR. Capture tools reduce each text run to
//! a [`TextSignal`]: a coarse kind, the normalized length, and a short
//! digest of the normalized form. The normalization pipeline applies:
//!
//! 1. Invisible-character stripping (zero-width spaces/joiners, BOM, soft
//!    hyphen, word joiner, directional controls)
//! 2. Whitespace-run collapsing to a single ASCII space
//! 3. Leading/trailing trim
//! 4. Lowercasing
//!
//! The pipeline is idempotent: `normalize_text(normalize_text(s))` equals
//! `normalize_text(s)`.
//!
//! The short digest is a djb2 fold over UTF-16 code units. That unit of
//! account is a wire contract shared with other implementations of the IR
//! (`short_hash("hello") == "0a9cede7"`), so the fold is hand-rolled here
//! rather than delegated to an ecosystem hasher.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Normalized length at or below which text is classified [`TextKind::Short`].
pub const SHORT_MAX_LEN: u32 = 20;

/// Normalized length at or below which text is classified [`TextKind::Sentence`].
pub const SENTENCE_MAX_LEN: u32 = 150;

// ---------------------------------------------------------------------------
// Text signals
// ---------------------------------------------------------------------------

/// Coarse classification of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// No text after normalization.
    None,
    /// Up to [`SHORT_MAX_LEN`] normalized units: labels, buttons, captions.
    Short,
    /// Up to [`SENTENCE_MAX_LEN`] normalized units.
    Sentence,
    Paragraph,
    /// The raw text contained two or more blank-line paragraph breaks,
    /// regardless of length.
    Mixed,
}

impl TextKind {
    pub const ALL: [TextKind; 5] = [
        TextKind::None,
        TextKind::Short,
        TextKind::Sentence,
        TextKind::Paragraph,
        TextKind::Mixed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TextKind::None => "none",
            TextKind::Short => "short",
            TextKind::Sentence => "sentence",
            TextKind::Paragraph => "paragraph",
            TextKind::Mixed => "mixed",
        }
    }

    /// Parse a serialized kind tag. Returns `None` outside the closed set.
    #[must_use]
    pub fn parse(tag: &str) -> Option<TextKind> {
        TextKind::ALL.iter().copied().find(|k| k.as_str() == tag)
    }
}

/// Privacy-preserving summary of a node's text content.
///
/// A [`TextKind::None`] signal carries neither `len` nor `hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSignal {
    pub kind: TextKind,
    /// UTF-16 code-unit count of the normalized text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
    /// [`short_hash`] of the normalized text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl TextSignal {
    /// The signal for absent text.
    #[must_use]
    pub const fn none() -> Self {
        TextSignal {
            kind: TextKind::None,
            len: None,
            hash: None,
        }
    }

    /// Build the signal for a raw text run: classify, then record the
    /// normalized length and short digest.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let kind = classify_text(raw);
        if kind == TextKind::None {
            return TextSignal::none();
        }
        let normalized = normalize_text(raw);
        TextSignal {
            kind,
            len: Some(utf16_len(&normalized)),
            hash: Some(short_hash(&normalized)),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Invisible characters stripped before whitespace handling: zero-width
/// space/joiner/non-joiner, BOM, soft hyphen, word joiner, Mongolian vowel
/// separator, and bidirectional embedding/isolate controls.
const fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200D}'
            | '\u{FEFF}'
            | '\u{00AD}'
            | '\u{2060}'
            | '\u{180E}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
    )
}

/// Canonical form of a raw text run: invisibles stripped, whitespace runs
/// collapsed to one ASCII space, trimmed, lowercased.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if is_invisible(c) {
            continue;
        }
        if c.is_whitespace() {
            // Collapse the run; a leading run never emits.
            pending_space = !collapsed.is_empty();
            continue;
        }
        if pending_space {
            collapsed.push(' ');
            pending_space = false;
        }
        collapsed.push(c);
    }
    collapsed.to_lowercase()
}

/// Number of maximal whitespace runs in `raw` containing at least two
/// newlines — the paragraph breaks that mark text as [`TextKind::Mixed`].
fn paragraph_breaks(raw: &str) -> usize {
    let mut breaks = 0;
    let mut newlines_in_run = 0;
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            in_run = true;
            if c == '\n' {
                newlines_in_run += 1;
            }
        } else {
            if in_run && newlines_in_run >= 2 {
                breaks += 1;
            }
            in_run = false;
            newlines_in_run = 0;
        }
    }
    if in_run && newlines_in_run >= 2 {
        breaks += 1;
    }
    breaks
}

/// Classify a raw text run.
///
/// Two or more paragraph breaks force [`TextKind::Mixed`] regardless of
/// length; otherwise classification is by normalized length.
#[must_use]
pub fn classify_text(raw: &str) -> TextKind {
    if paragraph_breaks(raw) >= 2 {
        return TextKind::Mixed;
    }
    let normalized = normalize_text(raw);
    if normalized.is_empty() {
        return TextKind::None;
    }
    let len = utf16_len(&normalized);
    if len <= SHORT_MAX_LEN {
        TextKind::Short
    } else if len <= SENTENCE_MAX_LEN {
        TextKind::Sentence
    } else {
        TextKind::Paragraph
    }
}

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// Length of `s` in UTF-16 code units, the unit both [`short_hash`] and
/// [`TextSignal::len`] are defined over.
#[must_use]
pub fn utf16_len(s: &str) -> u32 {
    let units = s.encode_utf16().count();
    u32::try_from(units).unwrap_or(u32::MAX)
}

/// Short structural digest: a djb2 fold over UTF-16 code units, rendered as
/// 8 lowercase hex characters.
///
/// This digest trades collision resistance for speed and cross-language
/// stability. It must never be used where an adversary controls the input
/// and collisions matter; see [`sha256_hex`] for the strong variant.
#[must_use]
pub fn short_hash(input: &str) -> String {
    let mut h: u32 = 5381;
    for unit in input.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_add(h) ^ u32::from(unit);
    }
    format!("{h:08x}")
}

/// Real SHA-256 over `text`, rendered as 64 lowercase hex characters.
///
/// Capture tools use this for text hashes that are stored and later compared
/// across tools. The fingerprint and diff engines never call it; they stay
/// on the [`short_hash`] path.
#[must_use]
pub fn sha256_hex(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn golden_hello_digest() {
        assert_eq!(short_hash("hello"), "0a9cede7");
    }

    #[test]
    fn short_hash_is_eight_lowercase_hex() {
        for input in ["", "a", "hello", "Grüße, Welt", "🦀🦀🦀"] {
            let digest = short_hash(input);
            assert_eq!(digest.len(), 8);
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn short_hash_folds_utf16_code_units() {
        // A surrogate pair must contribute two units, not one scalar value.
        let crab = "🦀";
        let mut h: u32 = 5381;
        for unit in crab.encode_utf16() {
            h = h.wrapping_shl(5).wrapping_add(h) ^ u32::from(unit);
        }
        assert_eq!(short_hash(crab), format!("{h:08x}"));
        assert_eq!(crab.encode_utf16().count(), 2);
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_text("  Hello\t\n  World  "), "hello world");
    }

    #[test]
    fn normalize_strips_invisibles() {
        assert_eq!(normalize_text("He\u{200B}llo\u{FEFF} Wor\u{00AD}ld"), "hello world");
        assert_eq!(normalize_text("\u{202A}Left\u{202C} right\u{2066}end\u{2069}"), "left rightend");
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_text("LOGIN"), "login");
        assert_eq!(normalize_text("Straße"), "straße");
    }

    #[test]
    fn normalize_of_whitespace_only_is_empty() {
        assert_eq!(normalize_text(" \t\n \u{00A0} "), "");
    }

    #[test]
    fn classify_by_length_bands() {
        assert_eq!(classify_text(""), TextKind::None);
        assert_eq!(classify_text("   "), TextKind::None);
        assert_eq!(classify_text("Sign in"), TextKind::Short);
        assert_eq!(classify_text(&"a".repeat(20)), TextKind::Short);
        assert_eq!(classify_text(&"a".repeat(21)), TextKind::Sentence);
        assert_eq!(classify_text(&"a".repeat(150)), TextKind::Sentence);
        assert_eq!(classify_text(&"a".repeat(151)), TextKind::Paragraph);
    }

    #[test]
    fn classify_mixed_needs_two_paragraph_breaks() {
        assert_eq!(classify_text("one\n\ntwo"), TextKind::Short);
        assert_eq!(classify_text("one\n\ntwo\n\nthree"), TextKind::Mixed);
        assert_eq!(classify_text("one\n \t\ntwo\r\n\r\nthree"), TextKind::Mixed);
    }

    #[test]
    fn classify_mixed_ignores_single_long_gap() {
        // One maximal whitespace run, however many newlines it holds, is a
        // single paragraph break.
        assert_eq!(classify_text("one\n\n\n\n\ntwo"), TextKind::Short);
    }

    #[test]
    fn classify_mixed_wins_over_length() {
        let long = format!("{}\n\n{}\n\n{}", "a".repeat(200), "b".repeat(200), "c");
        assert_eq!(classify_text(&long), TextKind::Mixed);
    }

    #[test]
    fn signal_for_empty_text_omits_len_and_hash() {
        assert_eq!(TextSignal::from_raw("  \n "), TextSignal::none());
    }

    #[test]
    fn signal_records_normalized_len_and_hash() {
        let signal = TextSignal::from_raw("  Hello  ");
        assert_eq!(signal.kind, TextKind::Short);
        assert_eq!(signal.len, Some(5));
        assert_eq!(signal.hash.as_deref(), Some(short_hash("hello").as_str()));
    }

    #[test]
    fn signal_serde_round_trip() {
        let signal = TextSignal::from_raw("Welcome back");
        let json = serde_json::to_string(&signal).expect("serialize signal");
        let back: TextSignal = serde_json::from_str(&json).expect("deserialize signal");
        assert_eq!(back, signal);

        let none = serde_json::to_string(&TextSignal::none()).expect("serialize none");
        assert_eq!(none, r#"{"kind":"none"}"#);
    }

    #[test]
    fn sha256_matches_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in ".{0,200}") {
            let once = normalize_text(&raw);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn normalized_text_has_no_runs_or_edges(raw in ".{0,200}") {
            let normalized = normalize_text(&raw);
            prop_assert!(!normalized.starts_with(' '));
            prop_assert!(!normalized.ends_with(' '));
            prop_assert!(!normalized.contains("  "));
        }
    }
}
