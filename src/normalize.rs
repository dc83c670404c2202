//! Text normalization for noisy OCR output
//!
//! Maps characters the recognizer commonly confuses onto the characters a
//! plate can actually contain, strips everything that cannot appear on a
//! plate, and collapses whitespace. The substitution table is lossy and
//! position-blind: a legitimate letter that collides with a mapped digit
//! (e.g. a real "G" in a series code) is irreversibly converted. Accepted
//! tradeoff - the pattern recognizers downstream are built around the
//! substituted alphabet.

/// Substitutions for common recognizer confusions. Non-overlapping, so
/// application order does not matter.
const SUBSTITUTIONS: &[(char, char)] = &[
    ('*', '-'),
    (':', '-'),
    ('I', '1'),
    ('O', '0'),
    ('S', '5'),
    ('B', '8'),
    ('G', '6'),
    ('Z', '2'),
    ('D', '0'),
    ('Q', '0'),
    ('U', '0'),
    ('C', '0'),
    ('L', '1'),
    ('J', '1'),
    ('|', '1'),
];

/// Quote and bracket noise removed outright
const DROPPED: &[char] = &['"', '\'', '[', ']', '(', ')'];

/// Normalize one raw OCR reading for pattern matching
///
/// Uppercases, applies the confusion table, strips characters outside
/// `[A-Z0-9 \-.]` and collapses runs of whitespace. Idempotent: normalizing
/// an already-normalized string returns it unchanged.
pub fn normalize(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());

    for ch in raw.chars() {
        let ch = ch.to_ascii_uppercase();
        if DROPPED.contains(&ch) {
            continue;
        }
        let ch = SUBSTITUTIONS
            .iter()
            .find(|(from, _)| *from == ch)
            .map(|(_, to)| *to)
            .unwrap_or(ch);

        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' || ch.is_whitespace() {
            cleaned.push(ch);
        }
    }

    // Collapse whitespace runs and trim
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
