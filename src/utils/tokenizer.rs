use crate::index::types::FieldValue;

/// Minimum length of a searchable term.
pub const MIN_TERM_LENGTH: usize = 2;

/// Split free text into searchable terms.
///
/// Text is lowercased, every character other than `[a-z0-9]` acts as a
/// separator, and fragments shorter than [`MIN_TERM_LENGTH`] are dropped.
/// Order and duplicates are preserved; callers that need a set de-duplicate
/// themselves. Absent and empty input both produce an empty vector.
pub fn tokenize(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };

    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars().flat_map(char::to_lowercase) {
        match classify_char(ch) {
            CharType::Term => current.push(ch),
            CharType::Separator => flush_token(&mut tokens, &mut current),
        }
    }
    flush_token(&mut tokens, &mut current);

    tokens
}

/// Normalize a field value for exact-match lookups.
///
/// Used on both sides of the field index: when values are registered during
/// construction and when filter values are looked up at query time.
/// Text is lowercased; numbers and booleans pass through unchanged.
pub fn normalize_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => FieldValue::Text(text.to_lowercase()),
        other => other.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CharType {
    Term,
    Separator,
}

fn classify_char(ch: char) -> CharType {
    if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
        CharType::Term
    } else {
        CharType::Separator
    }
}

fn flush_token(tokens: &mut Vec<String>, current: &mut String) {
    // Terms are pure ASCII, so byte length equals character count
    if current.len() >= MIN_TERM_LENGTH {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
