/// How an exported line is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only; becomes an empty paragraph
    Blank,
    /// Looks like a speaker name; becomes a bold paragraph
    Header,
    /// Anything else; becomes a normal paragraph
    Body,
}

/// Classify a plain-text transcript line.
///
/// Speaker headers are re-detected from their casing: a trimmed line that
/// is fully upper-case or title-case counts as a header. A lower-case
/// speaker name is therefore rendered as body text, and a title-case
/// sentence is rendered bold.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if is_upper(trimmed) || is_title(trimmed) {
        LineKind::Header
    } else {
        LineKind::Body
    }
}

/// Letters of the Unicode titlecase category (Lt), e.g. `ǅ`
pub fn is_titlecase(ch: char) -> bool {
    matches!(
        ch,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// At least one cased character, and no lower-case or titlecase ones
pub fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() || is_titlecase(ch) {
            return false;
        }
        if ch.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// At least one cased character; upper-case and titlecase letters only
/// start a word and lower-case letters only continue one
pub fn is_title(text: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;

    for ch in text.chars() {
        if ch.is_uppercase() || is_titlecase(ch) {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if ch.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }

    cased
}
