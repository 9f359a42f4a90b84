//! Text helpers shared by the classifier and the extractor.

/// Count occurrences of `phrase` in `haystack`
///
/// Both arguments are expected to be lowercase already. When the phrase starts
/// or ends with an alphanumeric ASCII character, the match must sit on a word
/// boundary at that end, so `rats` does not match inside `narrates` while
/// `p<` still matches `(p<0.001)`. Phrases in scripts without word spacing
/// (Chinese, Japanese) are plain substring matches. Counted matches never
/// overlap, but a candidate rejected at a word boundary does not hide a valid
/// match that starts inside it.
pub fn count_phrase(haystack: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }

    let check_start = phrase.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let check_end = phrase.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());

    let mut count = 0;
    let mut pos = 0;
    while let Some(offset) = haystack[pos..].find(phrase) {
        let start = pos + offset;
        let end = start + phrase.len();
        let start_ok = !check_start
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
        let end_ok = !check_end
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());

        if start_ok && end_ok {
            count += 1;
            pos = end;
        } else {
            // A rejected candidate may still overlap a valid match further on
            pos = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

/// Whether `phrase` occurs in `haystack` (same matching rules as [`count_phrase`])
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    count_phrase(haystack, phrase) > 0
}

/// Collapse every run of whitespace into a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Limit `text` to `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", text[..byte_idx].trim_end()),
    }
}

/// Strip leading separator punctuation left behind by a heading (`:`, `-`, `—`)
pub fn trim_leading_separators(text: &str) -> &str {
    text.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '：' | '-' | '–' | '—' | '.' | '|')
    })
}
