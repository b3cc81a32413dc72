use log::warn;

use crate::core::model::TextSegment;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentResult {
    pub matched: usize,
    pub unmatched: usize,
}

/// Character position of the first occurrence of `needle` in `haystack` at
/// or after character position `from`.
pub fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let start = haystack
        .char_indices()
        .nth(from)
        .map(|(byte, _)| byte)
        .or_else(|| (haystack.chars().count() == from).then_some(haystack.len()))?;
    let found = haystack[start..].find(needle)?;
    Some(from + haystack[start..start + found].chars().count())
}

/// Locates each word's text inside the authoritative line text and assigns
/// its page offset. The search cursor moves to the start of the latest
/// match, so repeated tokens next to each other still resolve. Words that
/// cannot be found keep an unset offset.
pub fn align_words(line_text: &str, line_offset: usize, words: &mut [TextSegment]) -> AlignmentResult {
    let mut result = AlignmentResult::default();
    let mut cursor = 0;

    for word in words.iter_mut() {
        word.text_range = word.char_len();
        match find_from(line_text, word.text_str(), cursor) {
            Some(pos) => {
                word.text_offset = Some(line_offset + pos);
                cursor = pos;
                result.matched += 1;
            }
            None => {
                warn!(
                    "word zone '{}' not found in line text '{}'",
                    word.text_str(),
                    line_text
                );
                word.text_offset = None;
                result.unmatched += 1;
            }
        }
    }

    result
}
