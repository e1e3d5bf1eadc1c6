//! Script-aware word counting
//!
//! Scripts written without spaces between words (Han, Hiragana, Katakana,
//! Hangul) count one word per code point. Everything else counts
//! whitespace-delimited tokens. This approximates, and does not replace,
//! linguistic segmentation.
//!
//! Whitespace is Unicode `White_Space`, as in `str::split_whitespace` and
//! `str::trim`. NEXT LINE (U+0085) separates words and the byte order mark
//! (U+FEFF) does not; JavaScript's `\s` and `trim` treat those two the
//! other way round.

/// Whether a character belongs to a script written without inter-word spaces
pub fn is_dense_script(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'     // CJK unified ideographs
            | '\u{3040}'..='\u{309F}' // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
    )
}

/// Count the words of a query
///
/// Dense-script characters count one each; the remaining text, with those
/// characters removed, counts its whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    let dense = text.chars().filter(|&c| is_dense_script(c)).count();
    let sparse: String = text.chars().filter(|&c| !is_dense_script(c)).collect();

    dense + sparse.split_whitespace().count()
}
