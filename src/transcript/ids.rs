//! Derived deletion-id schemes
//!
//! Pauses and silences are never persisted as entities; they are addressed by
//! ids derived from the words and clips around them. Two generations of pause
//! ids exist in saved projects, so every site that resolves membership checks
//! all accepted formats.

/// Id for a deleted silence-detector segment.
pub fn silence_id(clip_index: usize, segment_id: &str) -> String {
    format!("silence-{clip_index}-{segment_id}")
}

/// Accepted ids for a leading pause (clip start to first word).
///
/// The bare form is current; the `-first-word` suffix appears in older
/// project files.
pub fn leading_pause_ids(clip_index: usize) -> Vec<String> {
    vec![
        format!("pause-before-clip-{clip_index}"),
        format!("pause-before-clip-{clip_index}-first-word"),
    ]
}

/// Accepted ids for an inter-word pause.
///
/// `pause-after-{w1}` is current; `pause-clip-{n}-{w1}-{w2}` is the previous
/// generation and still resolves.
pub fn between_pause_ids(clip_index: usize, word_before: &str, word_after: &str) -> Vec<String> {
    vec![
        format!("pause-after-{word_before}"),
        format!("pause-clip-{clip_index}-{word_before}-{word_after}"),
    ]
}

/// Accepted ids for a trailing pause (last word to clip end). The trailing
/// gap follows the clip's last word, so it shares the after-word scheme.
pub fn trailing_pause_ids(last_word: &str) -> Vec<String> {
    vec![format!("pause-after-{last_word}")]
}
