//! Word-preserving text splitting.
//!
//! Lengths are counted in Unicode scalar values, never bytes, so a cut can
//! never land inside a multi-byte character.

use speechbox_core::TextChunk;

/// Split `text` into ordered chunks of at most `max_chars` characters.
///
/// The text is trimmed first. While more than `max_chars` characters remain,
/// the cut goes at the last space at or before character offset `max_chars`;
/// a word longer than the limit is cut exactly at `max_chars`. Every chunk is
/// trimmed and non-empty. Empty input yields no chunks.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    while !remaining.is_empty() {
        let (head, rest) = split_once_at_limit(remaining, max_chars);
        let head = head.trim();
        if !head.is_empty() {
            chunks.push(TextChunk::new(chunks.len(), head));
        }
        remaining = rest.trim();
    }

    chunks
}

/// Split off the next chunk. Returns `(chunk, rest)`.
fn split_once_at_limit(text: &str, max_chars: usize) -> (&str, &str) {
    // Byte offset of the character at position `max_chars`; `None` means the
    // whole text fits.
    let Some((hard_cut, _)) = text.char_indices().nth(max_chars) else {
        return (text, "");
    };

    // The space search window includes the character at `max_chars` itself,
    // so a space right after a full-length word still counts.
    let window_end = text
        .char_indices()
        .nth(max_chars + 1)
        .map_or(text.len(), |(i, _)| i);

    match text[..window_end].rfind(' ') {
        Some(space) if space > 0 => text.split_at(space),
        _ => text.split_at(hard_cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(split_into_chunks("", 200).is_empty());
        assert!(split_into_chunks("  \n\t  ", 200).is_empty());
    }

    #[test]
    fn short_text_is_one_trimmed_chunk() {
        let chunks = split_into_chunks("   Hello, world.  ", 200);
        assert_eq!(texts(&chunks), vec!["Hello, world."]);
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn exactly_at_limit_is_one_chunk() {
        let text = "a".repeat(200);
        let chunks = split_into_chunks(&text, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].char_len(), 200);
    }

    #[test]
    fn splits_at_last_space_before_limit() {
        let chunks = split_into_chunks("aaaa bbbb cccc", 10);
        assert_eq!(texts(&chunks), vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn space_exactly_at_limit_is_used() {
        // 'x' * 10 followed by a space at offset 10.
        let chunks = split_into_chunks("xxxxxxxxxx yyy", 10);
        assert_eq!(texts(&chunks), vec!["xxxxxxxxxx", "yyy"]);
    }

    #[test]
    fn long_word_is_cut_mid_word() {
        let chunks = split_into_chunks("abcdefghijklmnop qr", 5);
        assert_eq!(texts(&chunks), vec!["abcde", "fghij", "klmno", "p qr"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(7);
        let chunks = split_into_chunks(&text, 3);
        assert_eq!(texts(&chunks), vec!["ééé", "ééé", "é"]);
    }

    #[test]
    fn long_text_rejoins_to_original() {
        let sentence = "The quick brown fox jumps over the lazy dog.";
        let text = std::iter::repeat_n(sentence, 20).collect::<Vec<_>>().join(" ");

        let chunks = split_into_chunks(&text, 200);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert!(chunk.char_len() <= 200);
            assert!(!chunk.text.is_empty());
            assert_eq!(chunk.text, chunk.text.trim());
        }

        let rejoined = texts(&chunks).join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn no_chunk_ends_mid_word_when_spaces_exist() {
        let text = "word ".repeat(100);
        for chunk in split_into_chunks(&text, 42) {
            assert!(chunk.text.split(' ').all(|w| w == "word"));
        }
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        let chunks = split_into_chunks("ab", 0);
        assert_eq!(texts(&chunks), vec!["a", "b"]);
    }
}
